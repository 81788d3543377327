//! # Void Reckoning Main Entry Point
//!
//! Plays a headless autopilot run through the session driver and prints the
//! board as it goes.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use void_reckoning::{
    greedy_direction, render_ascii, resolve_tile_action, ClassArchetype, Direction, EquipSlot,
    GameSession, ItemSlot, JsonLeaderboard, LeaderboardStore, LevelUpReward, MemoryLeaderboard,
    PlayerInput, ReckoningResult, RulesConfig, SeededRng, SessionDriver, TemplateNarrator,
    TileAction, TimingRules, TurnMachine, TurnPhase,
};

/// Command line arguments for Void Reckoning.
#[derive(Parser, Debug)]
#[command(name = "void-reckoning")]
#[command(about = "A turn-based tactical dungeon crawler, played by autopilot")]
#[command(version)]
struct Args {
    /// Random seed for generation and dice
    #[arg(short, long)]
    seed: Option<u64>,

    /// Class to play: fighter, rogue, warlock or deprived
    #[arg(short, long, default_value = "fighter")]
    class: ClassArchetype,

    /// Name of the soul-seeker
    #[arg(short, long)]
    name: Option<String>,

    /// JSON rules file; missing fields take defaults
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Maximum number of autopilot inputs
    #[arg(long, default_value_t = 200)]
    turns: u32,

    /// JSON leaderboard file to record the run in
    #[arg(long)]
    leaderboard: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Skip presentation delays
    #[arg(long)]
    fast: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(err) = run(args).await {
        error!("Run failed: {}", err);
        std::process::exit(1);
    }
}

fn initialize_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

async fn run(args: Args) -> ReckoningResult<()> {
    info!("Starting Void Reckoning v{}", void_reckoning::VERSION);

    let mut rules = match &args.rules {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::default(),
    };
    if args.fast {
        rules.timing = TimingRules::instant();
    }

    let seed = args
        .seed
        .unwrap_or_else(|| SeededRng::from_entropy().seed());
    info!("Using seed {}", seed);

    let leaderboard: Box<dyn LeaderboardStore> = match &args.leaderboard {
        Some(path) => Box::new(JsonLeaderboard::new(path)),
        None => Box::new(MemoryLeaderboard::new()),
    };
    let machine = TurnMachine::new(rules, seed);
    let mut driver = SessionDriver::new(machine, Arc::new(TemplateNarrator::new()), leaderboard);

    driver
        .submit(PlayerInput::SelectClass {
            class: args.class,
            name: args.name.clone(),
        })
        .await?;
    println!("{}", render_ascii(&driver.machine().snapshot()));

    for _ in 0..args.turns {
        if driver.machine().phase() == TurnPhase::GameOver {
            break;
        }
        let input = autopilot(driver.machine().session());
        let ends_round = matches!(input, PlayerInput::EndTurn);
        let floor = driver.machine().session().floor;

        driver.submit(input).await?;
        driver.collect_narration();

        let session = driver.machine().session();
        if ends_round || session.floor != floor || session.is_game_over() {
            println!("{}", render_ascii(&driver.machine().snapshot()));
        }
    }

    driver.wait_for_narration().await;
    let session = driver.machine().session();
    println!("{}", render_ascii(&driver.machine().snapshot()));
    if session.is_game_over() {
        println!(
            "{} fell on floor {}. Final score: {}",
            session.player.name,
            session.floor,
            session.score()
        );
    } else {
        println!(
            "{} still stands on floor {} after {} turns. Score so far: {}",
            session.player.name,
            session.floor,
            session.turn,
            session.score()
        );
    }

    for (rank, entry) in driver.leaderboard().top(5)?.iter().enumerate() {
        println!(
            "{:>2}. {:<16} {:<9} floor {:>2}  {:>6}",
            rank + 1,
            entry.name,
            entry.class.name(),
            entry.floor,
            entry.score
        );
    }
    Ok(())
}

/// Picks the next input: heal when low, wear anything for an empty slot,
/// attack the nearest enemy in range, otherwise close the distance.
fn autopilot(session: &GameSession) -> PlayerInput {
    let player = &session.player;
    match session.phase {
        TurnPhase::LevelUp => {
            let reward = if player.hp * 2 < player.stats().max_hp {
                LevelUpReward::Vitality
            } else {
                LevelUpReward::Might
            };
            return PlayerInput::ChooseReward(reward);
        }
        TurnPhase::UpgradeSelect => return PlayerInput::ChooseUpgrade(0),
        TurnPhase::PlayerTurn => {}
        _ => return PlayerInput::EndTurn,
    }

    let stats = player.stats();
    if player.hp * 5 < stats.max_hp * 2 {
        let potion = player
            .inventory
            .iter()
            .find(|item| item.slot == ItemSlot::Consumable && item.modifiers.hp > 0);
        if let Some(potion) = potion {
            return PlayerInput::UseItem(potion.id);
        }
    }
    let wearable = player.inventory.iter().find(|item| {
        item.slot
            .equip_slot()
            .map_or(false, |slot| slot_is_empty(session, slot))
    });
    if let Some(item) = wearable {
        return PlayerInput::UseItem(item.id);
    }

    let Some(nearest) = session
        .enemies
        .iter()
        .min_by_key(|enemy| enemy.position.manhattan_distance(player.position))
    else {
        return PlayerInput::EndTurn;
    };

    if matches!(
        resolve_tile_action(session, nearest.position),
        TileAction::Attack(_)
    ) {
        return PlayerInput::ClickTile(nearest.position);
    }

    let preferred = greedy_direction(player.position, nearest.position);
    let mut directions: Vec<Direction> = preferred.into_iter().collect();
    directions.extend(Direction::cardinal().into_iter().filter(|dir| Some(*dir) != preferred));
    let distance = player.position.manhattan_distance(nearest.position);

    for direction in directions {
        let step = player.position.step(direction);
        if step.manhattan_distance(nearest.position) >= distance {
            continue;
        }
        match resolve_tile_action(session, step) {
            TileAction::Move(_) | TileAction::BreakBox(_) => return PlayerInput::ClickTile(step),
            TileAction::Attack(_) | TileAction::Ignore => {}
        }
    }
    PlayerInput::EndTurn
}

fn slot_is_empty(session: &GameSession, slot: EquipSlot) -> bool {
    session.player.equipped.get(slot).is_none()
}
