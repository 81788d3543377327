//! Property tests over generated floors and randomly played runs.

use proptest::prelude::*;
use void_reckoning::{
    generate_floor, reachable_from, ClassArchetype, LevelUpReward, Position, RulesConfig,
    SeededRng, TileKind, TurnMachine, TurnPhase, ENTRY_POSITION,
};

/// One scripted player action.
#[derive(Debug, Clone, Copy)]
enum Move {
    Click(i32, i32),
    EndTurn,
}

fn moves() -> impl Strategy<Value = Vec<Move>> {
    prop::collection::vec(
        prop_oneof![
            4 => (-2_i32..=2, -2_i32..=2).prop_map(|(dx, dy)| Move::Click(dx, dy)),
            1 => Just(Move::EndTurn),
        ],
        1..60,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_floors_are_fully_reachable(seed in any::<u64>(), floor in 1_u32..=8) {
        let rules = RulesConfig::default();
        let mut rng = SeededRng::new(seed);
        let generated = generate_floor(&rules, floor, &mut rng).unwrap();
        let grid = &generated.grid;

        prop_assert_eq!(generated.entry, ENTRY_POSITION);
        prop_assert_eq!(grid.kind_at(ENTRY_POSITION), Some(TileKind::Floor));

        let reachable = reachable_from(grid, generated.entry);
        for pos in grid.positions() {
            let traversable = grid.kind_at(pos).map_or(false, |kind| kind.is_traversable());
            prop_assert_eq!(
                traversable,
                reachable.contains(&pos),
                "seed={}, floor={}, tile {:?}",
                seed,
                floor,
                pos
            );
        }

        let mut seen = Vec::new();
        for enemy in &generated.enemies {
            prop_assert_eq!(grid.kind_at(enemy.position), Some(TileKind::Floor));
            prop_assert_ne!(enemy.position, ENTRY_POSITION);
            prop_assert!(!seen.contains(&enemy.position));
            seen.push(enemy.position);
        }
    }

    #[test]
    fn random_play_keeps_stats_in_bounds(seed in any::<u64>(), script in moves()) {
        let mut machine = TurnMachine::new(RulesConfig::instant(), seed);
        machine.select_class(ClassArchetype::Fighter, None).unwrap();

        for step in script {
            while machine.scheduled_delay().is_some() {
                machine.advance().unwrap();
            }
            match machine.phase() {
                TurnPhase::GameOver => break,
                TurnPhase::LevelUp => {
                    machine.choose_level_reward(LevelUpReward::Might);
                    continue;
                }
                TurnPhase::UpgradeSelect => {
                    machine.choose_upgrade(0);
                    continue;
                }
                _ => {}
            }

            match step {
                Move::Click(dx, dy) => {
                    let at = machine.session().player.position;
                    machine.click_tile(Position::new(at.x + dx, at.y + dy));
                }
                Move::EndTurn => {
                    machine.end_turn();
                }
            }

            let session = machine.session();
            let player = &session.player;
            let stats = player.stats();
            prop_assert!(player.hp >= 0 && player.hp <= stats.max_hp);
            prop_assert!(player.action_points <= stats.max_action_points);
            prop_assert!(session.grid.is_walkable(player.position));
            for (index, enemy) in session.enemies.iter().enumerate() {
                prop_assert!(enemy.hp > 0);
                prop_assert_ne!(enemy.position, player.position);
                prop_assert!(session.grid.is_walkable(enemy.position));
                for other in &session.enemies[index + 1..] {
                    prop_assert_ne!(enemy.position, other.position);
                }
            }
            if player.hp == 0 {
                prop_assert_eq!(session.phase, TurnPhase::GameOver);
            }
        }
    }
}
