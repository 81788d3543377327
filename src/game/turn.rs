//! # Turn Machine
//!
//! The orchestrator. [`TurnMachine`] owns the [`GameSession`] and is the only
//! thing that mutates it: resolvers and generators hand back data, and the
//! machine applies it.
//!
//! Transitions are synchronous. Phases that should linger on screen report a
//! delay through [`TurnPhase::scheduled_delay_ms`]; whoever drives the machine
//! waits that long and then calls [`TurnMachine::advance`]. Tests simply call
//! `advance` in a loop.

use crate::config::{RulesConfig, TimingRules};
use crate::game::{
    action_name, apply_damage, apply_level_reward, consume, equip, level_up_ready, learn_skill,
    resolve_attack, resolve_spell, take, unequip, ClassArchetype, EffectiveStats, Entity,
    EquipSlot, GameEvent, GameSession, ItemId, ItemSlot, LevelUpReward, NarrationRequest,
    Position, Side, SkillPool, TileKind,
};
use crate::generation::{generate_floor, LootTable};
use crate::input::{resolve_tile_action, TileAction};
use crate::rendering::RenderSnapshot;
use crate::utils::{greedy_direction, reachable_from, RandomSource, SeededRng};
use crate::ReckoningResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where an animation hands control back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resume {
    PlayerTurn,
    AiTurn { cursor: usize },
}

/// Phase of the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for a class to be picked
    StartMenu,
    /// Narration beat before control passes to the player
    DmPause,
    /// The only phase that accepts tile input
    PlayerTurn,
    /// An attack is playing out; input is inert
    Animating { resume: Resume },
    /// Enemy `cursor` acts next, in roster order
    AiTurn { cursor: usize },
    LevelUp,
    /// Stairs taken or floor cleared; the next floor is generated on advance
    Descending,
    UpgradeSelect,
    GameOver,
}

impl TurnPhase {
    /// Delay before the driver should call [`TurnMachine::advance`].
    ///
    /// `None` means the phase waits for player input instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use void_reckoning::{TimingRules, TurnPhase};
    ///
    /// let timing = TimingRules::default();
    /// assert_eq!(TurnPhase::DmPause.scheduled_delay_ms(&timing), Some(1500));
    /// assert_eq!(TurnPhase::PlayerTurn.scheduled_delay_ms(&timing), None);
    /// ```
    pub fn scheduled_delay_ms(&self, timing: &TimingRules) -> Option<u64> {
        match self {
            TurnPhase::DmPause => Some(timing.dm_pause_ms),
            TurnPhase::Animating { .. } => Some(timing.settle_ms),
            TurnPhase::AiTurn { cursor: 0 } => Some(timing.ai_start_ms),
            TurnPhase::AiTurn { .. } => Some(timing.ai_step_ms),
            TurnPhase::Descending => Some(timing.descend_ms),
            TurnPhase::StartMenu
            | TurnPhase::PlayerTurn
            | TurnPhase::LevelUp
            | TurnPhase::UpgradeSelect
            | TurnPhase::GameOver => None,
        }
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self, TurnPhase::PlayerTurn)
    }
}

/// Whether an input changed anything.
///
/// Invalid input is never an error: it is simply ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Accepted,
    Ignored,
}

impl InputOutcome {
    pub fn is_accepted(self) -> bool {
        self == InputOutcome::Accepted
    }
}

/// Drives one run from the start menu to game over.
pub struct TurnMachine<R: RandomSource = SeededRng> {
    session: GameSession,
    rules: RulesConfig,
    rng: R,
    loot: LootTable,
    skills: SkillPool,
    events: Vec<GameEvent>,
}

impl TurnMachine<SeededRng> {
    /// Creates a machine at the start menu with seeded dice.
    ///
    /// # Examples
    ///
    /// ```
    /// use void_reckoning::{ClassArchetype, RulesConfig, TurnMachine, TurnPhase};
    ///
    /// let mut machine = TurnMachine::new(RulesConfig::instant(), 7);
    /// machine.select_class(ClassArchetype::Fighter, None).unwrap();
    /// assert_eq!(machine.phase(), TurnPhase::DmPause);
    /// machine.advance().unwrap();
    /// assert_eq!(machine.phase(), TurnPhase::PlayerTurn);
    /// ```
    pub fn new(rules: RulesConfig, seed: u64) -> Self {
        Self::with_rng(rules, SeededRng::new(seed))
    }
}

impl<R: RandomSource> TurnMachine<R> {
    pub fn with_rng(rules: RulesConfig, rng: R) -> Self {
        let session = GameSession::new(&rules);
        Self::resume(session, rules, rng)
    }

    /// Picks up an existing session, e.g. one loaded from a save.
    pub fn resume(session: GameSession, rules: RulesConfig, rng: R) -> Self {
        Self {
            session,
            rules,
            rng,
            loot: LootTable::standard(),
            skills: SkillPool::standard(),
            events: Vec::new(),
        }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> TurnPhase {
        self.session.phase
    }

    /// The random source, e.g. to queue more scripted rolls.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.session)
    }

    pub fn scheduled_delay(&self) -> Option<Duration> {
        self.session
            .phase
            .scheduled_delay_ms(&self.rules.timing)
            .map(Duration::from_millis)
    }

    /// Takes every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Appends narration that arrived from the flavor-text service.
    pub fn record_narration(&mut self, text: impl Into<String>) {
        self.session.log.push(text);
    }

    fn emit(&mut self, event: GameEvent) {
        log::debug!("Event: {:?}", event);
        self.session.statistics.update_from_event(&event);
        self.events.push(event);
    }

    /// Starts a run with the chosen class on floor 1.
    ///
    /// Fails only when the first floor cannot be generated, in which case the
    /// machine stays at the start menu.
    pub fn select_class(
        &mut self,
        class: ClassArchetype,
        name: Option<String>,
    ) -> ReckoningResult<InputOutcome> {
        if self.session.phase != TurnPhase::StartMenu {
            return Ok(InputOutcome::Ignored);
        }

        let player = Entity::new_player(name, class);
        let previous = std::mem::replace(&mut self.session.player, player);
        if let Err(err) = self.enter_floor(1) {
            self.session.player = previous;
            return Err(err);
        }
        self.session.turn = 0;
        log::info!(
            "{} the {} enters the void (run {})",
            self.session.player.name,
            class.name(),
            self.session.run_id
        );
        self.session.phase = TurnPhase::DmPause;
        Ok(InputOutcome::Accepted)
    }

    /// Handles a click on a grid tile during the player's turn.
    pub fn click_tile(&mut self, target: Position) -> InputOutcome {
        if !self.session.phase.accepts_input() || self.session.player.action_points == 0 {
            return InputOutcome::Ignored;
        }

        match resolve_tile_action(&self.session, target) {
            TileAction::Attack(id) => match self.session.enemy_index(id) {
                Some(index) => self.player_attack(index),
                None => InputOutcome::Ignored,
            },
            TileAction::BreakBox(pos) => self.player_break_box(pos),
            TileAction::Move(pos) => self.player_move(pos),
            TileAction::Ignore => InputOutcome::Ignored,
        }
    }

    /// Hands the rest of the turn to the enemies.
    pub fn end_turn(&mut self) -> InputOutcome {
        if !self.session.phase.accepts_input() {
            return InputOutcome::Ignored;
        }
        self.begin_ai_turn();
        InputOutcome::Accepted
    }

    /// Equips, drinks or reads an inventory item. Costs no action points.
    pub fn use_item(&mut self, item_id: ItemId) -> InputOutcome {
        if !self.session.phase.accepts_input() {
            return InputOutcome::Ignored;
        }
        let Some(item) = self
            .session
            .player
            .inventory
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
        else {
            return InputOutcome::Ignored;
        };

        match item.slot {
            ItemSlot::Weapon | ItemSlot::Armor | ItemSlot::Accessory | ItemSlot::Hat => {
                let Some(slot) = equip(&mut self.session.player, item_id) else {
                    return InputOutcome::Ignored;
                };
                self.session.log.push(format!("You don the {}.", item.name));
                self.emit(GameEvent::ItemEquipped {
                    name: item.name,
                    slot,
                });
            }
            ItemSlot::Consumable => {
                if consume(&mut self.session.player, item_id).is_none() {
                    return InputOutcome::Ignored;
                }
                self.session.log.push(format!("You drink the {}.", item.name));
                self.emit(GameEvent::ItemConsumed { name: item.name });
            }
            ItemSlot::Scroll => {
                if item.modifiers.teleport && !self.teleport_player() {
                    return InputOutcome::Ignored;
                }
                take(&mut self.session.player, item_id);
                self.session.log.push(format!("The {} crumbles to ash.", item.name));
                if item.modifiers.area_effect {
                    let radius = item.modifiers.range.max(1) as u32;
                    self.scorch_enemies(radius, item.modifiers.attack);
                }
                self.emit(GameEvent::ItemConsumed { name: item.name });
            }
        }

        self.settle_into_player_turn();
        InputOutcome::Accepted
    }

    /// Moves an equipped item back into the inventory.
    pub fn unequip(&mut self, slot: EquipSlot) -> InputOutcome {
        if !self.session.phase.accepts_input() {
            return InputOutcome::Ignored;
        }
        let Some(name) = self.session.player.equipped.get(slot).map(|item| item.name.clone())
        else {
            return InputOutcome::Ignored;
        };
        if unequip(&mut self.session.player, slot).is_none() {
            return InputOutcome::Ignored;
        }
        self.emit(GameEvent::ItemUnequipped { name, slot });
        InputOutcome::Accepted
    }

    /// Casts spell `index` from the spellbook at a tile.
    pub fn cast_spell(&mut self, index: usize, target: Position) -> InputOutcome {
        if !self.session.phase.accepts_input() || self.session.player.action_points == 0 {
            return InputOutcome::Ignored;
        }
        let Some(spell) = self.session.player.spellbook.get(index).cloned() else {
            return InputOutcome::Ignored;
        };
        let player = &self.session.player;
        if player.mana < spell.mana_cost || player.position.manhattan_distance(target) > spell.range
        {
            return InputOutcome::Ignored;
        }

        let targets: Vec<usize> = self
            .session
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| {
                enemy.position == target
                    || (spell.area && enemy.position.manhattan_distance(target) == 1)
            })
            .map(|(index, _)| index)
            .collect();
        if targets.is_empty() {
            return InputOutcome::Ignored;
        }

        self.session.player.spend_action_point();
        self.session.player.mana -= spell.mana_cost;
        self.emit(GameEvent::SpellCast {
            name: spell.name.clone(),
            target,
        });

        let caster = self.session.player.stats();
        let action = format!("casts {} at", spell.name);
        let mut fallen = Vec::new();
        for index in targets {
            let defender = self.session.enemies[index].stats();
            let outcome = resolve_spell(&caster, &spell, &defender, &mut self.rng);
            if self.strike_enemy(index, outcome.roll, outcome.hit, outcome.damage, &action) {
                fallen.push(index);
            }
        }
        for index in fallen.into_iter().rev() {
            self.defeat_enemy(index);
        }

        self.session.phase = TurnPhase::Animating {
            resume: Resume::PlayerTurn,
        };
        InputOutcome::Accepted
    }

    /// Applies the chosen level-up reward.
    pub fn choose_level_reward(&mut self, reward: LevelUpReward) -> InputOutcome {
        if self.session.phase != TurnPhase::LevelUp {
            return InputOutcome::Ignored;
        }
        apply_level_reward(&mut self.session.player, reward, &self.rules.progression);
        let level = self.session.player.level;
        self.session.log.push(format!("You reach level {}.", level));
        self.emit(GameEvent::LevelGained { level, reward });
        self.settle_into_player_turn();
        InputOutcome::Accepted
    }

    /// Learns upgrade offer `index`.
    pub fn choose_upgrade(&mut self, index: usize) -> InputOutcome {
        if self.session.phase != TurnPhase::UpgradeSelect {
            return InputOutcome::Ignored;
        }
        if index >= self.session.upgrade_offers.len() {
            return InputOutcome::Ignored;
        }

        let skill = self.session.upgrade_offers.swap_remove(index);
        self.session.upgrade_offers.clear();
        self.session.log.push(format!("You learn {}.", skill.name));
        let name = skill.name.clone();
        learn_skill(&mut self.session.player, skill);
        self.session.player.restore_action_points();
        self.emit(GameEvent::SkillLearned { name });
        self.session.phase = TurnPhase::DmPause;
        InputOutcome::Accepted
    }

    /// Throws the run away and returns to the start menu. Only valid once
    /// the run is over.
    pub fn restart(&mut self) -> InputOutcome {
        if self.session.phase != TurnPhase::GameOver {
            return InputOutcome::Ignored;
        }
        self.session = GameSession::new(&self.rules);
        self.events.clear();
        InputOutcome::Accepted
    }

    /// Completes a timed phase.
    pub fn advance(&mut self) -> ReckoningResult<()> {
        match self.session.phase {
            TurnPhase::DmPause => self.settle_into_player_turn(),
            TurnPhase::Animating { resume } => match resume {
                Resume::PlayerTurn => self.settle_into_player_turn(),
                Resume::AiTurn { cursor } => self.queue_enemy(cursor),
            },
            TurnPhase::AiTurn { cursor } => self.enemy_act(cursor),
            TurnPhase::Descending => self.descend()?,
            TurnPhase::StartMenu
            | TurnPhase::PlayerTurn
            | TurnPhase::LevelUp
            | TurnPhase::UpgradeSelect
            | TurnPhase::GameOver => {}
        }
        Ok(())
    }

    /// Decides where control goes once an action has played out.
    fn settle_into_player_turn(&mut self) {
        if self.session.is_game_over() {
            return;
        }
        let player = &self.session.player;
        if level_up_ready(player, &self.rules.progression) {
            let level = player.level + 1;
            self.session.phase = TurnPhase::LevelUp;
            self.emit(GameEvent::LevelUpReady { level });
        } else if self.session.enemies.is_empty() {
            self.session.phase = TurnPhase::Descending;
        } else if player.action_points == 0 {
            self.begin_ai_turn();
        } else {
            self.session.phase = TurnPhase::PlayerTurn;
        }
    }

    fn player_attack(&mut self, index: usize) -> InputOutcome {
        self.session.player.spend_action_point();
        let attacker = self.session.player.stats();
        let defender = self.session.enemies[index].stats();
        let outcome = resolve_attack(&attacker, &defender, &self.rules.combat, &mut self.rng);

        let action = action_name(&self.session.player.archetype);
        if self.strike_enemy(index, outcome.roll, outcome.hit, outcome.damage, action) {
            self.defeat_enemy(index);
        }
        self.session.phase = TurnPhase::Animating {
            resume: Resume::PlayerTurn,
        };
        InputOutcome::Accepted
    }

    /// Applies one resolved player hit to an enemy. Returns true if it died;
    /// removal is left to the caller so indices stay valid.
    fn strike_enemy(&mut self, index: usize, roll: i32, hit: bool, damage: i32, action: &str) -> bool {
        let attacker = self.session.player.name.clone();
        let enemy = &mut self.session.enemies[index];
        let target = enemy.name.clone();
        let position = enemy.position;
        let report = if hit {
            Some(apply_damage(&mut enemy.hp, damage))
        } else {
            None
        };

        self.emit(GameEvent::AttackResolved {
            side: Side::Player,
            attacker: attacker.clone(),
            target: target.clone(),
            roll,
            hit,
            damage: report.map_or(0, |r| r.dealt),
        });
        self.emit(GameEvent::VisualEffect {
            position,
            hit,
            side: Side::Player,
        });

        match report {
            Some(report) => {
                self.emit(GameEvent::NarrationRequested(NarrationRequest::Combat {
                    attacker,
                    target,
                    action: action.to_string(),
                    damage: report.dealt,
                }));
                report.lethal
            }
            None => {
                self.session.log.push(format!("{} misses the {}.", attacker, target));
                false
            }
        }
    }

    fn defeat_enemy(&mut self, index: usize) {
        let enemy = self.session.enemies.remove(index);
        self.session.player.xp += enemy.xp;
        self.session.player.gold += enemy.gold;
        self.session.log.push(format!(
            "The {} dissolves. +{} xp, +{} gold.",
            enemy.name, enemy.xp, enemy.gold
        ));
        log::debug!("{} defeated, {} enemies remain", enemy.name, self.session.enemies.len());
        self.emit(GameEvent::EnemyDefeated {
            id: enemy.id,
            name: enemy.name,
            xp: enemy.xp,
            gold: enemy.gold,
        });
    }

    fn player_break_box(&mut self, pos: Position) -> InputOutcome {
        let Some(TileKind::Box { durability }) = self.session.grid.kind_at(pos) else {
            return InputOutcome::Ignored;
        };
        self.session.player.spend_action_point();

        let attacker = self.session.player.stats();
        let target = EffectiveStats::destructible(self.rules.combat.box_armor_class, durability);
        let outcome = resolve_attack(&attacker, &target, &self.rules.combat, &mut self.rng);
        self.emit(GameEvent::VisualEffect {
            position: pos,
            hit: outcome.hit,
            side: Side::Player,
        });

        if outcome.hit {
            let mut remaining = durability;
            let report = apply_damage(&mut remaining, outcome.damage);
            if report.lethal {
                self.open_box(pos);
            } else if let Some(tile) = self.session.grid.get_mut(pos) {
                tile.kind = TileKind::Box {
                    durability: remaining,
                };
            }
        } else {
            self.session.log.push("The blow glances off the box.");
        }

        self.session.phase = TurnPhase::Animating {
            resume: Resume::PlayerTurn,
        };
        InputOutcome::Accepted
    }

    fn open_box(&mut self, pos: Position) {
        let template = if self.rng.chance(self.rules.combat.loot_drop_chance) {
            self.loot.roll(&mut self.rng).cloned()
        } else {
            None
        };
        let loot = template.map(|template| template.instantiate(self.session.mint_item_id()));
        let loot_name = loot.as_ref().map(|item| item.name.clone());

        self.session.grid.break_box(pos, loot);
        match &loot_name {
            Some(name) => self
                .session
                .log
                .push(format!("The box splinters, revealing the {}.", name)),
            None => self.session.log.push("The box splinters. Nothing inside."),
        }
        self.emit(GameEvent::BoxDestroyed {
            position: pos,
            loot: loot_name,
        });
    }

    fn player_move(&mut self, to: Position) -> InputOutcome {
        self.session.player.spend_action_point();
        let from = self.session.player.position;
        self.session.player.position = to;
        self.emit(GameEvent::PlayerMoved { from, to });

        if let Some(item) = self.session.grid.take_item(to) {
            self.session.log.push(format!("You pick up the {}.", item.name));
            self.emit(GameEvent::ItemPickedUp {
                name: item.name.clone(),
            });
            self.session.player.inventory.push(item);
        }

        if self.session.grid.kind_at(to) == Some(TileKind::Stairs) {
            self.session.log.push("You step into the dark below.");
            self.session.phase = TurnPhase::Descending;
        } else {
            self.settle_into_player_turn();
        }
        InputOutcome::Accepted
    }

    /// Moves the player to a random free floor tile reachable from where
    /// they stand. Returns false if there is nowhere to go.
    fn teleport_player(&mut self) -> bool {
        let from = self.session.player.position;
        let mut candidates: Vec<Position> = reachable_from(&self.session.grid, from)
            .into_iter()
            .filter(|pos| {
                *pos != from
                    && self.session.grid.kind_at(*pos) == Some(TileKind::Floor)
                    && !self.session.is_occupied(*pos)
            })
            .collect();
        if candidates.is_empty() {
            return false;
        }
        // HashSet order is unstable; sort so a seed replays the same jump.
        candidates.sort_by_key(|pos| (pos.y, pos.x));

        let to = candidates[self.rng.pick_index(candidates.len())];
        self.session.player.position = to;
        if let Some(item) = self.session.grid.take_item(to) {
            self.emit(GameEvent::ItemPickedUp {
                name: item.name.clone(),
            });
            self.session.player.inventory.push(item);
        }
        self.emit(GameEvent::Teleported { from, to });
        true
    }

    /// Scroll fire: flat damage to every enemy within `radius` of the player.
    fn scorch_enemies(&mut self, radius: u32, damage: i32) {
        let origin = self.session.player.position;
        let in_blast: Vec<usize> = self
            .session
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.position.manhattan_distance(origin) <= radius)
            .map(|(index, _)| index)
            .collect();

        let mut fallen = Vec::new();
        for index in in_blast {
            if self.strike_enemy(index, 0, true, damage, "burns") {
                fallen.push(index);
            }
        }
        for index in fallen.into_iter().rev() {
            self.defeat_enemy(index);
        }
    }

    fn begin_ai_turn(&mut self) {
        log::debug!("AI turn {} begins", self.session.turn + 1);
        self.session.phase = TurnPhase::AiTurn { cursor: 0 };
    }

    /// Schedules enemy `cursor`, or closes the AI turn if none are left.
    fn queue_enemy(&mut self, cursor: usize) {
        if cursor >= self.session.enemies.len() {
            self.finish_ai_turn();
        } else {
            self.session.phase = TurnPhase::AiTurn { cursor };
        }
    }

    fn enemy_act(&mut self, cursor: usize) {
        let Some(enemy) = self.session.enemies.get(cursor) else {
            self.finish_ai_turn();
            return;
        };

        let stats = enemy.stats();
        let target = self.session.player.position;
        if enemy.position.manhattan_distance(target) > stats.range {
            self.enemy_step(cursor);
            self.queue_enemy(cursor + 1);
            return;
        }

        let attacker = enemy.name.clone();
        let action = action_name(&enemy.archetype);
        let defender = self.session.player.stats();
        let outcome = resolve_attack(&stats, &defender, &self.rules.combat, &mut self.rng);
        let report = if outcome.hit {
            Some(apply_damage(&mut self.session.player.hp, outcome.damage))
        } else {
            None
        };
        let player = self.session.player.name.clone();

        self.emit(GameEvent::AttackResolved {
            side: Side::Enemy,
            attacker: attacker.clone(),
            target: player.clone(),
            roll: outcome.roll,
            hit: outcome.hit,
            damage: report.map_or(0, |r| r.dealt),
        });
        self.emit(GameEvent::VisualEffect {
            position: target,
            hit: outcome.hit,
            side: Side::Enemy,
        });

        match report {
            Some(report) => {
                self.emit(GameEvent::NarrationRequested(NarrationRequest::Combat {
                    attacker,
                    target: player,
                    action: action.to_string(),
                    damage: report.dealt,
                }));
                if report.lethal {
                    // The rest of the roster never acts.
                    self.defeat_player();
                    return;
                }
            }
            None => self.session.log.push(format!("The {} misses.", attacker)),
        }

        self.session.phase = TurnPhase::Animating {
            resume: Resume::AiTurn { cursor: cursor + 1 },
        };
    }

    /// One greedy step toward the player. Enemies only walk on plain floor,
    /// so they never park on the stairs; blocked steps are skipped.
    fn enemy_step(&mut self, cursor: usize) {
        let from = self.session.enemies[cursor].position;
        let Some(direction) = greedy_direction(from, self.session.player.position) else {
            return;
        };
        let to = from.step(direction);
        if self.session.grid.kind_at(to) != Some(TileKind::Floor) || self.session.is_occupied(to) {
            return;
        }

        self.session.enemies[cursor].position = to;
        let id = self.session.enemies[cursor].id;
        self.emit(GameEvent::EnemyMoved { id, from, to });
    }

    fn finish_ai_turn(&mut self) {
        self.session.turn += 1;
        let turn = self.session.turn;
        self.emit(GameEvent::TurnEnded { turn });
        self.session.player.restore_action_points();
        self.settle_into_player_turn();
    }

    fn defeat_player(&mut self) {
        let floor = self.session.floor;
        let score = self.session.score();
        self.session.player.hp = 0;
        self.session.phase = TurnPhase::GameOver;
        self.session.log.push(format!(
            "{} falls on floor {}.",
            self.session.player.name, floor
        ));
        log::info!(
            "{} was defeated on floor {} with a score of {}",
            self.session.player.name,
            floor,
            score
        );
        self.emit(GameEvent::PlayerDefeated { floor, score });
        self.emit(GameEvent::NarrationRequested(NarrationRequest::Eulogy { floor }));
    }

    /// Replaces the grid and roster with freshly generated floor `floor`.
    fn enter_floor(&mut self, floor: u32) -> ReckoningResult<()> {
        let generated = generate_floor(&self.rules, floor, &mut self.rng)?;
        self.session.grid = generated.grid;
        self.session.enemies = generated.enemies;
        self.session.floor = generated.floor;
        self.session.player.position = generated.entry;
        self.session.player.restore_action_points();

        self.emit(GameEvent::FloorAdvanced {
            floor: generated.floor,
        });
        self.emit(GameEvent::NarrationRequested(NarrationRequest::Room {
            floor: generated.floor,
        }));
        Ok(())
    }

    fn descend(&mut self) -> ReckoningResult<()> {
        let next = self.session.floor + 1;
        self.enter_floor(next)?;
        self.session.log.push(format!("Floor {}.", next));

        let offers = self.skills.offer(
            &self.session.player.skills,
            self.rules.progression.upgrade_offers,
            &mut self.rng,
        );
        if offers.is_empty() {
            self.session.phase = TurnPhase::DmPause;
        } else {
            let skills = offers.iter().map(|skill| skill.name.clone()).collect();
            self.session.upgrade_offers = offers;
            self.emit(GameEvent::UpgradeOffered { skills });
            self.session.phase = TurnPhase::UpgradeSelect;
        }
        Ok(())
    }
}
