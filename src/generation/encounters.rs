//! # Encounter Generation
//!
//! Enemy roster composition and per-floor stat scaling. Every stat here is a
//! non-decreasing function of the floor number.

use crate::config::EnemyRules;
use crate::game::{Archetype, BaseProfile, EnemyKind, Entity, EntityId, Position};
use crate::utils::RandomSource;
use crate::{GenerationConfig, Generator, ReckoningResult};

/// Number of enemies on `floor`.
///
/// # Examples
///
/// ```
/// use void_reckoning::{enemy_count, EnemyRules};
///
/// let rules = EnemyRules::default();
/// assert_eq!(enemy_count(1, &rules), 2);
/// assert_eq!(enemy_count(3, &rules), 4);
/// ```
pub fn enemy_count(floor: u32, rules: &EnemyRules) -> usize {
    let extra = (floor as f64 / rules.floors_per_extra_enemy).floor() as usize;
    rules.base_count as usize + extra
}

/// Whether `floor` ends with a champion.
pub fn is_champion_floor(floor: u32, rules: &EnemyRules) -> bool {
    rules.champion_every > 0 && floor > 0 && floor % rules.champion_every == 0
}

/// Stat line of `kind` on `floor`.
pub fn enemy_profile(kind: EnemyKind, floor: u32, rules: &EnemyRules) -> BaseProfile {
    let depth = floor as i32;
    let hp = rules.base_hp + rules.hp_per_floor * depth;
    let attack = rules.base_attack + rules.attack_per_floor * depth;
    let armor_class = rules.base_armor_class + rules.armor_class_per_floor * depth;

    match kind {
        EnemyKind::VoidHusk => BaseProfile {
            hp,
            mana: 0,
            intelligence: 0,
            attack_bonus: attack,
            defense: rules.defense,
            armor_class,
            range: 1,
            action_points: 1,
        },
        EnemyKind::Wraith => BaseProfile {
            hp: hp * 3 / 4,
            mana: 0,
            intelligence: 0,
            attack_bonus: attack + 3,
            defense: rules.defense,
            armor_class: armor_class - 1,
            range: 2,
            action_points: 1,
        },
        EnemyKind::AbyssalChampion => BaseProfile {
            hp: hp * 2,
            mana: 0,
            intelligence: 0,
            attack_bonus: attack + 2,
            defense: rules.defense + 2,
            armor_class: armor_class + 2,
            range: 1,
            action_points: 1,
        },
    }
}

/// Builds an enemy standing on `position`.
pub fn spawn_enemy(
    id: EntityId,
    kind: EnemyKind,
    floor: u32,
    position: Position,
    rules: &EnemyRules,
) -> Entity {
    let mut enemy = Entity::from_profile(
        id,
        kind.name(),
        Archetype::Enemy(kind),
        enemy_profile(kind, floor, rules),
        position,
    );
    let (xp, gold) = match kind {
        EnemyKind::VoidHusk | EnemyKind::Wraith => (rules.xp_reward, rules.gold_reward),
        EnemyKind::AbyssalChampion => (rules.xp_reward * 3, rules.gold_reward * 4),
    };
    enemy.xp = xp;
    enemy.gold = gold;
    enemy
}

/// Rolls which kinds of enemy make up a floor's roster.
#[derive(Debug, Clone, Default)]
pub struct EncounterGenerator;

impl EncounterGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator<Vec<EnemyKind>> for EncounterGenerator {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> ReckoningResult<Vec<EnemyKind>> {
        let rules = &config.enemies;
        let count = enemy_count(config.floor, rules);
        let champion = is_champion_floor(config.floor, rules);

        let kinds = (0..count)
            .map(|slot| {
                if champion && slot + 1 == count {
                    EnemyKind::AbyssalChampion
                } else if config.floor >= rules.wraith_from_floor && rng.chance(rules.wraith_chance) {
                    EnemyKind::Wraith
                } else {
                    EnemyKind::VoidHusk
                }
            })
            .collect();
        Ok(kinds)
    }

    fn validate(&self, kinds: &Vec<EnemyKind>, config: &GenerationConfig) -> ReckoningResult<()> {
        let expected = enemy_count(config.floor, &config.enemies);
        if kinds.len() != expected {
            return Err(crate::ReckoningError::GenerationFailed(format!(
                "roster has {} enemies, floor {} needs {}",
                kinds.len(),
                config.floor,
                expected
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}
