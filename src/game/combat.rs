//! # Combat
//!
//! Attack resolution. Resolver functions only read stats and draw dice; the
//! turn machine applies their outcomes to the session afterwards.

use crate::config::CombatRules;
use crate::game::{Archetype, ClassArchetype, EffectiveStats, EnemyKind, Spell};
use crate::utils::RandomSource;
use serde::{Deserialize, Serialize};

/// Result of one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// The natural d20
    pub roll: i32,
    pub hit: bool,
    /// Zero on a miss
    pub damage: i32,
}

impl AttackOutcome {
    fn miss(roll: i32) -> Self {
        Self {
            roll,
            hit: false,
            damage: 0,
        }
    }
}

/// Resolves a weapon attack.
///
/// Hits when `d20 + attack_bonus >= armor_class`; natural 1s and 20s get no
/// special treatment. A hit deals a uniform roll from the configured damage
/// range plus half the attack bonus, rounded down.
///
/// # Examples
///
/// ```
/// use void_reckoning::{resolve_attack, CombatRules, EffectiveStats, ScriptedRolls};
///
/// let mut attacker = EffectiveStats::destructible(10, 1);
/// attacker.attack_bonus = 12;
/// let defender = EffectiveStats::destructible(10, 1);
///
/// let mut rolls = ScriptedRolls::new([5, 10]);
/// let outcome = resolve_attack(&attacker, &defender, &CombatRules::default(), &mut rolls);
/// assert!(outcome.hit);
/// assert_eq!(outcome.damage, 16);
/// ```
pub fn resolve_attack(
    attacker: &EffectiveStats,
    defender: &EffectiveStats,
    rules: &CombatRules,
    rng: &mut dyn RandomSource,
) -> AttackOutcome {
    let roll = rng.d20();
    if roll + attacker.attack_bonus < defender.armor_class {
        return AttackOutcome::miss(roll);
    }

    let base = rng.roll_range(rules.damage_min, rules.damage_max);
    AttackOutcome {
        roll,
        hit: true,
        damage: (base + attacker.attack_bonus.div_euclid(2)).max(0),
    }
}

/// Resolves one target of a spell.
///
/// Spells roll to hit with intelligence in place of attack bonus and deal
/// their flat power plus half the caster's intelligence.
pub fn resolve_spell(
    caster: &EffectiveStats,
    spell: &Spell,
    defender: &EffectiveStats,
    rng: &mut dyn RandomSource,
) -> AttackOutcome {
    let roll = rng.d20();
    if roll + caster.intelligence < defender.armor_class {
        return AttackOutcome::miss(roll);
    }

    AttackOutcome {
        roll,
        hit: true,
        damage: (spell.power + caster.intelligence.div_euclid(2)).max(0),
    }
}

/// What applying damage did to a pool of hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Hit points actually removed
    pub dealt: i32,
    pub remaining: i32,
    pub lethal: bool,
}

/// Subtracts damage from `hp`, never going below zero.
///
/// # Examples
///
/// ```
/// use void_reckoning::apply_damage;
///
/// let mut hp = 10;
/// let report = apply_damage(&mut hp, 15);
/// assert_eq!(hp, 0);
/// assert_eq!(report.dealt, 10);
/// assert!(report.lethal);
/// ```
pub fn apply_damage(hp: &mut i32, damage: i32) -> DamageReport {
    let before = *hp;
    *hp = (before - damage.max(0)).max(0);
    DamageReport {
        dealt: before - *hp,
        remaining: *hp,
        lethal: *hp == 0,
    }
}

/// Verb used when narrating an attack by this archetype.
pub fn action_name(archetype: &Archetype) -> &'static str {
    match archetype {
        Archetype::Player(ClassArchetype::Fighter) => "cleaves",
        Archetype::Player(ClassArchetype::Rogue) => "knifes",
        Archetype::Player(ClassArchetype::Warlock) => "hexes",
        Archetype::Player(ClassArchetype::Deprived) => "flails at",
        Archetype::Enemy(EnemyKind::VoidHusk) => "claws",
        Archetype::Enemy(EnemyKind::Wraith) => "wails at",
        Archetype::Enemy(EnemyKind::AbyssalChampion) => "smites",
    }
}
