//! # Progression
//!
//! Experience thresholds, level-up rewards and the skill pool that floor
//! transitions draw upgrade offers from.

use crate::config::ProgressionRules;
use crate::game::{Entity, Modifiers, Skill};
use crate::utils::RandomSource;
use serde::{Deserialize, Serialize};

/// Reward picked on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelUpReward {
    /// More maximum hp, and a full heal.
    Vitality,
    /// More attack bonus.
    Might,
}

/// Experience needed to leave `level`.
pub fn xp_threshold(level: u32, rules: &ProgressionRules) -> u32 {
    rules.xp_per_level.saturating_mul(level)
}

/// Whether the entity has crossed its current level's threshold.
///
/// # Examples
///
/// ```
/// use void_reckoning::{level_up_ready, ClassArchetype, Entity, ProgressionRules};
///
/// let rules = ProgressionRules::default();
/// let mut player = Entity::new_player(None, ClassArchetype::Fighter);
/// player.xp = 99;
/// assert!(!level_up_ready(&player, &rules));
/// player.xp = 100;
/// assert!(level_up_ready(&player, &rules));
/// ```
pub fn level_up_ready(entity: &Entity, rules: &ProgressionRules) -> bool {
    entity.xp >= xp_threshold(entity.level, rules)
}

/// Applies a level-up reward and increments the level.
pub fn apply_level_reward(entity: &mut Entity, reward: LevelUpReward, rules: &ProgressionRules) {
    match reward {
        LevelUpReward::Vitality => {
            entity.max_hp += rules.vitality_hp;
            entity.hp = entity.stats().max_hp;
        }
        LevelUpReward::Might => {
            entity.attack_bonus += rules.might_attack;
        }
    }
    entity.level += 1;
}

/// Catalogue of upgrades offered between floors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPool {
    skills: Vec<Skill>,
}

impl SkillPool {
    pub fn new(skills: Vec<Skill>) -> Self {
        Self { skills }
    }

    /// The standard upgrade catalogue.
    pub fn standard() -> Self {
        Self::new(vec![
            Skill::new(
                "iron_skin",
                "Iron Skin",
                "Bone plates knit under the flesh.",
                Modifiers {
                    defense: 2,
                    ..Modifiers::NONE
                },
            ),
            Skill::new(
                "keen_edge",
                "Keen Edge",
                "Every strike finds the seam.",
                Modifiers {
                    attack: 4,
                    ..Modifiers::NONE
                },
            ),
            Skill::new(
                "long_reach",
                "Long Reach",
                "Strike from one tile further away.",
                Modifiers {
                    range: 1,
                    ..Modifiers::NONE
                },
            ),
            Skill::new(
                "haste",
                "Haste",
                "One more action each turn.",
                Modifiers {
                    max_action_points: 1,
                    ..Modifiers::NONE
                },
            ),
            Skill::new(
                "vigor",
                "Vigor",
                "The void takes longer to drain you.",
                Modifiers {
                    hp: 25,
                    ..Modifiers::NONE
                },
            ),
            Skill::new(
                "arcane_mind",
                "Arcane Mind",
                "Spells bite deeper.",
                Modifiers {
                    intelligence: 4,
                    ..Modifiers::NONE
                },
            ),
            Skill::new(
                "deep_reserves",
                "Deep Reserves",
                "A wider well of mana.",
                Modifiers {
                    mana: 30,
                    ..Modifiers::NONE
                },
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Draws up to `count` distinct skills the entity has not learned yet.
    pub fn offer(&self, learned: &[Skill], count: usize, rng: &mut dyn RandomSource) -> Vec<Skill> {
        let mut candidates: Vec<&Skill> = self
            .skills
            .iter()
            .filter(|skill| learned.iter().all(|known| known.id != skill.id))
            .collect();

        let mut offers = Vec::with_capacity(count.min(candidates.len()));
        while offers.len() < count && !candidates.is_empty() {
            let index = rng.pick_index(candidates.len());
            offers.push(candidates.swap_remove(index).clone());
        }
        offers
    }
}

impl Default for SkillPool {
    fn default() -> Self {
        Self::standard()
    }
}

/// Adds a skill permanently. Maxima grow, current values stay where they were.
pub fn learn_skill(entity: &mut Entity, skill: Skill) {
    entity.skills.push(skill);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ClassArchetype;
    use crate::utils::{ScriptedRolls, SeededRng};

    #[test]
    fn test_threshold_scales_with_level() {
        let rules = ProgressionRules::default();
        assert_eq!(xp_threshold(1, &rules), 100);
        assert_eq!(xp_threshold(3, &rules), 300);
    }

    #[test]
    fn test_vitality_heals_to_new_maximum() {
        let rules = ProgressionRules::default();
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        player.hp = 30;
        apply_level_reward(&mut player, LevelUpReward::Vitality, &rules);
        assert_eq!(player.max_hp, 140);
        assert_eq!(player.hp, 140);
        assert_eq!(player.level, 2);
    }

    #[test]
    fn test_might_raises_attack() {
        let rules = ProgressionRules::default();
        let mut player = Entity::new_player(None, ClassArchetype::Deprived);
        apply_level_reward(&mut player, LevelUpReward::Might, &rules);
        assert_eq!(player.attack_bonus, 16);
        assert_eq!(player.hp, 50);
        assert_eq!(player.level, 2);
    }

    #[test]
    fn test_offer_is_distinct_and_excludes_learned() {
        let pool = SkillPool::standard();
        let mut rng = SeededRng::new(5);
        let mut player = Entity::new_player(None, ClassArchetype::Rogue);
        let offers = pool.offer(&player.skills, 3, &mut rng);
        assert_eq!(offers.len(), 3);
        assert_ne!(offers[0].id, offers[1].id);
        assert_ne!(offers[1].id, offers[2].id);
        assert_ne!(offers[0].id, offers[2].id);

        let learned = offers[0].clone();
        learn_skill(&mut player, learned.clone());
        for _ in 0..20 {
            let offers = pool.offer(&player.skills, 3, &mut rng);
            assert!(offers.iter().all(|skill| skill.id != learned.id));
        }
    }

    #[test]
    fn test_offer_shrinks_when_pool_runs_dry() {
        let pool = SkillPool::standard();
        let mut rolls = ScriptedRolls::new([0, 0, 0]);
        let learned: Vec<Skill> = pool.offer(&[], pool.len() - 1, &mut SeededRng::new(1));
        let offers = pool.offer(&learned, 3, &mut rolls);
        assert_eq!(offers.len(), 1);

        let everything = pool.offer(&[], pool.len(), &mut SeededRng::new(2));
        assert!(pool.offer(&everything, 3, &mut rolls).is_empty());
    }

    #[test]
    fn test_learned_skill_changes_effective_stats() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        let haste = SkillPool::standard()
            .offer(&[], 7, &mut SeededRng::new(3))
            .into_iter()
            .find(|skill| skill.id == "haste")
            .unwrap();
        learn_skill(&mut player, haste);
        assert_eq!(player.stats().max_action_points, 4);
        assert_eq!(player.max_action_points, 3);
    }
}
