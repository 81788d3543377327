//! # Input Module
//!
//! The narrow set of inputs a front end can send into the simulation, and
//! the routing that turns each one into a [`TurnMachine`] call.

pub mod commands;

pub use commands::*;

use crate::game::{
    ClassArchetype, EquipSlot, InputOutcome, ItemId, LevelUpReward, Position, TurnMachine,
};
use crate::utils::RandomSource;
use crate::ReckoningResult;

/// Everything a player can do.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    /// Pick a class at the start menu
    SelectClass {
        class: ClassArchetype,
        name: Option<String>,
    },
    /// Click a grid tile: attack, break a box or move
    ClickTile(Position),
    /// Hand the rest of the turn to the enemies
    EndTurn,
    /// Equip, drink or read an inventory item
    UseItem(ItemId),
    Unequip(EquipSlot),
    /// Cast a spell from the spellbook at a tile
    CastSpell { spell: usize, target: Position },
    ChooseReward(LevelUpReward),
    ChooseUpgrade(usize),
    /// Start over after game over
    NewRun,
}

/// Routes player input into the turn machine.
///
/// Input that arrives in the wrong phase is dropped, never queued.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether dropped input is logged
    pub log_ignored: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use void_reckoning::{ClassArchetype, InputHandler, PlayerInput, RulesConfig, TurnMachine};
    ///
    /// let handler = InputHandler::new();
    /// let mut machine = TurnMachine::new(RulesConfig::instant(), 1);
    /// let outcome = handler
    ///     .dispatch(&mut machine, PlayerInput::SelectClass { class: ClassArchetype::Rogue, name: None })
    ///     .unwrap();
    /// assert!(outcome.is_accepted());
    /// ```
    pub fn new() -> Self {
        Self { log_ignored: true }
    }

    /// Applies one input.
    ///
    /// Only class selection can fail, and only if the first floor cannot be
    /// generated. Everything else is either accepted or ignored.
    pub fn dispatch<R: RandomSource>(
        &self,
        machine: &mut TurnMachine<R>,
        input: PlayerInput,
    ) -> ReckoningResult<InputOutcome> {
        let phase = machine.phase();
        let outcome = match &input {
            PlayerInput::SelectClass { class, name } => machine.select_class(*class, name.clone())?,
            PlayerInput::ClickTile(pos) => machine.click_tile(*pos),
            PlayerInput::EndTurn => machine.end_turn(),
            PlayerInput::UseItem(id) => machine.use_item(*id),
            PlayerInput::Unequip(slot) => machine.unequip(*slot),
            PlayerInput::CastSpell { spell, target } => machine.cast_spell(*spell, *target),
            PlayerInput::ChooseReward(reward) => machine.choose_level_reward(*reward),
            PlayerInput::ChooseUpgrade(index) => machine.choose_upgrade(*index),
            PlayerInput::NewRun => machine.restart(),
        };

        if outcome == InputOutcome::Ignored && self.log_ignored {
            log::debug!("Ignored {:?} during {:?}", input, phase);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::game::TurnPhase;

    #[test]
    fn test_dispatch_routes_class_selection() {
        let handler = InputHandler::new();
        let mut machine = TurnMachine::new(RulesConfig::instant(), 4);
        let outcome = handler
            .dispatch(
                &mut machine,
                PlayerInput::SelectClass {
                    class: ClassArchetype::Deprived,
                    name: Some("Nil".to_string()),
                },
            )
            .unwrap();
        assert_eq!(outcome, InputOutcome::Accepted);
        assert_eq!(machine.phase(), TurnPhase::DmPause);
        assert_eq!(machine.session().player.class(), Some(ClassArchetype::Deprived));
    }

    #[test]
    fn test_wrong_phase_input_is_ignored() {
        let handler = InputHandler::default();
        let mut machine = TurnMachine::new(RulesConfig::instant(), 4);
        for input in [
            PlayerInput::ClickTile(Position::new(1, 2)),
            PlayerInput::EndTurn,
            PlayerInput::ChooseReward(LevelUpReward::Might),
            PlayerInput::ChooseUpgrade(0),
            PlayerInput::NewRun,
        ] {
            let outcome = handler.dispatch(&mut machine, input).unwrap();
            assert_eq!(outcome, InputOutcome::Ignored);
        }
        assert_eq!(machine.phase(), TurnPhase::StartMenu);
    }
}
