//! # Utilities Module
//!
//! Dice and grid-search helpers shared by the generator, the combat resolver
//! and the turn machine.

pub mod dice;
pub mod grid_search;

pub use dice::*;
pub use grid_search::*;
