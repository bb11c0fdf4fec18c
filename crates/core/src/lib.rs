//! Abalone Core - Game abstractions and common types
//!
//! This crate provides the `Game` trait consumed by the search crates,
//! together with the hexagonal coordinate system of the Abalone board.
//!
//! # Types
//!
//! - [`Game`] - Trait for rules engines the search can drive
//! - [`Side`] - The two players
//! - [`Score`] - Remaining marbles per side, with the elimination rule
//! - [`HexCube`] / [`HexAxial`] - Hex coordinates and board-array mapping

mod error;
mod game;
pub mod hex;
mod types;

pub use error::{AbaloneError, Result};
pub use game::Game;
pub use hex::{HexAxial, HexCube};
pub use types::{Score, Side};
