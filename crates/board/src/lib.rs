//! Abalone Board - Rules engine for Abalone
//!
//! Cells are packed into 64-bit sets, so positions are small `Copy` values
//! that the search can clone freely. Geometry (neighbors, center distances)
//! comes from precomputed tables built on the hex coordinates of
//! `abalone_core::hex`.

mod cell;
mod cellset;
mod direction;
mod game_impl;
mod movegen;
mod moves;
mod position;
mod tables;

pub use cell::Cell;
pub use cellset::{CellSet, CellSetIter};
pub use direction::Direction;
pub use game_impl::Abalone;
pub use movegen::{BroadsideLine, InlineProbe, MAX_GROUP};
pub use moves::{format_move, Move};
pub use position::{Layout, Position};
pub use tables::{tables, BoardTables};
