pub use ai::*;
pub use board::*;
pub use controller::*;
pub use eval::*;
pub use game::*;
pub use moves::*;

mod ai;
#[cfg(test)]
mod arbitrary;
mod board;
mod controller;
mod eval;
mod game;
mod moves;
