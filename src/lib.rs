pub mod board;
pub mod coord;
pub mod error;
pub mod game;
pub mod stone;

pub type Point = (u8, u8);

pub use board::{Board, Captures};
pub use error::GoError;
pub use game::{GameState, GoGame, PlacedStone};
pub use stone::Stone;
