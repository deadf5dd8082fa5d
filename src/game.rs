use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::{Board, Captures};
use crate::coord;
use crate::error::GoError;
use crate::stone::Stone;

/// One occupied cell in a [`GameState`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedStone {
    pub col: u8,
    pub row: u8,
    pub stone: Stone,
}

/// Serializable snapshot of a game, for a persistence collaborator.
///
/// Reconstruction goes the other way: replay the recorded moves through
/// [`GoGame::with_moves`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub cols: u8,
    pub rows: u8,
    pub stones: Vec<PlacedStone>,
    pub captures: Captures,
    pub last_stone_placed: Option<Point>,
    pub last_captured_single_stone: Option<Point>,
}

/// A single match: one board, mutated only through stone placement.
///
/// Whose turn it is, and who the players are, is the caller's business;
/// the engine takes the stone color with every move.
#[derive(Debug, Clone, PartialEq)]
pub struct GoGame {
    board: Board,
}

impl GoGame {
    /// Create a game with an empty board. Only the square 9, 13 and 19
    /// boards are supported.
    pub fn new(cols: u8, rows: u8) -> Result<Self, GoError> {
        match (cols, rows) {
            (9, 9) | (13, 13) | (19, 19) => Ok(GoGame {
                board: Board::with_dimensions(cols, rows),
            }),
            _ => Err(GoError::InvalidBoardSize),
        }
    }

    /// Rebuild a game by replaying recorded moves in order.
    pub fn with_moves(cols: u8, rows: u8, moves: &[(Point, Stone)]) -> Result<Self, GoError> {
        let mut game = GoGame::new(cols, rows)?;
        for &((col, row), stone) in moves {
            game.place_stone(col, row, stone)?;
        }
        Ok(game)
    }

    // -- Accessors --

    pub fn cols(&self) -> u8 {
        self.board.cols()
    }

    pub fn rows(&self) -> u8 {
        self.board.rows()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.board.stone_at(point)
    }

    pub fn group(&self, point: Point) -> Option<&BTreeSet<Point>> {
        self.board.group(point)
    }

    pub fn captures(&self) -> &Captures {
        self.board.captures()
    }

    pub fn last_stone_placed(&self) -> Option<Point> {
        self.board.last_stone_placed()
    }

    pub fn last_captured_single_stone(&self) -> Option<Point> {
        self.board.last_captured_single_stone()
    }

    // -- Game actions --

    /// Place a stone given in board notation ("a1", "e5", ...).
    pub fn place_stone_str_coord(&mut self, coord: &str, stone: Stone) -> Result<(), GoError> {
        let (col, row) = coord::parse(coord, self.board.cols(), self.board.rows())?;
        self.place_stone(col, row, stone)
    }

    /// Place a stone at integer coordinates. Skips notation parsing but
    /// keeps every legality check; replay and persistence collaborators
    /// drive this directly.
    pub fn place_stone(&mut self, col: u8, row: u8, stone: Stone) -> Result<(), GoError> {
        self.board.place((col, row), stone)?;
        Ok(())
    }

    // -- Serialization --

    pub fn game_state(&self) -> GameState {
        GameState {
            cols: self.board.cols(),
            rows: self.board.rows(),
            stones: self
                .board
                .stones()
                .map(|((col, row), stone)| PlacedStone { col, row, stone })
                .collect(),
            captures: self.board.captures().clone(),
            last_stone_placed: self.board.last_stone_placed(),
            last_captured_single_stone: self.board.last_captured_single_stone(),
        }
    }
}
