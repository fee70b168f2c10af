//! Core Connect Four game logic: board representation, player types, board
//! rotation and the game engine state machine.

mod board;
mod engine;
mod player;
mod rotation;

pub use board::{Board, Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use engine::{Engine, GameStatus};
pub use player::Player;
pub use rotation::{
    rotate, settle, Rotation, RotationAllowance, DEFAULT_ROTATIONS_PER_PLAYER,
};
