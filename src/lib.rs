//! # Rotating Connect Four
//!
//! A Connect Four engine on a board of any size. Besides dropping tokens,
//! a player may turn the whole board a quarter turn; tokens then fall back
//! under gravity and the winner is worked out again from the whole board.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, rotation, engine state machine
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
