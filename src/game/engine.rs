use std::fmt;

use tracing::{debug, info};

use crate::config::BoardConfig;
use crate::error::{BoardError, MoveError};

use super::board::{Board, Cell};
use super::player::Player;
use super::rotation::{rotate, settle, Rotation, RotationAllowance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Player1Wins,
    Player2Wins,
    Draw,
}

impl GameStatus {
    /// Check if game is over
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Player1Wins => Some(Player::Player1),
            GameStatus::Player2Wins => Some(Player::Player2),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    fn won_by(player: Player) -> Self {
        match player {
            Player::Player1 => GameStatus::Player1Wins,
            Player::Player2 => GameStatus::Player2Wins,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Player1Wins => write!(f, "player 1 wins"),
            GameStatus::Player2Wins => write!(f, "player 2 wins"),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

/// One game: a board plus its status.
///
/// The board only changes through [`Engine::play`], [`Engine::rotate`] and
/// [`Engine::rotate_as`]. Once the status is terminal they all fail with
/// [`MoveError::GameOver`]; a new game needs a new engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    board: Board,
    status: GameStatus,
    rotations: RotationAllowance,
}

impl Engine {
    /// Start a game on an empty `width` x `height` board with the default
    /// rotation allowance.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        Self::with_rotations(width, height, RotationAllowance::default())
    }

    pub fn with_rotations(
        width: usize,
        height: usize,
        rotations: RotationAllowance,
    ) -> Result<Self, BoardError> {
        Ok(Engine {
            board: Board::new(width, height)?,
            status: GameStatus::InProgress,
            rotations,
        })
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self, BoardError> {
        let rotations =
            RotationAllowance::new(config.rotations_enabled, config.rotations_per_player);
        Self::with_rotations(config.width, config.height, rotations)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rotations(&self) -> &RotationAllowance {
        &self.rotations
    }

    /// True iff `column` is outside `1..=width`.
    pub fn column_invalid(&self, column: usize) -> bool {
        column < 1 || column > self.board.width()
    }

    /// Columns where [`Engine::play`] would currently succeed.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        (1..=self.board.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    fn ensure_in_progress(&self) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver(self.status));
        }
        Ok(())
    }

    /// Drop `player`'s token into `column` and return the row where it landed.
    pub fn play(&mut self, column: usize, player: Player) -> Result<usize, MoveError> {
        self.ensure_in_progress()?;

        if self.column_invalid(column) {
            return Err(MoveError::InvalidColumn {
                column,
                width: self.board.width(),
            });
        }
        if self.board.is_column_full(column) {
            return Err(MoveError::ColumnFull(column));
        }

        let row = self
            .board
            .drop_cell(column, player.to_cell())
            .ok_or(MoveError::ColumnFull(column))?;

        // Only lines through the new token can have appeared.
        let status = if self.board.is_winning_cell(column, row) {
            GameStatus::won_by(player)
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };

        debug!(column, row, player = player.name(), %status, "token played");
        self.set_status(status);
        Ok(row)
    }

    /// Turn the board a quarter turn, let the tokens fall, then recompute the
    /// status from scratch.
    ///
    /// Fails with [`MoveError::RotationsDisabled`] if the game has rotations
    /// switched off. No player's allowance is used up; see
    /// [`Engine::rotate_as`].
    pub fn rotate(&mut self, rotation: Rotation) -> Result<(), MoveError> {
        self.ensure_in_progress()?;
        self.rotations.check_enabled()?;
        self.apply_rotation(rotation);
        Ok(())
    }

    /// Same as [`Engine::rotate`], played by `player` out of their own
    /// rotation allowance.
    pub fn rotate_as(&mut self, player: Player, rotation: Rotation) -> Result<(), MoveError> {
        self.ensure_in_progress()?;
        self.rotations.check(player)?;
        self.rotations.consume(player);
        debug!(
            player = player.name(),
            remaining = self.rotations.remaining(player),
            "rotation used"
        );
        self.apply_rotation(rotation);
        Ok(())
    }

    fn apply_rotation(&mut self, rotation: Rotation) {
        let rotated = rotate(&self.board, rotation);
        self.board = settle(&rotated);

        let status = self.rescan();
        debug!(
            %rotation,
            width = self.board.width(),
            height = self.board.height(),
            %status,
            "board rotated"
        );
        self.set_status(status);
    }

    /// Status of the whole board, regardless of how it was reached.
    ///
    /// Cells are checked until both colors have a line. Lines for both colors
    /// at once make a draw.
    fn rescan(&self) -> GameStatus {
        let mut red_wins = false;
        let mut yellow_wins = false;

        'scan: for col in 1..=self.board.width() {
            for row in 1..=self.board.height() {
                let already = match self.board.get(col, row) {
                    Cell::Empty => continue,
                    Cell::Red => &mut red_wins,
                    Cell::Yellow => &mut yellow_wins,
                };
                if !*already && self.board.is_winning_cell(col, row) {
                    *already = true;
                }
                if red_wins && yellow_wins {
                    break 'scan;
                }
            }
        }

        match (red_wins, yellow_wins) {
            (true, true) => GameStatus::Draw,
            (true, false) => GameStatus::Player1Wins,
            (false, true) => GameStatus::Player2Wins,
            (false, false) if self.board.is_full() => GameStatus::Draw,
            (false, false) => GameStatus::InProgress,
        }
    }

    fn set_status(&mut self, status: GameStatus) {
        if status.is_terminal() && !self.status.is_terminal() {
            info!(%status, "game over");
        }
        self.status = status;
    }
}
