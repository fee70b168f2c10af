//! Quarter-turn rotation of a board and the gravity pass that follows it.

use std::fmt;

use crate::error::MoveError;

use super::board::{Board, Cell};
use super::player::Player;

pub const DEFAULT_ROTATIONS_PER_PLAYER: u32 = 4;

/// Direction of a quarter turn, as seen with row 1 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Clockwise => write!(f, "clockwise"),
            Rotation::CounterClockwise => write!(f, "counter-clockwise"),
        }
    }
}

/// Which rotations each player may still play in a game.
///
/// Rotations are either switched off for the whole game or capped at a
/// fixed number per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationAllowance {
    enabled: bool,
    /// Indexed by player: Player 1 first.
    remaining: [u32; 2],
}

impl RotationAllowance {
    pub fn new(enabled: bool, per_player: u32) -> Self {
        RotationAllowance {
            enabled,
            remaining: [per_player; 2],
        }
    }

    /// No rotation at all for this game.
    pub fn disabled() -> Self {
        Self::new(false, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Rotations `player` may still play. Always 0 when disabled.
    pub fn remaining(&self, player: Player) -> u32 {
        if self.enabled {
            self.remaining[Self::slot(player)]
        } else {
            0
        }
    }

    fn slot(player: Player) -> usize {
        match player {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }

    pub(crate) fn check_enabled(&self) -> Result<(), MoveError> {
        if self.enabled {
            Ok(())
        } else {
            Err(MoveError::RotationsDisabled)
        }
    }

    pub(crate) fn check(&self, player: Player) -> Result<(), MoveError> {
        self.check_enabled()?;
        if self.remaining(player) == 0 {
            return Err(MoveError::NoRotationsLeft(player));
        }
        Ok(())
    }

    /// Use up one of `player`'s rotations. Call [`RotationAllowance::check`]
    /// first.
    pub(crate) fn consume(&mut self, player: Player) {
        let left = &mut self.remaining[Self::slot(player)];
        *left = left.saturating_sub(1);
    }
}

impl Default for RotationAllowance {
    fn default() -> Self {
        Self::new(true, DEFAULT_ROTATIONS_PER_PLAYER)
    }
}

/// Rotate the whole grid a quarter turn. A `W x H` board becomes `H x W`.
///
/// For a cell at column `i`, row `j`:
///
/// - clockwise: new `(H - j + 1, i)`
/// - counter-clockwise: new `(j, W - i + 1)`
///
/// Both maps are bijections, so no cell is lost or duplicated. Gravity is
/// not applied here, see [`settle`].
///
/// Direction names follow the board as drawn on screen, row 1 on top. In
/// `(row, column)` matrix terms the clockwise map is the usual
/// `M'[c][R - r + 1] = M[r][c]` with `R` rows.
pub fn rotate(board: &Board, rotation: Rotation) -> Board {
    let (width, height) = (board.width(), board.height());
    let mut rotated = Board::empty(height, width);

    for i in 1..=width {
        for j in 1..=height {
            let cell = board.get(i, j);
            match rotation {
                Rotation::Clockwise => rotated.set(height - j + 1, i, cell),
                Rotation::CounterClockwise => rotated.set(j, width - i + 1, cell),
            }
        }
    }

    rotated
}

/// Let every token fall to the bottom of its column.
///
/// Tokens keep their top-to-bottom order. Each column is rebuilt with the
/// same bottom-up insertion used for a regular move.
pub fn settle(board: &Board) -> Board {
    let mut settled = Board::empty(board.width(), board.height());

    for col in 1..=board.width() {
        let tokens: Vec<Cell> = board.column(col).filter(|c| !c.is_empty()).collect();
        // Lowest token goes in first so it lands on the bottom row.
        for &cell in tokens.iter().rev() {
            settled.drop_cell(col, cell);
        }
    }

    settled
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3 wide, 2 high:
    ///
    /// ```text
    /// A B C      R Y R
    /// D E F      Y . Y
    /// ```
    fn sample() -> Board {
        let mut board = Board::new(3, 2).unwrap();
        board.set(1, 1, Cell::Red);
        board.set(2, 1, Cell::Yellow);
        board.set(3, 1, Cell::Red);
        board.set(1, 2, Cell::Yellow);
        board.set(3, 2, Cell::Yellow);
        board
    }

    #[test]
    fn test_clockwise_layout() {
        // D A        Y R
        // E B   ->   . Y
        // F C        Y R
        let rotated = rotate(&sample(), Rotation::Clockwise);
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        assert_eq!(rotated.get(1, 1), Cell::Yellow);
        assert_eq!(rotated.get(2, 1), Cell::Red);
        assert_eq!(rotated.get(1, 2), Cell::Empty);
        assert_eq!(rotated.get(2, 2), Cell::Yellow);
        assert_eq!(rotated.get(1, 3), Cell::Yellow);
        assert_eq!(rotated.get(2, 3), Cell::Red);
    }

    #[test]
    fn test_counter_clockwise_layout() {
        // C F        R Y
        // B E   ->   Y .
        // A D        R Y
        let rotated = rotate(&sample(), Rotation::CounterClockwise);
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        assert_eq!(rotated.get(1, 1), Cell::Red);
        assert_eq!(rotated.get(2, 1), Cell::Yellow);
        assert_eq!(rotated.get(1, 2), Cell::Yellow);
        assert_eq!(rotated.get(2, 2), Cell::Empty);
        assert_eq!(rotated.get(1, 3), Cell::Red);
        assert_eq!(rotated.get(2, 3), Cell::Yellow);
    }

    #[test]
    fn test_inverse_rotation_restores_board() {
        let board = sample();
        for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
            let back = rotate(&rotate(&board, rotation), rotation.inverse());
            assert_eq!(back, board);
        }
    }

    #[test]
    fn test_four_rotations_restore_board() {
        let board = sample();
        let mut rotated = board.clone();
        for _ in 0..4 {
            rotated = rotate(&rotated, Rotation::Clockwise);
        }
        assert_eq!(rotated, board);
    }

    #[test]
    fn test_settle_keeps_order() {
        let mut board = Board::new(1, 5).unwrap();
        board.set(1, 1, Cell::Red);
        board.set(1, 3, Cell::Yellow);

        let settled = settle(&board);
        assert_eq!(
            settled.column(1).collect::<Vec<_>>(),
            vec![
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Red,
                Cell::Yellow
            ]
        );
    }

    #[test]
    fn test_settle_after_rotation() {
        let settled = settle(&rotate(&sample(), Rotation::Clockwise));
        // Column 1 was Y . Y, column 2 already stacked.
        assert_eq!(
            settled.column(1).collect::<Vec<_>>(),
            vec![Cell::Empty, Cell::Yellow, Cell::Yellow]
        );
        assert_eq!(
            settled.column(2).collect::<Vec<_>>(),
            vec![Cell::Red, Cell::Yellow, Cell::Red]
        );
        assert_eq!(settled.count(Cell::Red), 2);
        assert_eq!(settled.count(Cell::Yellow), 3);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let once = settle(&rotate(&sample(), Rotation::CounterClockwise));
        assert_eq!(settle(&once), once);
    }

    #[test]
    fn test_allowance_counts_down_per_player() {
        let mut allowance = RotationAllowance::new(true, 2);
        assert_eq!(allowance.check(Player::Player1), Ok(()));
        allowance.consume(Player::Player1);
        allowance.consume(Player::Player1);
        assert_eq!(allowance.remaining(Player::Player1), 0);
        assert_eq!(
            allowance.check(Player::Player1),
            Err(MoveError::NoRotationsLeft(Player::Player1))
        );
        assert_eq!(allowance.remaining(Player::Player2), 2);
        assert_eq!(allowance.check(Player::Player2), Ok(()));
    }

    #[test]
    fn test_disabled_allowance() {
        let allowance = RotationAllowance::disabled();
        assert!(!allowance.is_enabled());
        assert_eq!(allowance.remaining(Player::Player1), 0);
        assert_eq!(allowance.check_enabled(), Err(MoveError::RotationsDisabled));
        assert_eq!(
            allowance.check(Player::Player2),
            Err(MoveError::RotationsDisabled)
        );
    }

    #[test]
    fn test_default_allowance() {
        let allowance = RotationAllowance::default();
        assert!(allowance.is_enabled());
        assert_eq!(allowance.remaining(Player::Player1), 4);
        assert_eq!(allowance.remaining(Player::Player2), 4);
    }

    #[test]
    fn test_diagonal_does_not_survive_rotation() {
        // Red / diagonal from (1,4) to (4,1) on a settled 4x4 board, yellow
        // underneath.
        let mut board = Board::new(4, 4).unwrap();
        for (col, fillers) in [(1, 0), (2, 1), (3, 2), (4, 3)] {
            for _ in 0..fillers {
                board.drop_cell(col, Cell::Yellow);
            }
            board.drop_cell(col, Cell::Red);
        }
        assert!(board.is_winning_cell(4, 1));
        assert!(board.is_winning_cell(1, 4));

        let settled = settle(&rotate(&board, Rotation::CounterClockwise));

        // The reds all fall into the bottom row; the diagonal is gone.
        let winning: Vec<(usize, usize)> = (1..=4)
            .flat_map(|col| (1..=4).map(move |row| (col, row)))
            .filter(|&(col, row)| settled.is_winning_cell(col, row))
            .collect();
        assert_eq!(winning, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        assert!((1..=4).all(|col| settled.get(col, 4) == Cell::Red));
        assert_eq!(settled.get(4, 1), Cell::Yellow);
        assert_eq!(settled.count(Cell::Red), 4);
        assert_eq!(settled.count(Cell::Yellow), 6);
    }
}
