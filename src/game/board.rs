use crate::error::BoardError;

use super::player::Player;

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;

/// Number of aligned tokens needed to win.
const LINE_LEN: isize = 4;

/// Directions scanned by the local win check: horizontal, vertical and both
/// diagonals, as (column step, row step).
const AXES: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player owning this token, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Player1),
            Cell::Yellow => Some(Player::Player2),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A `width` x `height` grid of cells.
///
/// Coordinates are 1-based `(column, row)` with row 1 at the top and row
/// `height` at the bottom. This is the only place the convention is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major, top row first.
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width < 1 || height < 1 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let too_large = BoardError::TooLarge { width, height };
        let len = width.checked_mul(height).ok_or(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large)?;
        cells.resize(len, Cell::Empty);
        Ok(Board {
            width,
            height,
            cells,
        })
    }

    /// Empty board with the same cell count as an existing one.
    pub(crate) fn empty(width: usize, height: usize) -> Self {
        debug_assert!(width >= 1 && height >= 1);
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        if (1..=self.width).contains(&col) && (1..=self.height).contains(&row) {
            Some((row - 1) * self.width + (col - 1))
        } else {
            None
        }
    }

    /// Get the cell at `(col, row)`. Anything outside the grid reads as
    /// [`Cell::Empty`].
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.index(col, row)
            .map_or(Cell::Empty, |idx| self.cells[idx])
    }

    /// Like [`Board::get`] but accepts coordinates that may step below 1.
    fn get_signed(&self, col: isize, row: isize) -> Cell {
        if col < 1 || row < 1 {
            return Cell::Empty;
        }
        self.get(col as usize, row as usize)
    }

    /// Set the cell at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `(col, row)` is outside the grid.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        let idx = self.index(col, row).unwrap_or_else(|| {
            panic!(
                "({col}, {row}) is outside the {}x{} board",
                self.width, self.height
            )
        });
        self.cells[idx] = cell;
    }

    /// Independent copy of the board, for callers that want a snapshot.
    pub fn duplicate(&self) -> Board {
        self.clone()
    }

    /// Cells of column `col` from top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        (1..=self.height).map(move |row| self.get(col, row))
    }

    /// Check if a column is full. Columns outside the grid count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if !(1..=self.width).contains(&col) {
            return true;
        }
        !self.get(col, 1).is_empty()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (1..=self.width).all(|col| self.is_column_full(col))
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Drop `cell` into column `col` and return the row where it landed.
    ///
    /// The column is scanned from the bottom row upward and the first empty
    /// cell is filled. Returns `None` if the column is full or out of range.
    pub fn drop_cell(&mut self, col: usize, cell: Cell) -> Option<usize> {
        if !(1..=self.width).contains(&col) {
            return None;
        }
        let row = (1..=self.height)
            .rev()
            .find(|&row| self.get(col, row).is_empty())?;
        self.set(col, row, cell);
        Some(row)
    }

    /// Check whether the token at `(col, row)` is part of four in a row.
    ///
    /// Every axis through the cell is tried with the four windows of four
    /// consecutive cells that contain it. Windows running past an edge read
    /// empty cells and fail on their own.
    pub fn is_winning_cell(&self, col: usize, row: usize) -> bool {
        let cell = self.get(col, row);
        if cell.is_empty() {
            return false;
        }

        let (col, row) = (col as isize, row as isize);
        AXES.iter().any(|&(dc, dr)| {
            (-(LINE_LEN - 1)..=0).any(|start| {
                (start..start + LINE_LEN)
                    .all(|k| self.get_signed(col + k * dc, row + k * dr) == cell)
            })
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
