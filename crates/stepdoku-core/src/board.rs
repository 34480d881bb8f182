use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cell coordinate (0-indexed row and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row + 1, self.col + 1)
    }
}

/// Errors from constructing or parsing a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The side length is zero or not a perfect square
    NotPerfectSquare { size: usize },
    /// The side length does not fit in a cell value
    TooLarge { size: usize },
    /// A row's length differs from the board's side length
    RaggedRow { row: usize, len: usize, size: usize },
    /// A cell value exceeds the side length
    ValueOutOfRange { pos: Position, value: u8, size: usize },
    /// The parsed cell count is not the square of a valid side length
    BadCellCount { count: usize },
    /// A token in the input is not a cell value
    BadToken { token: String },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::NotPerfectSquare { size } => {
                write!(f, "board size {size} is not a perfect square")
            }
            BoardError::TooLarge { size } => {
                write!(f, "board size {size} exceeds the maximum of {}", u8::MAX)
            }
            BoardError::RaggedRow { row, len, size } => {
                write!(f, "row {row} has {len} cells, expected {size}")
            }
            BoardError::ValueOutOfRange { pos, value, size } => {
                write!(f, "cell {pos} holds {value}, outside 0..={size}")
            }
            BoardError::BadCellCount { count } => {
                write!(f, "{count} cells do not form a square board of square blocks")
            }
            BoardError::BadToken { token } => {
                write!(f, "cannot read {token:?} as a cell value")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Integer square root, if exact.
fn exact_sqrt(n: usize) -> Option<usize> {
    (1..=n).find(|k| k * k == n)
}

/// A size x size grid of cell values; 0 marks an empty cell
///
/// The side length is a perfect square, validated once at construction
/// along with every cell value. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    block_dim: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Create an all-empty board with the given side length.
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size > u8::MAX as usize {
            return Err(BoardError::TooLarge { size });
        }
        let block_dim = exact_sqrt(size).ok_or(BoardError::NotPerfectSquare { size })?;
        Ok(Self {
            size,
            block_dim,
            cells: vec![0; size * size],
        })
    }

    /// Create a board from rows of cell values.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut board = Self::empty(size)?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(BoardError::RaggedRow {
                    row,
                    len: values.len(),
                    size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let pos = Position::new(row, col);
                if value as usize > size {
                    return Err(BoardError::ValueOutOfRange { pos, value, size });
                }
                board.set(pos, value);
            }
        }
        Ok(board)
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length of one block (the square root of the board size)
    pub fn block_dim(&self) -> usize {
        self.block_dim
    }

    fn index(&self, pos: Position) -> usize {
        debug_assert!(pos.row < self.size && pos.col < self.size);
        pos.row * self.size + pos.col
    }

    /// Value at a position (0 when empty)
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[self.index(pos)]
    }

    /// Write a value at a position (0 clears the cell)
    pub fn set(&mut self, pos: Position, value: u8) {
        let index = self.index(pos);
        self.cells[index] = value;
    }

    /// Whether the cell at a position is empty
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == 0
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    /// The first empty cell in row-major order, if any
    pub fn first_empty(&self) -> Option<Position> {
        self.positions().find(|&pos| self.is_empty(pos))
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    /// Whether every cell is filled
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    /// Rows of the board, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.size)
    }

    /// Every filled position whose value also appears elsewhere in its
    /// row, column, or block.
    ///
    /// The solver itself never checks its input; frontends call this to
    /// reject contradictory givens up front.
    pub fn conflicts(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| !self.is_empty(pos) && self.has_duplicate(pos))
            .collect()
    }

    /// Whether no filled cell duplicates another in its row, column, or block
    pub fn is_consistent(&self) -> bool {
        self.positions()
            .all(|pos| self.is_empty(pos) || !self.has_duplicate(pos))
    }

    fn has_duplicate(&self, pos: Position) -> bool {
        let value = self.get(pos);
        for col in 0..self.size {
            if col != pos.col && self.get(Position::new(pos.row, col)) == value {
                return true;
            }
        }
        for row in 0..self.size {
            if row != pos.row && self.get(Position::new(row, pos.col)) == value {
                return true;
            }
        }
        let block_row = pos.row / self.block_dim * self.block_dim;
        let block_col = pos.col / self.block_dim * self.block_dim;
        for row in block_row..block_row + self.block_dim {
            for col in block_col..block_col + self.block_dim {
                let other = Position::new(row, col);
                if other != pos && self.get(other) == value {
                    return true;
                }
            }
        }
        false
    }

    /// Compact single-line form: one digit per cell, `.` for empty.
    ///
    /// Only meaningful for boards up to 9x9; larger values would not fit
    /// in one character.
    pub fn to_compact_string(&self) -> String {
        self.cells
            .iter()
            .map(|&value| {
                if value == 0 {
                    '.'
                } else {
                    char::from(b'0' + value)
                }
            })
            .collect()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse either a compact digit string (one character per cell, `.` or
    /// `0` for empty) or whitespace-separated cell values for boards whose
    /// values need more than one digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let values: Vec<u8> = if s.split_whitespace().nth(1).is_some() {
            s.split_whitespace()
                .map(|token| match token {
                    "." | "_" => Ok(0),
                    _ => token.parse().map_err(|_| BoardError::BadToken {
                        token: token.to_string(),
                    }),
                })
                .collect::<Result<_, _>>()?
        } else {
            s.chars()
                .map(|c| match c {
                    '.' | '_' => Ok(0),
                    '0'..='9' => Ok(c as u8 - b'0'),
                    _ => Err(BoardError::BadToken {
                        token: c.to_string(),
                    }),
                })
                .collect::<Result<_, _>>()?
        };

        let size = exact_sqrt(values.len()).ok_or(BoardError::BadCellCount {
            count: values.len(),
        })?;
        let mut board = Self::empty(size).map_err(|_| BoardError::BadCellCount {
            count: values.len(),
        })?;
        for (i, &value) in values.iter().enumerate() {
            let pos = Position::new(i / size, i % size);
            if value as usize > size {
                return Err(BoardError::ValueOutOfRange { pos, value, size });
            }
            board.set(pos, value);
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Grid with `.` for empty cells and ruled block boundaries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = self.size.to_string().len();
        for (row, values) in self.rows().enumerate() {
            if row > 0 && row % self.block_dim == 0 {
                for col in 0..self.size {
                    if col > 0 && col % self.block_dim == 0 {
                        write!(f, "+-")?;
                    }
                    write!(f, "{}", "-".repeat(cell_width + 1))?;
                }
                writeln!(f)?;
            }
            for (col, &value) in values.iter().enumerate() {
                if col > 0 && col % self.block_dim == 0 {
                    write!(f, "| ")?;
                }
                if value == 0 {
                    write!(f, "{:>cell_width$} ", ".")?;
                } else {
                    write!(f, "{value:>cell_width$} ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
