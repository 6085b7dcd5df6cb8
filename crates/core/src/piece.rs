//! Piece module - piece patterns and their transformations
//!
//! A piece is an immutable value: a boolean pattern, an origin and a colour.
//! Every transformation (move or rotate) builds and returns a new piece, so the
//! game state always swaps the current piece wholesale.
//!
//! Rotation is a plain transpose of the pattern, with no kick tables and no
//! bounds checking. Whether the result fits on the board is decided by
//! [`crate::Board::is_valid_placement`].
//!
//! Coordinates: `x` grows to the right, `y` grows downwards, and the origin is
//! the top-left cell of the pattern.

use crate::types::{Color, PieceKind, BOARD_WIDTH, MAX_PIECE_SIZE};

/// A boolean pattern of at most 4x4 cells.
///
/// The type is `Copy`: every accessor hands out its own copy and the
/// pattern stored in a [`Piece`] can never be modified through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceGrid {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl PieceGrid {
    /// Build a pattern from row slices.
    ///
    /// Panics when the pattern is empty, ragged, or larger than 4x4.
    pub fn from_rows(rows: &[&[bool]]) -> Self {
        assert!(
            !rows.is_empty() && rows.len() <= MAX_PIECE_SIZE,
            "piece pattern must have 1..={MAX_PIECE_SIZE} rows, got {}",
            rows.len()
        );
        let cols = rows[0].len();
        assert!(
            cols > 0 && cols <= MAX_PIECE_SIZE,
            "piece pattern must have 1..={MAX_PIECE_SIZE} columns, got {cols}"
        );

        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged piece pattern at row {r}");
            cells[r][..cols].copy_from_slice(row);
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        }
    }

    /// Canonical spawn pattern for a kind.
    pub fn for_kind(kind: PieceKind) -> Self {
        const X: bool = true;
        const O: bool = false;
        match kind {
            PieceKind::I => Self::from_rows(&[&[X], &[X], &[X], &[X]]),
            PieceKind::J => Self::from_rows(&[&[O, X], &[O, X], &[X, X]]),
            PieceKind::L => Self::from_rows(&[&[X, O], &[X, O], &[X, X]]),
            PieceKind::Z => Self::from_rows(&[&[O, X], &[X, X], &[X, O]]),
            PieceKind::S => Self::from_rows(&[&[X, O], &[X, X], &[O, X]]),
            PieceKind::O => Self::from_rows(&[&[X, X], &[X, X]]),
            PieceKind::T => Self::from_rows(&[&[X, X, X], &[O, X, O]]),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Cell at (row, col); anything outside the pattern reads as `false`.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Occupied `(row, col)` pairs in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows())
            .flat_map(move |r| (0..self.cols()).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.cells[r][c])
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.occupied().count()
    }

    /// Rotate 90° clockwise: `new[c][rows-1-r] = old[r][c]`.
    pub fn rotated_right(&self) -> Self {
        let rows = self.rows();
        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (r, c) in self.occupied() {
            cells[c][rows - 1 - r] = true;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Rotate 90° counter-clockwise: `new[cols-1-c][r] = old[r][c]`.
    pub fn rotated_left(&self) -> Self {
        let cols = self.cols();
        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (r, c) in self.occupied() {
            cells[cols - 1 - c][r] = true;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// A piece: pattern, origin and colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    x: i8,
    y: i8,
    grid: PieceGrid,
    color: Color,
}

/// Spawn column for new pieces (top-centre of the board).
pub const SPAWN_X: i8 = (BOARD_WIDTH as i8 / 2) - 1;

/// Spawn row for new pieces.
pub const SPAWN_Y: i8 = 0;

impl Piece {
    /// Create a piece of `kind` with its canonical pattern at (x, y).
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            grid: PieceGrid::for_kind(kind),
            color: kind.color(),
        }
    }

    /// Create a piece at the spawn position.
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece with an arbitrary pattern (keeps the kind's colour).
    pub fn with_grid(kind: PieceKind, grid: PieceGrid, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            grid,
            color: kind.color(),
        }
    }

    fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn move_down(&self) -> Self {
        self.translated(0, 1)
    }

    pub fn move_left(&self) -> Self {
        self.translated(-1, 0)
    }

    pub fn move_right(&self) -> Self {
        self.translated(1, 0)
    }

    /// Clockwise rotation around the origin cell.
    pub fn rotate_right(&self) -> Self {
        Self {
            grid: self.grid.rotated_right(),
            ..*self
        }
    }

    /// Counter-clockwise rotation around the origin cell.
    pub fn rotate_left(&self) -> Self {
        Self {
            grid: self.grid.rotated_left(),
            ..*self
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn grid(&self) -> PieceGrid {
        self.grid
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Pattern height in rows.
    pub fn height(&self) -> usize {
        self.grid.rows()
    }

    /// Pattern width in columns.
    pub fn width(&self) -> usize {
        self.grid.cols()
    }

    /// Absolute board coordinates `(x, y)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.grid
            .occupied()
            .map(move |(r, c)| (self.x + c as i8, self.y + r as i8))
    }
}
