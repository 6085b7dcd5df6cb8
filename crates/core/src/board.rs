//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a colour tag.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! The falling piece is drawn into the grid like any locked cell; the game
//! state erases and redraws it around every transformation attempt.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// One full board row.
pub type Row = [Cell; WIDTH];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Index of a cell that must be on the board.
    fn expect_index(x: i8, y: i8) -> usize {
        match Self::index(x, y) {
            Some(idx) => idx,
            None => panic!("cell ({x}, {y}) is outside the {WIDTH}x{HEIGHT} board"),
        }
    }

    fn row_range(y: usize) -> std::ops::Range<usize> {
        assert!(y < HEIGHT, "row {y} is outside the board (height {HEIGHT})");
        let start = y * WIDTH;
        start..start + WIDTH
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Draw a piece's occupied cells with its colour.
    ///
    /// Panics if any occupied cell is off the board; callers validate first.
    pub fn place_piece(&mut self, piece: &Piece) {
        self.paint(piece, Some(piece.color()));
    }

    /// Erase a piece's occupied cells.
    ///
    /// Panics if any occupied cell is off the board.
    pub fn remove_piece(&mut self, piece: &Piece) {
        self.paint(piece, None);
    }

    fn paint(&mut self, piece: &Piece, cell: Cell) {
        for (x, y) in piece.cells() {
            let idx = Self::expect_index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Check that every occupied cell of `piece` is on the board and empty.
    ///
    /// The current piece must already be erased, otherwise it collides with
    /// itself.
    pub fn is_valid_placement(&self, piece: &Piece) -> bool {
        piece.cells().all(|(x, y)| self.is_free(x, y))
    }

    /// Check if a row is completely filled
    pub fn row_is_complete(&self, y: usize) -> bool {
        self.cells[Self::row_range(y)].iter().all(|cell| cell.is_some())
    }

    /// Check if a row is completely empty
    pub fn row_is_empty(&self, y: usize) -> bool {
        self.cells[Self::row_range(y)].iter().all(|cell| cell.is_none())
    }

    /// Completed rows in the inclusive span `from..=to`, bottom row first.
    ///
    /// The span is clamped to the board.
    pub fn completed_rows(&self, from: usize, to: usize) -> ArrayVec<usize, HEIGHT> {
        let mut rows = ArrayVec::new();
        if from >= HEIGHT {
            return rows;
        }
        let to = to.min(HEIGHT - 1);
        for y in (from..=to).rev() {
            if self.row_is_complete(y) {
                rows.push(y);
            }
        }
        rows
    }

    /// Remove the given rows and let everything above fall into the gap.
    ///
    /// `rows` must be sorted in descending order (bottom row first). A single
    /// bottom-to-top pass copies each surviving row down by the number of
    /// removed rows below it; the vacated top rows are emptied. Rows below the
    /// lowest removed row are untouched.
    pub fn collapse_rows(&mut self, rows: &[usize]) {
        let Some(&lowest) = rows.first() else {
            return;
        };
        debug_assert!(
            rows.windows(2).all(|w| w[0] > w[1]),
            "rows must be strictly descending: {rows:?}"
        );
        for &y in rows {
            assert!(y < HEIGHT, "row {y} is outside the board (height {HEIGHT})");
        }

        let mut write_y = lowest as isize;
        let mut removed = rows.iter().peekable();

        for read_y in (0..=lowest).rev() {
            if removed.peek() == Some(&&read_y) {
                removed.next();
                continue;
            }
            if write_y as usize != read_y {
                let src = read_y * WIDTH;
                let dst = write_y as usize * WIDTH;
                self.cells.copy_within(src..src + WIDTH, dst);
            }
            write_y -= 1;
        }

        // Whatever is left above the last written row is now empty.
        if write_y >= 0 {
            self.cells[..(write_y as usize + 1) * WIDTH].fill(None);
        }
    }

    /// Swap a whole row, returning the previous content.
    pub fn replace_row(&mut self, y: usize, row: Row) -> Row {
        let range = Self::row_range(y);
        let mut previous = [None; WIDTH];
        previous.copy_from_slice(&self.cells[range.clone()]);
        self.cells[range].copy_from_slice(&row);
        previous
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[Self::row_range(y)]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into a compact colour-code grid (0 = empty).
    pub fn write_color_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * WIDTH + x].map_or(0, |c| c.as_u8());
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    fn fill_row(board: &mut Board, y: i8, color: Color) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_place_and_remove_piece() {
        let mut board = Board::new();
        let piece = Piece::new(PieceKind::T, 2, 3);

        board.place_piece(&piece);
        assert_eq!(board.get(2, 3), Some(Some(Color::Magenta)));
        assert_eq!(board.get(3, 3), Some(Some(Color::Magenta)));
        assert_eq!(board.get(4, 3), Some(Some(Color::Magenta)));
        assert_eq!(board.get(3, 4), Some(Some(Color::Magenta)));
        // Pattern-false cells are left alone.
        assert_eq!(board.get(2, 4), Some(None));

        board.remove_piece(&piece);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_remove_leaves_false_cells_untouched() {
        let mut board = Board::new();
        board.set(2, 4, Some(Color::Blue));
        let piece = Piece::new(PieceKind::T, 2, 3);

        board.place_piece(&piece);
        board.remove_piece(&piece);
        assert_eq!(board.get(2, 4), Some(Some(Color::Blue)));
    }

    #[test]
    fn test_is_valid_placement() {
        let mut board = Board::new();
        let piece = Piece::new(PieceKind::O, 0, 0);
        assert!(board.is_valid_placement(&piece));

        // Off the left, right and bottom edges.
        assert!(!board.is_valid_placement(&piece.move_left()));
        assert!(!board.is_valid_placement(&Piece::new(PieceKind::O, 9, 0)));
        assert!(!board.is_valid_placement(&Piece::new(PieceKind::O, 0, 19)));

        // Overlap.
        board.set(1, 1, Some(Color::Green));
        assert!(!board.is_valid_placement(&piece));
    }

    #[test]
    fn test_row_complete_and_empty() {
        let mut board = Board::new();
        assert!(board.row_is_empty(5));
        assert!(!board.row_is_complete(5));

        fill_row(&mut board, 5, Color::Blue);
        assert!(board.row_is_complete(5));
        assert!(!board.row_is_empty(5));

        board.set(3, 5, None);
        assert!(!board.row_is_complete(5));
        assert!(!board.row_is_empty(5));
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_row_query_out_of_range_panics() {
        Board::new().row_is_complete(BOARD_HEIGHT as usize);
    }

    #[test]
    #[should_panic(expected = "outside the")]
    fn test_place_off_board_panics() {
        Board::new().place_piece(&Piece::new(PieceKind::I, 0, 18));
    }

    #[test]
    fn test_completed_rows_bottom_first() {
        let mut board = Board::new();
        fill_row(&mut board, 16, Color::Blue);
        fill_row(&mut board, 18, Color::Blue);

        let rows = board.completed_rows(15, 19);
        assert_eq!(rows.as_slice(), &[18, 16]);

        // Clamped to the board.
        let rows = board.completed_rows(17, 40);
        assert_eq!(rows.as_slice(), &[18]);
    }

    #[test]
    fn test_collapse_single_bottom_row() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Color::Blue);

        board.collapse_rows(&[19]);

        assert!(board.row_is_empty(19));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_collapse_shifts_rows_above() {
        let mut board = Board::new();
        fill_row(&mut board, 5, Color::Blue);
        board.set(0, 3, Some(Color::Teal));
        board.set(1, 4, Some(Color::Pink));
        board.set(7, 6, Some(Color::Green));

        board.collapse_rows(&[5]);

        assert_eq!(board.get(1, 5), Some(Some(Color::Pink)));
        assert_eq!(board.get(0, 4), Some(Some(Color::Teal)));
        assert_eq!(board.get(0, 3), Some(None));
        // Below the removed row nothing moves.
        assert_eq!(board.get(7, 6), Some(Some(Color::Green)));
    }

    #[test]
    fn test_collapse_non_contiguous_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Color::Blue);
        fill_row(&mut board, 17, Color::Blue);
        fill_row(&mut board, 16, Color::Blue);
        board.set(0, 18, Some(Color::Orange));
        board.set(0, 15, Some(Color::Orange));

        board.collapse_rows(&[19, 17, 16]);

        assert_eq!(board.get(0, 19), Some(Some(Color::Orange)));
        assert_eq!(board.get(1, 19), Some(None));
        assert_eq!(board.get(0, 18), Some(Some(Color::Orange)));
        assert_eq!(board.get(1, 18), Some(None));
        for y in 0..18 {
            assert!(board.row_is_empty(y), "row {y} should be empty");
        }
    }

    #[test]
    fn test_collapse_top_row() {
        let mut board = Board::new();
        fill_row(&mut board, 0, Color::Beige);
        board.set(4, 1, Some(Color::Blue));

        board.collapse_rows(&[0]);

        assert!(board.row_is_empty(0));
        assert_eq!(board.get(4, 1), Some(Some(Color::Blue)));
    }

    #[test]
    fn test_replace_row_returns_previous() {
        let mut board = Board::new();
        fill_row(&mut board, 10, Color::Green);

        let previous = board.replace_row(10, [Some(Color::Beige); WIDTH]);
        assert_eq!(previous, [Some(Color::Green); WIDTH]);
        assert!(board.row(10).iter().all(|c| *c == Some(Color::Beige)));
    }

    #[test]
    fn test_write_color_grid() {
        let mut board = Board::new();
        board.set(3, 4, Some(Color::Teal));

        let mut grid = [[0u8; WIDTH]; HEIGHT];
        board.write_color_grid(&mut grid);
        assert_eq!(grid[4][3], Color::Teal.as_u8());
        assert_eq!(grid[0][0], 0);
    }
}
