//! Triangular board representation and operations.
//!
//! A board of side `L` has rows `0..L`, where row `i` holds `i + 1` cells.
//! Cells are stored flat in row-major triangular order, so cell `(row, col)`
//! lives at index `row * (row + 1) / 2 + col`. Each cell holds a color below
//! the board's color count, with 0 meaning empty.

use std::fmt;

use crate::error::BoardError;

/// A cell position as `(row, col)`.
///
/// Signed so that direction offsets can step off the board before being
/// rejected by [`Board::contains`].
pub type Coord = (i32, i32);

/// Canonical board key: the cell colors in row-major triangular order.
pub type BoardKey = Box<[u8]>;

/// Largest supported color count, so that every color is one base-36 digit.
pub const MAX_COLORS: usize = 36;

/// Number of cells on a board of the given side length.
#[inline(always)]
pub const fn triangular(side: usize) -> usize {
    side * (side + 1) / 2
}

/// Converts a `(row, col)` coordinate to a flat cell index.
///
/// The coordinate must be on the board; callers check with [`Board::contains`].
#[inline(always)]
pub const fn coord_to_idx((row, col): Coord) -> usize {
    triangular(row as usize) + col as usize
}

/// Converts a flat cell index back to its `(row, col)` coordinate.
pub fn idx_to_coord(cell_index: usize) -> Coord {
    let mut row = 0;
    while triangular(row + 1) <= cell_index {
        row += 1;
    }
    (row as i32, (cell_index - triangular(row)) as i32)
}

/// Returns true if `(row, col)` satisfies `0 <= col <= row < side`.
#[inline(always)]
pub const fn on_triangle(side: usize, (row, col): Coord) -> bool {
    col >= 0 && col <= row && (row as usize) < side
}

/// Recovers the side length from a cell count, if the count is triangular.
fn side_for_cells(cell_count: usize) -> Option<usize> {
    let mut side = 0;
    while triangular(side) < cell_count {
        side += 1;
    }
    (triangular(side) == cell_count).then_some(side)
}

fn parse_color(ch: char) -> Result<u8, BoardError> {
    ch.to_digit(MAX_COLORS as u32)
        .map(|digit| digit as u8)
        .ok_or(BoardError::InvalidChar(ch))
}

fn color_char(color: u8) -> char {
    // colors are validated below MAX_COLORS, so this never falls back
    char::from_digit(u32::from(color), MAX_COLORS as u32).unwrap_or('?')
}

/// A triangular board of colored pegs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    side: usize,
    colors: u8,
    cells: Vec<u8>,
}

impl Board {
    /// Builds a board from explicit rows, where row `i` must hold `i + 1` cells.
    pub fn new<R: AsRef<[u8]>>(rows: &[R], colors: u8) -> Result<Self, BoardError> {
        if rows.is_empty() {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(triangular(rows.len()));
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != row + 1 {
                return Err(BoardError::RaggedRow {
                    row,
                    found: values.len(),
                    expected: row + 1,
                });
            }
            cells.extend_from_slice(values);
        }

        Self::from_cells(cells, colors)
    }

    /// Builds a board from cells in row-major triangular order.
    pub fn from_cells(cells: Vec<u8>, colors: u8) -> Result<Self, BoardError> {
        if cells.is_empty() {
            return Err(BoardError::Empty);
        }
        if !(2..=MAX_COLORS).contains(&usize::from(colors)) {
            return Err(BoardError::ColorCount(usize::from(colors)));
        }
        let side = side_for_cells(cells.len()).ok_or(BoardError::CodeLength(cells.len()))?;

        if let Some(index) = cells.iter().position(|&color| color >= colors) {
            let (row, col) = idx_to_coord(index);
            return Err(BoardError::ColorOutOfRange {
                row: row as usize,
                col: col as usize,
                color: cells[index],
                colors,
            });
        }

        Ok(Self {
            side,
            colors,
            cells,
        })
    }

    /// Decodes a canonical code such as `"011111"`.
    ///
    /// The side length is recovered from the code length.
    pub fn from_code(code: &str, colors: u8) -> Result<Self, BoardError> {
        let cells = code
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(parse_color)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(cells, colors)
    }

    /// Parses either `/`-separated rows (`"0/11/111"`) or a bare code.
    pub fn parse(text: &str, colors: u8) -> Result<Self, BoardError> {
        if !text.contains('/') {
            return Self::from_code(text, colors);
        }

        let rows = text
            .split('/')
            .map(|row| {
                row.chars()
                    .filter(|ch| !ch.is_whitespace())
                    .map(parse_color)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&rows, colors)
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn colors(&self) -> u8 {
        self.colors
    }

    /// Cell colors in row-major triangular order.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Returns true if the coordinate lies on this board.
    #[inline(always)]
    pub fn contains(&self, coord: Coord) -> bool {
        on_triangle(self.side, coord)
    }

    /// Color at an on-board coordinate.
    #[inline(always)]
    pub fn get(&self, coord: Coord) -> u8 {
        self.cells[coord_to_idx(coord)]
    }

    /// Sets the color at an on-board coordinate.
    #[inline(always)]
    pub fn set(&mut self, coord: Coord, color: u8) {
        debug_assert!(color < self.colors, "color {color} out of range");
        self.cells[coord_to_idx(coord)] = color;
    }

    /// Number of nonzero cells.
    pub fn peg_count(&self) -> usize {
        self.cells.iter().filter(|&&color| color != 0).count()
    }

    /// A board is solved once at most one peg remains.
    pub fn is_solved(&self) -> bool {
        self.peg_count() <= 1
    }

    /// Canonical key used for visited-state lookups.
    pub fn key(&self) -> BoardKey {
        self.cells.clone().into_boxed_slice()
    }

    /// Canonical code: one base-36 digit per cell, row-major.
    pub fn code(&self) -> String {
        self.cells.iter().map(|&color| color_char(color)).collect()
    }

    /// All on-board coordinates in row-major triangular order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let side = self.side as i32;
        (0..side).flat_map(|row| (0..=row).map(move |col| (row, col)))
    }

    /// The board as nested rows.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        (0..self.side)
            .map(|row| self.cells[triangular(row)..triangular(row + 1)].to_vec())
            .collect()
    }
}

/// Formats a board as a centered triangle, one row per line.
pub fn format_board(board: &Board) -> String {
    let mut output = String::new();

    for (row, values) in board.rows().iter().enumerate() {
        output.push_str(&" ".repeat(board.side() - 1 - row));
        let line: Vec<String> = values.iter().map(|&color| color_char(color).to_string()).collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }

    output
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for idx in 0..triangular(8) {
            let (row, col) = idx_to_coord(idx);
            assert!(col <= row, "idx_to_coord({idx}) produced ({row},{col})");
            assert_eq!(coord_to_idx((row, col)), idx, "Roundtrip failed for index {idx}");
        }
    }

    #[test]
    fn test_contains_matches_triangle() {
        let board = Board::parse("0/11/111", 2).unwrap();
        assert!(board.contains((0, 0)));
        assert!(board.contains((2, 2)));
        assert!(!board.contains((0, 1)));
        assert!(!board.contains((3, 0)));
        assert!(!board.contains((-1, 0)));
        assert!(!board.contains((1, -1)));
    }

    #[test]
    fn test_rows_and_cells_agree() {
        let board = Board::new(&[vec![0], vec![1, 2], vec![2, 1, 0]], 3).unwrap();
        assert_eq!(board.side(), 3);
        assert_eq!(board.cells(), &[0, 1, 2, 2, 1, 0]);
        assert_eq!(board.rows(), vec![vec![0], vec![1, 2], vec![2, 1, 0]]);
        assert_eq!(board.get((1, 1)), 2);
        assert_eq!(board.get((2, 0)), 2);
    }

    #[test]
    fn test_peg_count_and_solved() {
        assert!(Board::parse("1", 2).unwrap().is_solved());
        assert!(Board::parse("0/01/000", 2).unwrap().is_solved());
        assert!(Board::parse("0/00/000", 2).unwrap().is_solved());

        let board = Board::parse("0/11/111", 2).unwrap();
        assert_eq!(board.peg_count(), 5);
        assert!(!board.is_solved());
    }

    #[test]
    fn test_code_roundtrip() {
        let board = Board::parse("0/12/2a1/1111", 11).unwrap();
        assert_eq!(board.code(), "0122a11111");

        let decoded = Board::from_code(&board.code(), 11).unwrap();
        assert_eq!(decoded, board);
        assert_eq!(&*decoded.key(), board.cells());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Board::new(&[vec![0], vec![1, 1, 1]], 2).unwrap_err();
        assert_eq!(
            err,
            BoardError::RaggedRow {
                row: 1,
                found: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn test_rejects_bad_color_count() {
        assert_eq!(Board::parse("0/11/111", 1), Err(BoardError::ColorCount(1)));
        assert_eq!(Board::parse("0/11/111", 37), Err(BoardError::ColorCount(37)));
    }

    #[test]
    fn test_rejects_out_of_range_color() {
        let err = Board::parse("0/12/111", 2).unwrap_err();
        assert_eq!(
            err,
            BoardError::ColorOutOfRange {
                row: 1,
                col: 1,
                color: 2,
                colors: 2
            }
        );
    }

    #[test]
    fn test_rejects_non_triangular_code() {
        assert_eq!(Board::from_code("0111", 2), Err(BoardError::CodeLength(4)));
        assert_eq!(Board::from_code("", 2), Err(BoardError::Empty));
        assert_eq!(Board::from_code("01#", 2), Err(BoardError::InvalidChar('#')));
    }

    #[test]
    fn test_format_board() {
        let board = Board::parse("0/11/121", 3).unwrap();
        assert_eq!(format_board(&board), "  0\n 1 1\n1 2 1\n");
        assert_eq!(board.to_string(), format_board(&board));
    }

    #[test]
    fn test_coords_are_row_major() {
        let board = Board::parse("0/11/111", 2).unwrap();
        let coords: Vec<Coord> = board.coords().collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (1, 1), (2, 0), (2, 1), (2, 2)]);
    }
}
