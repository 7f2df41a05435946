use std::{
    fmt::Display,
    ops::{Index, Not},
    str::FromStr,
};

use crate::error::{ParseError, PlacementError};

/// Side length of the canonical game.
pub const DEFAULT_SIZE: usize = 3;

/// Columns are named by a single letter, `a` through `z`.
pub const MAX_SIZE: usize = 26;

/// Contents of a single square.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Cell {
    #[default]
    Empty,
    Circle,
    Cross,
}

impl Cell {
    /// The player whose mark this is, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Circle => Some(Player::One),
            Cell::Cross => Some(Player::Two),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Circle => 'O',
            Cell::Cross => 'X',
        }
    }
}

/// One of the two seats at the table. Player one always plays circles and
/// always opens a round.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Player {
    #[default]
    One,
    Two,
}

impl Player {
    pub fn mark(self) -> Cell {
        match self {
            Player::One => Cell::Circle,
            Player::Two => Cell::Cross,
        }
    }

    pub fn opponent(self) -> Self {
        !self
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "Circle"),
            Player::Two => write!(f, "Cross"),
        }
    }
}

// col:  A B C
// row 1 . . .
// row 2 . . .
// row 3 . . .
//
// Text form is column letter then 1-based row ("b3" is row 2, col 1). A
// zero-based "row,col" pair is accepted as well.
#[derive(Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl FromStr for Coord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ParseError::Coord(s.to_string());

        if let Some((row, col)) = s.split_once(',') {
            let row = row.trim().parse().map_err(|_| invalid())?;
            let col = col.trim().parse().map_err(|_| invalid())?;
            return Ok(Coord { row, col });
        }

        let mut chars = s.chars();
        let file = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(invalid)?;
        let rank: usize = chars.as_str().parse().map_err(|_| invalid())?;
        if rank == 0 {
            return Err(invalid());
        }

        Ok(Coord {
            row: rank - 1,
            col: (file.to_ascii_lowercase() as u8 - b'a') as usize,
        })
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = u8::try_from(self.col).ok().filter(|c| (*c as usize) < MAX_SIZE);
        match (file, self.row.checked_add(1)) {
            (Some(c), Some(rank)) => write!(f, "{}{}", (b'a' + c) as char, rank),
            _ => write!(f, "{},{}", self.row, self.col),
        }
    }
}

/// Square grid of cells stored in row-major order.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Panics if `size * size` overflows; configured sizes are capped at
    /// [`MAX_SIZE`].
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Puts `player`'s mark on an empty cell. The board is untouched on
    /// failure.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), PlacementError> {
        let idx = self.index_of(row, col)?;
        if self.cells[idx] != Cell::Empty {
            return Err(PlacementError::Occupied { row, col });
        }
        self.cells[idx] = player.mark();
        Ok(())
    }

    /// Empties a cell. Only search (undoing a hypothetical move) and round
    /// resets should need this.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), PlacementError> {
        let idx = self.index_of(row, col)?;
        self.cells[idx] = Cell::Empty;
        Ok(())
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, PlacementError> {
        self.index_of(row, col).map(|idx| self.cells[idx])
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(idx, _)| Coord::new(idx / self.size, idx % self.size))
    }

    /// Rows top to bottom, each as a slice of cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks_exact panics on a zero chunk size
        self.cells.chunks_exact(self.size.max(1))
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize, PlacementError> {
        if row >= self.size || col >= self.size {
            return Err(PlacementError::OutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl Index<Coord> for Board {
    type Output = Cell;

    /// Panics when `coord` is off the board; use [`Board::cell_at`] for a
    /// checked read.
    fn index(&self, coord: Coord) -> &Self::Output {
        assert!(coord.row < self.size && coord.col < self.size);
        &self.cells[coord.row * self.size + coord.col]
    }
}

/// Parses a board drawn as rows separated by `/`, with `O` for circles, `X`
/// for crosses and `_`, `.` or `-` for empty cells: `"X_X/OO_/___"`.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').map(str::trim).collect();
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != size {
                return Err(ParseError::RowLength {
                    row: i,
                    expected: size,
                });
            }
            for ch in row.chars() {
                cells.push(match ch {
                    'O' | 'o' => Cell::Circle,
                    'X' | 'x' => Cell::Cross,
                    '_' | '.' | '-' => Cell::Empty,
                    other => return Err(ParseError::Symbol(other)),
                });
            }
        }

        Ok(Board { size, cells })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.size.to_string().len();
        for (i, row) in self.rows().enumerate() {
            write!(f, "{:>width$}│ ", i + 1)?;
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "{:>width$}╰", "")?;
        for _ in 0..=self.size {
            write!(f, "─")?;
        }
        write!(f, "\n{:>width$}  ", "")?;
        for col in 0..self.size {
            write!(f, "{}", (b'A' + (col % MAX_SIZE) as u8) as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_marks_single_cell() {
        let mut board = Board::default();
        board.place(1, 2, Player::One).unwrap();
        assert_eq!(board.cell_at(1, 2).unwrap(), Cell::Circle);
        assert_eq!(board.mark_count(), 1);
    }

    #[test]
    fn test_place_occupied_leaves_board_unchanged() {
        let mut board = Board::default();
        board.place(0, 0, Player::One).unwrap();
        let before = board.clone();

        let err = board.place(0, 0, Player::Two).unwrap_err();

        assert_eq!(err, PlacementError::Occupied { row: 0, col: 0 });
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_out_of_range() {
        let mut board = Board::default();
        let err = board.place(3, 0, Player::One).unwrap_err();
        assert_eq!(
            err,
            PlacementError::OutOfRange {
                row: 3,
                col: 0,
                size: 3
            }
        );
        assert!(board.place(0, 7, Player::One).is_err());
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let board = Board::default();
        assert!(matches!(
            board.cell_at(0, 3),
            Err(PlacementError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_clear_and_reset() {
        let mut board: Board = "XO_/___/__X".parse().unwrap();
        board.clear(0, 1).unwrap();
        assert_eq!(board.cell_at(0, 1).unwrap(), Cell::Empty);
        assert_eq!(board.mark_count(), 2);

        board.reset();
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_is_full() {
        assert!(!Board::default().is_full());
        let board: Board = "XOX/OXO/OXO".parse().unwrap();
        assert!(board.is_full());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board: Board = "X_X/OO_/___".parse().unwrap();
        let empty: Vec<Coord> = board.empty_cells().collect();
        assert_eq!(empty.first(), Some(&Coord::new(0, 1)));
        assert_eq!(empty.get(1), Some(&Coord::new(1, 2)));
        assert_eq!(empty.len(), 5);
    }

    #[test]
    fn test_parse_board_rejects_ragged_rows() {
        assert_eq!(
            "XO/___".parse::<Board>(),
            Err(ParseError::RowLength {
                row: 1,
                expected: 2
            })
        );
        assert_eq!("X?/__".parse::<Board>(), Err(ParseError::Symbol('?')));
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!("a1".parse(), Ok(Coord::new(0, 0)));
        assert_eq!("B3".parse(), Ok(Coord::new(2, 1)));
        assert_eq!(" 1, 2 ".parse(), Ok(Coord::new(1, 2)));
        assert!("a0".parse::<Coord>().is_err());
        assert!("-1,0".parse::<Coord>().is_err());
        assert!("zz".parse::<Coord>().is_err());
        assert_eq!(Coord::new(2, 1).to_string(), "b3");
    }

    #[test]
    fn test_display_coord_without_letter_form() {
        let far: Coord = "18446744073709551615,0".parse().unwrap();
        assert_eq!(far, Coord::new(usize::MAX, 0));
        assert_eq!(far.to_string(), "18446744073709551615,0");
        assert_eq!(Coord::new(0, 30).to_string(), "0,30");
    }

    #[test]
    fn test_player_marks() {
        assert_eq!(Player::One.mark(), Cell::Circle);
        assert_eq!(Player::Two.mark(), Cell::Cross);
        assert_eq!(!Player::One, Player::Two);
        assert_eq!(Cell::Cross.owner(), Some(Player::Two));
        assert_eq!(Cell::Empty.owner(), None);
    }

    #[test]
    fn test_display() {
        let board: Board = "X__/_O_/___".parse().unwrap();
        assert_eq!(board.to_string(), "1│ X--\n2│ -O-\n3│ ---\n ╰────\n   ABC");
    }
}
