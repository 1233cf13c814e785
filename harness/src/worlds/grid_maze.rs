//! `GridMaze`: a row-string maze fixture for the search layer.
//!
//! Glyphs:
//!
//! | glyph     | meaning                         | entry cost |
//! |-----------|---------------------------------|------------|
//! | `X`       | impassable wall                 | n/a        |
//! | `.`       | floor                           | 1          |
//! | `I`       | initial position (floor)        | 1          |
//! | `M`       | mud                             | 3          |
//! | `1`..=`9` | key cell, id = digit (floor)    | 1          |
//!
//! Coordinates are `(col, row)` with `(0, 0)` at the top-left.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use waypoint_search::contract::MazeModelV1;
use waypoint_search::heuristic::HeuristicV1;

/// Cost of entering a floor, key or initial cell.
pub const FLOOR_COST: u64 = 1;

/// Cost of entering a mud cell.
pub const MUD_COST: u64 = 3;

/// A single cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub col: u32,
    pub row: u32,
}

impl GridCell {
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub fn manhattan(self, other: Self) -> u64 {
        u64::from(self.col.abs_diff(other.col)) + u64::from(self.row.abs_diff(other.row))
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// A single-step move. Rendered as `U`, `D`, `L`, `R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GridAction {
    Up,
    Down,
    Left,
    Right,
}

impl GridAction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "U",
            Self::Down => "D",
            Self::Left => "L",
            Self::Right => "R",
        }
    }

    /// The neighbor of `cell` in this direction, if it is not off the top/left edge.
    fn step(self, cell: GridCell) -> Option<GridCell> {
        match self {
            Self::Up => cell.row.checked_sub(1).map(|row| GridCell::new(cell.col, row)),
            Self::Down => cell.row.checked_add(1).map(|row| GridCell::new(cell.col, row)),
            Self::Left => cell.col.checked_sub(1).map(|col| GridCell::new(col, cell.row)),
            Self::Right => cell.col.checked_add(1).map(|col| GridCell::new(col, cell.row)),
        }
    }
}

impl fmt::Display for GridAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Wall,
    Floor,
    Mud,
    Key(u32),
}

/// Typed failure for grid construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridParseError {
    /// No rows, or a zero-width first row.
    Empty,
    /// A row's width differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A character outside the glyph table.
    UnknownGlyph { col: usize, row: usize, glyph: char },
    /// No `I` cell.
    MissingInitial,
    /// More than one `I` cell.
    DuplicateInitial { first: GridCell, second: GridCell },
    /// The initial cell of an open field is out of bounds or on the border.
    InitialNotInterior { initial: GridCell },
    /// Dimensions exceed the `u32` coordinate space.
    TooLarge,
}

impl fmt::Display for GridParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no cells"),
            Self::RaggedRow {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has width {actual}, expected {expected}"),
            Self::UnknownGlyph { col, row, glyph } => {
                write!(f, "unknown glyph {glyph:?} at ({col},{row})")
            }
            Self::MissingInitial => write!(f, "grid has no initial cell 'I'"),
            Self::DuplicateInitial { first, second } => {
                write!(f, "grid has two initial cells: {first} and {second}")
            }
            Self::InitialNotInterior { initial } => {
                write!(f, "initial cell {initial} is not inside the border")
            }
            Self::TooLarge => write!(f, "grid dimensions exceed u32 coordinates"),
        }
    }
}

impl std::error::Error for GridParseError {}

/// A rectangular maze of glyph tiles.
#[derive(Debug, Clone)]
pub struct GridMaze {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    initial: GridCell,
    keys: BTreeMap<GridCell, u32>,
}

impl GridMaze {
    /// Parse a maze from row strings.
    ///
    /// # Errors
    ///
    /// Returns [`GridParseError`] for empty or ragged grids, unknown glyphs,
    /// and a missing or duplicated `I`.
    pub fn parse(rows: &[&str]) -> Result<Self, GridParseError> {
        let expected = rows.first().map_or(0, |r| r.chars().count());
        if expected == 0 {
            return Err(GridParseError::Empty);
        }
        let width = u32::try_from(expected).map_err(|_| GridParseError::TooLarge)?;
        let height = u32::try_from(rows.len()).map_err(|_| GridParseError::TooLarge)?;

        let mut tiles = Vec::with_capacity(expected * rows.len());
        let mut keys = BTreeMap::new();
        let mut initial: Option<GridCell> = None;

        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != expected {
                return Err(GridParseError::RaggedRow {
                    row,
                    expected,
                    actual,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                // Both indices are bounded by width/height, already checked to fit.
                #[allow(clippy::cast_possible_truncation)]
                let cell = GridCell::new(col as u32, row as u32);
                let tile = match glyph {
                    'X' => Tile::Wall,
                    '.' => Tile::Floor,
                    'M' => Tile::Mud,
                    'I' => {
                        if let Some(first) = initial {
                            return Err(GridParseError::DuplicateInitial {
                                first,
                                second: cell,
                            });
                        }
                        initial = Some(cell);
                        Tile::Floor
                    }
                    '1'..='9' => {
                        let id = glyph.to_digit(10).unwrap_or_default();
                        keys.insert(cell, id);
                        Tile::Key(id)
                    }
                    _ => return Err(GridParseError::UnknownGlyph { col, row, glyph }),
                };
                tiles.push(tile);
            }
        }

        let initial = initial.ok_or(GridParseError::MissingInitial)?;
        Ok(Self {
            width,
            height,
            tiles,
            initial,
            keys,
        })
    }

    /// Build a bordered open field: outer ring of walls, floor inside.
    ///
    /// Interior cells are assigned in priority order: `walls`, `initial`,
    /// `keys` (ids `1, 2, ...` in row-major scan order), `mud`, floor.
    ///
    /// # Errors
    ///
    /// Returns [`GridParseError::Empty`] for a zero-sized field and
    /// [`GridParseError::InitialNotInterior`] if `initial` is on the border,
    /// outside the field, or listed in `walls`.
    pub fn open_field(
        width: u32,
        height: u32,
        initial: GridCell,
        keys: &BTreeSet<GridCell>,
        mud: &BTreeSet<GridCell>,
        walls: &BTreeSet<GridCell>,
    ) -> Result<Self, GridParseError> {
        if width == 0 || height == 0 {
            return Err(GridParseError::Empty);
        }
        let on_border = |c: GridCell| c.row == 0 || c.col == 0 || c.row + 1 >= height || c.col + 1 >= width;
        if on_border(initial) || walls.contains(&initial) {
            return Err(GridParseError::InitialNotInterior { initial });
        }

        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        let mut key_ids = BTreeMap::new();
        let mut next_key = 1u32;
        for row in 0..height {
            for col in 0..width {
                let cell = GridCell::new(col, row);
                let tile = if on_border(cell) || walls.contains(&cell) {
                    Tile::Wall
                } else if cell == initial {
                    Tile::Floor
                } else if keys.contains(&cell) {
                    let id = next_key;
                    next_key += 1;
                    key_ids.insert(cell, id);
                    Tile::Key(id)
                } else if mud.contains(&cell) {
                    Tile::Mud
                } else {
                    Tile::Floor
                };
                tiles.push(tile);
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
            initial,
            keys: key_ids,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn tile(&self, cell: GridCell) -> Option<Tile> {
        if cell.col >= self.width || cell.row >= self.height {
            return None;
        }
        let idx = cell.row as usize * self.width as usize + cell.col as usize;
        self.tiles.get(idx).copied()
    }

    /// Whether `cell` is inside the grid and not a wall.
    #[must_use]
    pub fn is_passable(&self, cell: GridCell) -> bool {
        matches!(self.tile(cell), Some(t) if t != Tile::Wall)
    }

    /// Render the maze back to row strings.
    ///
    /// Open-field keys beyond id 9 have no glyph and render as `K`.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| {
                        let cell = GridCell::new(col, row);
                        match self.tile(cell) {
                            _ if cell == self.initial => 'I',
                            Some(Tile::Wall) | None => 'X',
                            Some(Tile::Floor) => '.',
                            Some(Tile::Mud) => 'M',
                            Some(Tile::Key(id)) => char::from_digit(id, 10).unwrap_or('K'),
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl MazeModelV1 for GridMaze {
    type Position = GridCell;
    type Action = GridAction;
    type KeyId = u32;

    fn initial_position(&self) -> GridCell {
        self.initial
    }

    fn key_positions(&self) -> BTreeSet<GridCell> {
        self.keys.keys().copied().collect()
    }

    fn transitions_from(&self, position: &GridCell) -> BTreeMap<GridAction, GridCell> {
        GridAction::ALL
            .iter()
            .filter_map(|&action| {
                action
                    .step(*position)
                    .filter(|next| self.is_passable(*next))
                    .map(|next| (action, next))
            })
            .collect()
    }

    fn step_cost(&self, position: &GridCell) -> u64 {
        match self.tile(*position) {
            Some(Tile::Mud) => MUD_COST,
            _ => FLOOR_COST,
        }
    }

    fn key_identifier(&self, position: &GridCell) -> Option<u32> {
        self.keys.get(position).copied()
    }
}

/// Consistent heuristic: Manhattan distance to the farthest uncollected key.
///
/// Every move costs at least [`FLOOR_COST`] and changes Manhattan distance
/// by at most one, so the estimate never exceeds the true remaining cost
/// and never drops by more than a step's cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct FarthestKeyManhattan;

impl HeuristicV1<GridMaze> for FarthestKeyManhattan {
    fn heuristic_id(&self) -> &str {
        "farthest_key_manhattan"
    }

    fn estimate(
        &self,
        model: &GridMaze,
        position: &GridCell,
        collected_keys: &BTreeSet<GridCell>,
    ) -> u64 {
        model
            .keys
            .keys()
            .filter(|k| !collected_keys.contains(k))
            .map(|k| position.manhattan(*k) * FLOOR_COST)
            .max()
            .unwrap_or(0)
    }
}
