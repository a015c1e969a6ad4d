//! Toroidal cell grid
//!
//! Cells live in a flat row-major buffer indexed by `y * width + x`.
//! Coordinates passed to neighbour lookups wrap on both axes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GridError;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Map the legacy numeric encoding (0 off, 1 in creation, 2 normal, 3 dying)
    pub fn from_legacy(value: u8) -> Self {
        match value {
            1 | 2 => Cell::Alive,
            _ => Cell::Dead,
        }
    }

    /// Legacy numeric encoding understood by the playback page
    pub fn to_legacy(self) -> u8 {
        match self {
            Cell::Alive => 2,
            Cell::Dead => 0,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// A fixed-size toroidal grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self::from_cells_unchecked(
            width,
            height,
            vec![Cell::Dead; width * height],
        ))
    }

    /// Build from a row-major buffer
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if cells.len() != width * height {
            return Err(GridError::SizeMismatch {
                width,
                height,
                len: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Buffer length must already match the dimensions
    pub(crate) fn from_cells_unchecked(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build from rows of legacy numeric states
    pub fn from_legacy_rows(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: width,
                });
            }
            cells.extend(values.iter().map(|&v| Cell::from_legacy(v)));
        }
        Self::from_cells(width, rows.len(), cells)
    }

    /// Parse a pattern drawn with `#`/`O` for alive and `.` for dead, one row per line
    pub fn from_pattern(pattern: &str) -> Result<Self, GridError> {
        let rows: Vec<Vec<u8>> = pattern
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| if matches!(c, '#' | 'O' | '*') { 2 } else { 0 })
                    .collect()
            })
            .collect();
        Self::from_legacy_rows(&rows)
    }

    /// Rows in the legacy numeric encoding
    pub fn to_legacy_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.to_legacy()).collect())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell at wrapped coordinates
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Cell {
        let wx = x.rem_euclid(self.width as i64) as usize;
        let wy = y.rem_euclid(self.height as i64) as usize;
        self.cells[self.index(wx, wy)]
    }

    /// Set the cell at wrapped coordinates
    pub fn set(&mut self, x: i64, y: i64, cell: Cell) {
        let wx = x.rem_euclid(self.width as i64) as usize;
        let wy = y.rem_euclid(self.height as i64) as usize;
        let idx = self.index(wx, wy);
        self.cells[idx] = cell;
    }

    /// Number of alive cells among the 8 wrapped neighbours
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0u8;
        for dy in [-1i64, 0, 1] {
            for dx in [-1i64, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.get(x as i64 + dx, y as i64 + dy).is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.iter().any(|c| c.is_alive())
    }

    /// Canonical row-major key (one byte per cell) used for loop detection
    pub fn key(&self) -> Vec<u8> {
        self.cells.iter().map(|&c| c.is_alive() as u8).collect()
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_legacy_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Grid::from_legacy_rows(&rows).map_err(serde::de::Error::custom)
    }
}
