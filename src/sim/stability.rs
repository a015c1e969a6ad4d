//! Extinction and loop detection over a bounded history

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::{HISTORY_CAPACITY, MIN_STEPS_FOR_LOOP};

/// Why a grid is considered settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// No cell is alive
    Dead,
    /// The grid repeats an earlier recorded generation
    Loop,
}

/// Recent grid keys, oldest first. Never holds more than `HISTORY_CAPACITY` entries.
#[derive(Debug, Clone, Default)]
pub struct History {
    keys: VecDeque<Vec<u8>>,
}

impl History {
    pub fn new() -> Self {
        Self {
            keys: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Record a grid, evicting the oldest entry past capacity
    pub fn push(&mut self, grid: &Grid) {
        self.keys.push_back(grid.key());
        if self.keys.len() > HISTORY_CAPACITY {
            self.keys.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn get(&self, index: usize) -> Option<&[u8]> {
        self.keys.get(index).map(Vec::as_slice)
    }
}

/// Decide whether `grid` has settled.
///
/// `history` is expected to already contain `grid` as its newest entry. Loop
/// detection only starts once the history holds `MIN_STEPS_FOR_LOOP + 1`
/// entries, and ignores the newest `MIN_STEPS_FOR_LOOP` entries: the match must
/// be against a generation at least two steps back.
pub fn check_stability(grid: &Grid, history: &History) -> Option<Stability> {
    if grid.is_extinct() {
        return Some(Stability::Dead);
    }

    if history.len() >= MIN_STEPS_FOR_LOOP + 1 {
        let key = grid.key();
        let repeats = (0..history.len() - MIN_STEPS_FOR_LOOP)
            .any(|i| history.get(i) == Some(key.as_slice()));
        if repeats {
            return Some(Stability::Loop);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::step::step;

    fn blinker() -> Grid {
        Grid::from_pattern(
            ".....
             .....
             .###.
             .....
             .....",
        )
        .unwrap()
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        let mut grid = Grid::new(4, 4).unwrap();
        for i in 0..50 {
            grid.set(i, i / 4, crate::sim::Cell::Alive);
            history.push(&grid);
            assert!(history.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = History::new();
        let first = blinker();
        history.push(&first);
        let grid = Grid::new(5, 5).unwrap();
        for _ in 0..HISTORY_CAPACITY {
            history.push(&grid);
        }
        assert_ne!(history.get(0), Some(first.key().as_slice()));
        assert_eq!(history.get(0), Some(grid.key().as_slice()));
    }

    #[test]
    fn test_dead_grid_reported() {
        let grid = step(&Grid::new(6, 6).unwrap()).grid;
        let mut history = History::new();
        history.push(&grid);
        assert_eq!(check_stability(&grid, &history), Some(Stability::Dead));
    }

    #[test]
    fn test_blinker_loop_needs_three_entries() {
        let mut history = History::new();
        let mut grid = blinker();
        history.push(&grid);
        assert_eq!(check_stability(&grid, &history), None);

        grid = step(&grid).grid;
        history.push(&grid);
        assert_eq!(history.len(), 2);
        assert_eq!(check_stability(&grid, &history), None);

        grid = step(&grid).grid;
        history.push(&grid);
        assert_eq!(history.len(), 3);
        assert_eq!(check_stability(&grid, &history), Some(Stability::Loop));
    }

    #[test]
    fn test_previous_entry_excluded_from_loop_window() {
        // A still life matches the entry right before it, which is outside the window
        let block = Grid::from_pattern(
            "....
             .##.
             .##.
             ....",
        )
        .unwrap();
        let mut history = History::new();
        history.push(&block);
        history.push(&block);
        assert_eq!(check_stability(&block, &history), None);
        history.push(&block);
        assert_eq!(check_stability(&block, &history), Some(Stability::Loop));
    }

    #[test]
    fn test_distinct_history_is_not_a_loop() {
        let mut history = History::new();
        for n in 1..=5 {
            let mut grid = Grid::new(8, 1).unwrap();
            for x in 0..n {
                grid.set(x, 0, crate::sim::Cell::Alive);
            }
            history.push(&grid);
        }
        let mut current = Grid::new(8, 1).unwrap();
        for x in 0..5 {
            current.set(x, 0, crate::sim::Cell::Alive);
        }
        assert_eq!(check_stability(&current, &history), None);
    }
}
