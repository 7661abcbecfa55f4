//! 4x4 pressure-mat view over the two reported banks.
//!
//! Physical layout of the mat (row-major, top-left first). Left half is the reference bank,
//! right half the per-channel bank, both in a zig-zag.

use crate::channel::StorageIndex;
use crate::report::Bank::{Channel as An, Reference as A0};
use crate::report::{Bank, Reading};

pub const GRID_SIZE: usize = 4;

pub const GRID_LAYOUT: [[(Bank, StorageIndex); GRID_SIZE]; GRID_SIZE] = [
    [(A0, 1), (A0, 0), (An, 6), (An, 7)],
    [(A0, 3), (A0, 2), (An, 4), (An, 5)],
    [(A0, 5), (A0, 4), (An, 2), (An, 3)],
    [(A0, 7), (A0, 6), (An, 0), (An, 1)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Current,
    Average,
    Peak,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    current: u16,
    peak: u16,
    since_ms: u32,     // when `current` last changed
    weighted_sum: u64, // Σ value × ms, closed segments only
    elapsed_ms: u64,
}

impl Cell {
    fn update(&mut self, value: u16, now_ms: u32) {
        if value != self.current {
            let dur = now_ms.wrapping_sub(self.since_ms) as u64;
            self.weighted_sum += self.current as u64 * dur;
            self.elapsed_ms += dur;
            self.current = value;
            self.since_ms = now_ms;
        }

        self.peak = self.peak.max(value);
    }

    fn average(&self, now_ms: u32) -> u16 {
        let open = now_ms.wrapping_sub(self.since_ms) as u64;
        let total = self.elapsed_ms + open;
        if total == 0 {
            return self.current;
        }

        ((self.weighted_sum + self.current as u64 * open) / total) as u16
    }
}

/// Latest, peak and time-weighted average reading per mat cell. Timestamps are free-running ms.
#[derive(Debug, Clone)]
pub struct PressureGrid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl PressureGrid {
    pub fn new(now_ms: u32) -> Self {
        let mut grid = Self { cells: [[Cell::default(); GRID_SIZE]; GRID_SIZE] };
        grid.reset(now_ms);
        grid
    }

    pub fn reset(&mut self, now_ms: u32) {
        self.cells = [[Cell { since_ms: now_ms, ..Cell::default() }; GRID_SIZE]; GRID_SIZE];
    }

    /// Where a reading lands on the mat as (row, col).
    pub fn locate(bank: Bank, index: StorageIndex) -> Option<(usize, usize)> {
        GRID_LAYOUT.iter().enumerate().find_map(|(r, row)| {
            row.iter().position(|&cell| cell == (bank, index)).map(|c| (r, c))
        })
    }

    pub fn ingest(&mut self, reading: Reading, now_ms: u32) -> bool {
        match Self::locate(reading.bank, reading.index) {
            Some((r, c)) => {
                self.cells[r][c].update(reading.value, now_ms);
                true
            }
            None => false,
        }
    }

    /// Time since the cell's value last changed; `None` off the mat.
    pub fn held_for(&self, row: usize, col: usize, now_ms: u32) -> Option<u32> {
        let cell = self.cells.get(row)?.get(col)?;
        Some(now_ms.wrapping_sub(cell.since_ms))
    }

    pub fn view(&self, mode: ViewMode, now_ms: u32) -> [[u16; GRID_SIZE]; GRID_SIZE] {
        self.cells.map(|row| {
            row.map(|cell| match mode {
                ViewMode::Current => cell.current,
                ViewMode::Average => cell.average(now_ms),
                ViewMode::Peak => cell.peak,
            })
        })
    }
}
