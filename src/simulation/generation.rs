use crate::error::LifeError;
use crate::simulation::cell::Cell;

/// One complete grid snapshot, stored row-major.
///
/// Every slot holds a real [`Cell`]; a dead cell is an explicit
/// `alive == false`, never a missing entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Generation {
    /// Create an all-dead generation
    pub fn new(width: u32, height: u32) -> Self {
        let mut generation = Self {
            width,
            height,
            cells: Vec::with_capacity(width as usize * height as usize),
        };
        generation.fill_dead();
        generation
    }

    /// Reuse an existing cell buffer, resizing and resetting it as needed
    pub(crate) fn from_buffer(width: u32, height: u32, cells: Vec<Cell>) -> Self {
        let mut generation = Self {
            width,
            height,
            cells,
        };
        generation.fill_dead();
        generation
    }

    pub(crate) fn into_buffer(self) -> Vec<Cell> {
        self.cells
    }

    /// Reset every cell to dead, keeping the allocation
    pub fn fill_dead(&mut self) {
        let width = self.width as usize;
        let len = width * self.height as usize;
        self.cells.clear();
        self.cells
            .extend((0..len).map(|i| Cell::dead((i % width) as u32, (i / width) as u32)));
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn check(&self, x: i64, y: i64) -> Result<usize, LifeError> {
        if self.contains(x, y) {
            Ok(self.index(x as u32, y as u32))
        } else {
            Err(LifeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        self.check(x as i64, y as i64).ok().map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Cell> {
        match self.check(x as i64, y as i64) {
            Ok(i) => Some(&mut self.cells[i]),
            Err(_) => None,
        }
    }

    /// Bounds-checked mutable access with a reportable error
    pub fn cell_mut(&mut self, x: i64, y: i64) -> Result<&mut Cell, LifeError> {
        let i = self.check(x, y)?;
        Ok(&mut self.cells[i])
    }

    pub fn is_alive(&self, x: u32, y: u32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.alive)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Rows from top (y = 0) to bottom
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Cell> {
        self.cells.chunks_exact(self.width as usize)
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Coordinates of every live cell, row by row
    pub fn alive_positions(&self) -> Vec<(u32, u32)> {
        self.cells
            .iter()
            .filter(|cell| cell.alive)
            .map(|cell| (cell.x, cell.y))
            .collect()
    }

    /// Count live cells among the 8 Moore neighbours of (x, y).
    ///
    /// Coordinates wrap around both axes, so row 0 neighbours row
    /// `height - 1` and column 0 neighbours column `width - 1`.
    pub fn neighbor_count(&self, x: u32, y: u32) -> u8 {
        let width = self.width as i64;
        let height = self.height as i64;
        let mut count = 0;

        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let nx = (x as i64 + dx).rem_euclid(width) as u32;
                let ny = (y as i64 + dy).rem_euclid(height) as u32;

                if self.cells[self.index(nx, ny)].alive {
                    count += 1;
                }
            }
        }

        count
    }
}
