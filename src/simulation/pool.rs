use crate::simulation::cell::Cell;
use crate::simulation::generation::Generation;

/// Free list of cell buffers sized for one grid.
///
/// Stepping takes a buffer per generation and history eviction hands it
/// back, so a running simulation stops allocating once the history is full.
/// A buffer is owned either by the pool or by exactly one [`Generation`].
pub struct CellPool {
    width: u32,
    height: u32,
    free: Vec<Vec<Cell>>,
    allocated: usize,
}

impl CellPool {
    /// Create a pool with `initial_size` buffers ready to hand out
    pub fn new(width: u32, height: u32, initial_size: usize) -> Self {
        let len = width as usize * height as usize;
        let free = (0..initial_size).map(|_| Vec::with_capacity(len)).collect();
        Self {
            width,
            height,
            free,
            allocated: initial_size,
        }
    }

    /// Hand out an all-dead generation, reusing a free buffer when one exists
    pub fn acquire(&mut self) -> Generation {
        let buffer = match self.free.pop() {
            Some(buffer) => buffer,
            None => {
                self.allocated += 1;
                log::debug!("Cell pool empty, allocating buffer #{}", self.allocated);
                Vec::with_capacity(self.width as usize * self.height as usize)
            }
        };
        Generation::from_buffer(self.width, self.height, buffer)
    }

    /// Take a generation's buffer back for reuse
    pub fn release(&mut self, generation: Generation) {
        if generation.width() != self.width || generation.height() != self.height {
            log::warn!(
                "Dropping {}x{} generation released to {}x{} pool",
                generation.width(),
                generation.height(),
                self.width,
                self.height
            );
            return;
        }
        let mut buffer = generation.into_buffer();
        buffer.clear();
        self.free.push(buffer);
    }

    /// Buffers currently waiting in the free list
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Buffers created over the pool's lifetime
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_allocates_when_empty() {
        let mut pool = CellPool::new(4, 4, 0);
        let generation = pool.acquire();
        assert_eq!(generation, Generation::new(4, 4));
        assert_eq!(pool.allocated(), 1);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_release_then_acquire_reuses_buffer() {
        let mut pool = CellPool::new(8, 8, 0);
        let mut generation = pool.acquire();
        generation.get_mut(3, 3).unwrap().set_alive(true);
        let ptr = generation.cells().as_ptr();

        pool.release(generation);
        assert_eq!(pool.available(), 1);

        let reused = pool.acquire();
        assert_eq!(reused.cells().as_ptr(), ptr, "buffer should be recycled");
        assert_eq!(reused.alive_count(), 0, "recycled buffer must come back dead");
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_preallocated_buffers() {
        let mut pool = CellPool::new(2, 2, 3);
        assert_eq!(pool.available(), 3);
        let _a = pool.acquire();
        let _b = pool.acquire();
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.allocated(), 3);
    }

    #[test]
    fn test_release_wrong_size_is_dropped() {
        let mut pool = CellPool::new(4, 4, 0);
        pool.release(Generation::new(5, 5));
        assert_eq!(pool.available(), 0);
    }
}
