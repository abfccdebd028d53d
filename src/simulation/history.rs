use std::collections::VecDeque;

use crate::simulation::generation::Generation;

/// Bounded, rewindable list of generations.
///
/// Always holds at least one generation and keeps `current < len()`.
/// Generations behind the head are never mutated by navigation.
pub struct History {
    generations: VecDeque<Generation>,
    current: usize,
    capacity: usize,
}

impl History {
    /// Start a history at `initial`; `capacity` is clamped to at least 1
    pub fn new(initial: Generation, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut generations = VecDeque::with_capacity(capacity);
        generations.push_back(initial);
        Self {
            generations,
            current: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Never true; a history always has a current generation
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn head_index(&self) -> usize {
        self.generations.len() - 1
    }

    pub fn is_at_head(&self) -> bool {
        self.current == self.head_index()
    }

    pub fn current(&self) -> &Generation {
        &self.generations[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Generation {
        &mut self.generations[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&Generation> {
        self.generations.get(index)
    }

    /// Whether `generation`'s cell buffer is also owned by an entry here
    pub fn shares_buffer_with(&self, generation: &Generation) -> bool {
        let ptr = generation.cells().as_ptr();
        self.generations
            .iter()
            .any(|entry| std::ptr::eq(entry.cells().as_ptr(), ptr))
    }

    /// Append at the tail and make it current.
    ///
    /// Returns the oldest generation if the push took the history past its
    /// capacity.
    pub fn push(&mut self, generation: Generation) -> Option<Generation> {
        self.generations.push_back(generation);
        self.current = self.generations.len() - 1;

        if self.generations.len() > self.capacity {
            let evicted = self.generations.pop_front();
            self.current -= 1;
            evicted
        } else {
            None
        }
    }

    /// Move one generation back; returns false at the oldest generation
    pub fn rewind(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Move one generation forward; returns false at the head
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_head() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Drop every generation after the current one, returning them oldest first
    pub fn truncate_future(&mut self) -> Vec<Generation> {
        self.generations.drain(self.current + 1..).collect()
    }

    /// Replace the whole history with `initial`, returning the old generations
    pub fn reset(&mut self, initial: Generation) -> Vec<Generation> {
        let old = self.generations.drain(..).collect();
        self.generations.push_back(initial);
        self.current = 0;
        old
    }
}
