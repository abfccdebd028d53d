use rand::Rng;

/// GPU-compatible RGBA colour, 16 bytes, components in [0, 1].
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.75, 0.75, 0.75);

    /// Fully transparent; the renderer shows the background through it
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque colour with uniformly random RGB components
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::rgb(rng.gen(), rng.gen(), rng.gen())
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Visualisation of the neighbour count a rule saw for a cell.
///
/// 0 black, 1 red, 2 yellow, 3 green, 4 cyan, 5 blue, 6 magenta, 7 white,
/// anything else gray.
pub fn color_for_neighbor_count(count: u8) -> Color {
    match count {
        0 => Color::BLACK,
        1 => Color::RED,
        2 => Color::YELLOW,
        3 => Color::GREEN,
        4 => Color::CYAN,
        5 => Color::BLUE,
        6 => Color::MAGENTA,
        7 => Color::WHITE,
        _ => Color::GRAY,
    }
}

/// Discrete lifecycle used by multi-state rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    Alive,
    Dying,
    #[default]
    Dead,
}

/// One grid position in one generation.
///
/// `alive` is kept equal to `state == CellState::Alive`; use
/// [`Cell::set_state`] or [`Cell::set_alive`] rather than writing either
/// field on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub alive: bool,
    pub state: CellState,
    pub color: Color,
    /// Live neighbours counted during the step that produced this cell
    pub live_neighbors: u8,
    pub x: u32,
    pub y: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Self::dead(0, 0)
    }
}

impl Cell {
    /// A dead, black cell with no recorded neighbours
    pub fn dead(x: u32, y: u32) -> Self {
        Self {
            alive: false,
            state: CellState::Dead,
            color: Color::BLACK,
            live_neighbors: 0,
            x,
            y,
        }
    }

    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
        self.alive = state == CellState::Alive;
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.set_state(if alive {
            CellState::Alive
        } else {
            CellState::Dead
        });
    }

    /// Whether the renderer should paint this cell when dead cells are hidden
    pub fn is_visible(&self) -> bool {
        self.state != CellState::Dead
    }

    /// Return to the default dead state, keeping the position
    pub fn reset(&mut self) {
        *self = Self::dead(self.x, self.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_size() {
        assert_eq!(std::mem::size_of::<Color>(), 16);
    }

    #[test]
    fn test_neighbor_color_table() {
        let expected = [
            Color::BLACK,
            Color::RED,
            Color::YELLOW,
            Color::GREEN,
            Color::CYAN,
            Color::BLUE,
            Color::MAGENTA,
            Color::WHITE,
            Color::GRAY,
        ];
        for (count, color) in expected.iter().enumerate() {
            assert_eq!(color_for_neighbor_count(count as u8), *color, "count {}", count);
        }
        assert_eq!(color_for_neighbor_count(200), Color::GRAY);
    }

    #[test]
    fn test_state_keeps_alive_flag_in_sync() {
        let mut cell = Cell::dead(3, 4);
        cell.set_state(CellState::Alive);
        assert!(cell.alive);
        cell.set_state(CellState::Dying);
        assert!(!cell.alive);
        assert!(cell.is_visible(), "dying cells are still drawn");
        cell.set_alive(false);
        assert_eq!(cell.state, CellState::Dead);
        assert!(!cell.is_visible());
    }

    #[test]
    fn test_reset_keeps_position() {
        let mut cell = Cell::dead(7, 2);
        cell.set_alive(true);
        cell.color = Color::GREEN;
        cell.live_neighbors = 3;
        cell.reset();
        assert_eq!(cell, Cell::dead(7, 2));
    }
}
