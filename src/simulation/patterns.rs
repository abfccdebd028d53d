//! Stamp patterns and boolean matrix transforms.
//!
//! Patterns are written as rows of text: `O` (or `#`) is alive, any other
//! character is dead. Row 0 is the top of the pattern.

use rand::Rng;

use crate::error::LifeError;

/// Immutable width x height boolean matrix, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Pattern {
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, LifeError> {
        if cells.len() != width * height {
            return Err(LifeError::PatternShape {
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub(crate) fn from_bools(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build from text rows; short rows are padded with dead cells
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = vec![false; width * height];

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                cells[y * width + x] = matches!(ch, 'O' | '#');
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Each cell independently alive with probability `density`
    pub fn random(
        width: usize,
        height: usize,
        density: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, LifeError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::InvalidDensity(density));
        }
        let cells = (0..width * height)
            .map(|_| rng.gen::<f64>() < density)
            .collect();
        Self::new(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// False outside the pattern
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Rotate a quarter turn clockwise; width and height swap.
    ///
    /// Row `i`, column `j` of the input lands at row `j`, column
    /// `height - 1 - i` of the output.
    pub fn rotate90(&self) -> Self {
        let (width, height) = (self.height, self.width);
        let mut cells = vec![false; width * height];

        for i in 0..self.height {
            for j in 0..self.width {
                cells[j * width + (self.height - 1 - i)] = self.cells[i * self.width + j];
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Reverse every row (left becomes right)
    pub fn mirror_horizontal(&self) -> Self {
        let cells = self
            .cells
            .chunks_exact(self.width.max(1))
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Reverse the row order (top becomes bottom)
    pub fn mirror_vertical(&self) -> Self {
        let cells = self
            .cells
            .chunks_exact(self.width.max(1))
            .rev()
            .flatten()
            .copied()
            .collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

/// Named entries of the pattern catalogue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Glider,
    LightweightSpaceship,
    GosperGliderGun,
    Pulsar,
    Rabbits,
}

impl PatternKind {
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Glider,
        PatternKind::LightweightSpaceship,
        PatternKind::GosperGliderGun,
        PatternKind::Pulsar,
        PatternKind::Rabbits,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Glider => "Glider",
            PatternKind::LightweightSpaceship => "Lightweight spaceship",
            PatternKind::GosperGliderGun => "Gosper glider gun",
            PatternKind::Pulsar => "Pulsar",
            PatternKind::Rabbits => "Rabbits",
        }
    }

    pub fn pattern(self) -> Pattern {
        Pattern::from_rows(self.rows())
    }

    fn rows(self) -> &'static [&'static str] {
        match self {
            PatternKind::Glider => &[
                ".O.",
                "..O",
                "OOO",
            ],
            PatternKind::LightweightSpaceship => &[
                ".O..O",
                "O....",
                "O...O",
                "OOOO.",
            ],
            PatternKind::GosperGliderGun => &[
                "........................O...........",
                "......................O.O...........",
                "............OO......OO............OO",
                "...........O...O....OO............OO",
                "OO........O.....O...OO..............",
                "OO........O...O.OO....O.O...........",
                "..........O.....O.......O...........",
                "...........O...O....................",
                "............OO......................",
            ],
            PatternKind::Pulsar => &[
                "..OOO...OOO..",
                ".............",
                "O....O.O....O",
                "O....O.O....O",
                "O....O.O....O",
                "..OOO...OOO..",
                ".............",
                "..OOO...OOO..",
                "O....O.O....O",
                "O....O.O....O",
                "O....O.O....O",
                ".............",
                "..OOO...OOO..",
            ],
            PatternKind::Rabbits => &[
                "O...OOO",
                "OOO..O.",
                ".O.....",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_rows_pads_short_rows() {
        let pattern = Pattern::from_rows(&["O", "#.O", ""]);
        assert_eq!((pattern.width(), pattern.height()), (3, 3));
        assert!(pattern.get(0, 0));
        assert!(!pattern.get(1, 0));
        assert!(pattern.get(2, 1));
        assert!(!pattern.get(2, 2));
        assert!(!pattern.get(10, 10), "outside the pattern reads as dead");
    }

    #[test]
    fn test_new_checks_shape() {
        assert!(Pattern::new(2, 2, vec![true; 4]).is_ok());
        assert_eq!(
            Pattern::new(2, 3, vec![true; 4]),
            Err(LifeError::PatternShape {
                expected: 6,
                actual: 4
            })
        );
    }

    #[test]
    fn test_catalogue_sizes() {
        let expected = [
            (PatternKind::Glider, 3, 3, 5),
            (PatternKind::LightweightSpaceship, 5, 4, 9),
            (PatternKind::GosperGliderGun, 36, 9, 36),
            (PatternKind::Pulsar, 13, 13, 48),
            (PatternKind::Rabbits, 7, 3, 9),
        ];
        for (kind, width, height, alive) in expected {
            let pattern = kind.pattern();
            assert_eq!(pattern.width(), width, "{}", kind.name());
            assert_eq!(pattern.height(), height, "{}", kind.name());
            assert_eq!(pattern.alive_count(), alive, "{}", kind.name());
        }
    }

    #[test]
    fn test_rotate90_swaps_dimensions() {
        let pattern = Pattern::from_rows(&["OO.", "..."]);
        let rotated = pattern.rotate90();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        // clockwise: the top row becomes the right column
        assert_eq!(rotated, Pattern::from_rows(&[".O", ".O", ".."]));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let shapes = [
            PatternKind::GosperGliderGun.pattern(),
            PatternKind::Rabbits.pattern(),
            Pattern::random(7, 2, 0.5, &mut rng).unwrap(),
            Pattern::random(1, 9, 0.5, &mut rng).unwrap(),
        ];
        for original in shapes {
            let spun = original.rotate90().rotate90().rotate90().rotate90();
            assert_eq!(spun, original);
        }
    }

    #[test]
    fn test_mirror_horizontal() {
        let pattern = Pattern::from_rows(&["OO.", "O.."]);
        assert_eq!(pattern.mirror_horizontal(), Pattern::from_rows(&[".OO", "..O"]));
        assert_eq!(pattern.mirror_horizontal().mirror_horizontal(), pattern);
    }

    #[test]
    fn test_mirror_vertical() {
        let pattern = Pattern::from_rows(&["OO.", "O.."]);
        assert_eq!(pattern.mirror_vertical(), Pattern::from_rows(&["O..", "OO."]));
    }

    #[test]
    fn test_random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(11);
        let empty = Pattern::random(30, 30, 0.0, &mut rng).unwrap();
        assert_eq!(empty.alive_count(), 0);
        let full = Pattern::random(30, 30, 1.0, &mut rng).unwrap();
        assert_eq!(full.alive_count(), 900);
        assert!(Pattern::random(3, 3, 1.2, &mut rng).is_err());
    }

    #[test]
    fn test_random_density_is_roughly_honoured() {
        let mut rng = StdRng::seed_from_u64(5);
        let pattern = Pattern::random(100, 100, 0.1, &mut rng).unwrap();
        let alive = pattern.alive_count();
        assert!((700..1300).contains(&alive), "expected ~1000 live cells, got {}", alive);
    }
}
