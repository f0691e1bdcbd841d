use crate::cell::Cell;
use crate::grid::Grid;

/// A named seed shape, cells given as `(row, col)` from its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const PATTERNS: &[Pattern] = &[
    GLIDER,
    Pattern {
        name: "Blinker",
        cells: &[(1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 1), (1, 2), (1, 3), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (1, 3), (1, 4), (1, 5), (1, 9), (1, 10), (1, 11),
            (3, 1), (3, 6), (3, 8), (3, 13),
            (4, 1), (4, 6), (4, 8), (4, 13),
            (5, 1), (5, 6), (5, 8), (5, 13),
            (6, 3), (6, 4), (6, 5), (6, 9), (6, 10), (6, 11),
            // Bottom half (mirrored)
            (8, 3), (8, 4), (8, 5), (8, 9), (8, 10), (8, 11),
            (9, 1), (9, 6), (9, 8), (9, 13),
            (10, 1), (10, 6), (10, 8), (10, 13),
            (11, 1), (11, 6), (11, 8), (11, 13),
            (13, 3), (13, 4), (13, 5), (13, 9), (13, 10), (13, 11),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

impl Pattern {
    /// Smallest `(height, width)` that holds the whole pattern.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(h, w), &(row, col)| (h.max(row + 1), w.max(col + 1)))
    }

    /// A `height` x `width` grid with the pattern at the top-left corner.
    /// Cells falling outside the grid are dropped.
    pub fn template(&self, height: usize, width: usize) -> Grid {
        let mut grid = Grid::new(height, width);
        for &(row, col) in self.cells {
            if grid.get(row, col) == Some(Cell::Dead) {
                grid.toggle(row, col);
            }
        }
        grid
    }
}

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// The 10x10 glider board new games start with.
pub fn glider_template() -> Grid {
    GLIDER.template(10, 10)
}
