/// Entities: the player token and the gems it collects.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDir {
    /// Axis-aligned (row, col) delta of magnitude 1. No diagonals.
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Up => (-1, 0),
            MoveDir::Down => (1, 0),
            MoveDir::Left => (0, -1),
            MoveDir::Right => (0, 1),
        }
    }
}

/// The player occupies exactly one grid cell. Created once at game
/// start and repositioned on every level load, never recreated.
#[derive(Clone, Debug)]
pub struct Player {
    pub row: usize,
    pub col: usize,
}

impl Player {
    pub fn new(row: usize, col: usize) -> Self {
        Player { row, col }
    }

    pub fn place_at(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
    }
}

/// A collectible gem. `collected` flips to true exactly once, and only
/// through `Level::collect_at`; a level reload is the only reset.
#[derive(Clone, Debug)]
pub struct Gem {
    pub row: usize,
    pub col: usize,
    pub color: [u8; 3],
    pub collected: bool,
}

impl Gem {
    pub fn new(row: usize, col: usize, color: [u8; 3]) -> Self {
        Gem { row, col, color, collected: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_unit_and_axis_aligned() {
        for dir in [MoveDir::Up, MoveDir::Down, MoveDir::Left, MoveDir::Right] {
            let (dr, dc) = dir.delta();
            assert_eq!(dr.abs() + dc.abs(), 1);
        }
        assert_eq!(MoveDir::Up.delta(), (-1, 0));
        assert_eq!(MoveDir::Down.delta(), (1, 0));
        assert_eq!(MoveDir::Left.delta(), (0, -1));
        assert_eq!(MoveDir::Right.delta(), (0, 1));
    }

    #[test]
    fn gem_starts_uncollected() {
        let g = Gem::new(2, 3, [255, 0, 0]);
        assert!(!g.collected);
        assert_eq!((g.row, g.col), (2, 3));
    }
}
