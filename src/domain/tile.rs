/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    /// Does this tile block movement?
    pub fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Can an entity occupy this cell?
    pub fn is_passable(self) -> bool {
        !self.is_wall()
    }
}

impl Default for Tile {
    /// Unknown legend characters and padded cells resolve to floor.
    fn default() -> Self {
        Tile::Floor
    }
}
