/// Level runtime: the parsed tile grid plus the owned gem list.
///
/// Loading never fails. Unknown legend characters become floor, rows
/// shorter than the widest row are padded with floor, and a gem authored
/// out of bounds or inside a wall is relocated to the first floor cell
/// in row-major scan order ((1,1) when the grid has no floor at all).
/// Relocation can stack several gems on one cell; stacked gems are all
/// collected by a single visit.

use crate::domain::entity::Gem;
use crate::domain::tile::Tile;
use crate::sim::catalog::{builtin_levels, LevelDef};
use crate::sim::world::{GameState, Phase};

pub struct Level {
    pub name: String,
    tiles: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
    gems: Vec<Gem>,
}

// ── Loading ──

impl Level {
    /// An empty level, used only as the pre-load placeholder.
    pub fn empty() -> Self {
        Level {
            name: String::new(),
            tiles: vec![],
            width: 0,
            height: 0,
            gems: vec![],
        }
    }

    pub fn load(def: &LevelDef) -> Self {
        let height = def.rows.len();
        let width = def.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        let mut tiles = vec![vec![Tile::default(); width]; height];
        for (r, row) in def.rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                tiles[r][c] = legend_lookup(&def.legend, ch);
            }
        }

        let mut level = Level {
            name: def.name.clone(),
            tiles,
            width,
            height,
            gems: Vec::with_capacity(def.gems.len()),
        };

        for gem in &def.gems {
            let (row, col) = level.safe_gem_cell(gem.row, gem.col);
            level.gems.push(Gem::new(row, col, gem.color));
        }

        level
    }

    /// Placement-safety pass for one gem: an in-bounds floor cell is
    /// kept as-is; anything else relocates to the first floor cell in
    /// row-major order. (1,1) is the last resort for a floorless grid.
    fn safe_gem_cell(&self, row: usize, col: usize) -> (usize, usize) {
        if row < self.height && col < self.width && self.tiles[row][col].is_passable() {
            return (row, col);
        }
        for r in 0..self.height {
            for c in 0..self.width {
                if self.tiles[r][c].is_passable() {
                    return (r, c);
                }
            }
        }
        (1, 1)
    }
}

fn legend_lookup(legend: &[(char, Tile)], ch: char) -> Tile {
    legend
        .iter()
        .find(|&&(c, _)| c == ch)
        .map(|&(_, tile)| tile)
        .unwrap_or_default()
}

// ── Queries ──

impl Level {
    pub fn rows(&self) -> usize {
        self.height
    }

    pub fn cols(&self) -> usize {
        self.width
    }

    /// Bounds count as walls, so callers probe candidate moves with
    /// signed coordinates and never index out of range.
    pub fn is_wall(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 || row >= self.height as i32 || col >= self.width as i32 {
            return true;
        }
        self.tiles[row as usize][col as usize].is_wall()
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Tile {
        if row < self.height && col < self.width {
            self.tiles[row][col]
        } else {
            Tile::Wall
        }
    }

    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    pub fn gems_left(&self) -> usize {
        self.gems.iter().filter(|g| !g.collected).count()
    }

    /// Vacuously true for a level with zero gems.
    pub fn all_gems_collected(&self) -> bool {
        self.gems.iter().all(|g| g.collected)
    }
}

// ── Mutation ──

impl Level {
    /// Collect every uncollected gem at (row, col). Returns how many
    /// flipped. This is the only place `collected` is ever set.
    pub fn collect_at(&mut self, row: usize, col: usize) -> usize {
        let mut picked = 0;
        for gem in self.gems.iter_mut() {
            if !gem.collected && gem.row == row && gem.col == col {
                gem.collected = true;
                picked += 1;
            }
        }
        picked
    }
}

// ── Level installation ──

/// Load `catalog[idx]` into the game state. An index past the end of
/// the catalog means every level is cleared.
pub fn load_level(world: &mut GameState, idx: usize) {
    let levels = builtin_levels();
    if idx >= levels.len() {
        world.phase = Phase::AllComplete;
        return;
    }
    world.current_level = idx;
    world.total_levels = levels.len();
    install_level(world, &levels[idx]);
}

/// Install one definition: parse it, reposition the player to the start
/// cell, run the one-time start-cell collection, announce the name.
pub fn install_level(world: &mut GameState, def: &LevelDef) {
    world.level = Level::load(def);
    let (row, col) = def.start;
    world.player.place_at(row, col);
    // A gem sitting under the start cell is collected immediately;
    // every later collection is coupled to a successful move.
    world.level.collect_at(row, col);
    world.set_message(&def.name, 80);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::GemDef;

    fn def_from(map: &[&str], gems: &[(usize, usize)]) -> LevelDef {
        LevelDef {
            name: "test".to_string(),
            legend: vec![('#', Tile::Wall), ('.', Tile::Floor)],
            rows: map.iter().map(|s| s.to_string()).collect(),
            start: (1, 1),
            gems: gems
                .iter()
                .map(|&(row, col)| GemDef { row, col, color: [255, 255, 255] })
                .collect(),
        }
    }

    // ── Wall / bounds queries ──

    #[test]
    fn outside_bounds_is_wall() {
        let level = Level::load(&def_from(&["###", "#.#", "###"], &[]));
        assert!(level.is_wall(-1, 1));
        assert!(level.is_wall(1, -1));
        assert!(level.is_wall(3, 1));
        assert!(level.is_wall(1, 3));
        assert!(level.is_wall(-5, -5));
    }

    #[test]
    fn legend_maps_walls_and_floors() {
        let level = Level::load(&def_from(&["#.#"], &[]));
        assert!(level.is_wall(0, 0));
        assert!(!level.is_wall(0, 1));
        assert!(level.is_wall(0, 2));
    }

    #[test]
    fn unknown_characters_default_to_floor() {
        let level = Level::load(&def_from(&["#?!#"], &[]));
        assert!(!level.is_wall(0, 1));
        assert!(!level.is_wall(0, 2));
    }

    #[test]
    fn ragged_rows_pad_with_floor() {
        let level = Level::load(&def_from(&["####", "##"], &[]));
        assert_eq!(level.cols(), 4);
        assert_eq!(level.rows(), 2);
        // The two missing cells of the short row read as floor.
        assert!(!level.is_wall(1, 2));
        assert!(!level.is_wall(1, 3));
    }

    // ── Placement-safety pass ──

    #[test]
    fn valid_gem_keeps_its_cell() {
        let level = Level::load(&def_from(&["###", "#.#", "###"], &[(1, 1)]));
        let gem = &level.gems()[0];
        assert_eq!((gem.row, gem.col), (1, 1));
    }

    #[test]
    fn wall_gem_relocates_to_first_floor_cell() {
        // First floor cell in row-major order is (1, 2).
        let level = Level::load(&def_from(&["####", "##..", "#..#"], &[(0, 0)]));
        let gem = &level.gems()[0];
        assert_eq!((gem.row, gem.col), (1, 2));
    }

    #[test]
    fn out_of_bounds_gem_relocates() {
        let level = Level::load(&def_from(&["###", "#.#", "###"], &[(9, 9)]));
        let gem = &level.gems()[0];
        assert_eq!((gem.row, gem.col), (1, 1));
    }

    #[test]
    fn floorless_grid_falls_back_to_1_1() {
        let level = Level::load(&def_from(&["###", "###"], &[(0, 0)]));
        let gem = &level.gems()[0];
        assert_eq!((gem.row, gem.col), (1, 1));
    }

    #[test]
    fn relocated_gems_may_stack() {
        // Both bad gems land on the same first floor cell and stay there.
        let level = Level::load(&def_from(&["###", "#.#", "###"], &[(0, 0), (9, 0)]));
        assert_eq!((level.gems()[0].row, level.gems()[0].col), (1, 1));
        assert_eq!((level.gems()[1].row, level.gems()[1].col), (1, 1));
    }

    #[test]
    fn every_loaded_gem_sits_on_floor() {
        for def in builtin_levels() {
            let level = Level::load(&def);
            for gem in level.gems() {
                assert!(
                    !level.is_wall(gem.row as i32, gem.col as i32),
                    "gem on wall in {}",
                    level.name
                );
            }
        }
    }

    // ── Collection ──

    #[test]
    fn collect_at_takes_all_stacked_gems_and_is_idempotent() {
        let mut level = Level::load(&def_from(&["###", "#.#", "###"], &[(1, 1), (1, 1)]));
        assert_eq!(level.gems_left(), 2);
        assert_eq!(level.collect_at(1, 1), 2);
        assert_eq!(level.gems_left(), 0);
        // Second visit changes nothing.
        assert_eq!(level.collect_at(1, 1), 0);
        assert!(level.all_gems_collected());
    }

    #[test]
    fn collect_at_misses_other_cells() {
        let mut level = Level::load(&def_from(&["####", "#..#", "####"], &[(1, 2)]));
        assert_eq!(level.collect_at(1, 1), 0);
        assert_eq!(level.gems_left(), 1);
    }

    #[test]
    fn zero_gem_level_is_vacuously_complete() {
        let level = Level::load(&def_from(&["###", "#.#", "###"], &[]));
        assert!(level.all_gems_collected());
        assert_eq!(level.gems_left(), 0);
    }
}
