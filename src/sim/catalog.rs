/// Built-in level catalog.
///
/// Pure data: each entry carries its own tile legend, a character grid,
/// the player start cell, and the gem list. Ordered, indexable access;
/// index validity is the caller's problem (`load_level` treats a bad
/// index as "no more levels").
///
/// The data is not trusted: the loader maps unknown characters to floor,
/// pads ragged rows, and relocates gems authored out of bounds or inside
/// a wall. Nothing in here can make loading fail.

use crate::domain::tile::Tile;

/// A single catalog entry, immutable after construction.
pub struct LevelDef {
    pub name: String,
    /// Character → tile mapping for this grid.
    pub legend: Vec<(char, Tile)>,
    pub rows: Vec<String>,
    /// Player start cell (row, col).
    pub start: (usize, usize),
    pub gems: Vec<GemDef>,
}

/// Gem placement as authored: position plus RGB color.
pub struct GemDef {
    pub row: usize,
    pub col: usize,
    pub color: [u8; 3],
}

pub fn builtin_levels() -> Vec<LevelDef> {
    vec![
        make_level(
            "Maze 1 - Entry Hall",
            &[('#', Tile::Wall), ('.', Tile::Floor)],
            &[
                "################",
                "#....#.....#...#",
                "#.##.#.###.#.#.#",
                "#.#..#...#.#.#.#",
                "#.#.####.#.#.#.#",
                "#.#......#...#.#",
                "#.############.#",
                "#..............#",
                "#.####.####.##.#",
                "################",
            ],
            (1, 1),
            &[
                (1, 2, [255, 0, 0]),
                (5, 11, [80, 140, 255]),
                (7, 8, [60, 220, 60]),
            ],
        ),
        make_level(
            "Maze 2 - Split Vault",
            &[('#', Tile::Wall), ('.', Tile::Floor)],
            &[
                "################",
                "#..#.......#...#",
                "##.#.#####.##..#",
                "#..#.#...#..##.#",
                "#.##.#.#.##..#.#",
                "#....#.#.....#.#",
                "#.####.#######.#",
                "#.#............#",
                "#.#.######.#.###",
                "################",
            ],
            (7, 3),
            &[
                // (8,9) is a wall cell; the loader relocates this gem.
                (8, 9, [255, 200, 0]),
                (5, 4, [200, 60, 255]),
                (3, 8, [0, 200, 200]),
            ],
        ),
        make_level(
            "Maze 3 - Long Gallery",
            &[('=', Tile::Wall), ('.', Tile::Floor)],
            &[
                "================",
                "=..............=",
                "=.====.====.==.=",
                "=.=..=....=..=.=",
                "=.=.==.==.==.=.=",
                "=.=.=...=..=.=.=",
                "=.=.==.==.==.=.=",
                "=.=..........=.=",
                "=.============.=",
                "================",
            ],
            (1, 1),
            &[
                (3, 4, [255, 0, 0]),
                (5, 6, [255, 200, 0]),
                (7, 6, [60, 220, 60]),
                (5, 10, [80, 140, 255]),
            ],
        ),
    ]
}

fn make_level(
    name: &str,
    legend: &[(char, Tile)],
    map: &[&str],
    start: (usize, usize),
    gems: &[(usize, usize, [u8; 3])],
) -> LevelDef {
    LevelDef {
        name: name.to_string(),
        legend: legend.to_vec(),
        rows: map.iter().map(|s| s.to_string()).collect(),
        start,
        gems: gems
            .iter()
            .map(|&(row, col, color)| GemDef { row, col, color })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_grids_are_rectangular() {
        for def in builtin_levels() {
            let width = def.rows[0].chars().count();
            for row in &def.rows {
                assert_eq!(row.chars().count(), width, "ragged row in {}", def.name);
            }
        }
    }

    #[test]
    fn catalog_starts_are_floor_cells() {
        for def in builtin_levels() {
            let (r, c) = def.start;
            let ch = def.rows[r].chars().nth(c).unwrap();
            let tile = def
                .legend
                .iter()
                .find(|&&(lc, _)| lc == ch)
                .map(|&(_, t)| t)
                .unwrap_or_default();
            assert!(tile.is_passable(), "start on wall in {}", def.name);
        }
    }
}
