/// Move application and level-advance transitions.
///
/// Per-frame order:
///   1. apply at most one directional move (collecting on arrival)
///   2. render
///   3. `advance_if_clear` — runs after the frame goes out, so a
///      cleared level is visible in its final collected state once
///      before the next level appears
///
/// Movement is the only gem-collection path after load; a rejected move
/// changes nothing and emits nothing. None of this can fail: walls and
/// the outside of the grid reject moves silently, and the loader has
/// already absorbed every data problem.

use crate::domain::entity::MoveDir;
use crate::sim::event::GameEvent;
use crate::sim::level::load_level;
use crate::sim::world::{GameState, Phase};

/// Try to move the player one cell. The outside of the grid counts as
/// wall, so a candidate cell is never indexed out of range.
pub fn apply_move(world: &mut GameState, dir: MoveDir) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let (dr, dc) = dir.delta();
    let row = world.player.row as i32 + dr;
    let col = world.player.col as i32 + dc;

    if world.level.is_wall(row, col) {
        return vec![];
    }

    world.player.place_at(row as usize, col as usize);

    let picked = world.level.collect_at(world.player.row, world.player.col);
    let mut events = Vec::with_capacity(picked);
    for _ in 0..picked {
        events.push(GameEvent::GemCollected {
            row: world.player.row,
            col: world.player.col,
        });
    }
    events
}

/// Post-frame completion check: once every gem in the current level is
/// collected, load the next level, or enter the terminal phase when the
/// cleared level was the last one.
pub fn advance_if_clear(world: &mut GameState) -> Vec<GameEvent> {
    if world.phase != Phase::Playing || !world.level.all_gems_collected() {
        return vec![];
    }

    let mut events = vec![GameEvent::LevelCleared { index: world.current_level }];
    if world.current_level + 1 < world.total_levels {
        load_level(world, world.current_level + 1);
    } else {
        world.phase = Phase::AllComplete;
        events.push(GameEvent::AllLevelsComplete);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::Tile;
    use crate::sim::catalog::{GemDef, LevelDef};
    use crate::sim::level::install_level;

    fn world_with(map: &[&str], start: (usize, usize), gems: &[(usize, usize)]) -> GameState {
        let def = LevelDef {
            name: "test".to_string(),
            legend: vec![('#', Tile::Wall), ('.', Tile::Floor)],
            rows: map.iter().map(|s| s.to_string()).collect(),
            start,
            gems: gems
                .iter()
                .map(|&(row, col)| GemDef { row, col, color: [255, 255, 255] })
                .collect(),
        };
        let mut world = GameState::new();
        world.total_levels = 1;
        install_level(&mut world, &def);
        world
    }

    // ── Movement ──

    #[test]
    fn move_into_wall_is_rejected() {
        let mut world = world_with(&["###", "#.#", "###"], (1, 1), &[]);
        for dir in [MoveDir::Up, MoveDir::Down, MoveDir::Left, MoveDir::Right] {
            let events = apply_move(&mut world, dir);
            assert!(events.is_empty());
            assert_eq!((world.player.row, world.player.col), (1, 1));
        }
    }

    #[test]
    fn move_off_grid_is_rejected() {
        // One open cell on the top edge: moving up would leave the grid.
        let mut world = world_with(&["#.#", "#.#", "###"], (0, 1), &[]);
        let events = apply_move(&mut world, MoveDir::Up);
        assert!(events.is_empty());
        assert_eq!((world.player.row, world.player.col), (0, 1));
    }

    #[test]
    fn legal_move_lands_on_target_and_collects() {
        let mut world = world_with(&["####", "#..#", "####"], (1, 1), &[(1, 2)]);
        let events = apply_move(&mut world, MoveDir::Right);
        assert_eq!((world.player.row, world.player.col), (1, 2));
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::GemCollected { row: 1, col: 2 }));
        assert_eq!(world.level.gems_left(), 0);
    }

    #[test]
    fn gem_under_start_is_collected_at_load() {
        let world = world_with(&["###", "#.#", "###"], (1, 1), &[(1, 1)]);
        assert_eq!(world.level.gems_left(), 0);
    }

    // ── Level advance ──

    #[test]
    fn advance_waits_for_last_gem() {
        let mut world = world_with(&["####", "#..#", "####"], (1, 1), &[(1, 2)]);
        assert!(advance_if_clear(&mut world).is_empty());
        apply_move(&mut world, MoveDir::Right);
        let events = advance_if_clear(&mut world);
        assert!(matches!(events[0], GameEvent::LevelCleared { index: 0 }));
    }

    #[test]
    fn clearing_last_level_enters_terminal_phase() {
        let mut world = world_with(&["####", "#..#", "####"], (1, 1), &[(1, 2)]);
        apply_move(&mut world, MoveDir::Right);
        let events = advance_if_clear(&mut world);
        assert_eq!(world.phase, Phase::AllComplete);
        assert!(matches!(events[1], GameEvent::AllLevelsComplete));

        // Direction input is dead from here on.
        let before = (world.player.row, world.player.col);
        assert!(apply_move(&mut world, MoveDir::Left).is_empty());
        assert_eq!((world.player.row, world.player.col), before);
        assert!(advance_if_clear(&mut world).is_empty());
    }

    // ── End-to-end against the shipped catalog ──

    #[test]
    fn maze_one_first_gem_run() {
        let mut world = GameState::new();
        load_level(&mut world, 0);

        assert!(world.level.is_wall(1, 0));
        assert!(!world.level.is_wall(1, 1));
        assert_eq!((world.player.row, world.player.col), (1, 1));

        // The red gem keeps its authored cell (1,2).
        let red = world
            .level
            .gems()
            .iter()
            .find(|g| g.color == [255, 0, 0])
            .unwrap();
        assert_eq!((red.row, red.col), (1, 2));
        assert_eq!(world.level.gems_left(), 3);

        let events = apply_move(&mut world, MoveDir::Right);
        assert_eq!((world.player.row, world.player.col), (1, 2));
        assert_eq!(events.len(), 1);
        assert_eq!(world.level.gems_left(), 2);
    }

    #[test]
    fn maze_two_wall_gem_is_relocated() {
        let mut world = GameState::new();
        load_level(&mut world, 1);

        // Authored at (8,9), a wall; first floor cell row-major is (1,1).
        let moved = world
            .level
            .gems()
            .iter()
            .find(|g| g.color == [255, 200, 0])
            .unwrap();
        assert_eq!((moved.row, moved.col), (1, 1));
        assert!(!world.level.is_wall(1, 1));
    }

    #[test]
    fn clearing_a_level_loads_the_next() {
        let mut world = GameState::new();
        load_level(&mut world, 0);

        let cells: Vec<(usize, usize)> =
            world.level.gems().iter().map(|g| (g.row, g.col)).collect();
        for (row, col) in cells {
            world.level.collect_at(row, col);
        }

        advance_if_clear(&mut world);
        assert_eq!(world.phase, Phase::Playing);
        assert_eq!(world.current_level, 1);
        assert_eq!(world.level.name, "Maze 2 - Split Vault");
        assert_eq!((world.player.row, world.player.col), (7, 3));
        assert!(world.level.gems_left() > 0);
    }
}
