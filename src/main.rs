/// Entry point and frame loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::entity::MoveDir;
use sim::event::GameEvent;
use sim::level::load_level;
use sim::step;
use sim::world::{GameState, Phase};
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

fn main() {
    let config = GameConfig::load();

    let mut world = GameState::new();
    load_level(&mut world, 0);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Gem Maze!");
}

fn game_loop(
    world: &mut GameState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.tick_rate_ms);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() || kb.any_pressed(KEYS_QUIT) {
            break;
        }

        // Direction keys act only while playing; the terminal phase
        // ignores them.
        if world.phase == Phase::Playing {
            if let Some(dir) = detect_movement(&kb) {
                let events = step::apply_move(world, dir);
                process_events(world, &events);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            world.tick_message();
            last_tick = Instant::now();
        }

        renderer.render(world)?;

        // Completion is checked after the frame went out, so a cleared
        // level is visible in its final collected state once before the
        // next level (or the completion screen) appears.
        let events = step::advance_if_clear(world);
        process_events(world, &events);

        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

/// At most one axis-aligned move per frame, edge-triggered.
fn detect_movement(kb: &InputState) -> Option<MoveDir> {
    if kb.any_pressed(KEYS_UP) {
        Some(MoveDir::Up)
    } else if kb.any_pressed(KEYS_DOWN) {
        Some(MoveDir::Down)
    } else if kb.any_pressed(KEYS_LEFT) {
        Some(MoveDir::Left)
    } else if kb.any_pressed(KEYS_RIGHT) {
        Some(MoveDir::Right)
    } else {
        None
    }
}

fn process_events(world: &mut GameState, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::GemCollected { .. } => {
                let left = world.level.gems_left();
                if left == 0 {
                    world.set_message("Maze clear!", 40);
                } else {
                    world.set_message(&format!("{left} to go"), 30);
                }
            }
            // The level loader and the completion screen carry their
            // own announcements.
            _ => {}
        }
    }
}
