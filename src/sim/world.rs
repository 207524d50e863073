/// GameState: everything the frame loop needs to draw and advance.
///
/// The original arrangement of "current level" and "player" as ambient
/// globals is replaced by one value owned by the loop driver and passed
/// down explicitly; frame-by-frame behavior is unchanged.
///
/// Ownership: the state owns the active `Level` (which owns its grid
/// and gem list) and the single `Player`. The player never touches the
/// grid directly; gem state changes only through `Level::collect_at`.

use crate::domain::entity::Player;
use crate::sim::level::Level;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Normal play inside the current level.
    Playing,
    /// Every level cleared. Terminal: direction input is ignored and
    /// the frame image never changes again.
    AllComplete,
}

pub struct GameState {
    pub level: Level,
    pub player: Player,
    pub phase: Phase,
    pub current_level: usize,
    pub total_levels: usize,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            level: Level::empty(),
            player: Player::new(0, 0),
            phase: Phase::Playing,
            current_level: 0,
            total_levels: 0,
            message: String::new(),
            message_timer: 0,
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Decay the message bar by one tick.
    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }
}
