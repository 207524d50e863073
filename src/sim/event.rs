/// Events emitted by the simulation.
/// The frame loop consumes these for the HUD message bar.

#[derive(Clone, Debug)]
pub enum GameEvent {
    GemCollected { row: usize, col: usize },
    LevelCleared { index: usize },
    AllLevelsComplete,
}
