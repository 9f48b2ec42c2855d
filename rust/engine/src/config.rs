use serde::{Deserialize, Serialize};

/// Stakes and pacing for one hand.
///
/// `time_limit` is the per-actor countdown in seconds; 0 disables the
/// act timer entirely.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub antes: u32,
    pub time_limit: u32,
}

impl GameConfig {
    pub fn new(small_blind: u32, big_blind: u32, antes: u32, time_limit: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            antes,
            time_limit,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            antes: 0,
            time_limit: 30,
        }
    }
}
