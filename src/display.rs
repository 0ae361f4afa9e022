//! Score/lives/level/legend sinks
//!
//! The director pushes HUD values out through [`DisplaySink`] whenever they
//! change. Sinks are fire-and-forget.

/// Receiver for HUD updates
pub trait DisplaySink {
    fn set_score(&mut self, score: u32);
    fn set_lives(&mut self, lives: u32);
    fn set_level(&mut self, level: u32);
    fn set_legend(&mut self, legend: &str);
}

/// Sink that remembers the last value of every field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudState {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub legend: String,
    /// Number of updates received (all fields)
    pub updates: u32,
}

impl DisplaySink for HudState {
    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.updates += 1;
    }

    fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
        self.updates += 1;
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
        self.updates += 1;
    }

    fn set_legend(&mut self, legend: &str) {
        self.legend.clear();
        self.legend.push_str(legend);
        self.updates += 1;
    }
}

/// Sink that logs every update and keeps the latest values
#[derive(Debug, Clone, Default)]
pub struct LogDisplay {
    pub hud: HudState,
}

impl DisplaySink for LogDisplay {
    fn set_score(&mut self, score: u32) {
        log::info!("Score: {score}");
        self.hud.set_score(score);
    }

    fn set_lives(&mut self, lives: u32) {
        log::info!("Lives: {lives}");
        self.hud.set_lives(lives);
    }

    fn set_level(&mut self, level: u32) {
        log::info!("Level: {level}");
        self.hud.set_level(level);
    }

    fn set_legend(&mut self, legend: &str) {
        if !legend.is_empty() {
            log::info!("Legend: {legend}");
        }
        self.hud.set_legend(legend);
    }
}
