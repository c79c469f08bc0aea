//! Log-only renderer for headless runs

use super::RenderSink;
use crate::session::Snapshot;
use crate::sim::SessionPhase;

/// Logs the HUD once per second of countdown and once at the finish
#[derive(Debug, Default)]
pub struct HudLogger {
    last_second: Option<u32>,
    finish_logged: bool,
    /// Frames drawn so far
    pub frames: u64,
}

impl RenderSink for HudLogger {
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        self.frames += 1;

        match snapshot.phase {
            SessionPhase::Running => {
                self.finish_logged = false;
                let second = snapshot.time_remaining.ceil() as u32;
                if self.last_second != Some(second) {
                    self.last_second = Some(second);
                    log::info!(
                        "{:>5}s | score {:>5} | lane {} | {}{}",
                        snapshot.timer_text(),
                        snapshot.score,
                        snapshot.player.lane,
                        snapshot.speed_label(),
                        if snapshot.timer_warning() { " | HURRY!" } else { "" }
                    );
                }
            }
            SessionPhase::Ended if !self.finish_logged => {
                self.finish_logged = true;
                self.last_second = None;
                if let Some(result) = snapshot.result {
                    log::info!(
                        "FINISH | time {} | score {} | best {}s{}",
                        result.race_time_text(),
                        result.score,
                        result.best_secs,
                        if result.new_record { " | NEW RECORD" } else { "" }
                    );
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::ManualClock;
    use crate::session::Game;
    use crate::sim::Viewport;

    #[test]
    fn test_counts_frames_in_every_phase() {
        let mut game = Game::new(ManualClock::default(), MemoryStore::new(), Viewport::default());
        let mut hud = HudLogger::default();
        game.render(&mut hud);
        game.start(1);
        game.update(0.5);
        game.render(&mut hud);
        assert_eq!(hud.frames, 2);
        assert_eq!(hud.last_second, Some(30));
    }
}
