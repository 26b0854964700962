//! Bounded playback controller.
//!
//! A concept points into a window of a longer video. The controller
//! seeks the external player to the window start, plays, and when an
//! end boundary is set, polls the player once per frame interval and
//! pauses it the moment the boundary is crossed. The player itself is
//! an injected capability; every command it raises is caught and
//! ignored so a flaky player can never break the surrounding flow.

use std::time::Duration;

use tracing::debug;

/// One rendering frame at 60 Hz; the boundary poll cadence.
pub const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Reported state of the external player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Playing,
    Paused,
    Buffering,
    Ended,
}

#[derive(Debug, thiserror::Error)]
#[error("player {command} failed: {reason}")]
pub struct PlayerError {
    pub command: &'static str,
    pub reason: String,
}

impl PlayerError {
    pub fn new(command: &'static str, reason: impl Into<String>) -> Self {
        Self {
            command,
            reason: reason.into(),
        }
    }
}

/// External video-player capability. All commands may fail.
pub trait PlayerHandle {
    async fn seek_to(&mut self, seconds: f64) -> Result<(), PlayerError>;
    async fn play(&mut self) -> Result<(), PlayerError>;
    async fn pause(&mut self) -> Result<(), PlayerError>;
    async fn current_time(&mut self) -> Result<f64, PlayerError>;
    async fn state(&mut self) -> Result<PlayerState, PlayerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Seeking,
    Playing,
    Paused,
}

pub struct PlaybackController {
    state: PlaybackState,
    poll_interval: Duration,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::with_poll_interval(FRAME_POLL_INTERVAL)
    }

    /// Poll cadence is injectable so tests can run under a paused
    /// clock without waiting out real frames.
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            state: PlaybackState::Idle,
            poll_interval,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Seek to `start_seconds` and play. With an end boundary, poll
    /// until the boundary is crossed, then issue exactly one pause.
    /// Without one, playback runs to natural completion under the
    /// player's own control and no further commands are issued.
    ///
    /// A failed player command leaves the controller in its last
    /// known state.
    pub async fn start<P: PlayerHandle>(
        &mut self,
        player: &mut P,
        start_seconds: f64,
        end_seconds: Option<f64>,
    ) {
        self.state = PlaybackState::Seeking;
        if let Err(e) = player.seek_to(start_seconds).await {
            debug!(error = %e, "seek failed, abandoning playback");
            return;
        }
        if let Err(e) = player.play().await {
            debug!(error = %e, "play failed, abandoning playback");
            return;
        }
        self.state = PlaybackState::Playing;

        let Some(end) = end_seconds else {
            return;
        };

        loop {
            // Stop the moment the player is no longer playing; the
            // loop must not keep sampling after a pause or stop.
            match player.state().await {
                Ok(PlayerState::Playing) => {}
                Ok(_) => {
                    self.state = PlaybackState::Idle;
                    return;
                }
                Err(e) => {
                    debug!(error = %e, "state poll failed, stopping boundary watch");
                    self.state = PlaybackState::Idle;
                    return;
                }
            }

            match player.current_time().await {
                Ok(time) if time >= end => {
                    if let Err(e) = player.pause().await {
                        debug!(error = %e, "pause at boundary failed");
                    }
                    self.state = PlaybackState::Paused;
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "time poll failed, stopping boundary watch");
                    return;
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Run a full bounded-playback pass and return the controller in its
/// final state.
pub async fn start_bounded_playback<P: PlayerHandle>(
    player: &mut P,
    start_seconds: f64,
    end_seconds: Option<f64>,
) -> PlaybackController {
    let mut controller = PlaybackController::new();
    controller.start(player, start_seconds, end_seconds).await;
    controller
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted player: time advances by `step` on every sample, and
    /// every issued command is recorded.
    struct FakePlayer {
        time: f64,
        step: f64,
        state: PlayerState,
        seeks: Vec<f64>,
        plays: usize,
        pauses: usize,
        time_samples: usize,
        fail_seek: bool,
        end_after_samples: Option<usize>,
    }

    impl FakePlayer {
        fn new(step: f64) -> Self {
            Self {
                time: 0.0,
                step,
                state: PlayerState::Unstarted,
                seeks: Vec::new(),
                plays: 0,
                pauses: 0,
                time_samples: 0,
                fail_seek: false,
                end_after_samples: None,
            }
        }
    }

    impl PlayerHandle for FakePlayer {
        async fn seek_to(&mut self, seconds: f64) -> Result<(), PlayerError> {
            if self.fail_seek {
                return Err(PlayerError::new("seek_to", "player not ready"));
            }
            self.time = seconds;
            self.seeks.push(seconds);
            Ok(())
        }

        async fn play(&mut self) -> Result<(), PlayerError> {
            self.plays += 1;
            self.state = PlayerState::Playing;
            Ok(())
        }

        async fn pause(&mut self) -> Result<(), PlayerError> {
            self.pauses += 1;
            self.state = PlayerState::Paused;
            Ok(())
        }

        async fn current_time(&mut self) -> Result<f64, PlayerError> {
            self.time_samples += 1;
            if let Some(limit) = self.end_after_samples {
                if self.time_samples > limit {
                    self.state = PlayerState::Ended;
                }
            }
            let now = self.time;
            self.time += self.step;
            Ok(now)
        }

        async fn state(&mut self) -> Result<PlayerState, PlayerError> {
            Ok(self.state)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_exactly_once_at_the_boundary() {
        let mut player = FakePlayer::new(5.0);
        let mut controller = PlaybackController::new();

        controller.start(&mut player, 30.0, Some(45.0)).await;

        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(player.seeks, vec![30.0]);
        assert_eq!(player.plays, 1);
        assert_eq!(player.pauses, 1);
        // Samples 30, 35, 40, then pauses at 45.
        assert_eq!(player.time_samples, 4);
        assert_eq!(player.state, PlayerState::Paused);
    }

    #[tokio::test]
    async fn no_boundary_means_no_polling() {
        let mut player = FakePlayer::new(1.0);
        let mut controller = PlaybackController::new();

        controller.start(&mut player, 10.0, None).await;

        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(player.seeks, vec![10.0]);
        assert_eq!(player.plays, 1);
        assert_eq!(player.pauses, 0);
        assert_eq!(player.time_samples, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn polling_stops_when_the_player_leaves_playing() {
        let mut player = FakePlayer::new(1.0);
        player.end_after_samples = Some(3);
        let mut controller = PlaybackController::new();

        controller.start(&mut player, 0.0, Some(1000.0)).await;

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert_eq!(player.pauses, 0);
        assert_eq!(player.time_samples, 4);
    }

    #[tokio::test]
    async fn seek_failure_leaves_the_player_untouched() {
        let mut player = FakePlayer::new(1.0);
        player.fail_seek = true;
        let mut controller = PlaybackController::new();

        controller.start(&mut player, 30.0, Some(45.0)).await;

        assert_eq!(controller.state(), PlaybackState::Seeking);
        assert_eq!(player.plays, 0);
        assert_eq!(player.time_samples, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_wrapper_ends_paused_at_the_boundary() {
        let mut player = FakePlayer::new(5.0);
        let controller = start_bounded_playback(&mut player, 30.0, Some(45.0)).await;
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(player.pauses, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn starting_past_the_boundary_pauses_immediately() {
        let mut player = FakePlayer::new(1.0);
        let mut controller = PlaybackController::new();

        controller.start(&mut player, 50.0, Some(45.0)).await;

        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(player.pauses, 1);
        assert_eq!(player.time_samples, 1);
    }
}
