//! Host loop: drives a [`Session`] at a fixed timestep
//!
//! Presentation lives outside the simulation. The host is handed a renderer
//! and an input source at construction and only talks to them between ticks.

use crate::consts::*;
use crate::sim::Session;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Latest pointer position in well coordinates, if it moved
    pub pointer_x: Option<f32>,
    /// Drop the announced piece at the pointer (click/tap)
    pub drop: bool,
    /// Start over
    pub restart: bool,
}

/// Where player input comes from (mouse, touch, a script, an AI)
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Draws the session. Only ever called between ticks.
pub trait Renderer {
    fn render(&mut self, session: &Session);

    /// Called once each time the session enters game over
    fn game_over(&mut self, _score: u64) {}
}

/// Fixed-step driver owning a session plus its injected collaborators
pub struct Host<R: Renderer, I: InputSource> {
    session: Session,
    renderer: R,
    input: I,
    accumulator: f32,
    /// Last known pointer x; drops happen here
    pointer_x: f32,
    /// Game-over state seen at the end of the previous frame
    was_game_over: bool,
}

impl<R: Renderer, I: InputSource> Host<R, I> {
    pub fn new(session: Session, renderer: R, input: I) -> Self {
        let pointer_x = session.well().width / 2.0;
        let was_game_over = session.is_game_over();
        Self {
            session,
            renderer,
            input,
            accumulator: 0.0,
            pointer_x,
            was_game_over,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn pointer_x(&self) -> f32 {
        self.pointer_x
    }

    /// Process one display frame of `frame_dt` seconds.
    ///
    /// Applies input, runs as many fixed ticks as the accumulator allows
    /// (capped per frame), then renders once. Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let frame = self.input.poll();

        if let Some(x) = frame.pointer_x {
            self.pointer_x = x.clamp(0.0, self.session.well().width);
        }

        if frame.restart {
            self.session.reset();
            self.accumulator = 0.0;
            self.was_game_over = false;
        }

        if frame.drop && !self.session.is_game_over() {
            self.session.drop(self.pointer_x);
        }

        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let report = self.session.tick();
            self.accumulator -= SIM_DT;
            substeps += 1;

            for merge in &report.merges {
                log::debug!(
                    "Merge into tier {} (+{}), score {}",
                    merge.produced.index(),
                    merge.score_delta,
                    self.session.score()
                );
            }

            if report.game_over {
                self.accumulator = 0.0;
                break;
            }
        }

        if self.session.is_game_over() && !self.was_game_over {
            log::info!("Game over! Final score: {}", self.session.score());
            self.renderer.game_over(self.session.score());
        }
        self.was_game_over = self.session.is_game_over();

        self.renderer.render(&self.session);
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        frames: VecDeque<InputFrame>,
    }

    impl Scripted {
        fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
            Self {
                frames: frames.into_iter().collect(),
            }
        }
    }

    impl InputSource for Scripted {
        fn poll(&mut self) -> InputFrame {
            self.frames.pop_front().unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: u32,
        piece_counts: Vec<usize>,
        game_overs: Vec<u64>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, session: &Session) {
            self.frames += 1;
            self.piece_counts.push(session.pieces().len());
        }

        fn game_over(&mut self, score: u64) {
            self.game_overs.push(score);
        }
    }

    fn host(frames: impl IntoIterator<Item = InputFrame>) -> Host<Recorder, Scripted> {
        let session = Session::new(GameConfig::default(), 77).unwrap();
        Host::new(session, Recorder::default(), Scripted::new(frames))
    }

    #[test]
    fn test_short_frames_accumulate_before_ticking() {
        let mut host = host([]);
        assert_eq!(host.update(SIM_DT * 0.4), 0);
        assert_eq!(host.update(SIM_DT * 0.4), 0);
        assert_eq!(host.update(SIM_DT * 0.4), 1);
        assert_eq!(host.session().tick_count(), 1);
        assert_eq!(host.renderer().frames, 3);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut host = host([]);
        let ticks = host.update(5.0);
        assert!(ticks > 0);
        assert!(ticks <= MAX_SUBSTEPS);
        assert!(ticks as f32 <= MAX_FRAME_DT / SIM_DT + 1.0);
    }

    #[test]
    fn test_drop_happens_at_pointer() {
        let mut host = host([InputFrame {
            pointer_x: Some(123.0),
            drop: true,
            restart: false,
        }]);
        host.update(0.0);

        let pieces = host.session().pieces();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].pos.x, 123.0);
        assert_eq!(host.renderer().piece_counts, vec![1]);
    }

    #[test]
    fn test_pointer_is_kept_inside_the_well() {
        let mut host = host([InputFrame {
            pointer_x: Some(-50.0),
            ..Default::default()
        }]);
        host.update(0.0);
        assert_eq!(host.pointer_x(), 0.0);
    }

    #[test]
    fn test_restart_clears_session() {
        let drop_at = |x: f32| InputFrame {
            pointer_x: Some(x),
            drop: true,
            restart: false,
        };
        let restart = InputFrame {
            restart: true,
            ..Default::default()
        };
        let mut host = host([drop_at(100.0), drop_at(300.0), restart]);
        host.update(SIM_DT);
        host.update(SIM_DT);
        assert_eq!(host.session().pieces().len(), 2);

        host.update(0.0);
        assert!(host.session().pieces().is_empty());
        assert_eq!(host.session().score(), 0);
    }

    #[test]
    fn test_game_over_reported_once_per_game() {
        // Spawning above the well ends the game on the first tick
        let mut config = GameConfig::default();
        config.spawn.height = -20.0;
        let session = Session::new(config, 5).unwrap();

        let drop = InputFrame {
            drop: true,
            ..Default::default()
        };
        let restart = InputFrame {
            restart: true,
            drop: true,
            ..Default::default()
        };
        let mut host = Host::new(
            session,
            Recorder::default(),
            Scripted::new([drop, drop, InputFrame::default(), restart]),
        );

        host.update(SIM_DT);
        assert!(host.session().is_game_over());
        assert_eq!(host.renderer().game_overs, vec![0]);
        assert_eq!(host.session().pieces().len(), 1);

        // Further drops are refused and game over is not re-announced
        host.update(SIM_DT);
        host.update(SIM_DT);
        assert_eq!(host.session().pieces().len(), 1);
        assert_eq!(host.renderer().game_overs.len(), 1);

        // Restart then drop: a fresh game that ends the same way
        host.update(SIM_DT);
        assert!(host.session().is_game_over());
        assert_eq!(host.renderer().game_overs.len(), 2);
    }
}
