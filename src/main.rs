//! Fruit Drop entry point
//!
//! Headless native runner: drives a session with an autoplayer at the fixed
//! simulation rate and logs progress. Usage:
//!
//! ```text
//! fruit-drop [config.json] [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use fruit_drop::consts::SIM_DT;
    use fruit_drop::{GameConfig, Host, InputFrame, InputSource, Renderer, Session};

    /// Frames between autoplayer drops (about two thirds of a second)
    const DROP_INTERVAL: u32 = 40;
    /// Stop after this many frames even if the well never overflows
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Moves the pointer somewhere random and drops every `DROP_INTERVAL` frames
    struct AutoPlayer {
        rng: Pcg32,
        well_width: f32,
        frame: u32,
    }

    impl InputSource for AutoPlayer {
        fn poll(&mut self) -> InputFrame {
            self.frame += 1;
            if !self.frame.is_multiple_of(DROP_INTERVAL) {
                return InputFrame::default();
            }
            InputFrame {
                pointer_x: Some(self.rng.random_range(0.0..self.well_width)),
                drop: true,
                restart: false,
            }
        }
    }

    /// Logs a one-line summary once a second
    #[derive(Default)]
    struct LogRenderer {
        frames: u64,
        final_score: Option<u64>,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, session: &Session) {
            self.frames += 1;
            if !self.frames.is_multiple_of(60) {
                return;
            }
            let catalog = session.catalog();
            let biggest = session
                .pieces()
                .iter()
                .map(|p| p.tier)
                .max()
                .map(|t| catalog.get(t).name.as_str())
                .unwrap_or("-");
            log::info!(
                "t={:>5} pieces={:>3} score={:>5} next={} biggest={}",
                session.tick_count(),
                session.pieces().len(),
                session.score(),
                catalog.get(session.spawn_preview()).name,
                biggest
            );
        }

        fn game_over(&mut self, score: u64) {
            self.final_score = Some(score);
        }
    }

    fn load_config(path: &Path) -> Result<GameConfig> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = GameConfig::from_json(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        log::info!("Fruit Drop (headless) starting...");

        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => load_config(Path::new(&path))?,
            None => GameConfig::default(),
        };
        let seed = match args.next() {
            Some(s) => s.parse().with_context(|| format!("invalid seed {s:?}"))?,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        };

        let input = AutoPlayer {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            well_width: config.well.width,
            frame: 0,
        };
        let session = Session::new(config, seed).context("building session")?;
        let mut host = Host::new(session, LogRenderer::default(), input);

        for _ in 0..MAX_FRAMES {
            host.update(SIM_DT);
            if host.renderer().final_score.is_some() {
                break;
            }
        }

        let snapshot = host.session().snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        match host.renderer().final_score {
            Some(score) => log::info!("Finished: game over with {score} points"),
            None => log::info!("Finished: still alive with {} points", snapshot.score),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM hosts embed the library directly
}
