//! Lonely Triangle headless driver
//!
//! Runs the simulation at the configured frame rate with a scripted
//! autopilot and logs what happens. Usage:
//!
//! ```text
//! RUST_LOG=info lonely-triangle [seed] [Easy|Hard|Insane]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Instant;

    use lonely_triangle::Result;
    use lonely_triangle::platform::FramePacer;
    use lonely_triangle::sim::{Difficulty, SharedSimulation, Simulation};

    const VIEWPORT: (i32, i32) = (1024, 824);
    /// Ten seconds at 60 fps
    const DEMO_FRAMES: u32 = 600;
    const DEFAULT_SEED: u64 = 0x5eed;

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEED);
        let difficulty = match args.next() {
            Some(name) => name.parse()?,
            None => Difficulty::default(),
        };

        let sim = Simulation::with_difficulty(difficulty, seed)?;
        let mut pacer = FramePacer::new(sim.tuning().max_frame_rate);
        let shared = SharedSimulation::new(sim);
        log::info!("Seed {}, difficulty {}", seed, difficulty);

        shared.resize(VIEWPORT.0, VIEWPORT.1)?;
        shared.init_game();
        shared.enable_shooting();

        for frame in 0..DEMO_FRAMES {
            let frame_start = Instant::now();
            let dt = pacer.next_delta();

            steer(&shared, frame);
            shared.update(dt);
            if report_events(&shared) {
                break;
            }

            if frame % 120 == 119 {
                log::info!("Frame {}: score {}, {} fps", frame + 1, shared.score(), pacer.fps());
            }
            pacer.wait(frame_start);
        }

        let snapshot = shared.snapshot();
        log::info!(
            "Finished: score {}, level {}, {} enemies on screen, game over: {}",
            snapshot.score,
            snapshot.level,
            snapshot.enemies.len(),
            snapshot.game_over
        );
        println!("{}", snapshot.to_json()?);
        Ok(())
    }

    /// Sweep the ship across the bottom of the screen
    fn steer(shared: &SharedSimulation, frame: u32) {
        let half = VIEWPORT.0 as f32 / 2.0;
        let x = half + (half - 60.0) * (frame as f32 * 0.02).sin();
        shared.set_target(x, 40.0);
    }

    /// Log pull-once ship events; true once the run is over
    fn report_events(shared: &SharedSimulation) -> bool {
        let mut sim = shared.lock();
        let game_over = sim.is_game_over();
        if let Some(ship) = sim.ship_mut() {
            if let Some(pattern) = ship.take_fired() {
                log::debug!("Ship fired {:?}", pattern);
            }
            if let Some(kind) = ship.take_collected_bonus() {
                log::info!("Collected {} (life {})", kind, ship.life());
            }
        }
        game_over
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lonely Triangle (headless) starting...");

    if let Err(err) = native::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding page; nothing to run here
}
