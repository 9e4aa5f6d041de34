//! Galaxy Flock headless runner
//!
//! Builds a world, drives it from a fixed-rate clock and logs what the
//! flock does. Food drops stand in for pointer clicks.

use std::error::Error;
use std::path::PathBuf;
use std::thread::sleep;
use std::time::{Duration, Instant};

use clap::Parser;
use galaxy_flock::consts::TICK_RATE;
use galaxy_flock::sim::{SimState, TickInput, tick};
use galaxy_flock::SimParams;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Ticks between summary log lines
const SUMMARY_INTERVAL: u64 = 60;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a simulation params JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Drop food at a random spot every N ticks (0 disables)
    #[arg(long, default_value_t = 120)]
    food_every: u64,

    /// Ticks per second (0 runs unpaced)
    #[arg(short, long, default_value_t = TICK_RATE)]
    rate: u32,

    /// Print the final world snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

/// Paces ticks at a target rate. A slow tick is never dropped: the next one
/// simply starts late and the schedule restarts from there.
struct FixedClock {
    period: Option<Duration>,
    next: Instant,
}

impl FixedClock {
    fn new(rate: u32) -> Self {
        let period = (rate > 0).then(|| Duration::from_secs_f64(1.0 / rate as f64));
        Self {
            period,
            next: Instant::now(),
        }
    }

    fn wait(&mut self, tick: u64) {
        let Some(period) = self.period else {
            return;
        };
        self.next += period;
        let now = Instant::now();
        if now < self.next {
            sleep(self.next - now);
        } else {
            log::warn!(
                "Tick {} ran {:.1}ms over its slot",
                tick,
                (now - self.next).as_secs_f64() * 1000.0
            );
            self.next = now;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => SimParams::load(path)?,
        None => SimParams::default(),
    };
    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    log::info!("Galaxy Flock starting (seed {})", params.seed);
    let mut state = SimState::new(&params);
    let mut food_rng = Pcg32::seed_from_u64(params.seed ^ 0x5eed_f00d);
    let mut clock = FixedClock::new(args.rate);
    let mut eaten = 0usize;

    for t in 0..args.ticks {
        let mut input = TickInput::default();
        if args.food_every > 0 && t % args.food_every == 0 {
            input.spawn_food.push(Vec2::new(
                food_rng.random_range(0.0..state.config.world_width),
                food_rng.random_range(0.0..state.config.world_height),
            ));
        }

        let report = tick(&mut state, &input);
        eaten += report.food_consumed();

        if state.time_ticks % SUMMARY_INTERVAL == 0 {
            let hungry = state
                .agents
                .iter()
                .filter(|a| a.is_hungry(&state.config))
                .count();
            log::info!(
                "tick {}: {} foraging, {} flocking, {} hungry, {} food left, {} eaten",
                state.time_ticks,
                report.foraging,
                report.flocking,
                hungry,
                state.foods.len(),
                eaten
            );
        }

        clock.wait(t);
    }

    log::info!("Finished {} ticks, {} food eaten", state.time_ticks, eaten);

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    }
    Ok(())
}
