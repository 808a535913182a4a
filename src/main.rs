use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use skysweep::config::ScenarioConfig;
use skysweep::model::BodyRole;
use skysweep::scenario::Scenario;

/// Frames to run when neither the scenario nor the flags say.
const DEFAULT_FRAMES: u64 = 1000;

/// Runs a scenario headless and reports capture events as they happen.
#[derive(Debug, Parser)]
struct Args {
    /// Scenario file (TOML).
    #[arg(default_value = "cleanup.toml")]
    scenario: String,

    /// Override the scenario's frame count.
    #[arg(long)]
    frames: Option<u64>,

    /// Seed for debris placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let config = match ScenarioConfig::load(&args.scenario) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {}", args.scenario, err);
            std::process::exit(1);
        }
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let scenario = match Scenario::build(&config, &mut rng) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("{}: {}", args.scenario, err);
            std::process::exit(1);
        }
    };

    let total_frames = args.frames.or(scenario.frames).unwrap_or(DEFAULT_FRAMES);
    let Scenario {
        mut orrery,
        mut clock,
        ..
    } = scenario;

    let debris_total = orrery
        .bodies()
        .filter(|b| b.info.role == BodyRole::Debris)
        .count();

    for _ in 0..total_frames {
        for event in orrery.tick(&mut clock) {
            let sweeper = orrery.get_body(event.sweeper);
            let debris = orrery.get_body(event.debris);
            let at = event.point.location;
            println!(
                "[frame {:4}] {} captured {} at ({:.2}, {:.2}, {:.2})",
                event.point.frame, sweeper.info.name, debris.info.name, at.x, at.y, at.z
            );
        }
        if debris_total > 0 && orrery.debris_remaining() == 0 {
            println!("All debris swept by frame {}", clock.frame());
            break;
        }
    }

    if debris_total > 0 {
        println!(
            "Done after {} frames: {} of {} debris captured, {} remaining",
            clock.frame(),
            debris_total - orrery.debris_remaining(),
            debris_total,
            orrery.debris_remaining()
        );
    } else {
        println!("Done after {} frames", clock.frame());
    }
}
