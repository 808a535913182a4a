use clap::Parser;
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use skysweep::config::ScenarioConfig;
use skysweep::model::Orrery;
use skysweep::scenario::Scenario;

/// Draws a scenario's orbit curves, projected onto the xy plane.
#[derive(Debug, Parser)]
struct Args {
    /// Scenario file (TOML).
    #[arg(default_value = "cleanup.toml")]
    scenario: String,

    /// Output image path.
    #[arg(long, default_value = "plots/orbits.png")]
    out: String,
}

pub fn main() {
    let args = Args::parse();

    let config = match ScenarioConfig::load(&args.scenario) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {}", args.scenario, err);
            std::process::exit(1);
        }
    };

    // Body placement doesn't matter for the curves; any seed does
    let mut rng = StdRng::seed_from_u64(0);
    let scenario = match Scenario::build(&config, &mut rng) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("{}: {}", args.scenario, err);
            std::process::exit(1);
        }
    };

    draw_plot(&scenario.orrery, &args.out).unwrap();
    println!("Wrote {}", args.out);
}

fn draw_plot(orrery: &Orrery, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = std::path::Path::new(name).parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Fit every curve with a little margin
    let extent = orrery
        .classes()
        .flat_map(|class| class.curve().iter())
        .map(|point| point.x.abs().max(point.y.abs()))
        .fold(1.0_f64, f64::max)
        * 1.1;

    let root = BitMapBackend::new(name, (800, 800)).into_drawing_area();
    root.fill(&BLACK)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    for class in orrery.classes() {
        let color = RGBColor(
            (class.color.x * 255.0) as u8,
            (class.color.y * 255.0) as u8,
            (class.color.z * 255.0) as u8,
        );
        let curve = class.curve();
        let mut points: Vec<(f64, f64)> =
            curve.iter().map(|point| (point.x, point.y)).collect();
        // Close the loop
        if let Some(&first) = points.first() {
            points.push(first);
        }
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(class.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(BLACK.mix(0.8))
        .label_font(("sans-serif", 15).into_font().color(&WHITE))
        .border_style(WHITE)
        .draw()?;

    Ok(())
}
