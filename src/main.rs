use std::str::FromStr;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use compute_life::{
    Phase, Schedule, SeedPlan, SimConfig, Simulation, presets,
    domain::DEFAULT_TILE_SIZE,
    input,
    rendering::{self, DisplaySize, GridTexture},
};
use macroquad::miniquad::conf::Platform;
use macroquad::prelude::*;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Paint cells, press Space, watch them evolve",
    long_about = None
)]
struct CliArgs {
    /// Grid dimensions expressed as WIDTHxHEIGHT (for example 500x500).
    #[arg(
        short = 's',
        long = "size",
        value_name = "WIDTHxHEIGHT",
        conflicts_with_all = ["width", "height"]
    )]
    grid_size: Option<GridSizeArg>,
    /// Number of columns when using explicit dimensions.
    #[arg(long, value_name = "CELLS", requires = "height")]
    width: Option<usize>,
    /// Number of rows when using explicit dimensions.
    #[arg(long, value_name = "CELLS", requires = "width")]
    height: Option<usize>,
    /// Edge length of the tiles each worker computes.
    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: usize,
    /// Probability that a seeded cell starts alive.
    #[arg(long = "fill", value_name = "PROBABILITY", default_value_t = 0.2)]
    fill_probability: f64,
    /// Fixed seed for the random fill.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Worker threads for tile dispatch (defaults to the global rayon pool).
    #[arg(long, value_name = "COUNT")]
    threads: Option<usize>,
    /// How tiles are dispatched.
    #[arg(long, value_enum, default_value_t = ScheduleArg::Tiled)]
    schedule: ScheduleArg,
    /// Initial fill of the grid.
    #[arg(long, value_enum, default_value_t = SeedPlanArg::Random)]
    seed_plan: SeedPlanArg,
    /// Preset pattern stamped at the center before painting (for example "Glider").
    #[arg(long, value_name = "NAME")]
    pattern: Option<String>,
    /// Screen pixels per cell.
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(1..=64)
    )]
    scale: u32,
    /// Milliseconds to pause between generations.
    #[arg(long = "step-delay-ms", value_name = "MILLISECONDS", default_value_t = 0)]
    step_delay_ms: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScheduleArg {
    Serial,
    Tiled,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SeedPlanArg {
    Random,
    Empty,
    GliderGuns,
}

/// Grid dimensions parsed from a WIDTHxHEIGHT command-line argument.
#[derive(Clone, Copy, Debug)]
struct GridSizeArg {
    width: usize,
    height: usize,
}

impl FromStr for GridSizeArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (width, height) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| "expected format WIDTHxHEIGHT".to_string())?;

        let width = width
            .trim()
            .parse::<usize>()
            .map_err(|error| format!("invalid width: {error}"))?;
        let height = height
            .trim()
            .parse::<usize>()
            .map_err(|error| format!("invalid height: {error}"))?;

        if width == 0 || height == 0 {
            return Err("grid dimensions must be positive".to_string());
        }

        Ok(Self { width, height })
    }
}

impl CliArgs {
    fn to_config(&self) -> SimConfig {
        let defaults = SimConfig::default();
        let (width, height) = match (self.grid_size, self.width, self.height) {
            (Some(size), _, _) => (size.width, size.height),
            (None, Some(width), Some(height)) => (width, height),
            _ => (defaults.width, defaults.height),
        };

        SimConfig {
            width,
            height,
            tile_size: self.tile_size,
            fill_probability: self.fill_probability,
            rng_seed: self.seed,
            threads: self.threads,
            schedule: match self.schedule {
                ScheduleArg::Serial => Schedule::Serial,
                ScheduleArg::Tiled => Schedule::Tiled,
            },
            seed_plan: match self.seed_plan {
                SeedPlanArg::Random => SeedPlan::Random,
                SeedPlanArg::Empty => SeedPlan::Empty,
                SeedPlanArg::GliderGuns => SeedPlan::GliderGuns,
            },
            scale: self.scale,
            step_delay: Duration::from_millis(self.step_delay_ms),
        }
    }
}

fn window_conf(display: DisplaySize) -> Conf {
    let (window_width, window_height) = display.window;
    Conf {
        window_title: "Compute Life".to_owned(),
        window_width,
        window_height,
        window_resizable: false,
        platform: Platform {
            swap_interval: Some(0),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Frame loop: feed input while painting, one generation per frame while running.
/// Closing the window ends the process between frames, never inside a step.
async fn run(mut simulation: Simulation, config: SimConfig, display: DisplaySize) {
    let scale = config.scale as f32;
    let mut view = GridTexture::new(display);

    loop {
        match simulation.phase() {
            Phase::Painting => {
                for event in input::poll_events(scale) {
                    simulation.handle(event);
                }
            }
            Phase::Running => {
                if let Err(err) = simulation.step() {
                    log::error!("step failed: {err}");
                    break;
                }
                if !config.step_delay.is_zero() {
                    std::thread::sleep(config.step_delay);
                }
            }
        }

        view.update(simulation.current());
        clear_background(BLACK);
        view.draw(scale);
        rendering::draw_status(&simulation);

        next_frame().await;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = args.to_config();
    let Some(display) = rendering::display_size(config.width, config.height, config.scale) else {
        bail!(
            "a {}x{} grid at scale {} does not fit in a window",
            config.width,
            config.height,
            config.scale
        );
    };
    let mut simulation = Simulation::new(&config)?;

    if let Some(name) = &args.pattern {
        let Some(pattern) = presets::by_name(name) else {
            bail!("unknown pattern {name:?}");
        };
        let x = (config.width as i64 - pattern.width as i64) / 2;
        let y = (config.height as i64 - pattern.height as i64) / 2;
        let painted = simulation.stamp(&pattern, x, y);
        log::info!("stamped {} at ({x}, {y}), {painted} new cells", pattern.name);
    }

    macroquad::Window::from_config(window_conf(display), run(simulation, config, display));
    Ok(())
}
