use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use hexworld_grid::{HexCoord, HexLayout, HexOrientation};
use hexworld_input::{Key, MouseButton};
use hexworld_kernel::{DemoConfig, HeightSource, Session};
use hexworld_render::{DebugTextRenderer, RenderView, Renderer};
use hexworld_terrain::{FlatHeightField, HeightField, NoiseHeightField};
use hexworld_tools::SceneInspector;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexworld-cli", about = "Headless tooling for the hex world")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file; flags below override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long, global = true)]
    extent: Option<u32>,

    /// Terrain seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Grid orientation
    #[arg(long, global = true)]
    orientation: Option<Orientation>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Orientation {
    Pointy,
    Flat,
}

impl From<Orientation> for HexOrientation {
    fn from(value: Orientation) -> Self {
        match value {
            Orientation::Pointy => HexOrientation::PointyTop,
            Orientation::Flat => HexOrientation::FlatTop,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and a summary of the assembled world
    Info,
    /// Print the world position of every cell
    Layout {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print cell heights and their range
    Heights {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Drive the camera headlessly and report where it ends up
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Movement keys held for the whole run, e.g. "wa"
        #[arg(short, long, default_value = "")]
        keys: String,
        /// Pointer motion per frame while in look mode, as "dx,dy"
        #[arg(long, value_parser = parse_delta, allow_hyphen_values = true)]
        look: Option<(f32, f32)>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Dump the scene as text
    Scene {
        /// Maximum objects to list
        #[arg(short, long, default_value = "16")]
        max_objects: usize,
    },
}

#[derive(Serialize)]
struct CellRow {
    q: i32,
    r: i32,
    x: f32,
    z: f32,
    height: Option<f32>,
}

fn parse_delta(text: &str) -> Result<(f32, f32)> {
    let (dx, dy) = text
        .split_once(',')
        .with_context(|| format!("expected \"dx,dy\", got {text:?}"))?;
    Ok((dx.trim().parse()?, dy.trim().parse()?))
}

fn parse_keys(text: &str) -> Result<Vec<Key>> {
    text.chars()
        .map(|c| match c.to_ascii_lowercase() {
            'w' => Ok(Key::W),
            'a' => Ok(Key::A),
            's' => Ok(Key::S),
            'd' => Ok(Key::D),
            other => bail!("unknown movement key {other:?}"),
        })
        .collect()
}

impl Cli {
    fn demo_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => DemoConfig::default(),
        };
        if let Some(extent) = self.extent {
            config.grid.extent = extent;
        }
        if let Some(seed) = self.seed {
            config.terrain.seed = seed;
        }
        if let Some(orientation) = self.orientation {
            config.grid.orientation = orientation.into();
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn height_field(config: &DemoConfig, layout: HexLayout) -> Result<Box<dyn HeightField>> {
    Ok(match config.height_source {
        HeightSource::Flat => Box::new(FlatHeightField(config.terrain.base_height)),
        HeightSource::Noise => Box::new(
            NoiseHeightField::new(layout, &config.terrain).context("building height field")?,
        ),
    })
}

fn cell_rows(config: &DemoConfig, heights: Option<&dyn HeightField>) -> Result<Vec<CellRow>> {
    let layout = config.grid.layout()?;
    Ok(config
        .grid
        .square_extent()
        .cells()
        .map(|coord: HexCoord| {
            let p = layout.to_cartesian(coord);
            CellRow {
                q: coord.q,
                r: coord.r,
                x: p.x,
                z: p.y,
                height: heights.map(|h| h.height(coord)),
            }
        })
        .collect())
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.demo_config()?;
    tracing::debug!(
        extent = config.grid.extent,
        seed = config.terrain.seed,
        orientation = ?config.grid.orientation,
        "configuration resolved"
    );
    match &cli.command {
        Commands::Info => {
            println!("hexworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", hexworld_common::crate_info());
            println!("grid: {}", hexworld_grid::crate_info());
            println!("terrain: {}", hexworld_terrain::crate_info());
            println!("scene: {}", hexworld_scene::crate_info());
            println!("input: {}", hexworld_input::crate_info());
            println!("kernel: {}", hexworld_kernel::crate_info());
            println!("tools: {}", hexworld_tools::crate_info());
            println!("render: {}", hexworld_render::crate_info());
            let session = Session::new(&config).context("building the hex world")?;
            println!("{}", SceneInspector::summary(&session));
        }
        Commands::Layout { json } => {
            let rows = cell_rows(&config, None)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("({}, {}) -> ({:.3}, {:.3})", row.q, row.r, row.x, row.z);
                }
            }
        }
        Commands::Heights { json } => {
            let heights = height_field(&config, config.grid.layout()?)?;
            let rows = cell_rows(&config, Some(heights.as_ref()))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                let values: Vec<f32> = rows.iter().filter_map(|r| r.height).collect();
                for row in &rows {
                    println!("({}, {}) {:.3}", row.q, row.r, row.height.unwrap_or_default());
                }
                let min = values.iter().copied().fold(f32::INFINITY, f32::min);
                let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let mean = values.iter().sum::<f32>() / values.len().max(1) as f32;
                println!("cells={} min={min:.3} max={max:.3} mean={mean:.3}", values.len());
            }
        }
        Commands::Simulate {
            frames,
            dt,
            keys,
            look,
            json,
        } => {
            let mut session = Session::new(&config).context("building the hex world")?;
            for key in parse_keys(keys)? {
                session.key(key, true);
            }
            if look.is_some() {
                session.mouse_button_down(config.camera.look_button);
            }
            for _ in 0..*frames {
                if let Some((dx, dy)) = look {
                    session.mouse_motion(*dx, *dy);
                }
                session.tick(*dt);
            }
            if look.is_some() {
                session.mouse_button_up(config.camera.look_button);
            }
            tracing::info!(frames, dt, "simulation finished");
            let summary = SceneInspector::summary(&session);
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
                println!(
                    "look=({:.3}, {:.3}, {:.3})",
                    summary.look[0], summary.look[1], summary.look[2]
                );
            }
        }
        Commands::Scene { max_objects } => {
            let session = Session::new(&config).context("building the hex world")?;
            let renderer = DebugTextRenderer::with_max_objects(*max_objects);
            print!("{}", renderer.render(session.scene(), &RenderView::default()));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&cli)
}
