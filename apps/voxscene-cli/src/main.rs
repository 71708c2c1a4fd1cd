use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use voxscene_common::{GRID_SIZE, SceneConfig};
use voxscene_input::{InputEvent, InputHandler, action_for_key};
use voxscene_kernel::SceneContext;
use voxscene_render::{DebugTextRenderer, Renderer, SceneComposer};
use voxscene_tools::{FrameTimer, SceneInspector, TracingDiagnostics};

/// Simulated seconds per tick when driving the scene headless.
const TICK_SECONDS: f64 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "voxscene-cli", about = "Headless driver for the voxel scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and a summary of the initial scene
    Info,
    /// Compose frames and print the last one
    Frame {
        /// Number of ticks to run
        #[arg(short, long, default_value = "1")]
        ticks: u64,
        /// Override the rain seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Animate the point light
        #[arg(long)]
        animate: bool,
        /// List every drawable
        #[arg(long)]
        list: bool,
    },
    /// Apply a key script (e.g. "wwqff"), one key per tick
    Script {
        /// Keys to press in order; unbound keys are skipped
        keys: String,
        /// Pointer drag applied before the keys, as "dx,dy" pixels
        #[arg(long, value_parser = parse_drag, allow_hyphen_values = true)]
        drag: Option<(f32, f32)>,
    },
    /// Print the column height map, one row per z
    Grid,
}

fn parse_drag(s: &str) -> Result<(f32, f32), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected dx,dy but got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("{v:?}: {e}"))
    };
    Ok((parse(dx)?, parse(dy)?))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = SceneConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            let ctx = SceneContext::from_config(&config)?;
            println!("voxscene-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "textures: {} from {}",
                config.textures.join(", "),
                config.texture_dir.display()
            );
            println!("{}", SceneInspector::summary(&ctx));
        }
        Commands::Frame {
            ticks,
            seed,
            animate,
            list,
        } => {
            if let Some(seed) = seed {
                config.rain.seed = seed;
            }
            let mut ctx = SceneContext::from_config(&config)?;
            ctx.lighting.animated = animate;
            let mut composer = SceneComposer::new();
            let mut renderer = DebugTextRenderer { verbose: false };
            let mut timer = FrameTimer::default();
            let mut sinks = (TracingDiagnostics, &mut timer);

            let mut last = String::new();
            for tick in 0..ticks.max(1) {
                renderer.verbose = list && tick + 1 == ticks.max(1);
                last = composer.tick(
                    &mut ctx,
                    tick as f64 * TICK_SECONDS,
                    &mut renderer,
                    &mut sinks,
                );
            }
            print!("{last}");
            println!(
                "Timing: frames={} avg={:?} min={:?} max={:?}",
                timer.count(),
                timer.average(),
                timer.min(),
                timer.max()
            );
        }
        Commands::Script { keys, drag } => {
            let mut ctx = SceneContext::from_config(&config)?;
            let mut input = InputHandler::new(config.camera.drag_sensitivity);
            let mut composer = SceneComposer::new();

            if let Some((dx, dy)) = drag {
                input.handle(&mut ctx, InputEvent::PointerDown { x: 0.0, y: 0.0 });
                input.handle(&mut ctx, InputEvent::PointerMove { x: dx, y: dy });
                input.handle(&mut ctx, InputEvent::PointerUp);
            }

            let mut tick = 0u64;
            for key in keys.chars() {
                let Some(action) = action_for_key(key) else {
                    tracing::warn!(%key, "skipping unbound key");
                    continue;
                };
                let changed = input.handle(&mut ctx, InputEvent::Action(action));
                let facing = ctx.facing_cell();
                println!(
                    "{key} -> {action:?} changed={changed} facing=({}, {}) height={}",
                    facing.x,
                    facing.z,
                    ctx.world.height_at(facing)
                );
                composer.compose(&mut ctx, tick as f64 * TICK_SECONDS);
                tick += 1;
            }

            println!("{}", SceneInspector::summary(&ctx));
            let frame = composer.compose(&mut ctx, tick as f64 * TICK_SECONDS);
            print!("{}", DebugTextRenderer::new().render(&frame));
        }
        Commands::Grid => {
            let ctx = SceneContext::from_config(&config)?;
            println!("x ->  0..{}", GRID_SIZE - 1);
            for z in 0..GRID_SIZE as i32 {
                println!("z={z:2} {}", SceneInspector::height_row(&ctx, z));
            }
        }
    }

    Ok(())
}
