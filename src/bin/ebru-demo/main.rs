// ebru-demo - Play the marbling demonstration headless and save frames
//
// Runs the scripted demo on a virtual clock at the requested frame rate,
// logs the narration, and writes PNG snapshots plus the final basin.
//
// Usage: cargo run --bin ebru-demo -- [--seed N] [--config cfg.json] [--out DIR]
//
// Outputs (in --out):
//   - frame_NNNNN.png  every --snapshot-every ms of demo time (0 = none)
//   - final.png        the finished basin
//   - timeline.json    the schedule that was played

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use ebru_engine::choreo::demo_timeline;
use ebru_engine::config::EngineConfig;
use ebru_engine::narration::Transcript;
use ebru_engine::render::Canvas;
use ebru_engine::session::Session;

#[derive(Parser, Debug)]
#[command(about = "Play the Ebru marbling demonstration and save the result")]
struct Args {
    /// seed for drop positions and stylus starts (default: config, then clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON engine config; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// output directory
    #[arg(long, default_value = "ebru-out")]
    out: PathBuf,

    /// virtual frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// ms of demo time between snapshots, 0 to disable
    #[arg(long, default_value_t = 1000.0)]
    snapshot_every: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if !(args.fps.is_finite() && args.fps > 0.0) {
        return Err(anyhow!("--fps must be positive, got {}", args.fps));
    }

    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);
    config.seed = Some(seed);

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let (w, h) = (config.canvas.width, config.canvas.height);
    println!("Ebru demo {}x{} seed {} -> {}", w, h, seed, args.out.display());

    // Same seed, same schedule as the one the session will build
    let timeline = demo_timeline(&mut SmallRng::seed_from_u64(seed), w as f32, h as f32);
    let timeline_path = args.out.join("timeline.json");
    fs::write(&timeline_path, serde_json::to_string_pretty(&timeline)?)
        .with_context(|| format!("writing {}", timeline_path.display()))?;

    let mut session = Session::new(config, seed).context("building session")?;
    session.set_narrator(Box::new(Transcript::default()));
    if !session.start_demo(0.0) {
        return Err(anyhow!("demo did not start"));
    }

    let frame_ms = 1000.0 / args.fps;
    let mut now = 0.0;
    let mut next_snapshot = 0.0;
    let mut frames = 0u64;
    let mut snapshots = 0u32;

    while session.is_demo_running() {
        now += frame_ms;
        frames += 1;
        let canvas = session.frame(now);

        if args.snapshot_every > 0.0 && now >= next_snapshot {
            let path = args.out.join(format!("frame_{:05}.png", now as u64));
            save(canvas, &path)?;
            snapshots += 1;
            next_snapshot = now + args.snapshot_every;
        }
    }

    let final_path = args.out.join("final.png");
    save(session.frame(now), &final_path)?;

    let basin = session.basin();
    println!(
        "Done: {} frames, {:.1}s, {} drops ({} points), {} snapshots",
        frames,
        now / 1000.0,
        basin.len(),
        basin.total_vertices(),
        snapshots,
    );
    Ok(())
}

fn save(canvas: &Canvas, path: &Path) -> Result<()> {
    let png = canvas.encode_png()?;
    fs::write(path, png).with_context(|| format!("writing {}", path.display()))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0xEB2u64)
}
