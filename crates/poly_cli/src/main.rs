use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use poly_renderer::save_bmp;
use poly_scene::{load_scene, RenderJob, SamplerDescription, SceneDescription};

/// Render a scene description to a 24-bit BMP image.
#[derive(Debug, Parser)]
#[command(name = "poly", version, about)]
struct Args {
    /// Path to the scene description (JSON)
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Output image path, overriding the scene's `output_file`
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Worker thread count, overriding the scene's `threads`
    #[arg(short, long, value_name = "N")]
    threads: Option<u32>,

    /// Sampler seed, for reproducible output
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

impl Args {
    /// Apply command-line overrides before the world is built.
    fn apply_overrides(&self, description: &mut SceneDescription) {
        if let Some(threads) = self.threads {
            description.threads = threads;
        }
        if let Some(new_seed) = self.seed {
            match &mut description.camera.sampler {
                SamplerDescription::Jittered { seed, .. } => *seed = Some(new_seed),
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let mut description = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    args.apply_overrides(&mut description);

    let start = Instant::now();
    let RenderJob {
        mut world,
        camera,
        output_file,
    } = description.build().context("Failed to build scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    camera.render_scene(&mut world).context("Render failed")?;

    let output = args.output.clone().unwrap_or(output_file);
    save_bmp(&output, &world)
        .with_context(|| format!("Failed to save image to {}", output.display()))?;

    Ok(())
}
