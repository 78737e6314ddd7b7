use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emoticon_match::{extract_peaks, Histogram3D, MatchAlgorithm};
use emotim::assets::{load_image, EmoticonLoader};
use emotim::models::MosaicConfig;
use emotim::rendering::{
    render_emoticon_list, render_histogram, render_json, render_png, render_text,
};
use emotim::services::MosaicService;

#[derive(Parser)]
#[command(name = "emotim")]
#[command(about = "Rebuild images as mosaics of emoticons")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image into an emoticon mosaic
    Convert {
        /// Source image (PNG, JPEG, GIF, BMP or WebP)
        input: PathBuf,

        /// Directory of emoticon PNGs named by codepoint (e.g. 1f600.png)
        #[arg(short, long)]
        emoticons: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the mosaic as emoticon text ("-" for stdout)
        #[arg(short, long)]
        text: Option<PathBuf>,

        /// Write a JSON report of every tile's match
        #[arg(long)]
        json: Option<PathBuf>,

        /// Matching algorithm: "correlation" or "peak"
        #[arg(short, long)]
        algorithm: Option<MatchAlgorithm>,

        /// Buckets per HCL channel (2-64)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Square tile size in source pixels (default: emoticon size)
        #[arg(long)]
        tile_size: Option<usize>,

        /// Worker threads (default: one per processing unit)
        #[arg(short, long)]
        workers: Option<usize>,

        /// YAML config file (default: $EMOTIM_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the color histogram and dominant colors of an image
    Inspect {
        image: PathBuf,

        /// Buckets per HCL channel (2-64)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Maximum number of clusters to extract
        #[arg(short, long)]
        peaks: Option<usize>,
    },
    /// List the emoticons of a directory with their dominant colors
    List {
        #[arg(short, long)]
        emoticons: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emotim=info,emoticon_match=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(Commands::Convert {
            input,
            emoticons,
            output,
            text,
            json,
            algorithm,
            depth,
            tile_size,
            workers,
            config,
        }) => {
            let mut config = MosaicConfig::load(config.as_deref())?;
            if let Some(algorithm) = algorithm {
                config.match_algorithm = algorithm.to_string();
            }
            if let Some(depth) = depth {
                config.color_depth = depth;
            }
            if tile_size.is_some() {
                config.tile_size = tile_size;
            }
            if workers.is_some() {
                config.workers = workers;
            }
            let outputs = Outputs { output, text, json };
            run_convert_command(&config, &input, &emoticons, &outputs).await
        }
        Some(Commands::Inspect {
            image,
            depth,
            peaks,
        }) => run_inspect_command(&image, depth, peaks),
        Some(Commands::List { emoticons }) => run_list_command(&emoticons),
        None => {
            print!("{}", MosaicConfig::default().to_yaml()?);
            Ok(())
        }
    }
}

/// Where `convert` writes its results
struct Outputs {
    output: Option<PathBuf>,
    text: Option<PathBuf>,
    json: Option<PathBuf>,
}

async fn run_convert_command(
    config: &MosaicConfig,
    input: &Path,
    emoticons: &Path,
    outputs: &Outputs,
) -> anyhow::Result<()> {
    config.validate()?;
    if outputs.output.is_none() && outputs.text.is_none() && outputs.json.is_none() {
        anyhow::bail!("Nothing to write: pass --output, --text or --json");
    }

    let service = MosaicService::from_dir(config, emoticons)
        .with_context(|| format!("Failed to load emoticons from {}", emoticons.display()))?;
    let image = load_image(input)?;
    tracing::info!(
        width = image.width(),
        height = image.height(),
        emoticons = service.set().len(),
        "Converting {}",
        input.display()
    );

    // Nothing is written unless every tile was matched.
    let grid = match service.run_cancellable(image).await {
        Ok(grid) => grid,
        Err(e) if e.is_cancelled() => anyhow::bail!("Cancelled, no output written"),
        Err(e) => return Err(e.into()),
    };
    let set = service.set();

    if let Some(path) = &outputs.output {
        let png = render_png(&grid, set, service.background())?;
        std::fs::write(path, &png)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {} ({} bytes)", path.display(), png.len());
    }

    if let Some(path) = &outputs.json {
        std::fs::write(path, render_json(&grid, set)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    if let Some(path) = &outputs.text {
        let text = render_text(&grid, set);
        if path.as_os_str() == "-" {
            println!("{text}");
        } else {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }

    if grid.fallback_count() > 0 {
        tracing::info!(
            fallbacks = grid.fallback_count(),
            "Some tiles had no similar emoticon and used the first one"
        );
    }
    Ok(())
}

fn run_inspect_command(
    path: &Path,
    depth: Option<usize>,
    peaks: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = MosaicConfig::default();
    if let Some(depth) = depth {
        config.color_depth = depth;
    }
    if let Some(peaks) = peaks {
        config.max_peaks = peaks;
    }

    let image = load_image(path)?;
    let histogram =
        Histogram3D::from_pixels(image.pixels().iter().copied(), &config.histogram_options()?);
    let clusters = extract_peaks(&histogram, &config.peak_options()?);

    println!("{} ({}x{})", path.display(), image.width(), image.height());
    print!("{}", render_histogram(&histogram, &clusters));
    Ok(())
}

fn run_list_command(dir: &Path) -> anyhow::Result<()> {
    let config = MosaicConfig::default();
    let assets = EmoticonLoader::load_dir(dir)?;
    let service = MosaicService::from_assets(&config, assets)?;
    print!("{}", render_emoticon_list(service.set()));
    Ok(())
}
