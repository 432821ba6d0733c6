use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use formats::DEFAULT_OBJECT;
use render::RenderOptions;
use tools::{country_svg, load_catalog, merge_svg};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render country silhouettes and merges as SVG")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mainland silhouette of one country
    Country {
        #[command(flatten)]
        input: InputArgs,

        /// ISO 3166-1 alpha-2 code (e.g. GB)
        #[arg(long)]
        a: String,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Area-equalized union of two countries
    Merge {
        #[command(flatten)]
        input: InputArgs,

        /// First country, ISO 3166-1 alpha-2
        #[arg(long)]
        a: String,

        /// Second country, ISO 3166-1 alpha-2
        #[arg(long)]
        b: String,

        #[command(flatten)]
        style: StyleArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// GeoJSON FeatureCollection or TopoJSON topology (e.g. countries-110m.json)
    #[arg(long)]
    countries: PathBuf,

    /// TopoJSON object holding the countries
    #[arg(long, default_value = DEFAULT_OBJECT)]
    object: String,

    /// JSON object mapping alpha-2 codes to numeric ids (default: bundled ISO 3166-1)
    #[arg(long)]
    iso: Option<PathBuf>,

    /// Write the SVG here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 520.0)]
    height: f64,

    #[arg(long, default_value_t = 16.0)]
    pad: f64,

    #[arg(long, default_value = "#111")]
    stroke: String,

    #[arg(long, default_value_t = 2.0)]
    stroke_width: f64,

    #[arg(long, default_value = "white")]
    fill: String,

    /// Also draw the overlaid outlines; never fail on a missing union
    #[arg(long)]
    debug: bool,
}

impl StyleArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            pad: self.pad,
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
            fill: self.fill.clone(),
            debug: self.debug,
        }
        .sanitized()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (input, svg) = match cli.command {
        Command::Country { input, a, style } => {
            let catalog = load_catalog(&input.countries, input.iso.as_deref(), &input.object)?;
            let svg = country_svg(&catalog, &a, &style.options())?;
            (input, svg)
        }
        Command::Merge { input, a, b, style } => {
            let catalog = load_catalog(&input.countries, input.iso.as_deref(), &input.object)?;
            let svg = merge_svg(&catalog, &a, &b, &style.options())?;
            (input, svg)
        }
    };

    match &input.out {
        Some(path) => {
            fs::write(path, &svg)?;
            info!("wrote {} bytes to {}", svg.len(), path.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}
