//! # Warren
//!
//! Generates a composite walkability map and prints it as text
//! (`.` floor, `#` wall).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use warren_common::Grid;
use warren_mapgen::{CompositeStep, GeneratorConfig};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "warren", about = "Procedural walkability map generator")]
#[command(version)]
struct Args {
    /// TOML settings file (defaults are used when omitted)
    config: Option<PathBuf>,

    /// Seed override for a reproducible map
    #[arg(long)]
    seed: Option<u64>,
}

/// Main entry point.
fn main() -> Result<()> {
    // Logs go to stderr so the map can be piped
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("warren=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load_from(path),
        None => GeneratorConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate();

    info!("Warren {}", env!("CARGO_PKG_VERSION"));
    let mut context = config.build_pipeline().run()?;
    let map = context.take::<Grid<bool>>(Some(CompositeStep::DEFAULT_TAG))?;

    print!("{}", map.to_text());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_and_seed() {
        let args = Args::try_parse_from(["warren", "maps/warren.toml", "--seed", "17"])
            .expect("parse");
        assert_eq!(args.config, Some(PathBuf::from("maps/warren.toml")));
        assert_eq!(args.seed, Some(17));
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["warren"]).expect("parse");
        assert_eq!(args.config, None);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Args::try_parse_from(["warren", "--seed"]).is_err());
        assert!(Args::try_parse_from(["warren", "--seed", "many"]).is_err());
        assert!(Args::try_parse_from(["warren", "--verbose"]).is_err());
    }
}
