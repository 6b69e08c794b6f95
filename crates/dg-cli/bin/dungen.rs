//! dungen
//!
//! Builds one dungeon layout from a level descriptor and prints it.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use log::info;

use dg_cli::{render_ascii, summarize};
use dg_core::{BuildSettings, DEMO_LEVEL_JSON, DungeonBuilder, DungeonLevel, LevelRng};

/// Graph-driven room-template dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Assemble a dungeon level from room templates", long_about = None)]
struct Args {
    /// Level descriptor (JSON); the bundled demo level if omitted
    #[arg(short = 'l', long = "level")]
    level: Option<PathBuf>,

    /// RNG seed; random if omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Build settings (JSON)
    #[arg(long = "settings")]
    settings: Option<PathBuf>,

    /// Override the number of layout graph selections
    #[arg(long = "max-build-attempts")]
    max_build_attempts: Option<u32>,

    /// Override the number of rebuilds per layout graph
    #[arg(long = "max-rebuild-attempts")]
    max_rebuild_attempts: Option<u32>,

    /// Write the finished layout to this file as JSON
    #[arg(short = 'j', long = "json")]
    json: Option<PathBuf>,

    /// Print an ASCII map of the layout
    #[arg(short = 'a', long = "ascii")]
    ascii: bool,

    /// Check the level descriptor and exit
    #[arg(long = "validate")]
    validate: bool,

    /// More log output (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let level = match &args.level {
        Some(path) => DungeonLevel::load_from_file(path)
            .with_context(|| format!("loading level {}", path.display()))?,
        None => DungeonLevel::from_json_str(DEMO_LEVEL_JSON).context("loading the demo level")?,
    };

    let mut settings = match &args.settings {
        Some(path) => BuildSettings::load_from_file(path)
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => BuildSettings::default(),
    };
    if let Some(n) = args.max_build_attempts {
        settings.max_build_attempts = n;
    }
    if let Some(n) = args.max_rebuild_attempts {
        settings.max_rebuild_attempts_per_graph = n;
    }

    if args.validate {
        let issues = level.validate(&settings);
        for issue in &issues {
            println!("{}", issue);
        }
        if !issues.is_empty() {
            bail!("level '{}' has {} issue(s)", level.name, issues.len());
        }
        println!("level '{}' is valid", level.name);
        return Ok(());
    }

    let rng = args.seed.map(LevelRng::new).unwrap_or_else(LevelRng::from_entropy);
    info!("seed {}", rng.seed());
    let mut builder = DungeonBuilder::new(settings, rng);
    let layout = builder
        .generate_dungeon(&level)
        .with_context(|| format!("generating level '{}'", level.name))?;

    print!("{}", summarize(&layout));
    if args.ascii {
        println!();
        print!("{}", render_ascii(&layout));
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&layout)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("layout written to {}", path.display());
    }

    Ok(())
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    use simplelog::LevelFilter::{Debug, Info, Off, Trace};
    let level = match verbose {
        0 => Info,
        1 => Debug,
        _ => Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
