//! Headless map_forge level tool
//!
//! Creates, converts and inspects level files without opening the editor.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use map_forge_editor::map_forge_core::Level;
use map_forge_editor::preferences::EditorPreferences;
use map_forge_editor::project::Project;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "map_forge", about = "Create, convert and inspect map_forge levels")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new walled level
    New {
        output: PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Convert a legacy text grid into a level file
    Import { input: PathBuf, output: PathBuf },
    /// Write a level's grid as a legacy text grid
    Export { input: PathBuf, output: PathBuf },
    /// Print a summary of a level file
    Info { input: PathBuf },
}

/// Smallest level that still has one floor cell inside the wall border
const MIN_LEVEL_SIZE: u32 = 3;

/// Build the level for `new`, filling unset options from preferences
fn new_level(
    name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    preferences: &EditorPreferences,
) -> Result<Level> {
    let width = width.unwrap_or(preferences.default_width);
    let height = height.unwrap_or(preferences.default_height);
    if width < MIN_LEVEL_SIZE || height < MIN_LEVEL_SIZE {
        bail!(
            "level must be at least {}x{}, got {}x{}",
            MIN_LEVEL_SIZE,
            MIN_LEVEL_SIZE,
            width,
            height
        );
    }
    let name = name.unwrap_or_else(|| "Untitled".to_string());
    Ok(Level::with_tile_size(name, width, height, preferences.tile_size))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::New {
            output,
            name,
            width,
            height,
        } => {
            let preferences = EditorPreferences::load();
            let level = new_level(name, width, height, &preferences)?;
            let mut project = Project::new(level);
            project
                .save(&output)
                .with_context(|| format!("saving {}", output.display()))?;
        }
        Command::Import { input, output } => {
            let mut project = Project::import_legacy(&input)
                .with_context(|| format!("importing {}", input.display()))?;
            project
                .save(&output)
                .with_context(|| format!("saving {}", output.display()))?;
        }
        Command::Export { input, output } => {
            let project =
                Project::load(&input).with_context(|| format!("loading {}", input.display()))?;
            project
                .export_legacy(&output)
                .with_context(|| format!("exporting {}", output.display()))?;
        }
        Command::Info { input } => {
            let project =
                Project::load(&input).with_context(|| format!("loading {}", input.display()))?;
            let level = &project.level;
            let entities = &level.entities;
            println!("name:      {}", project.title());
            println!(
                "size:      {}x{} tiles ({} px)",
                level.width(),
                level.height(),
                level.tile_size
            );
            println!("player:    ({}, {})", entities.player.x, entities.player.y);
            println!(
                "toy:       {}",
                entities
                    .toy
                    .map(|t| format!("({}, {})", t.x, t.y))
                    .unwrap_or_else(|| "none".to_string())
            );
            println!("snails:    {}", entities.snails.len());
            println!("spiders:   {}", entities.spiders.len());
            println!("food:      {}", entities.food.len());
            println!("tripwires: {}", entities.tripwires.len());
        }
    }

    Ok(())
}
