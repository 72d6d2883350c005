use std::path::{Path, PathBuf};
use backrooms_tiles::{
    check_map_file, diff, load_tileset, max_severity, save_tileset, validate_against_dir,
    write_tsx, Severity, TilesetDiff,
};
use clap::{Parser, Subcommand};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let clean = match cli.command {
        Command::Show { path } => {
            show(&path)?;
            true
        },
        Command::Validate { path, assets_root, json } => {
            run_validate(&path, assets_root.as_deref(), json)?
        },
        Command::Diff { old, new, json } => run_diff(&old, &new, json)?,
        Command::Refcheck { path, json } => run_refcheck(&path, json)?,
        Command::Fmt { path, output } => {
            run_fmt(&path, output.as_deref())?;
            true
        },
    };
    if !clean {
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "tsxcat")]
#[command(about = "Inspects, validates and diffs Tiled image-collection tilesets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prints tileset metadata and the id -> image table
    Show { path: PathBuf },
    /// Runs structural checks against a tileset
    Validate {
        path: PathBuf,
        /// Directory image sources resolve against. Defaults to the tileset's directory.
        #[arg(short, long)]
        assets_root: Option<PathBuf>,
        /// Emits findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compares two revisions of a tileset
    Diff {
        old: PathBuf,
        new: PathBuf,
        /// Emits the diff as JSON
        #[arg(long)]
        json: bool,
    },
    /// Checks a level map for tile references missing from its tilesets
    Refcheck {
        path: PathBuf,
        /// Emits findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parses and re-serializes a tileset in canonical form
    Fmt {
        path: PathBuf,
        /// Output file. Prints to stdout if omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn show(path: &Path) -> anyhow::Result<()> {
    let tileset = load_tileset(path)?;
    println!("name:        {}", tileset.name);
    println!("tile size:   {}x{}", tileset.tile_width, tileset.tile_height);
    println!("tilecount:   {} ({} entries)", tileset.tile_count, tileset.len());
    println!("columns:     {}", tileset.columns);
    if let Some(id) = tileset.placeholder_id() {
        println!("placeholder: tile {id}");
    }
    println!();
    for tile in tileset.iter() {
        let image = &tile.image;
        match (image.width, image.height) {
            (Some(width), Some(height)) => {
                println!("{:>4}  {} ({}x{})", tile.id, image.source, width, height)
            },
            _ => println!("{:>4}  {}", tile.id, image.source),
        }
    }
    Ok(())
}

fn run_validate(path: &Path, assets_root: Option<&Path>, json: bool) -> anyhow::Result<bool> {
    let tileset = load_tileset(path)?;
    let base_dir = match assets_root {
        Some(dir) => dir,
        None => path.parent().unwrap_or(Path::new("")),
    };
    let findings = validate_against_dir(&tileset, base_dir);
    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    }
    else if findings.is_empty() {
        println!("{}: clean", path.display());
    }
    else {
        for finding in &findings {
            println!("[{}] {}", finding.severity(), finding);
        }
    }
    Ok(max_severity(&findings) < Some(Severity::Error))
}

fn run_diff(old_path: &Path, new_path: &Path, json: bool) -> anyhow::Result<bool> {
    let old = load_tileset(old_path)?;
    let new = load_tileset(new_path)?;
    let result = diff(&old, &new);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    else {
        print_diff(&result);
    }
    Ok(true)
}

fn print_diff(diff: &TilesetDiff) {
    if diff.is_empty() {
        println!("identical");
        return;
    }
    for id in &diff.added {
        println!("added     {id}");
    }
    for id in &diff.removed {
        println!("removed   {id}");
    }
    for change in &diff.retargeted {
        println!("retarget  {}: {} -> {}", change.id, change.old_source, change.new_source);
    }
    for change in &diff.resized {
        println!(
            "resized   {}: {:?}x{:?} -> {:?}x{:?}",
            change.id, change.old_width, change.old_height, change.new_width, change.new_height
        );
    }
    for change in &diff.metadata {
        println!("metadata  {}: '{}' -> '{}'", change.field, change.old, change.new);
    }
}

fn run_refcheck(path: &Path, json: bool) -> anyhow::Result<bool> {
    let findings = check_map_file(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    }
    else if findings.is_empty() {
        println!("{}: clean", path.display());
    }
    else {
        for finding in &findings {
            println!("{finding}");
        }
    }
    Ok(findings.is_empty())
}

fn run_fmt(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let tileset = load_tileset(path)?;
    match output {
        Some(output) => save_tileset(&tileset, output)?,
        None => print!("{}", write_tsx(&tileset)),
    }
    Ok(())
}
