use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "troop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List wardrobe categories and their entries.
    List(ListArgs),
    /// Compose the worn layers over the base figure and write a PNG.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Wardrobe catalog JSON.
    #[arg(long)]
    wardrobe: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Wardrobe catalog JSON.
    #[arg(long)]
    wardrobe: PathBuf,

    /// Directory containing the catalog sprite files.
    #[arg(long)]
    assets: PathBuf,

    /// Base figure sprite, relative to the assets directory.
    #[arg(long, default_value = troop::BASE_FIGURE)]
    base: String,

    /// Layer to wear, as `<category>/<name>`; repeatable. Naming the same
    /// layer twice toggles it back off.
    #[arg(long = "wear")]
    wear: Vec<String>,

    /// Output directory for the exported PNG.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let wardrobe = troop::Wardrobe::from_path(&args.wardrobe)?;
    for category in wardrobe.categories() {
        println!("{category}");
        for entry in wardrobe.entries(category) {
            println!("  {} @ ({}, {})", entry.name, entry.offset.0, entry.offset.1);
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let wardrobe = troop::Wardrobe::from_path(&args.wardrobe)?;
    let mut session = troop::Session::new(wardrobe);

    for wear in &args.wear {
        let (category, name) = wear
            .split_once('/')
            .with_context(|| format!("--wear '{wear}' must be <category>/<name>"))?;
        let category: troop::Category = category.parse()?;
        session.toggle(category, name)?;
    }

    let source = troop::FsSource::new(&args.assets);
    let path = troop::export_png(
        &source,
        &args.base,
        session.selection(),
        &args.out_dir,
        chrono::Local::now().naive_local(),
    )?;

    eprintln!("wrote {}", path.display());
    Ok(())
}
