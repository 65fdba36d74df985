use clap::{Parser, Subcommand};
use item_wiki::{config, generate, output};
use std::path::{Path, PathBuf};

/// Shared flags for commands that report a run.
#[derive(clap::Args, Clone)]
struct ReportArgs {
    /// Print the run report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "item-wiki")]
#[command(about = "Markdown wiki generator for game item configuration files")]
#[command(long_about = "\
Markdown wiki generator for game item configuration files

Every YAML document under the source directory describes items and the
recipes that craft them. Items are grouped into one Markdown page per
namespace, with stats, lore and a positioned recipe card for each recipe.

Content structure:

  contents/
  ├── food.yml                     # info.namespace: food → wiki/food.md
  └── tools/
      ├── hammers.yaml             # info.namespace: tools → wiki/tools.md
      └── more_food.yml            # Same namespace → same page

Output structure:

  wiki/
  ├── food.md
  ├── tools.md
  └── static/                      # Icons: <item key>.png plus card templates

Icons are not generated. Each run lists the images the pages point at that
are missing from the static folder, with the item each one belongs to.

Run 'item-wiki gen-config' to generate a documented item-wiki.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "contents", global = true)]
    source: PathBuf,

    /// Output directory (overrides output.dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write namespace pages, install templates and report missing icons
    Build(ReportArgs),
    /// Index content and report what a build would produce, writing nothing
    Check(ReportArgs),
    /// Print a stock item-wiki.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => {
            let wiki_config = load_config(&cli.config, cli.output.as_deref())?;
            init_thread_pool(&wiki_config.processing);
            if !args.json {
                println!("==> Building {}", cli.source.display());
            }
            let report = generate::build(&cli.source, &wiki_config)?;
            emit(&report, &cli.source, args.json)?;
        }
        Command::Check(args) => {
            let wiki_config = load_config(&cli.config, cli.output.as_deref())?;
            init_thread_pool(&wiki_config.processing);
            if !args.json {
                println!("==> Checking {}", cli.source.display());
            }
            let report = generate::check(&cli.source, &wiki_config)?;
            emit(&report, &cli.source, args.json)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and apply the `--output` override.
fn load_config(
    path: &Path,
    output: Option<&Path>,
) -> Result<config::WikiConfig, config::ConfigError> {
    let mut wiki_config = config::load_config(path)?;
    if let Some(dir) = output {
        wiki_config.output.dir = dir.to_string_lossy().into_owned();
    }
    Ok(wiki_config)
}

fn emit(
    report: &item_wiki::types::WikiReport,
    source: &Path,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        output::print_report_json(report)
    } else {
        output::print_report(report, source);
        Ok(())
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
