use clap::{Parser, Subcommand};
use gallery_tree::config::{self, GalleryConfig, PlaceFirst, SortKey, ViewMode};
use gallery_tree::{Gallery, index, output};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "gallery-tree")]
#[command(about = "Browse a media library as albums")]
#[command(long_about = "\
Browse a media library as albums

Every directory that holds media, directly or further down, becomes an album
with totals for its whole subtree. Views list albums flat or as branches
below a target directory, then filter and sort the result.

Typical session:

  gallery-tree index --source ~/Pictures   # walk the library into records.json
  gallery-tree albums                      # inspect every album
  gallery-tree view --mode tree --target /home/me/Pictures/2024
  gallery-tree view --target /home/me/Pictures/2024/Rome --sort size --descending

Settings are read from gallery.toml when present; command-line flags win.
Run 'gallery-tree gen-config' to generate a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Directory for intermediate files (records)
    #[arg(long, default_value = ".gallery-tree", global = true)]
    temp_dir: PathBuf,

    /// Config file; missing means stock defaults
    #[arg(long, default_value = "gallery.toml", global = true)]
    config: PathBuf,

    /// Log debug detail to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for the `[view]` and `[sort]` config sections.
#[derive(clap::Args, Clone)]
struct ViewArgs {
    /// Projection mode
    #[arg(long, value_enum)]
    mode: Option<ViewMode>,

    /// Directory to drill into
    #[arg(long)]
    target: Option<String>,

    /// Only list paths containing this text (case-insensitive)
    #[arg(long)]
    search: Option<String>,

    /// Sort key
    #[arg(long, value_enum)]
    sort: Option<SortKey>,

    /// Reverse the sort order
    #[arg(long)]
    descending: bool,

    /// Item type moved to the front after sorting
    #[arg(long, value_enum)]
    place_first: Option<PlaceFirst>,

    /// Print the display list as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Walk a media directory into records
    Index {
        /// Media directory to walk
        #[arg(long, default_value = ".")]
        source: PathBuf,
    },
    /// Print every album with its subtree totals
    Albums,
    /// Print a display list
    View(ViewArgs),
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Index { source } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.index);
            let files = index::scan_media(&source, &config.index)?;
            index::save_records(&records_path(&cli.temp_dir), &files)?;
            output::print_index_output(&files, &source.display().to_string());
        }
        Command::Albums => {
            let gallery = Gallery::new(index::load_records(&records_path(&cli.temp_dir))?);
            output::print_album_tree(gallery.albums());
        }
        Command::View(args) => {
            let mut config = config::load_config(&cli.config)?;
            apply_view_args(&mut config, &args);
            config.normalize();
            config.validate()?;

            let gallery = Gallery::new(index::load_records(&records_path(&cli.temp_dir))?);
            let items = gallery.view(&config);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                output::print_display_list(&items);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn records_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join("records.json")
}

/// Command-line flags override whatever the config file set.
fn apply_view_args(config: &mut GalleryConfig, args: &ViewArgs) {
    if let Some(mode) = args.mode {
        config.view.mode = mode;
    }
    if let Some(target) = &args.target {
        config.view.target = Some(target.clone());
    }
    if let Some(search) = &args.search {
        config.view.search = Some(search.clone());
    }
    if let Some(key) = args.sort {
        config.sort.key = key;
    }
    if args.descending {
        config.sort.descending = true;
    }
    if let Some(place_first) = args.place_first {
        config.sort.place_first = place_first;
    }
}

/// Logs go to stderr so stdout stays clean for `--json`.
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize the rayon thread pool based on index config.
///
/// Capped at the number of available cores.
fn init_thread_pool(settings: &config::IndexConfig) {
    let threads = config::effective_threads(settings);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
