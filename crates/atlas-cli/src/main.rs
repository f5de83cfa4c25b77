//! atlas: explore the restcountries.com dataset from your terminal
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ atlas stats
//!
//! - List a page of countries, filtered and sorted
//!   $ atlas list --search europe --sort pop-high
//!   $ atlas list --favorites --page 2
//!
//! - Show the details of a country by code or name (case-insensitive)
//!   $ atlas show deu
//!   $ atlas show "new zealand"
//!
//! - Toggle a favorite, then list them
//!   $ atlas fav jpn
//!   $ atlas favorites
//!
//! - Interactive session
//!   $ atlas browse
//!
//! Data source
//! -----------
//!
//! By default the dataset is fetched from restcountries.com (the v3.1 endpoint,
//! falling back to v2 if that fails). Use `--input <path>` to read a local
//! snapshot in either shape instead. Favorites are kept in `store.json` in the
//! OS data directory unless `--favorites-file` says otherwise.
use anyhow::{bail, Context};
use atlas_cli::args::{CliArgs, Commands};
use atlas_cli::browse;
use atlas_core::app::{Command, Explorer, LoadState};
use atlas_core::loader::Transport;
use atlas_core::render::text;
use atlas_core::store::FileStore;
use atlas_core::text::group_thousands;
use atlas_core::AtlasConfig;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "fetch")]
fn transport() -> anyhow::Result<Box<dyn Transport>> {
    let http = atlas_core::loader::HttpTransport::new().context("cannot set up the HTTP client")?;
    Ok(Box::new(http))
}

/// Without `fetch` every host is unreachable; only `--input` works.
#[cfg(not(feature = "fetch"))]
fn transport() -> anyhow::Result<Box<dyn Transport>> {
    Ok(Box::new(atlas_core::loader::MemoryTransport::new()))
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let mut config = AtlasConfig::resolve(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;
    debug!(?config, "effective configuration");

    if let Commands::Config = args.command {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(favorites_path) = config.favorites_path() else {
        bail!("no data directory for the favorites file; pass --favorites-file");
    };
    let mut explorer = Explorer::from_config(&config, FileStore::new(favorites_path));
    let transport = transport()?;

    match &args.input {
        Some(path) => explorer.load_snapshot(path),
        None => explorer.load_with(config.loader(), transport.as_ref()),
    };

    if let Commands::Browse = args.command {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        browse::run(&mut explorer, transport.as_ref(), stdin.lock(), stdout.lock())?;
        return Ok(());
    }

    if let LoadState::Failed(e) = explorer.load_state() {
        bail!("{}\n  cause: {e}", e.user_message());
    }

    match args.command {
        Commands::Stats => {
            let stats = explorer.stats();
            println!("Dataset statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Regions: {}", stats.regions);
            println!("  Population: {}", group_thousands(stats.population));
            println!("  Favorites: {}", stats.favorites);
        }

        Commands::List {
            search,
            sort,
            favorites,
            page,
        } => {
            explorer.dispatch(Command::SetSearch(search));
            explorer.dispatch(Command::SetSort(sort));
            explorer.dispatch(Command::SetFavoritesOnly(favorites));
            explorer.dispatch(Command::GoToPage(page));
            print!("{}", text::render_page(&explorer.current_page()));
        }

        Commands::Show { code } => {
            let Some(country) = explorer.collection().find(&code) else {
                bail!("No country found for: {code}");
            };
            print!("{}", browse::country_text(&explorer, &country.code));
        }

        Commands::Fav { code } => {
            let Some(country) = explorer.collection().find(&code) else {
                bail!("No country found for: {code}");
            };
            let (code, name) = (country.code.clone(), country.name().to_string());
            explorer.dispatch(Command::ToggleFavorite(code.clone()));
            if explorer.is_favorite(&code) {
                println!("★ {name} ({code}) added to favorites");
            } else {
                println!("☆ {name} ({code}) removed from favorites");
            }
        }

        Commands::Favorites => {
            let ids = explorer.favorites().ids();
            if ids.is_empty() {
                println!("No favorites yet. Add one with `atlas fav <code>`.");
            }
            for id in ids {
                match explorer.collection().name_of(id) {
                    Some(name) => println!("★ {id}  {name}"),
                    None => println!("★ {id}  (not in the current dataset)"),
                }
            }
        }

        Commands::Browse | Commands::Config => {}
    }

    Ok(())
}
