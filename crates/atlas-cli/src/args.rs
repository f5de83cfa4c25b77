// crates/atlas-cli/src/args.rs
use atlas_core::loader::FieldStrategy;
use atlas_core::pipeline::SortKey;
use atlas_core::render::BorderDisplay;
use atlas_core::AtlasConfig;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for atlas
#[derive(Debug, Parser)]
#[command(
    name = "atlas",
    version,
    about = "Search, sort and browse the restcountries.com dataset from the terminal"
)]
pub struct CliArgs {
    /// Read the dataset from a local JSON (or .json.gz) snapshot instead of the network
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Config file (default: atlas.toml in the OS config directory)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Cards per page
    #[arg(long = "page-size", global = true)]
    pub page_size: Option<usize>,

    /// Field projection: one `single` request, or a `merged` second request
    #[arg(long = "fields", global = true)]
    pub fields: Option<FieldStrategy>,

    /// Neighbor display in details: `codes` or `names`
    #[arg(long = "borders", global = true)]
    pub borders: Option<BorderDisplay>,

    /// Where favorites are stored (default: store.json in the OS data directory)
    #[arg(long = "favorites-file", global = true)]
    pub favorites_file: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset
    Stats,

    /// Print one page of countries
    List {
        /// Match against name, capital or region (case insensitive)
        #[arg(short = 's', long = "search", default_value = "")]
        search: String,

        /// a-z, z-a, continent, pop-high or pop-low
        #[arg(long = "sort", default_value = "a-z")]
        sort: SortKey,

        /// Only show favorites
        #[arg(short = 'f', long = "favorites")]
        favorites: bool,

        /// 1-based page number (clamped to the available pages)
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: usize,
    },

    /// Show the details of a country by code or name
    Show {
        /// Three-letter code or common name (e.g. DEU, "Åland Islands")
        code: String,
    },

    /// Add a country to the favorites, or remove it if already there
    Fav {
        /// Three-letter code or common name
        code: String,
    },

    /// List the favorite countries
    Favorites,

    /// Interactive session (type `help` once inside)
    Browse,

    /// Print the effective configuration as TOML
    Config,
}

impl CliArgs {
    /// Layer the command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut AtlasConfig) {
        if let Some(n) = self.page_size {
            config.page_size = n;
        }
        if let Some(fields) = self.fields {
            config.fields = fields;
        }
        if let Some(borders) = self.borders {
            config.borders = borders;
        }
        if let Some(path) = &self.favorites_file {
            config.favorites_file = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = CliArgs::parse_from([
            "atlas",
            "--page-size",
            "21",
            "--borders",
            "codes",
            "list",
            "--sort",
            "pop-high",
        ]);
        let mut config = AtlasConfig::default();
        args.apply(&mut config);
        assert_eq!(config.page_size, 21);
        assert_eq!(config.borders, BorderDisplay::Codes);
        assert_eq!(config.fields, FieldStrategy::Merged);
        match args.command {
            Commands::List { sort, page, .. } => {
                assert_eq!(sort, SortKey::PopulationDesc);
                assert_eq!(page, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        assert!(CliArgs::try_parse_from(["atlas", "list", "--sort", "size"]).is_err());
    }
}
