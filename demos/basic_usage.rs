//! Basic usage example for atlas-rs
//!
//! Loads the dataset (from a snapshot path given as the first argument, or
//! from restcountries.com), then walks through search, sort and paging.
//!
//! ```text
//! cargo run --example basic_usage -- crates/atlas-core/tests/fixtures/countries_v3.json
//! ```

use atlas_core::pipeline::{self, Criteria};
use atlas_core::prelude::*;
use atlas_core::render::text;
use atlas_core::{HttpTransport, LoadError, MemoryStore};

fn main() -> Result<()> {
    println!("=== atlas-rs Basic Usage Example ===\n");

    let countries = match std::env::args().nth(1) {
        Some(path) => Loader::load_snapshot(&path)?,
        None => {
            let transport = HttpTransport::new().map_err(LoadError::from)?;
            Loader::default().load(&transport)?
        }
    };
    let collection = Collection::new(countries);

    let stats = collection.stats();
    println!("Loaded {} countries in {} regions\n", stats.countries, stats.regions);

    // Example 1: Case-insensitive search
    println!("--- Example 1: Search 'ÅLAND' ---");
    let criteria = Criteria {
        search: "ÅLAND",
        sort: SortKey::NameAsc,
        favorites_only: false,
        favorites: &[],
    };
    for country in pipeline::visible(collection.countries(), &criteria) {
        println!("- {} ({})", country.name(), country.code());
    }
    println!();

    // Example 2: The five most populous countries in Europe
    println!("--- Example 2: Most populous in Europe ---");
    let criteria = Criteria {
        search: "europe",
        sort: SortKey::PopulationDesc,
        ..criteria
    };
    let europe = pipeline::visible(collection.countries(), &criteria);
    for country in pipeline::paginate(&europe, 1, 5) {
        println!("- {:<20} {:>15}", country.name(), country.population().unwrap_or(0));
    }
    println!();

    // Example 3: A page of the grid, as the CLI prints it
    println!("--- Example 3: Page 2 of the grid ---");
    let mut explorer = Explorer::new(MemoryStore::new(), 10, BorderDisplay::Names)
        .with_collection(collection);
    explorer.dispatch(Command::GoToPage(2));
    print!("{}", text::render_page(&explorer.current_page()));

    Ok(())
}
