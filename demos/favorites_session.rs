//! Favorites example for atlas-rs
//!
//! Drives an [`Explorer`] the way a front-end does: commands in, redraw hints
//! out. Favorites persist in a JSON file, so running it twice shows them
//! surviving the restart.
//!
//! ```text
//! cargo run --example favorites_session -- crates/atlas-core/tests/fixtures/countries_v3.json /tmp/atlas-favs.json
//! ```

use atlas_core::prelude::*;
use atlas_core::render::text;
use atlas_core::FileStore;

fn main() -> Result<()> {
    println!("=== atlas-rs Favorites Session Example ===\n");

    let mut args = std::env::args().skip(1);
    let snapshot = args
        .next()
        .unwrap_or_else(|| "crates/atlas-core/tests/fixtures/countries_v3.json".to_string());
    let store = args
        .next()
        .unwrap_or_else(|| std::env::temp_dir().join("atlas-favorites.json").display().to_string());

    let mut explorer = Explorer::new(FileStore::new(&store), 20, BorderDisplay::Names);
    explorer.load_snapshot(&snapshot);
    if let LoadState::Failed(e) = explorer.load_state() {
        println!("{}", e.user_message());
        return Err(e.clone().into());
    }
    println!("Favorites stored in {store}: {:?}\n", explorer.favorites().ids());

    for code in ["JPN", "NZL"] {
        let redraw = explorer.dispatch(Command::ToggleFavorite(code.into()));
        let now = if explorer.is_favorite(code) { "added" } else { "removed" };
        println!("toggle {code}: {now} (redraw {redraw:?})");
    }
    println!();

    println!("--- Favorites only ---");
    explorer.dispatch(Command::SetFavoritesOnly(true));
    print!("{}", text::render_page(&explorer.current_page()));
    println!();

    println!("--- Detail of the first favorite ---");
    let first = explorer.favorites().ids().first().cloned();
    match first {
        Some(code) => {
            explorer.dispatch(Command::OpenDetail(code.clone()));
            print!("{}", text::render_detail(&explorer.detail_view(&code)?));
            explorer.dispatch(Command::CloseDetail(CloseReason::Escape));
        }
        None => println!("(no favorites right now; run again to add them back)"),
    }

    Ok(())
}
