// crates/atlas-core/src/render/text.rs
//! Plain-text rendering for terminals.

use super::{CardView, DetailView, PageView};
use crate::error::LoadError;
use std::fmt::Write;

const FAVORITE: &str = "★";
const NOT_FAVORITE: &str = "☆";

/// A single grid line: marker, code, name, capital, region, population.
pub fn render_card(card: &CardView) -> String {
    format!(
        "{} {:<3}  {:<32} {:<20} {:<10} {:>15}",
        if card.favorite { FAVORITE } else { NOT_FAVORITE },
        card.code,
        card.name,
        card.capital,
        card.region,
        card.population
    )
}

/// One line per card, then a footer with the page position.
pub fn render_page(page: &PageView) -> String {
    let mut out = String::new();
    if page.items.is_empty() {
        out.push_str("No countries match your search.\n");
    }
    for card in &page.items {
        let _ = writeln!(out, "{}", render_card(card));
    }
    if page.page_count > 0 {
        let buttons: Vec<String> = page
            .window
            .iter()
            .map(|&n| {
                if n == page.page {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        let _ = writeln!(
            out,
            "-- page {}/{} ({} countries)  {}",
            page.page,
            page.page_count,
            page.total,
            buttons.join(" ")
        );
    }
    out
}

/// Label/value block for one country.
pub fn render_detail(view: &DetailView) -> String {
    let card = &view.card;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({})",
        if card.favorite { FAVORITE } else { NOT_FAVORITE },
        card.name,
        card.code
    );
    let _ = writeln!(out, "{}", view.official_name);
    let rows = [
        ("Native name", &view.native_names),
        ("Capital", &card.capital),
        ("Region", &card.region),
        ("Subregion", &view.subregion),
        ("Population", &card.population),
        ("Area", &view.area),
        ("Languages", &view.languages),
        ("Currencies", &view.currencies),
        ("Timezones", &view.timezones),
        ("Borders", &view.neighbors),
        ("Coordinates", &view.coordinates),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<12} {value}");
    }
    if let Some(url) = &card.flag {
        let _ = writeln!(out, "  {:<12} {url}", "Flag");
    }
    for (label, url) in [
        ("Map", view.map_embed.as_ref()),
        ("Google Maps", view.google_maps.as_ref()),
        ("OpenStreetMap", view.openstreetmap.as_ref()),
    ] {
        if let Some(url) = url {
            let _ = writeln!(out, "  {label:<12} {url}");
        }
    }
    out
}

/// The terminal counterpart of the HTML error panel.
pub fn render_error(err: &LoadError) -> String {
    format!("{}\nType `retry` to try again.\n", err.user_message())
}
