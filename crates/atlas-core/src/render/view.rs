// crates/atlas-core/src/render/view.rs
use super::{BorderDisplay, NOT_AVAILABLE};
use crate::error::RenderError;
use crate::model::{Collection, Coordinates, Country};
use crate::text::group_thousands;
use serde::Serialize;

/// Half-width, in degrees, of the box shown by the embedded map.
const MAP_SPAN_DEG: f64 = 5.0;

fn or_placeholder(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn join_or_placeholder<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}

pub fn format_population(population: Option<u64>) -> String {
    or_placeholder(population.map(group_thousands))
}

pub fn format_area(area: Option<f64>) -> String {
    or_placeholder(area.map(|a| {
        if a < 10.0 {
            format!("{a:.2} km²")
        } else {
            format!("{} km²", group_thousands(a.round() as u64))
        }
    }))
}

/// OpenStreetMap embed centred on `c`.
pub fn map_embed_url(c: Coordinates) -> String {
    let west = (c.lng - MAP_SPAN_DEG).max(-180.0);
    let south = (c.lat - MAP_SPAN_DEG).max(-90.0);
    let east = (c.lng + MAP_SPAN_DEG).min(180.0);
    let north = (c.lat + MAP_SPAN_DEG).min(90.0);
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={west:.4},{south:.4},{east:.4},{north:.4}&layer=mapnik&marker={:.4},{:.4}",
        c.lat, c.lng
    )
}

/// Neighbors as configured; unresolvable codes are kept as codes.
pub fn format_neighbors(country: &Country, collection: &Collection, mode: BorderDisplay) -> String {
    if country.borders.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match mode {
        BorderDisplay::Codes => country.borders.join(", "),
        BorderDisplay::Names => {
            let names: Vec<&str> = country
                .borders
                .iter()
                .map(|code| collection.name_of(code).unwrap_or(code.as_str()))
                .collect();
            format!("{} ({})", names.join(", "), names.len())
        }
    }
}

/// One card of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub code: String,
    pub name: String,
    pub flag: Option<String>,
    pub flag_alt: String,
    pub capital: String,
    pub region: String,
    pub population: String,
    pub favorite: bool,
}

impl CardView {
    pub fn new(country: &Country, favorite: bool) -> Self {
        CardView {
            code: country.code.clone(),
            name: country.name().to_string(),
            flag: country.flag.url().map(str::to_string),
            flag_alt: country
                .flag
                .alt
                .clone()
                .unwrap_or_else(|| format!("Flag of {}", country.name())),
            capital: or_placeholder(country.capital().map(str::to_string)),
            region: or_placeholder(Some(country.region().to_string())),
            population: format_population(country.population()),
            favorite,
        }
    }
}

/// The expanded view shown in the modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    #[serde(flatten)]
    pub card: CardView,
    pub official_name: String,
    pub native_names: String,
    pub subregion: String,
    pub area: String,
    pub timezones: String,
    pub languages: String,
    pub currencies: String,
    pub neighbors: String,
    pub coordinates: String,
    pub map_embed: Option<String>,
    pub google_maps: Option<String>,
    pub openstreetmap: Option<String>,
}

impl DetailView {
    /// Build the detail view of `country`.
    ///
    /// Absent fields become [`NOT_AVAILABLE`]. Data that is present but
    /// corrupt (coordinates off the globe) is an error; callers replace the
    /// whole view with a failure panel.
    pub fn build(
        country: &Country,
        collection: &Collection,
        favorite: bool,
        borders: BorderDisplay,
    ) -> Result<Self, RenderError> {
        if let Some(c) = country.coordinates {
            if !c.is_valid() {
                return Err(RenderError::InvalidCoordinates {
                    code: country.code.clone(),
                });
            }
        }

        let mut native: Vec<&str> = Vec::new();
        for n in &country.name.native {
            if !native.contains(&n.common.as_str()) {
                native.push(&n.common);
            }
        }

        let currencies = country.currencies.iter().map(|(code, cur)| {
            let name = cur.name.as_deref().unwrap_or(code);
            match cur.symbol.as_deref() {
                Some(sym) => format!("{name} ({sym})"),
                None => name.to_string(),
            }
        });

        Ok(DetailView {
            card: CardView::new(country, favorite),
            official_name: or_placeholder(Some(country.official_name().to_string())),
            native_names: join_or_placeholder(native),
            subregion: or_placeholder(country.subregion().map(str::to_string)),
            area: format_area(country.area()),
            timezones: join_or_placeholder(&country.timezones),
            languages: join_or_placeholder(country.languages.values()),
            currencies: join_or_placeholder(currencies),
            neighbors: format_neighbors(country, collection, borders),
            coordinates: or_placeholder(
                country
                    .coordinates
                    .map(|c| format!("{:.2}, {:.2}", c.lat, c.lng)),
            ),
            map_embed: country.coordinates.map(map_embed_url),
            google_maps: country.maps.google.clone(),
            openstreetmap: country.maps.openstreetmap.clone(),
        })
    }
}

/// The visible page of the grid plus what the navigation control needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub items: Vec<CardView>,
    /// 1-based.
    pub page: usize,
    pub page_count: usize,
    /// Size of the filtered set.
    pub total: usize,
    /// Page buttons to show.
    pub window: Vec<usize>,
}
