// crates/atlas-core/src/model.rs
use crate::common::Stats;
use crate::traits::NameMatch;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A country's names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    /// Always present; the key for search and sort.
    pub common: String,
    pub official: String,
    /// Native forms, ordered by language code.
    #[serde(default)]
    pub native: Vec<NativeName>,
}

/// A native form of the country's name in one language.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NativeName {
    pub language: String,
    pub common: String,
    pub official: String,
}

/// Flag image references.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub png: Option<String>,
    pub svg: Option<String>,
    pub alt: Option<String>,
}

impl Flag {
    /// Preferred image url: SVG first, PNG otherwise.
    pub fn url(&self) -> Option<&str> {
        self.svg.as_deref().or(self.png.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build from a `[lat, lng]` pair, rejecting anything that is not on the globe.
    pub fn from_pair(pair: &[f64]) -> Option<Self> {
        match pair {
            [lat, lng, ..] if Self::in_range(*lat, *lng) => Some(Coordinates {
                lat: *lat,
                lng: *lng,
            }),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        Self::in_range(self.lat, self.lng)
    }

    fn in_range(lat: f64, lng: f64) -> bool {
        lat.is_finite() && lng.is_finite() && lat.abs() <= 90.0 && lng.abs() <= 180.0
    }
}

/// External map links.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapLinks {
    pub google: Option<String>,
    pub openstreetmap: Option<String>,
}

/// A normalized country record.
///
/// Every sequence and mapping is present (possibly empty) so that
/// consumers never have to branch on the shape the record came from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Three-letter identifier (cca3), upper case.
    pub code: String,
    pub name: CountryName,
    pub capital: Vec<String>,
    pub region: String,
    pub subregion: Option<String>,
    pub population: Option<u64>,
    pub area: Option<f64>,
    pub flag: Flag,
    pub borders: Vec<String>,
    /// language code -> language name
    pub languages: BTreeMap<String, String>,
    /// currency code -> currency
    pub currencies: BTreeMap<String, Currency>,
    pub timezones: Vec<String>,
    pub coordinates: Option<Coordinates>,
    pub maps: MapLinks,
}

impl Country {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name.common
    }

    pub fn official_name(&self) -> &str {
        &self.name.official
    }

    /// First capital entry, if any.
    pub fn capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn subregion(&self) -> Option<&str> {
        self.subregion.as_deref()
    }

    pub fn population(&self) -> Option<u64> {
        self.population
    }

    pub fn area(&self) -> Option<f64> {
        self.area
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        self.name()
    }

    fn alt_names(&self) -> Vec<&str> {
        vec![self.name.official.as_str()]
    }
}

/// The in-memory dataset, in the order the source delivered it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Collection {
    countries: Vec<Country>,
    /// code -> position, built on first lookup.
    #[serde(skip)]
    index: OnceCell<HashMap<String, usize>>,
}

impl Collection {
    pub fn new(countries: Vec<Country>) -> Self {
        Collection {
            countries,
            index: OnceCell::new(),
        }
    }

    /// All countries in source order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    fn index(&self) -> &HashMap<String, usize> {
        self.index.get_or_init(|| {
            self.countries
                .iter()
                .enumerate()
                .map(|(i, c)| (c.code.clone(), i))
                .collect()
        })
    }

    /// Find a country by its three-letter code, case-insensitive (e.g. "DEU", "deu").
    pub fn find_by_code(&self, code: &str) -> Option<&Country> {
        let code = code.trim().to_ascii_uppercase();
        self.index().get(&code).map(|&i| &self.countries[i])
    }

    /// Find a country by code first, then by exact (folded) common or official name.
    pub fn find(&self, query: &str) -> Option<&Country> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.find_by_code(query)
            .or_else(|| self.countries.iter().find(|c| c.is_named(query)))
    }

    /// Common name for a code, if the code belongs to this collection.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.find_by_code(code).map(Country::name)
    }

    /// Distinct, non-empty regions in lexicographic order.
    pub fn regions(&self) -> Vec<&str> {
        self.countries
            .iter()
            .map(Country::region)
            .filter(|r| !r.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Aggregate statistics for the collection.
    pub fn stats(&self) -> Stats {
        Stats {
            countries: self.countries.len(),
            regions: self.regions().len(),
            population: self
                .countries
                .iter()
                .filter_map(|c| c.population)
                .fold(0u64, |acc, p| acc.saturating_add(p)),
            favorites: 0,
        }
    }
}

impl From<Vec<Country>> for Collection {
    fn from(countries: Vec<Country>) -> Self {
        Collection::new(countries)
    }
}
