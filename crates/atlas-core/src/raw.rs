// crates/atlas-core/src/raw.rs

//! Raw record shapes as they come from restcountries.com.
//!
//! NOTE: These types mirror the external API and are only used on the way in.
//! The rest of the crate works with [`crate::model::Country`].

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Field that only exists in the legacy (v2) shape.
pub const LEGACY_ID_FIELD: &str = "alpha3Code";

/// Treat an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

// -----------------------------------------------------------------------------
// CANONICAL SHAPE (v3.1)
// -----------------------------------------------------------------------------

/// A record from `/v3.1/all`.
#[derive(Debug, Deserialize)]
pub struct CountryRaw {
    pub cca3: String,
    pub name: NameRaw,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: FlagsRaw,
    #[serde(default, deserialize_with = "null_as_default")]
    pub borders: Vec<String>,
    /// languages: { "deu": "German", ... }
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: BTreeMap<String, String>,
    /// currencies: { "EUR": { "name": "Euro", "symbol": "€" } }
    #[serde(default, deserialize_with = "null_as_default")]
    pub currencies: BTreeMap<String, CurrencyRaw>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezones: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latlng: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maps: MapsRaw,
}

#[derive(Debug, Deserialize)]
pub struct NameRaw {
    pub common: String,
    #[serde(default)]
    pub official: Option<String>,
    #[serde(rename = "nativeName", default, deserialize_with = "null_as_default")]
    pub native_name: BTreeMap<String, NativeNameRaw>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NativeNameRaw {
    #[serde(default)]
    pub official: Option<String>,
    #[serde(default)]
    pub common: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrencyRaw {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlagsRaw {
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapsRaw {
    #[serde(rename = "googleMaps", default)]
    pub google_maps: Option<String>,
    #[serde(rename = "openStreetMaps", default)]
    pub open_street_maps: Option<String>,
}

/// The fields fetched by the secondary request of the merged strategy.
#[derive(Debug, Deserialize)]
pub struct SupplementRaw {
    pub cca3: String,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezones: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latlng: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maps: MapsRaw,
}

// -----------------------------------------------------------------------------
// LEGACY SHAPE (v2)
// -----------------------------------------------------------------------------

/// A record from `/v2/all`.
#[derive(Debug, Deserialize)]
pub struct LegacyCountryRaw {
    #[serde(rename = "alpha3Code")]
    pub alpha3_code: String,
    pub name: String,
    #[serde(rename = "nativeName", default)]
    pub native_name: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub area: Option<f64>,
    /// Older payloads carry the SVG url here instead of in `flags`.
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: FlagsRaw,
    #[serde(default, deserialize_with = "null_as_default")]
    pub borders: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<LegacyLanguageRaw>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currencies: Vec<LegacyCurrencyRaw>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezones: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latlng: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyLanguageRaw {
    #[serde(default)]
    pub iso639_1: Option<String>,
    #[serde(default)]
    pub iso639_2: Option<String>,
    pub name: String,
    #[serde(rename = "nativeName", default)]
    pub native_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyCurrencyRaw {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}
