// crates/atlas-core/src/loader/mod.rs

//! # Data Loader
//!
//! Fetches the country dataset and hands it to [`crate::convert`] for
//! normalization.
//!
//! - The **primary** endpoint (`/v3.1/all`) is requested with an explicit
//!   field projection. The upstream API caps a projection at ten fields, so the
//!   [`FieldStrategy::Merged`] strategy issues a **secondary** request for the
//!   remaining fields and merges it by identifier.
//! - If the primary request fails, the legacy **fallback** endpoint (`/v2/all`)
//!   is tried exactly once. There is no further retry and no backoff.
//!
//! The HTTP layer sits behind the [`Transport`] trait so the same logic runs
//! against `reqwest` on native targets, against responses fetched by the
//! browser in the wasm build, and against scripted responses in tests.

use crate::convert::{merge_supplement, normalize};
use crate::error::{LoadError, TransportError};
use crate::model::Country;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

mod common_io;
#[cfg(feature = "fetch")]
mod http;

#[cfg(feature = "fetch")]
pub use http::HttpTransport;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com";
pub const DEFAULT_PRIMARY_PATH: &str = "/v3.1/all";
pub const DEFAULT_FALLBACK_PATH: &str = "/v2/all";

/// Projection of the single-request strategy.
pub const SINGLE_FIELDS: &str =
    "cca3,name,capital,region,subregion,population,area,flags,borders,languages";
/// Projection of the primary request of the merged strategy.
pub const MERGED_PRIMARY_FIELDS: &str =
    "cca3,name,capital,region,subregion,population,flags,borders,languages,currencies";
/// Projection of the secondary request of the merged strategy.
pub const MERGED_SECONDARY_FIELDS: &str = "cca3,area,timezones,latlng,maps";
/// Projection of the legacy fallback request.
pub const FALLBACK_FIELDS: &str = "alpha3Code,name,nativeName,capital,region,subregion,population,area,flags,borders,languages,currencies,timezones,latlng";

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// Which fields are requested up front, and whether a second request fills the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStrategy {
    /// One request; currencies, timezones, coordinates and map links stay empty.
    Single,
    /// Primary request plus a secondary request merged by identifier.
    #[default]
    Merged,
}

impl FromStr for FieldStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(FieldStrategy::Single),
            "merged" => Ok(FieldStrategy::Merged),
            other => Err(format!("unknown field strategy '{other}' (expected single|merged)")),
        }
    }
}

impl fmt::Display for FieldStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldStrategy::Single => "single",
            FieldStrategy::Merged => "merged",
        })
    }
}

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub base_url: String,
    pub primary_path: String,
    pub fallback_path: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            base_url: DEFAULT_BASE_URL.to_string(),
            primary_path: DEFAULT_PRIMARY_PATH.to_string(),
            fallback_path: DEFAULT_FALLBACK_PATH.to_string(),
        }
    }
}

impl Endpoints {
    fn url(&self, path: &str, fields: &str) -> String {
        format!(
            "{}/{}?fields={}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/'),
            fields
        )
    }
}

// -----------------------------------------------------------------------------
// TRANSPORT
// -----------------------------------------------------------------------------

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Response {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal blocking GET.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<Response, TransportError> {
        (**self).get(url)
    }
}

/// A transport answering from responses gathered beforehand.
///
/// The wasm build routes the bodies fetched by the browser through this, and
/// tests script outages with it. Unrouted URLs behave like an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    routes: HashMap<String, Response>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `response`.
    pub fn route(mut self, url: impl Into<String>, response: Response) -> Self {
        self.routes.insert(url.into(), response);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, response: Response) {
        self.routes.insert(url.into(), response);
    }
}

impl Transport for MemoryTransport {
    fn get(&self, url: &str) -> Result<Response, TransportError> {
        self.routes.get(url).cloned().ok_or_else(|| TransportError {
            url: url.to_string(),
            message: "host unreachable".to_string(),
        })
    }
}

// -----------------------------------------------------------------------------
// LOADER
// -----------------------------------------------------------------------------

/// Best-effort single-shot loader with one alternate source.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    endpoints: Endpoints,
    strategy: FieldStrategy,
}

impl Loader {
    pub fn new(endpoints: Endpoints, strategy: FieldStrategy) -> Self {
        Loader {
            endpoints,
            strategy,
        }
    }

    pub fn strategy(&self) -> FieldStrategy {
        self.strategy
    }

    pub fn primary_url(&self) -> String {
        let fields = match self.strategy {
            FieldStrategy::Single => SINGLE_FIELDS,
            FieldStrategy::Merged => MERGED_PRIMARY_FIELDS,
        };
        self.endpoints.url(&self.endpoints.primary_path, fields)
    }

    /// Only the merged strategy issues a secondary request.
    pub fn secondary_url(&self) -> Option<String> {
        match self.strategy {
            FieldStrategy::Single => None,
            FieldStrategy::Merged => Some(
                self.endpoints
                    .url(&self.endpoints.primary_path, MERGED_SECONDARY_FIELDS),
            ),
        }
    }

    pub fn fallback_url(&self) -> String {
        self.endpoints
            .url(&self.endpoints.fallback_path, FALLBACK_FIELDS)
    }

    /// Load and normalize the dataset.
    ///
    /// Order of requests: primary, then (on success) the optional secondary, or
    /// (on failure) the fallback. When the fallback fails too, its error is the
    /// one returned; the primary error has been logged.
    pub fn load<T: Transport + ?Sized>(&self, transport: &T) -> Result<Vec<Country>, LoadError> {
        let primary_url = self.primary_url();

        let countries = match self.fetch_countries(transport, &primary_url) {
            Ok(mut countries) => {
                if let Some(url) = self.secondary_url() {
                    self.merge_secondary(transport, &url, &mut countries);
                }
                countries
            }
            Err(primary_err) => {
                warn!(url = %primary_url, error = %primary_err, "primary endpoint failed, trying fallback");
                let fallback_url = self.fallback_url();
                self.fetch_countries(transport, &fallback_url)
                    .inspect_err(|e| warn!(url = %fallback_url, error = %e, "fallback endpoint failed"))?
            }
        };

        info!(count = countries.len(), "country dataset loaded");
        Ok(countries)
    }

    /// Read a local snapshot (either record shape; `.gz` with the `compact` feature).
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<Country>, LoadError> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let payload: serde_json::Value =
            serde_json::from_reader(reader).map_err(|e| LoadError::Snapshot {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let countries = normalize(payload)?;
        info!(path = %path.display(), count = countries.len(), "country snapshot loaded");
        Ok(countries)
    }

    // --- Internal Helpers ---

    fn fetch_json<T: Transport + ?Sized>(
        &self,
        transport: &T,
        url: &str,
    ) -> Result<serde_json::Value, LoadError> {
        debug!(url, "GET");
        let response = transport.get(url)?;
        if !response.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| LoadError::Payload {
            message: e.to_string(),
        })
    }

    fn fetch_countries<T: Transport + ?Sized>(
        &self,
        transport: &T,
        url: &str,
    ) -> Result<Vec<Country>, LoadError> {
        normalize(self.fetch_json(transport, url)?)
    }

    /// The secondary request only enriches; its failure keeps the primary records.
    fn merge_secondary<T: Transport + ?Sized>(
        &self,
        transport: &T,
        url: &str,
        countries: &mut [Country],
    ) {
        let result = self
            .fetch_json(transport, url)
            .and_then(|payload| merge_supplement(countries, payload));
        if let Err(e) = result {
            warn!(url, error = %e, "secondary request failed, keeping primary fields only");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v3_body() -> String {
        json!([
            { "cca3": "DEU", "name": { "common": "Germany", "official": "Federal Republic of Germany" },
              "capital": ["Berlin"], "region": "Europe", "population": 83240525 },
            { "cca3": "FRA", "name": { "common": "France", "official": "French Republic" },
              "capital": ["Paris"], "region": "Europe", "population": 67391582 }
        ])
        .to_string()
    }

    fn v2_body() -> String {
        json!([
            { "alpha3Code": "DEU", "name": "Germany", "capital": "Berlin", "region": "Europe" }
        ])
        .to_string()
    }

    fn supplement_body() -> String {
        json!([{ "cca3": "DEU", "area": 357114.0, "timezones": ["UTC+01:00"], "latlng": [51.0, 9.0] }])
            .to_string()
    }

    #[test]
    fn urls_carry_projections() {
        let loader = Loader::default();
        assert_eq!(
            loader.primary_url(),
            format!("https://restcountries.com/v3.1/all?fields={MERGED_PRIMARY_FIELDS}")
        );
        assert!(loader.secondary_url().is_some());
        assert!(loader.fallback_url().starts_with("https://restcountries.com/v2/all?fields=alpha3Code"));

        let single = Loader::new(Endpoints::default(), FieldStrategy::Single);
        assert!(single.secondary_url().is_none());
        assert!(single.primary_url().ends_with(SINGLE_FIELDS));
    }

    #[test]
    fn projections_respect_the_field_cap() {
        for fields in [SINGLE_FIELDS, MERGED_PRIMARY_FIELDS, MERGED_SECONDARY_FIELDS] {
            assert!(fields.split(',').count() <= 10, "{fields}");
        }
    }

    #[test]
    fn merged_strategy_enriches_primary_records() {
        let loader = Loader::default();
        let transport = MemoryTransport::new()
            .route(loader.primary_url(), Response::ok(v3_body()))
            .route(loader.secondary_url().unwrap(), Response::ok(supplement_body()));

        let countries = loader.load(&transport).unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].area, Some(357114.0));
        assert_eq!(countries[1].area, None);
    }

    #[test]
    fn secondary_failure_is_tolerated() {
        let loader = Loader::default();
        let transport = MemoryTransport::new()
            .route(loader.primary_url(), Response::ok(v3_body()))
            .route(
                loader.secondary_url().unwrap(),
                Response {
                    status: 500,
                    body: String::new(),
                },
            );
        let countries = loader.load(&transport).unwrap();
        assert_eq!(countries.len(), 2);
        assert!(countries[0].timezones.is_empty());
    }

    #[test]
    fn primary_status_failure_uses_fallback() {
        let loader = Loader::default();
        let transport = MemoryTransport::new()
            .route(
                loader.primary_url(),
                Response {
                    status: 502,
                    body: "Bad Gateway".into(),
                },
            )
            .route(loader.fallback_url(), Response::ok(v2_body()));

        let countries = loader.load(&transport).unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].capital, vec!["Berlin".to_string()]);
    }

    #[test]
    fn non_array_primary_uses_fallback() {
        let loader = Loader::new(Endpoints::default(), FieldStrategy::Single);
        let transport = MemoryTransport::new()
            .route(loader.primary_url(), Response::ok(r#"{"message":"too many fields"}"#))
            .route(loader.fallback_url(), Response::ok(v2_body()));
        assert_eq!(loader.load(&transport).unwrap().len(), 1);
    }

    #[test]
    fn both_failing_reports_the_fallback_error() {
        let loader = Loader::default();
        let transport = MemoryTransport::new().route(
            loader.primary_url(),
            Response {
                status: 503,
                body: String::new(),
            },
        );
        let err = loader.load(&transport).unwrap_err();
        assert!(err.is_connectivity(), "{err:?}");
    }

    #[test]
    fn field_strategy_parses() {
        assert_eq!("Merged".parse::<FieldStrategy>(), Ok(FieldStrategy::Merged));
        assert_eq!("single".parse::<FieldStrategy>(), Ok(FieldStrategy::Single));
        assert!("both".parse::<FieldStrategy>().is_err());
    }
}
