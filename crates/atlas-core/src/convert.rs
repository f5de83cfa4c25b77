// crates/atlas-core/src/convert.rs

//! Normalization: raw payload items (either shape) -> [`Country`].

use crate::error::LoadError;
use crate::model::{Coordinates, Country, CountryName, Currency, Flag, MapLinks, NativeName};
use crate::raw::{CountryRaw, LegacyCountryRaw, MapsRaw, SupplementRaw, LEGACY_ID_FIELD};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn population(p: Option<i64>) -> Option<u64> {
    p.and_then(|p| u64::try_from(p).ok())
}

fn area(a: Option<f64>) -> Option<f64> {
    a.filter(|a| a.is_finite() && *a >= 0.0)
}

fn map_links(maps: MapsRaw) -> MapLinks {
    MapLinks {
        google: non_empty(maps.google_maps),
        openstreetmap: non_empty(maps.open_street_maps),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Unwrap the top-level array of a payload.
pub(crate) fn expect_array(payload: Value) -> Result<Vec<Value>, LoadError> {
    match payload {
        Value::Array(items) => Ok(items),
        other => Err(LoadError::Payload {
            message: format!("expected an array of records, got {}", json_kind(&other)),
        }),
    }
}

/// **Canonical Converter:** v3.1 record -> [`Country`].
pub fn from_raw(raw: CountryRaw) -> Country {
    let common = raw.name.common.trim().to_string();
    let official = non_empty(raw.name.official).unwrap_or_else(|| common.clone());

    let native = raw
        .name
        .native_name
        .into_iter()
        .filter_map(|(language, n)| {
            let common = non_empty(n.common);
            let official = non_empty(n.official);
            if common.is_none() && official.is_none() {
                return None;
            }
            Some(NativeName {
                language,
                common: common.clone().or_else(|| official.clone()).unwrap_or_default(),
                official: official.or(common).unwrap_or_default(),
            })
        })
        .collect();

    let currencies = raw
        .currencies
        .into_iter()
        .map(|(code, c)| {
            (
                code,
                Currency {
                    name: non_empty(c.name),
                    symbol: non_empty(c.symbol),
                },
            )
        })
        .collect();

    Country {
        code: normalize_code(&raw.cca3),
        name: CountryName {
            common,
            official,
            native,
        },
        capital: raw
            .capital
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .collect(),
        region: non_empty(raw.region).unwrap_or_default(),
        subregion: non_empty(raw.subregion),
        population: population(raw.population),
        area: area(raw.area),
        flag: Flag {
            png: non_empty(raw.flags.png),
            svg: non_empty(raw.flags.svg),
            alt: non_empty(raw.flags.alt),
        },
        borders: raw.borders.iter().map(|b| normalize_code(b)).collect(),
        languages: raw.languages,
        currencies,
        timezones: raw.timezones,
        coordinates: Coordinates::from_pair(&raw.latlng),
        maps: map_links(raw.maps),
    }
}

/// **Legacy Converter:** v2 record -> [`Country`].
///
/// The legacy shape carries one native name, a scalar capital, and lists of
/// objects for languages and currencies.
pub fn from_legacy(raw: LegacyCountryRaw) -> Country {
    let common = raw.name.trim().to_string();

    let mut languages = BTreeMap::new();
    for lang in raw.languages {
        let code = non_empty(lang.iso639_2)
            .or_else(|| non_empty(lang.iso639_1))
            .unwrap_or_else(|| lang.name.to_lowercase());
        languages.insert(code, lang.name);
    }

    let mut currencies = BTreeMap::new();
    for cur in raw.currencies {
        // Some legacy entries have no code at all ("(none)" currencies).
        if let Some(code) = non_empty(cur.code) {
            currencies.insert(
                code,
                Currency {
                    name: non_empty(cur.name),
                    symbol: non_empty(cur.symbol),
                },
            );
        }
    }

    let native = non_empty(raw.native_name)
        .map(|n| {
            vec![NativeName {
                language: languages.keys().next().cloned().unwrap_or_default(),
                common: n.clone(),
                official: n,
            }]
        })
        .unwrap_or_default();

    Country {
        code: normalize_code(&raw.alpha3_code),
        name: CountryName {
            official: common.clone(),
            common,
            native,
        },
        capital: non_empty(raw.capital).into_iter().collect(),
        region: non_empty(raw.region).unwrap_or_default(),
        subregion: non_empty(raw.subregion),
        population: population(raw.population),
        area: area(raw.area),
        flag: Flag {
            png: non_empty(raw.flags.png),
            svg: non_empty(raw.flags.svg).or_else(|| non_empty(raw.flag)),
            alt: None,
        },
        borders: raw.borders.iter().map(|b| normalize_code(b)).collect(),
        languages,
        currencies,
        timezones: raw.timezones,
        coordinates: Coordinates::from_pair(&raw.latlng),
        maps: MapLinks::default(),
    }
}

/// Normalize one payload item, detecting its shape by the legacy-only identifier.
pub fn normalize_item(item: Value) -> Result<Country, serde_json::Error> {
    if item.get(LEGACY_ID_FIELD).is_some() {
        serde_json::from_value::<LegacyCountryRaw>(item).map(from_legacy)
    } else {
        serde_json::from_value::<CountryRaw>(item).map(from_raw)
    }
}

/// Normalize a whole payload.
///
/// Fails only when the payload is not an array. Individual records that do not
/// deserialize, have no name or repeat an identifier are skipped with a warning.
pub fn normalize(payload: Value) -> Result<Vec<Country>, LoadError> {
    let items = expect_array(payload)?;
    let total = items.len();

    let mut seen = HashSet::with_capacity(total);
    let mut out = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        let country = match normalize_item(item) {
            Ok(c) => c,
            Err(e) => {
                warn!(index, error = %e, "skipping malformed country record");
                continue;
            }
        };
        if country.code.is_empty() || country.name.common.is_empty() {
            warn!(index, "skipping country record without code or name");
            continue;
        }
        if !seen.insert(country.code.clone()) {
            warn!(index, code = %country.code, "skipping duplicate country code");
            continue;
        }
        out.push(country);
    }

    debug!(total, kept = out.len(), "normalized country payload");
    Ok(out)
}

/// Merge the secondary payload (area, timezones, coordinates, maps) into
/// `countries` by identifier. Returns how many records were enriched.
pub fn merge_supplement(countries: &mut [Country], payload: Value) -> Result<usize, LoadError> {
    let items = expect_array(payload)?;

    let mut by_code: HashMap<String, SupplementRaw> = HashMap::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<SupplementRaw>(item) {
            Ok(s) => {
                by_code.insert(normalize_code(&s.cca3), s);
            }
            Err(e) => warn!(error = %e, "skipping malformed supplement record"),
        }
    }

    let mut merged = 0;
    for country in countries.iter_mut() {
        let Some(sup) = by_code.remove(&country.code) else {
            continue;
        };
        if let Some(a) = area(sup.area) {
            country.area = Some(a);
        }
        if !sup.timezones.is_empty() {
            country.timezones = sup.timezones;
        }
        if let Some(coords) = Coordinates::from_pair(&sup.latlng) {
            country.coordinates = Some(coords);
        }
        let maps = map_links(sup.maps);
        if maps.google.is_some() {
            country.maps.google = maps.google;
        }
        if maps.openstreetmap.is_some() {
            country.maps.openstreetmap = maps.openstreetmap;
        }
        merged += 1;
    }

    debug!(merged, "merged supplementary fields");
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn germany_v3() -> Value {
        json!({
            "cca3": "deu",
            "name": {
                "common": "Germany",
                "official": "Federal Republic of Germany",
                "nativeName": { "deu": { "official": "Bundesrepublik Deutschland", "common": "Deutschland" } }
            },
            "capital": ["Berlin"],
            "region": "Europe",
            "subregion": "Western Europe",
            "population": 83240525,
            "flags": { "png": "https://flagcdn.com/w320/de.png", "svg": "https://flagcdn.com/de.svg" },
            "borders": ["AUT", "BEL", "CZE", "DNK", "FRA", "LUX", "NLD", "POL", "CHE"],
            "languages": { "deu": "German" },
            "currencies": { "EUR": { "name": "Euro", "symbol": "€" } }
        })
    }

    fn germany_v2() -> Value {
        json!({
            "alpha3Code": "DEU",
            "name": "Germany",
            "nativeName": "Deutschland",
            "capital": "Berlin",
            "region": "Europe",
            "subregion": "Central Europe",
            "population": 83240525,
            "area": 357114.0,
            "flag": "https://flagcdn.com/de.svg",
            "borders": ["AUT", "BEL"],
            "languages": [{ "iso639_1": "de", "iso639_2": "deu", "name": "German", "nativeName": "Deutsch" }],
            "currencies": [{ "code": "EUR", "name": "Euro", "symbol": "€" }],
            "timezones": ["UTC+01:00"],
            "latlng": [51.0, 9.0]
        })
    }

    #[test]
    fn canonical_record_defaults_missing_fields() {
        let c = normalize_item(germany_v3()).unwrap();
        assert_eq!(c.code, "DEU");
        assert_eq!(c.name.native[0].common, "Deutschland");
        assert!(c.timezones.is_empty());
        assert!(c.coordinates.is_none());
        assert_eq!(c.area, None);
        assert_eq!(c.currencies["EUR"].symbol.as_deref(), Some("€"));
    }

    #[test]
    fn legacy_record_is_reshaped() {
        let c = normalize_item(germany_v2()).unwrap();
        assert_eq!(c.code, "DEU");
        assert_eq!(c.name.common, "Germany");
        assert_eq!(c.name.official, "Germany");
        assert_eq!(c.capital, vec!["Berlin".to_string()]);
        assert_eq!(c.languages.get("deu").map(String::as_str), Some("German"));
        assert_eq!(c.flag.url(), Some("https://flagcdn.com/de.svg"));
        assert_eq!(c.coordinates, Some(Coordinates { lat: 51.0, lng: 9.0 }));
        assert_eq!(c.name.native[0].language, "deu");
    }

    #[test]
    fn nulls_become_empty_sequences() {
        let c = normalize_item(json!({
            "cca3": "ATA",
            "name": { "common": "Antarctica", "official": "Antarctica", "nativeName": null },
            "capital": null,
            "region": "Antarctic",
            "borders": null,
            "languages": null,
            "currencies": null,
            "population": 1000
        }))
        .unwrap();
        assert!(c.capital.is_empty());
        assert!(c.borders.is_empty());
        assert!(c.languages.is_empty());
        assert!(c.currencies.is_empty());
    }

    #[test]
    fn negative_population_is_absent() {
        let mut v = germany_v3();
        v["population"] = json!(-5);
        assert_eq!(normalize_item(v).unwrap().population, None);
    }

    #[test]
    fn payload_must_be_an_array() {
        let err = normalize(json!({ "status": 404, "message": "Not Found" })).unwrap_err();
        assert!(matches!(err, LoadError::Payload { .. }));
    }

    #[test]
    fn malformed_and_duplicate_records_are_skipped() {
        let payload = json!([germany_v3(), germany_v2(), { "cca3": "XXX" }, 42]);
        let countries = normalize(payload).unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].name.official, "Federal Republic of Germany");
    }

    #[test]
    fn supplement_is_merged_by_code() {
        let mut countries = normalize(json!([germany_v3()])).unwrap();
        let merged = merge_supplement(
            &mut countries,
            json!([
                { "cca3": "DEU", "area": 357114.0, "timezones": ["UTC+01:00"], "latlng": [51.0, 9.0],
                  "maps": { "googleMaps": "https://goo.gl/maps/mD9FBMq1nvXUBrkv6", "openStreetMaps": "https://www.openstreetmap.org/relation/51477" } },
                { "cca3": "FRA", "area": 551695.0 }
            ]),
        )
        .unwrap();
        assert_eq!(merged, 1);
        let de = &countries[0];
        assert_eq!(de.area, Some(357114.0));
        assert_eq!(de.timezones, vec!["UTC+01:00".to_string()]);
        assert!(de.coordinates.is_some());
        assert!(de.maps.openstreetmap.is_some());
    }
}
