// crates/atlas-core/src/render/mod.rs

//! # Renderer
//!
//! Projects records into display form in two steps:
//!
//! 1. [`view`] builds serializable view models ([`CardView`], [`DetailView`],
//!    [`PageView`]) where every optional field is already resolved to text or
//!    the [`NOT_AVAILABLE`] placeholder.
//! 2. [`html`] (browser) and [`text`] (terminal) turn view models into output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod html;
pub mod text;
pub mod view;

pub use view::{CardView, DetailView, PageView};

/// Placeholder for any field the record does not carry.
pub const NOT_AVAILABLE: &str = "Not available";

/// Shown in place of the detail view when it cannot be built.
pub const DETAIL_FAILURE_MESSAGE: &str = "Sorry, the details for this country could not be displayed.";

/// Most page buttons the navigation control shows at once.
pub const PAGE_WINDOW: usize = 7;

/// How neighboring countries are listed in the detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderDisplay {
    /// Raw identifiers: `AUT, BEL`.
    Codes,
    /// Common names where resolvable, with a count suffix: `Austria, Belgium (2)`.
    #[default]
    Names,
}

impl FromStr for BorderDisplay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "codes" => Ok(BorderDisplay::Codes),
            "names" => Ok(BorderDisplay::Names),
            other => Err(format!("unknown border display '{other}' (expected codes|names)")),
        }
    }
}

impl fmt::Display for BorderDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BorderDisplay::Codes => "codes",
            BorderDisplay::Names => "names",
        })
    }
}
