// crates/atlas-core/src/lib.rs

pub mod app; // Explorer state + command dispatch
pub mod common;
pub mod config;
pub mod convert; // raw -> model normalization
pub mod error;
pub mod favorites;
pub mod loader; // network + snapshot loading
pub mod model;
pub mod pipeline; // search / filter / sort / paginate
pub mod render;
pub mod store;
pub mod text;
pub mod traits;
// Wire shapes, shared by the loader and the converter
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::app::{CloseReason, Command, Explorer, LoadState, Redraw, ViewState};
pub use crate::common::Stats;
pub use crate::config::AtlasConfig;
pub use crate::error::{AtlasError, LoadError, RenderError, Result, StoreError, TransportError};
pub use crate::favorites::Favorites;
pub use crate::loader::{FieldStrategy, Loader, MemoryTransport, Response, Transport};
pub use crate::model::{Collection, Country};
pub use crate::pipeline::SortKey;
pub use crate::render::BorderDisplay;
pub use crate::store::{KeyValueStore, MemoryStore};

#[cfg(feature = "fetch")]
pub use crate::loader::HttpTransport;
pub use crate::store::FileStore;

/// Everything a front-end usually needs.
pub mod prelude {
    pub use crate::app::{CloseReason, Command, Explorer, LoadState, Redraw};
    pub use crate::config::AtlasConfig;
    pub use crate::error::{AtlasError, Result};
    pub use crate::loader::{Loader, Transport};
    pub use crate::model::{Collection, Country};
    pub use crate::pipeline::SortKey;
    pub use crate::render::BorderDisplay;
    pub use crate::store::KeyValueStore;
    pub use crate::traits::NameMatch;
}
