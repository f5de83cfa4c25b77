//! atlas-wasm: WebAssembly bindings for atlas-core
//!
//! This crate exposes the country explorer to a browser page. The page does
//! the fetching (the browser owns the network); the module owns everything
//! else: normalization, search/sort/paginate, favorites and markup.
//!
//! What it provides
//! ----------------
//! - Automatic panic hook installation on module load (via `#[wasm_bindgen(start)]`)
//! - An `Explorer` class:
//!   - loading: `urls()`, `load_responses([...])`, `load_json(primary, fallback?)`
//!   - commands: `set_search`, `set_sort`, `set_favorites_only`,
//!     `toggle_favorite`, `go_to_page`, `next_page`, `previous_page`,
//!     `open_detail`, `close_detail`
//!   - views: `page()` (JSON), `grid_html()`, `pagination_html()`,
//!     `detail_html(code)`, `open_detail_html()`, `stats()`
//! - Favorites persisted in `window.localStorage`
//!
//! Every command returns what needs redrawing: `"nothing"`, `"grid"`,
//! `"detail"` or `"card:<CODE>"`.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { Explorer } from 'atlas-wasm';
//!
//! async function main() {
//!   await init();
//!   const explorer = new Explorer("atlas", null);
//!   const urls = explorer.urls();
//!   const fetched = [];
//!   for (const url of [urls.primary, urls.secondary, urls.fallback].filter(Boolean)) {
//!     try {
//!       const r = await fetch(url);
//!       fetched.push({ url, status: r.status, body: await r.text() });
//!     } catch (_) { /* unreachable: leave it out */ }
//!   }
//!   explorer.load_responses(fetched);
//!   document.querySelector('#grid').innerHTML = explorer.grid_html();
//!   document.querySelector('#pages').innerHTML = explorer.pagination_html();
//! }
//! main();
//! ```
use atlas_core::app::{CloseReason, Command, Explorer as CoreExplorer, LoadState, Redraw};
use atlas_core::error::StoreError;
use atlas_core::loader::{Loader, MemoryTransport, Response};
use atlas_core::pipeline::SortKey;
use atlas_core::render::html;
use atlas_core::store::{KeyValueStore, MemoryStore};
use atlas_core::AtlasConfig;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log("atlas-wasm ready");
}

fn console_log(_msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&_msg.into());
}

fn console_warn(_msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&_msg.into());
}

fn js_error(msg: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(msg.as_ref()).into()
}

/* --------------------------------------------------------------------------
   Storage
-------------------------------------------------------------------------- */

/// `window.localStorage`, with every key namespaced by `prefix`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    prefix: String,
}

impl LocalStorage {
    /// `None` outside a browser or when storage is disabled (private mode).
    pub fn open(prefix: &str) -> Option<Self> {
        Self::storage().ok()?;
        Some(LocalStorage {
            prefix: prefix.to_string(),
        })
    }

    fn key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{key}", self.prefix)
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn storage() -> Result<web_sys::Storage, StoreError> {
        Err(StoreError::Unavailable("not running in a browser".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(&self.key(key))
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Quota errors land here.
        Self::storage()?
            .set_item(&self.key(key), value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}

/// localStorage when the browser offers it, memory otherwise.
#[derive(Debug)]
pub enum BrowserStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open(prefix: &str) -> Self {
        match LocalStorage::open(prefix) {
            Some(local) => BrowserStore::Local(local),
            None => {
                console_warn("localStorage unavailable, favorites will not persist");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            BrowserStore::Local(s) => s.get(key),
            BrowserStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            BrowserStore::Local(s) => s.set(key, value),
            BrowserStore::Memory(s) => s.set(key, value),
        }
    }
}

/* --------------------------------------------------------------------------
   Explorer
-------------------------------------------------------------------------- */

#[derive(Serialize)]
struct Urls {
    primary: String,
    secondary: Option<String>,
    fallback: String,
}

fn redraw_name(redraw: Redraw) -> String {
    match redraw {
        Redraw::Nothing => "nothing".to_string(),
        Redraw::Grid => "grid".to_string(),
        Redraw::Detail => "detail".to_string(),
        Redraw::Card(code) => format!("card:{code}"),
    }
}

#[wasm_bindgen]
pub struct Explorer {
    inner: CoreExplorer<BrowserStore>,
    loader: Loader,
}

#[wasm_bindgen]
impl Explorer {
    /// `storage_key_prefix` namespaces the localStorage keys; `page_size`
    /// defaults to 20.
    #[wasm_bindgen(constructor)]
    pub fn new(storage_key_prefix: Option<String>, page_size: Option<usize>) -> Result<Explorer, JsValue> {
        let mut config = AtlasConfig::default();
        if let Some(n) = page_size {
            config.page_size = n;
        }
        config.validate().map_err(|e| js_error(e.to_string()))?;

        let store = BrowserStore::open(storage_key_prefix.as_deref().unwrap_or(""));
        Ok(Explorer {
            inner: CoreExplorer::from_config(&config, store),
            loader: config.loader(),
        })
    }

    /// The URLs the page should fetch: `{ primary, secondary?, fallback }`.
    pub fn urls(&self) -> Result<JsValue, JsValue> {
        let urls = Urls {
            primary: self.loader.primary_url(),
            secondary: self.loader.secondary_url(),
            fallback: self.loader.fallback_url(),
        };
        to_value(&urls).map_err(|e| js_error(e.to_string()))
    }

    /// Load from responses fetched by the page: `[{ url, status, body }]`.
    /// URLs that could not be reached are simply left out.
    pub fn load_responses(&mut self, responses: JsValue) -> Result<String, JsValue> {
        let fetched: Vec<(String, Response)> = from_value::<Vec<FetchedResponse>>(responses)
            .map_err(|e| js_error(e.to_string()))?
            .into_iter()
            .map(|r| {
                (
                    r.url,
                    Response {
                        status: r.status,
                        body: r.body,
                    },
                )
            })
            .collect();

        let mut transport = MemoryTransport::new();
        for (url, response) in fetched {
            transport.insert(url, response);
        }
        let redraw = self.inner.load_with(self.loader.clone(), &transport);
        self.log_load_state();
        Ok(redraw_name(redraw))
    }

    /// Load from raw bodies: the primary payload and optionally the legacy one.
    pub fn load_json(&mut self, primary: Option<String>, fallback: Option<String>) -> String {
        let mut transport = MemoryTransport::new();
        if let Some(body) = primary {
            transport.insert(self.loader.primary_url(), Response::ok(body));
        }
        if let Some(body) = fallback {
            transport.insert(self.loader.fallback_url(), Response::ok(body));
        }
        let redraw = self.inner.load_with(self.loader.clone(), &transport);
        self.log_load_state();
        redraw_name(redraw)
    }

    /// `"idle"`, `"ready"` or `"failed"`.
    pub fn load_state(&self) -> String {
        match self.inner.load_state() {
            LoadState::Idle => "idle",
            LoadState::Ready => "ready",
            LoadState::Failed(_) => "failed",
        }
        .to_string()
    }

    /// User-facing message when loading failed.
    pub fn error_message(&self) -> Option<String> {
        match self.inner.load_state() {
            LoadState::Failed(e) => Some(e.user_message().to_string()),
            _ => None,
        }
    }

    pub fn set_search(&mut self, text: String) -> String {
        redraw_name(self.inner.dispatch(Command::SetSearch(text)))
    }

    /// `a-z`, `z-a`, `continent`, `pop-high` or `pop-low`.
    pub fn set_sort(&mut self, key: &str) -> Result<String, JsValue> {
        let key: SortKey = key.parse().map_err(js_error)?;
        Ok(redraw_name(self.inner.dispatch(Command::SetSort(key))))
    }

    pub fn set_favorites_only(&mut self, on: bool) -> String {
        redraw_name(self.inner.dispatch(Command::SetFavoritesOnly(on)))
    }

    pub fn toggle_favorite(&mut self, code: String) -> String {
        redraw_name(self.inner.dispatch(Command::ToggleFavorite(code)))
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.inner.is_favorite(code)
    }

    pub fn go_to_page(&mut self, page: usize) -> String {
        redraw_name(self.inner.dispatch(Command::GoToPage(page)))
    }

    pub fn next_page(&mut self) -> String {
        redraw_name(self.inner.dispatch(Command::NextPage))
    }

    pub fn previous_page(&mut self) -> String {
        redraw_name(self.inner.dispatch(Command::PreviousPage))
    }

    pub fn open_detail(&mut self, code: String) -> String {
        redraw_name(self.inner.dispatch(Command::OpenDetail(code)))
    }

    /// `reason`: `"button"`, `"backdrop"` or `"escape"`.
    pub fn close_detail(&mut self, reason: &str) -> String {
        let reason = match reason {
            "backdrop" => CloseReason::Backdrop,
            "escape" | "esc" => CloseReason::Escape,
            _ => CloseReason::Button,
        };
        redraw_name(self.inner.dispatch(Command::CloseDetail(reason)))
    }

    /* ----------------------------- Views ---------------------------------- */

    /// The current page as `{ items, page, page_count, total, window }`.
    pub fn page(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.current_page()).map_err(|e| js_error(e.to_string()))
    }

    pub fn grid_html(&self) -> String {
        self.inner.grid_html()
    }

    pub fn pagination_html(&self) -> String {
        self.inner.pagination_html()
    }

    /// A single card, for redraws after `"card:<CODE>"`.
    pub fn card_html(&self, code: &str) -> Option<String> {
        self.inner.card(code).map(|card| html::render_card(&card))
    }

    /// Detail markup for any code; never fails (a failure panel replaces it).
    pub fn detail_html(&self, code: &str) -> String {
        html::detail_panel(
            self.inner.collection(),
            code,
            self.inner.is_favorite(code),
            self.inner.borders(),
        )
    }

    /// Markup of the detail view opened with `open_detail`, if any.
    pub fn open_detail_html(&self) -> Option<String> {
        self.inner.detail_html()
    }

    /// `{ countries, regions, population, favorites }`.
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.stats()).map_err(|e| js_error(e.to_string()))
    }

    pub fn country_count(&self) -> usize {
        self.inner.collection().len()
    }
}

impl Explorer {
    fn log_load_state(&self) {
        match self.inner.load_state() {
            LoadState::Failed(e) => console_warn(&format!("atlas: load failed: {e}")),
            _ => console_log(&format!("✓ Loaded {} countries", self.inner.collection().len())),
        }
    }
}

#[derive(serde::Deserialize)]
struct FetchedResponse {
    url: String,
    status: u16,
    #[serde(default)]
    body: String,
}
