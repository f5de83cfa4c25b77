use wasm_bindgen_test::*;

// Import the wasm API from this crate
use atlas_wasm::Explorer;

const PRIMARY: &str = r#"[
  {"cca3":"DEU","name":{"common":"Germany","official":"Federal Republic of Germany"},
   "capital":["Berlin"],"region":"Europe","population":83240525,"borders":["FRA"]},
  {"cca3":"FRA","name":{"common":"France","official":"French Republic"},
   "capital":["Paris"],"region":"Europe","population":67391582,"borders":["DEU"]},
  {"cca3":"JPN","name":{"common":"Japan","official":"Japan"},
   "capital":["Tokyo"],"region":"Asia","population":125836021}
]"#;

const LEGACY: &str = r#"[
  {"alpha3Code":"BRA","name":"Brazil","capital":"Brasília","region":"Americas","population":212559409}
]"#;

fn loaded() -> Explorer {
    let mut explorer = Explorer::new(Some("atlas-smoke".into()), Some(2)).unwrap();
    assert_eq!(explorer.load_json(Some(PRIMARY.into()), None), "grid");
    explorer
}

#[wasm_bindgen_test]
fn loads_and_paginates() {
    #[cfg(target_arch = "wasm32")]
    atlas_wasm::start();

    let explorer = loaded();
    assert_eq!(explorer.load_state(), "ready");
    assert_eq!(explorer.country_count(), 3);

    let grid = explorer.grid_html();
    assert_eq!(grid.matches(r#"<article class="card""#).count(), 2);
    assert_eq!(explorer.pagination_html().matches(r#"class="page-btn"#).count(), 2);
}

#[wasm_bindgen_test]
fn commands_report_redraws() {
    let mut explorer = loaded();
    assert_eq!(explorer.set_search("tokyo".into()), "grid");
    assert!(explorer.grid_html().contains("Japan"));
    assert_eq!(explorer.set_sort("pop-high").unwrap(), "grid");
    assert_eq!(explorer.set_search(String::new()), "grid");
    assert_eq!(explorer.next_page(), "grid");
    assert_eq!(explorer.next_page(), "nothing");

    let toggled = explorer.toggle_favorite("fra".into());
    assert_eq!(toggled, "card:FRA");
    assert!(explorer.is_favorite("FRA"));
    explorer.toggle_favorite("FRA".into());
}

#[wasm_bindgen_test]
fn detail_resolves_neighbors() {
    let mut explorer = loaded();
    assert_eq!(explorer.open_detail("deu".into()), "detail");
    let html = explorer.open_detail_html().unwrap();
    assert!(html.contains("France (1)"));
    assert_eq!(explorer.close_detail("escape"), "detail");
    assert!(explorer.open_detail_html().is_none());
    assert!(explorer.detail_html("XXX").contains("could not be displayed"));
}

#[wasm_bindgen_test]
fn falls_back_to_legacy_payload() {
    let mut explorer = Explorer::new(None, None).unwrap();
    explorer.load_json(None, Some(LEGACY.into()));
    assert_eq!(explorer.load_state(), "ready");
    assert!(explorer.grid_html().contains("Brazil"));
}

#[wasm_bindgen_test]
fn total_failure_shows_retry_panel() {
    let mut explorer = Explorer::new(None, None).unwrap();
    explorer.load_json(None, None);
    assert_eq!(explorer.load_state(), "failed");
    assert!(explorer.grid_html().contains(r#"data-action="retry""#));
    assert!(explorer.error_message().unwrap().contains("internet connection"));
}
