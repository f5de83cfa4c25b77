// crates/atlas-core/src/render/html.rs

//! HTML markup for the browser front-end.
//!
//! Every interpolated value goes through [`escape`]. Interactive elements
//! carry `data-action` (and `data-code` / `data-page`) attributes; the page
//! script maps clicks on them to explorer commands.

use super::{BorderDisplay, CardView, DetailView, PageView, DETAIL_FAILURE_MESSAGE, NOT_AVAILABLE};
use crate::error::{LoadError, RenderError};
use crate::model::Collection;
use std::fmt::Write;
use tracing::warn;

/// Shown in place of the grid when no record passes the filter.
pub const EMPTY_GRID_MESSAGE: &str = "No countries match your search.";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn favorite_button(code: &str, favorite: bool) -> String {
    let (class, label, glyph) = if favorite {
        ("fav-btn active", "Remove from favorites", "★")
    } else {
        ("fav-btn", "Add to favorites", "☆")
    };
    format!(
        r#"<button class="{class}" data-action="toggle-favorite" data-code="{code}" aria-pressed="{favorite}" aria-label="{label}">{glyph}</button>"#,
        code = escape(code),
    )
}

fn flag_image(card: &CardView) -> String {
    match &card.flag {
        Some(url) => format!(
            r#"<img class="flag" src="{}" alt="{}" loading="lazy">"#,
            escape(url),
            escape(&card.flag_alt)
        ),
        None => format!(r#"<div class="flag flag-missing">{NOT_AVAILABLE}</div>"#),
    }
}

/// A single grid card. Also used to redraw one card after a favorite toggle.
pub fn render_card(card: &CardView) -> String {
    format!(
        concat!(
            r#"<article class="card" data-code="{code}">"#,
            r#"{flag}"#,
            r#"<div class="card-body">"#,
            r##"<h3 class="card-title"><a href="#" data-action="open-detail" data-code="{code}">{name}</a></h3>"##,
            r#"<p><strong>Capital:</strong> {capital}</p>"#,
            r#"<p><strong>Region:</strong> {region}</p>"#,
            r#"<p><strong>Population:</strong> {population}</p>"#,
            r#"</div>"#,
            r#"{fav}"#,
            r#"</article>"#
        ),
        code = escape(&card.code),
        flag = flag_image(card),
        name = escape(&card.name),
        capital = escape(&card.capital),
        region = escape(&card.region),
        population = escape(&card.population),
        fav = favorite_button(&card.code, card.favorite),
    )
}

/// The card grid for the current page.
pub fn render_grid(page: &PageView) -> String {
    if page.items.is_empty() {
        return format!(r#"<p class="empty">{EMPTY_GRID_MESSAGE}</p>"#);
    }
    let mut out = String::from(r#"<div class="grid">"#);
    for card in &page.items {
        out.push_str(&render_card(card));
    }
    out.push_str("</div>");
    out
}

/// Previous / numbered / next buttons. Empty when everything fits on one page.
pub fn render_pagination(page: &PageView) -> String {
    if page.page_count <= 1 {
        return String::new();
    }
    let mut out = String::from(r#"<nav class="pagination" aria-label="Pages">"#);
    let nav = |out: &mut String, label: &str, target: usize, disabled: bool| {
        out.push_str(&format!(
            r#"<button class="page-nav" data-action="go-to-page" data-page="{target}"{}>{label}</button>"#,
            if disabled { " disabled" } else { "" }
        ));
    };

    nav(&mut out, "Previous", page.page.saturating_sub(1).max(1), page.page <= 1);
    for &n in &page.window {
        let current = n == page.page;
        out.push_str(&format!(
            r#"<button class="page-btn{}" data-action="go-to-page" data-page="{n}"{}>{n}</button>"#,
            if current { " active" } else { "" },
            if current { r#" aria-current="page""# } else { "" },
        ));
    }
    nav(
        &mut out,
        "Next",
        (page.page + 1).min(page.page_count),
        page.page >= page.page_count,
    );
    out.push_str("</nav>");
    out
}

fn field(out: &mut String, label: &str, value: &str) -> std::fmt::Result {
    write!(
        out,
        r#"<div class="field"><dt>{}</dt><dd>{}</dd></div>"#,
        escape(label),
        escape(value)
    )
}

/// The detail modal content.
pub fn render_detail(view: &DetailView) -> Result<String, RenderError> {
    let card = &view.card;
    let mut out = String::new();

    write!(
        out,
        r#"<div class="modal-content" role="dialog" aria-modal="true" aria-labelledby="detail-title">"#
    )?;
    write!(
        out,
        r#"<button class="modal-close" data-action="close-detail" aria-label="Close">×</button>"#
    )?;
    write!(out, r#"<header>{}"#, flag_image(card))?;
    write!(
        out,
        r#"<h2 id="detail-title">{}</h2><p class="official">{}</p>{}</header>"#,
        escape(&card.name),
        escape(&view.official_name),
        favorite_button(&card.code, card.favorite)
    )?;

    out.push_str("<dl>");
    field(&mut out, "Native name", &view.native_names)?;
    field(&mut out, "Capital", &card.capital)?;
    field(&mut out, "Region", &card.region)?;
    field(&mut out, "Subregion", &view.subregion)?;
    field(&mut out, "Population", &card.population)?;
    field(&mut out, "Area", &view.area)?;
    field(&mut out, "Languages", &view.languages)?;
    field(&mut out, "Currencies", &view.currencies)?;
    field(&mut out, "Timezones", &view.timezones)?;
    field(&mut out, "Borders", &view.neighbors)?;
    field(&mut out, "Coordinates", &view.coordinates)?;
    out.push_str("</dl>");

    match &view.map_embed {
        Some(src) => write!(
            out,
            r#"<iframe class="map" title="Map of {}" src="{}" loading="lazy"></iframe>"#,
            escape(&card.name),
            escape(src)
        )?,
        None => write!(out, r#"<p class="map map-missing">Map: {NOT_AVAILABLE}</p>"#)?,
    }

    let links: Vec<(&str, &String)> = [
        ("Google Maps", view.google_maps.as_ref()),
        ("OpenStreetMap", view.openstreetmap.as_ref()),
    ]
    .into_iter()
    .filter_map(|(label, url)| url.map(|u| (label, u)))
    .collect();
    if !links.is_empty() {
        out.push_str(r#"<p class="map-links">"#);
        for (label, url) in links {
            write!(
                out,
                r#"<a href="{}" target="_blank" rel="noopener">{label}</a> "#,
                escape(url)
            )?;
        }
        out.push_str("</p>");
    }

    out.push_str("</div>");
    Ok(out)
}

/// Generic panel used when the detail view fails.
pub fn render_detail_failure() -> String {
    format!(
        concat!(
            r#"<div class="modal-content error" role="dialog" aria-modal="true">"#,
            r#"<button class="modal-close" data-action="close-detail" aria-label="Close">×</button>"#,
            r#"<p>{}</p>"#,
            r#"</div>"#
        ),
        DETAIL_FAILURE_MESSAGE
    )
}

/// Detail markup for `code`, or the failure panel if anything goes wrong.
pub fn detail_panel(
    collection: &Collection,
    code: &str,
    favorite: bool,
    borders: BorderDisplay,
) -> String {
    let built = collection
        .find_by_code(code)
        .ok_or_else(|| RenderError::UnknownCountry(code.to_string()))
        .and_then(|country| DetailView::build(country, collection, favorite, borders))
        .and_then(|view| render_detail(&view));
    match built {
        Ok(html) => html,
        Err(e) => {
            warn!(code, error = %e, "detail view failed");
            render_detail_failure()
        }
    }
}

/// Replaces the grid when the dataset could not be loaded.
pub fn render_error_panel(err: &LoadError) -> String {
    format!(
        concat!(
            r#"<div class="error-panel" role="alert">"#,
            r#"<p>{}</p>"#,
            r#"<button class="retry" data-action="retry">Try again</button>"#,
            r#"</div>"#
        ),
        escape(err.user_message())
    )
}
