// crates/atlas-cli/src/browse.rs

//! The interactive `browse` session.
//!
//! Each input line becomes one [`Command`] for the explorer (or a session
//! action such as `retry` or `quit`); the returned [`Redraw`] decides what is
//! printed next.

use atlas_core::prelude::*;
use atlas_core::render::{text, DETAIL_FAILURE_MESSAGE};
use std::io::{self, BufRead, Write};
use tracing::warn;

pub const HELP: &str = "\
Commands:
  search <text>    filter by name, capital or region (empty clears)
  sort <key>       a-z | z-a | continent | pop-high | pop-low
  favs             toggle the favorites-only view
  fav <code>       add/remove a favorite
  next | prev      move between pages
  page <n>         jump to a page
  show <code>      open the details of a country (code or name)
  close | esc | backdrop
                   close the details
  retry            reload the dataset after a failure
  help             this text
  quit             leave
";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Retry,
    Help,
    Quit,
    /// Blank line: show the current page again.
    Refresh,
}

/// Parse a line typed at the prompt.
pub fn parse_line(line: &str) -> std::result::Result<Input, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let needs_arg = |what: &str| {
        if rest.is_empty() {
            Err(format!("`{word}` needs {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "" => Input::Refresh,
        "search" | "s" => Input::Command(Command::SetSearch(rest.to_string())),
        "sort" => Input::Command(Command::SetSort(needs_arg("a sort key")?.parse()?)),
        "favs" | "favorites" => Input::Command(Command::ToggleFavoritesOnly),
        "fav" => Input::Command(Command::ToggleFavorite(needs_arg("a country code")?)),
        "next" | "n" => Input::Command(Command::NextPage),
        "prev" | "p" => Input::Command(Command::PreviousPage),
        "page" => {
            let arg = needs_arg("a page number")?;
            let n = arg
                .parse::<usize>()
                .map_err(|_| format!("not a page number: {arg}"))?;
            Input::Command(Command::GoToPage(n))
        }
        "show" | "open" => Input::Command(Command::OpenDetail(needs_arg("a country code")?)),
        "close" => Input::Command(Command::CloseDetail(CloseReason::Button)),
        "esc" | "escape" => Input::Command(Command::CloseDetail(CloseReason::Escape)),
        "backdrop" => Input::Command(Command::CloseDetail(CloseReason::Backdrop)),
        "retry" => Input::Retry,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command `{other}` (type `help`)")),
    };
    Ok(input)
}

/// Let `show`/`fav` accept names as well as codes.
fn resolve_code<S: KeyValueStore>(explorer: &Explorer<S>, query: &str) -> String {
    explorer
        .collection()
        .find(query)
        .map(|c| c.code.clone())
        .unwrap_or_else(|| query.to_string())
}

/// The grid, or the error text when the dataset is unavailable.
pub fn page_text<S: KeyValueStore>(explorer: &Explorer<S>) -> String {
    match explorer.load_state() {
        LoadState::Failed(e) => text::render_error(e),
        LoadState::Idle => "Loading countries…\n".to_string(),
        LoadState::Ready => text::render_page(&explorer.current_page()),
    }
}

/// Details of `code`, or the generic failure message when they cannot be built.
pub fn country_text<S: KeyValueStore>(explorer: &Explorer<S>, code: &str) -> String {
    match explorer.detail_view(code) {
        Ok(view) => text::render_detail(&view),
        Err(e) => {
            warn!(code, error = %e, "detail view failed");
            format!("{DETAIL_FAILURE_MESSAGE}\n")
        }
    }
}

pub fn detail_text<S: KeyValueStore>(explorer: &Explorer<S>) -> String {
    match explorer.detail() {
        Some(code) => country_text(explorer, code),
        None => "(details closed)\n".to_string(),
    }
}

fn header<S: KeyValueStore>(explorer: &Explorer<S>) -> String {
    let view = explorer.view();
    format!(
        "search: {:?}  sort: {}  favorites only: {}\n",
        view.search,
        view.sort,
        if view.favorites_only { "yes" } else { "no" }
    )
}

/// Run the session until `quit` or end of input.
pub fn run<S, T, R, W>(
    explorer: &mut Explorer<S>,
    transport: &T,
    input: R,
    mut out: W,
) -> io::Result<()>
where
    S: KeyValueStore,
    T: Transport + ?Sized,
    R: BufRead,
    W: Write,
{
    write!(out, "{}{}", header(explorer), page_text(explorer))?;
    write!(out, "atlas> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let redraw = match parse_line(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => {
                write!(out, "{HELP}")?;
                Redraw::Nothing
            }
            Ok(Input::Refresh) => Redraw::Grid,
            Ok(Input::Retry) => {
                if matches!(explorer.load_state(), LoadState::Failed(_)) {
                    explorer.retry(transport)
                } else {
                    writeln!(out, "The dataset is already loaded.")?;
                    Redraw::Nothing
                }
            }
            Ok(Input::Command(Command::OpenDetail(q))) => {
                let code = resolve_code(explorer, &q);
                explorer.dispatch(Command::OpenDetail(code))
            }
            Ok(Input::Command(Command::ToggleFavorite(q))) => {
                let code = resolve_code(explorer, &q);
                let redraw = explorer.dispatch(Command::ToggleFavorite(code.clone()));
                if redraw == Redraw::Nothing {
                    writeln!(out, "No country found for: {q}")?;
                }
                redraw
            }
            Ok(Input::Command(cmd)) => explorer.dispatch(cmd),
            Err(msg) => {
                writeln!(out, "{msg}")?;
                Redraw::Nothing
            }
        };

        match redraw {
            Redraw::Nothing => {}
            Redraw::Grid => write!(out, "{}{}", header(explorer), page_text(explorer))?,
            Redraw::Detail => write!(out, "{}", detail_text(explorer))?,
            Redraw::Card(code) => {
                if let Some(card) = explorer.card(&code) {
                    writeln!(out, "{}", text::render_card(&card))?;
                }
                if explorer.detail() == Some(code.as_str()) {
                    write!(out, "{}", detail_text(explorer))?;
                }
            }
        }
        write!(out, "atlas> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
