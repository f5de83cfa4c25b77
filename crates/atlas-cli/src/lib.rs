//! atlas-cli
//! =========
//!
//! Command-line front-end for [`atlas_core`]. The binary is `atlas`; this
//! library target holds the argument definitions and the interactive
//! `browse` loop so they can be tested without spawning a process.
//!
//! Quick start
//! -----------
//!
//! ```text
//! atlas stats
//! atlas list --search europe --sort pop-high --page 2
//! atlas show deu
//! atlas fav jpn
//! atlas --input countries.json browse
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod args;
pub mod browse;
