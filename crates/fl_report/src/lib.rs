//! fl_report: renderers for pipeline outputs.
//!
//! - No I/O here; callers write the returned values.
//! - Document key names and key order are stable (insertion order).
//! - Numbers are emitted as computed; formatting for humans lives in `render_text`.

#![deny(unsafe_code)]

#[cfg(feature = "render_json")]
pub mod render_json;

#[cfg(feature = "render_text")]
pub mod render_text;

#[cfg(feature = "render_json")]
pub use render_json::{
    counts_json, lineup_statistics_json, results_json, standings_json, statistics_json, Documents,
};

#[cfg(feature = "render_text")]
pub use render_text::{check_summary, standings_table};
