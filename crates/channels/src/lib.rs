//! Chat surfaces for Folio.
//!
//! Available surfaces:
//! - **CLI** — Interactive terminal chat (stdin/stdout)
//! - **Widget** — The site's floating chat window state (open toggle, input field, rendering)

pub mod cli;
pub mod widget;

pub use cli::CliChannel;
pub use widget::{TYPING_INDICATOR, WidgetShell, WidgetView};
