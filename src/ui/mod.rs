//! Terminal output for the CLI.
//!
//! Human-facing lines go to stderr: in `mcp` mode stdout carries the
//! protocol, and `stats` writes its table to stdout.

mod table;

pub use table::stats_table;

use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
}

/// Styles applied to CLI output
#[derive(Debug, Clone, Default)]
pub struct Palette {
    pub title: Style,
    pub ok: Style,
    pub fail: Style,
    pub caution: Style,
    pub accent: Style,
    pub label: Style,
}

impl Palette {
    /// Colored when stderr is a terminal, plain otherwise
    pub fn for_stderr() -> Self {
        if console::Term::stderr().is_term() {
            Self::colored()
        } else {
            Self::default()
        }
    }

    pub fn colored() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            ok: Style::new().green().bold(),
            fail: Style::new().red().bold(),
            caution: Style::new().yellow().bold(),
            accent: Style::new().magenta(),
            label: Style::new().white().dimmed(),
        }
    }
}

static PALETTE: OnceLock<Palette> = OnceLock::new();

pub fn palette() -> &'static Palette {
    PALETTE.get_or_init(Palette::for_stderr)
}

/// Startup banner: a title followed by indented label/value rows
pub fn banner(title: &str, rows: &[(&str, &str)]) {
    let p = palette();
    eprintln!("{} {}", Icons::ROCKET, title.style(p.title));
    for (label, value) in rows {
        eprintln!("  {} {}", label.style(p.label), value);
    }
}

pub fn info(label: &str, value: &str) {
    let p = palette();
    eprintln!("{} {}: {}", Icons::INFO.style(p.accent), label.style(p.label), value);
}

pub fn success(message: &str) {
    eprintln!("{} {}", Icons::CHECK, message.style(palette().ok));
}

pub fn warn(message: &str) {
    eprintln!("{} {}", Icons::WARN, message.style(palette().caution));
}

pub fn error(message: &str) {
    eprintln!("{} {}", Icons::CROSS, message.style(palette().fail));
}

pub fn section(title: &str) {
    eprintln!();
    eprintln!("━{}━", title.style(palette().title));
}
