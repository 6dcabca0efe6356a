//! Colored message prefixes shared by the binary and printers.

use owo_colors::OwoColorize;

/// Colors are on unless `NO_COLOR` is set.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    let tag = format!("⟦{}⟧", label);
    if colors_enabled() {
        paint(&tag)
    } else {
        tag
    }
}

pub fn error_prefix() -> String {
    prefix("error", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note", |s| s.yellow().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info", |s| s.blue().bold().to_string())
}
