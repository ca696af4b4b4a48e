//! Section renderers for the course landing page.
//!
//! Plain text goes through `escape_html`; fields the catalog marks as rich
//! text (descriptions, accordion titles) are upstream HTML and are inserted
//! as-is.

mod about;
mod explanations;
mod features;
mod hero;
mod instructor;
mod pointers;
mod sidebar;

pub use about::*;
pub use explanations::*;
pub use features::*;
pub use hero::*;
pub use instructor::*;
pub use pointers::*;
pub use sidebar::*;

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Pass a CSS color through only if it is a hex color or a named keyword.
pub(crate) fn css_color(value: &str) -> &str {
    let value = value.trim();
    let valid = match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
    };
    if valid {
        value
    } else {
        "inherit"
    }
}

/// Section heading shared by the content regions.
pub(crate) fn section_heading(name: &str) -> String {
    format!(r#"<h2 class="section-heading">{}</h2>"#, escape_html(name))
}
