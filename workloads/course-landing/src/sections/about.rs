//! Course details accordion.

use super::section_heading;
use crate::data::{AboutEntry, SectionBody};

/// Render the entries as `<details>` blocks, the first one open.
pub fn render_about(section: &SectionBody<AboutEntry>) -> String {
    let entries: String = section
        .values
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                r#"<details class="about-entry"{}>
        <summary>{}</summary>
        <div class="about-description">{}</div>
    </details>"#,
                if i == 0 { " open" } else { "" },
                entry.title,
                entry.description
            )
        })
        .collect();

    format!(
        r#"<section class="about" data-section="about">
    {}
    <div class="accordion">
    {}
    </div>
</section>"#,
        section_heading(&section.name),
        entries
    )
}
