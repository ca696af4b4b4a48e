//! "What you will learn" bullet list.

use super::{escape_html, section_heading};
use crate::data::{Pointer, SectionBody};

pub fn render_pointers(section: &SectionBody<Pointer>) -> String {
    let items: String = section
        .values
        .iter()
        .map(|p| {
            format!(
                r#"<li class="pointer"><span class="check">✔️</span><p>{}</p></li>"#,
                escape_html(&p.text)
            )
        })
        .collect();

    format!(
        r#"<section class="pointers" data-section="pointers">
    {}
    <ul class="pointer-list">{}</ul>
</section>"#,
        section_heading(&section.name),
        items
    )
}
