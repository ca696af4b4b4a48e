//! Feature cards ("how the course is laid out").

use super::{escape_html, section_heading};
use crate::data::{Feature, SectionBody};

/// Render the features grid, one card per value.
pub fn render_features(section: &SectionBody<Feature>) -> String {
    let cards: String = section
        .values
        .iter()
        .map(|f| {
            format!(
                r#"<div class="feature-card">
            <img class="feature-icon" src="{}" alt="Feature icon" width="24" height="24" loading="lazy">
            <div class="info-wrapper">
                <h3 class="feature-title">{}</h3>
                <p class="feature-subtitle">{}</p>
            </div>
        </div>"#,
                escape_html(&f.icon),
                escape_html(&f.title),
                escape_html(&f.subtitle)
            )
        })
        .collect();

    format!(
        r#"<section class="features" data-section="features">
    {}
    <div class="features-grid">
        {}
    </div>
</section>"#,
        section_heading(&section.name),
        cards
    )
}
