//! Feature explanation blocks.

use super::{escape_html, section_heading};
use crate::data::{FeatureExplanation, SectionBody};

/// Render each explanation with its checklist and illustration.
pub fn render_feature_explanations(section: &SectionBody<FeatureExplanation>) -> String {
    let blocks: String = section
        .values
        .iter()
        .map(|block| {
            let checklist: String = block
                .checklist
                .iter()
                .map(|item| format!("<span>✔️ {}</span>", escape_html(item)))
                .collect();
            let alt = if block.title.is_empty() {
                "Feature"
            } else {
                block.title.as_str()
            };

            format!(
                r#"<div class="explanation">
        <div class="info-wrapper">
            <span class="title">{}</span>
            {}
        </div>
        <div class="illustration">
            <img src="{}" alt="{}" width="200" height="250" loading="lazy">
        </div>
    </div>"#,
                escape_html(&block.title),
                checklist,
                escape_html(&block.file_url),
                escape_html(alt)
            )
        })
        .collect();

    format!(
        r#"<section class="feature-explanations" data-section="feature_explanations">
    {}
    <div class="explanation-list">
    {}
    </div>
</section>"#,
        section_heading(&section.name),
        blocks
    )
}
