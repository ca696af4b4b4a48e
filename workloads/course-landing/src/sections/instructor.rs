//! Instructor card.

use super::escape_html;
use crate::data::{Instructor, SectionBody};

/// Render the first instructor, or nothing when the section is empty.
pub fn render_instructor(section: &SectionBody<Instructor>) -> String {
    let Some(instructor) = section.values.first() else {
        return String::new();
    };

    let alt = if instructor.name.is_empty() {
        "Instructor"
    } else {
        instructor.name.as_str()
    };

    format!(
        r##"<section class="instructor" data-section="instructor">
    <h2 class="section-heading">Course instructor</h2>
    <div class="instructor-card">
        <div class="image-wrapper">
            <img src="{}" alt="{}" width="80" height="100" loading="lazy">
        </div>
        <div class="info-wrapper">
            <a class="name" href="#">{}</a>
            <div class="instructor-description">{}</div>
        </div>
    </div>
</section>"##,
        escape_html(&instructor.image),
        escape_html(alt),
        escape_html(&instructor.name),
        instructor.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_first_instructor_only() {
        let section = SectionBody::new(
            "Instructors",
            vec![
                Instructor {
                    name: "Munzereen Shahid".to_string(),
                    description: "<p>IELTS: 8.5</p>".to_string(),
                    ..Default::default()
                },
                Instructor {
                    name: "Second".to_string(),
                    ..Default::default()
                },
            ],
        );

        let html = render_instructor(&section);
        assert!(html.contains("Course instructor"));
        assert!(html.contains("Munzereen Shahid"));
        assert!(html.contains("<p>IELTS: 8.5</p>"));
        assert!(!html.contains("Second"));
    }

    #[test]
    fn test_empty_values_render_nothing() {
        assert!(render_instructor(&SectionBody::new("Instructors", Vec::new())).is_empty());
    }
}
