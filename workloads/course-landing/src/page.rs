//! Page assembly: shell plus the ordered list of regions.

use landing_sdk::landing_core::LandingConfig;
use landing_sdk::landing_streaming::{HeadContent, Shell};

use crate::data::Product;
use crate::script::render_island_script;
use crate::sections::*;
use crate::widget::SidebarWidget;

/// Which sidebar the page ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVariant {
    /// Cover image and a plain thumbnail strip.
    Static,
    /// Media widget driven by the island script.
    Interactive,
}

impl PageVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Interactive => "interactive",
        }
    }
}

/// A rendered page region, streamed as one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub html: String,
}

impl Region {
    fn new(name: &'static str, html: String) -> Self {
        Self { name, html }
    }
}

const DEFAULT_TITLE: &str = "IELTS Course - Product Page";

/// Render the page regions in display order.
///
/// Sections missing from the product are skipped, as is an instructor
/// section without values.
pub fn render_regions(product: &Product, variant: PageVariant, config: &LandingConfig) -> Vec<Region> {
    let mut regions = vec![Region::new("hero", render_hero(product, config))];

    if let Some(section) = product.instructors() {
        let html = render_instructor(section);
        if !html.is_empty() {
            regions.push(Region::new("instructor", html));
        }
    }
    if let Some(section) = product.features() {
        regions.push(Region::new("features", render_features(section)));
    }
    if let Some(section) = product.pointers() {
        regions.push(Region::new("pointers", render_pointers(section)));
    }
    if let Some(section) = product.feature_explanations() {
        regions.push(Region::new(
            "feature_explanations",
            render_feature_explanations(section),
        ));
    }
    if let Some(section) = product.about() {
        regions.push(Region::new("about", render_about(section)));
    }

    let sidebar = match variant {
        PageVariant::Static => render_sidebar(product, config),
        PageVariant::Interactive => {
            let widget = SidebarWidget::new(product.media.clone());
            render_interactive_sidebar(product, &widget, config)
        }
    };
    regions.push(Region::new("sidebar", sidebar));

    regions
}

/// Build the document shell for a product page.
pub fn page_shell(product: &Product, variant: PageVariant, config: &LandingConfig) -> Shell {
    let title = match product.page_title() {
        "" => DEFAULT_TITLE,
        title => title,
    };
    let scripts = match variant {
        PageVariant::Static => String::new(),
        PageVariant::Interactive => render_island_script(),
    };

    base_shell(title, config)
        .with_body_start(format!(
            "<body>\n<main class=\"course-page\" data-variant=\"{}\">\n<div class=\"container\">\n",
            variant.name()
        ))
        .with_body_end(format!("</div>\n</main>\n{}\n</body>\n</html>", scripts))
}

/// Render a complete error page.
pub fn render_error_page(status: u16, message: &str, config: &LandingConfig) -> String {
    let body = format!(
        r#"<section class="error" data-section="error">
    <h1>{}</h1>
    <p>{}</p>
    <a href="/">Back to the course</a>
</section>"#,
        status,
        escape_html(message)
    );

    base_shell(DEFAULT_TITLE, config).render_document([body.as_str()])
}

fn base_shell(title: &str, config: &LandingConfig) -> Shell {
    let head = HeadContent::new(title)
        .with_meta("viewport", "width=device-width, initial-scale=1")
        .with_preconnect("https://cdn.10minuteschool.com")
        .with_style(PAGE_STYLES);

    Shell::new(head).with_lang(config.lang.clone())
}

const PAGE_STYLES: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; background: #f3f4f6; color: #111827; line-height: 1.5; }
img { max-width: 100%; height: auto; }
.container { display: grid; grid-template-columns: minmax(0, 2fr) minmax(0, 1fr); gap: 2rem; max-width: 1200px; margin: 0 auto; padding: 1.5rem; }
.container > section { grid-column: 1; }
.sidebar { grid-column: 2; grid-row: 2 / span 8; align-self: start; }
.sidebar.sticky { position: sticky; top: 0; }
.hero { grid-column: 1 / -1; padding: 2rem; border-radius: 12px; background-size: cover; color: #fff; min-height: 300px; }
.hero-title { font-size: 2.25rem; margin: 0 0 1rem; }
.hero-rating { display: flex; gap: 0.4rem; align-items: center; color: #fde68a; text-decoration: none; }
.hero-description { color: #d1d5db; }
.section-heading { font-size: 1.5rem; margin: 0 0 1rem; }
.instructor-card { display: flex; gap: 1rem; align-items: center; background: #e5e7eb; padding: 1rem; border-radius: 8px; }
.instructor-card .name { font-weight: 600; color: #111827; }
.features { background: #fff; border: 2px solid #e5e7eb; border-radius: 12px; padding: 1.5rem; }
.features-grid { display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 1rem; }
.feature-card { display: flex; gap: 1rem; }
.feature-title { font-size: 1.125rem; margin: 0; }
.pointer-list { list-style: none; padding: 0; display: grid; gap: 0.5rem; }
.pointer { display: flex; gap: 0.5rem; }
.pointer p { margin: 0; }
.explanation-list { border: 1px solid #e5e7eb; border-radius: 8px; padding: 0 1.25rem; background: #fff; }
.explanation { display: flex; justify-content: space-between; gap: 0.75rem; padding: 1.25rem 0; border-bottom: 1px solid #e5e7eb; }
.explanation:last-child { border-bottom: none; }
.explanation .info-wrapper { display: flex; flex-direction: column; gap: 0.5rem; }
.explanation .title { font-weight: 600; }
.accordion { background: #fff; border-radius: 8px; padding: 0 1rem; }
.about-entry { border-bottom: 1px dashed #e5e7eb; padding: 0.75rem 0; }
.about-entry summary { cursor: pointer; }
.about-entry summary > * { display: inline; font-size: 1rem; }
.video-trailer { display: flex; flex-direction: column; gap: 1rem; background: #fff; border-radius: 16px; overflow: clip; box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25); }
.media-panel { position: relative; }
.media-main { width: 100%; display: block; }
.player { width: 100%; aspect-ratio: 16 / 9; border: 0; }
.play-button { position: absolute; inset: 0; margin: auto; width: 64px; height: 64px; border-radius: 50%; border: none; background: rgba(255, 255, 255, 0.9); font-size: 1.5rem; cursor: pointer; }
.image-gallery { display: flex; gap: 1rem; align-items: center; overflow-x: auto; padding: 0 1rem; }
.image-gallery.draggable { cursor: grab; user-select: none; scrollbar-width: none; }
.image-gallery.draggable:active { cursor: grabbing; }
.thumb { flex: 0 0 auto; border: 2px solid transparent; border-radius: 6px; padding: 0; background: none; cursor: pointer; }
.thumb.selected { border-color: #16a34a; }
.price { font-size: 1.875rem; font-weight: 700; padding: 0 1rem; }
.cta { background: #16a34a; color: #fff; border: none; padding: 1rem; font-size: 1rem; cursor: pointer; }
.sidebar > .title { display: block; margin: 1.5rem 0 0.75rem; font-weight: 600; }
.check-list { display: flex; flex-direction: column; gap: 0.5rem; }
.single-check { display: flex; gap: 0.5rem; align-items: center; }
.error { grid-column: 1 / -1; text-align: center; padding: 4rem 1rem; }
@media (max-width: 768px) {
    .container { grid-template-columns: 1fr; }
    .sidebar { grid-column: 1; grid-row: auto; }
    .features-grid { grid-template-columns: 1fr; }
    .explanation { flex-direction: column; }
}
"#;
