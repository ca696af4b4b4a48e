//! Hero banner: title, rating and description.

use landing_sdk::landing_core::LandingConfig;

use super::escape_html;
use crate::data::Product;

/// Render the hero banner.
pub fn render_hero(product: &Product, config: &LandingConfig) -> String {
    format!(
        r##"<section class="hero" data-section="hero" style="background-image: url('{}')">
    <div class="hero-content">
        <h1 class="hero-title">{}</h1>
        <a href="#" class="hero-rating">
            <img src="{}" alt="Rating badge" width="100" height="20">
            <span>{}</span>
        </a>
        <div class="hero-description">{}</div>
    </div>
</section>"##,
        escape_html(&config.hero_banner),
        escape_html(&product.title),
        escape_html(&config.rating_badge),
        escape_html(&config.rating_caption),
        product.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_escaped_description_verbatim() {
        let product = Product {
            title: "IELTS <Course>".to_string(),
            description: "<p><b>Band 7+</b></p>".to_string(),
            ..Default::default()
        };

        let html = render_hero(&product, &LandingConfig::default());
        assert!(html.contains("IELTS &lt;Course&gt;"));
        assert!(html.contains("<p><b>Band 7+</b></p>"));
        assert!(html.contains("82.6%"));
    }

    #[test]
    fn test_banner_url_cannot_break_out_of_css() {
        let config = LandingConfig {
            hero_banner: "/banner.jpg'); color: red; ('".to_string(),
            ..Default::default()
        };

        let html = render_hero(&Product::default(), &config);
        assert!(html.contains("url('/banner.jpg&#39;); color: red; (&#39;')"));
    }
}
