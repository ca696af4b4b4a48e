//! Sticky sidebar: media, price, CTA and the course checklist.

use landing_sdk::landing_core::LandingConfig;

use super::{css_color, escape_html};
use crate::data::Product;
use crate::script::render_media_bootstrap;
use crate::widget::SidebarWidget;

/// Render the static sidebar: cover image and a plain thumbnail strip.
pub fn render_sidebar(product: &Product, config: &LandingConfig) -> String {
    let cover = product.cover_image().unwrap_or(&config.fallback_image);
    let thumbs: String = product
        .gallery()
        .map(|(_, m)| {
            format!(
                r#"<img class="thumb" src="{}" alt="{}" width="100" height="100" loading="lazy">"#,
                escape_html(&m.thumbnail_url),
                escape_html(&m.thumbnail_url)
            )
        })
        .collect();

    format!(
        r#"<aside class="sidebar" data-section="sidebar">
    <div class="video-trailer">
        <img class="media-main" src="{}" alt="Video thumbnail" width="400" height="250">
        <div class="image-gallery">{}</div>
        {}
    </div>
    {}
</aside>"#,
        escape_html(cover),
        thumbs,
        render_purchase(product, config),
        render_checklist(product, config)
    )
}

/// Render the interactive sidebar from the widget's current state.
pub fn render_interactive_sidebar(
    product: &Product,
    widget: &SidebarWidget,
    config: &LandingConfig,
) -> String {
    format!(
        r#"<aside class="sidebar sticky" data-section="sidebar" data-widget="sidebar" data-fallback="{}" data-player-title="{}">
    <div class="video-trailer">
        {}
        {}
        {}
    </div>
    {}
    {}
</aside>"#,
        escape_html(&config.fallback_image),
        escape_html(&config.trailer_title),
        widget.render_panel(&config.fallback_image, &config.trailer_title),
        widget.render_gallery(),
        render_purchase(product, config),
        render_checklist(product, config),
        render_media_bootstrap(widget.media())
    )
}

fn render_purchase(product: &Product, config: &LandingConfig) -> String {
    format!(
        r#"<span class="price">{}</span>
        <button type="button" class="cta">{}</button>"#,
        escape_html(&config.price_label),
        escape_html(product.cta_label())
    )
}

fn render_checklist(product: &Product, config: &LandingConfig) -> String {
    let items: String = product
        .visible_checklist()
        .map(|item| {
            format!(
                r#"<div class="single-check" style="color: {}">
            <img src="{}" alt="{}" width="24" height="24" loading="lazy">
            <span class="text">{}</span>
        </div>"#,
                css_color(&item.color),
                escape_html(&item.icon),
                escape_html(&item.text),
                escape_html(&item.text)
            )
        })
        .collect();

    format!(
        r#"<span class="title">{}</span>
    <div class="check-list">
        {}
    </div>"#,
        escape_html(&config.checklist_heading),
        items
    )
}
