//! Island script for the interactive sidebar.

use crate::data::Media;
use crate::widget::{DRAG_SPEED, EMBED_BASE};

/// Media list as a JSON data block for the island.
///
/// `</` is escaped so a payload can never close the script element.
pub fn render_media_bootstrap(media: &[Media]) -> String {
    let json = serde_json::to_string(media).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"<script type="application/json" id="sidebar-media">{}</script>"#,
        json.replace("</", "<\\/")
    )
}

/// Browser half of `SidebarWidget`: same transitions, applied to the DOM.
pub fn render_island_script() -> String {
    format!(
        r#"<script>
(() => {{
    const root = document.querySelector('[data-widget="sidebar"]');
    if (!root) return;
    const data = document.getElementById('sidebar-media');
    const media = data ? JSON.parse(data.textContent) : [];
    const panel = root.querySelector('[data-panel]');
    const gallery = root.querySelector('[data-gallery]');
    const fallback = root.dataset.fallback;
    const playerTitle = root.dataset.playerTitle;
    const DRAG_SPEED = {drag_speed};

    const state = {{ selected: media.length ? 0 : -1, playing: false, dragging: false, startX: 0, scrollLeft: 0 }};

    const videoId = (m) => m && m.resource_type === 'video' && m.resource_value && m.resource_value.trim() ? m.resource_value : null;

    const renderPanel = () => {{
        const m = media[state.selected];
        panel.replaceChildren();
        if (state.playing && videoId(m)) {{
            const frame = document.createElement('iframe');
            frame.className = 'player';
            frame.src = '{embed_base}' + videoId(m);
            frame.title = playerTitle;
            frame.allow = 'accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share';
            frame.referrerPolicy = 'strict-origin-when-cross-origin';
            frame.allowFullscreen = true;
            panel.appendChild(frame);
            return;
        }}
        const img = document.createElement('img');
        img.className = 'media-main';
        img.alt = 'Video thumbnail';
        img.src = (m && m.thumbnail_url) || fallback;
        panel.appendChild(img);
        if (videoId(m)) {{
            const button = document.createElement('button');
            button.type = 'button';
            button.className = 'play-button';
            button.dataset.play = '';
            button.setAttribute('aria-label', 'Play trailer');
            button.textContent = '▶';
            panel.appendChild(button);
        }}
    }};

    const select = (index) => {{
        if (index < 0 || index >= media.length) return;
        state.selected = index;
        state.playing = false;
        gallery.querySelectorAll('[data-index]').forEach((thumb) => {{
            const on = Number(thumb.dataset.index) === index;
            thumb.classList.toggle('selected', on);
            thumb.setAttribute('aria-pressed', String(on));
        }});
        renderPanel();
    }};

    panel.addEventListener('click', (e) => {{
        if (!e.target.closest('[data-play]')) return;
        if (!videoId(media[state.selected])) return;
        state.playing = true;
        renderPanel();
    }});

    gallery.addEventListener('click', (e) => {{
        const thumb = e.target.closest('[data-index]');
        if (thumb) select(Number(thumb.dataset.index));
    }});

    gallery.addEventListener('mousedown', (e) => {{
        state.dragging = true;
        state.startX = e.pageX - gallery.offsetLeft;
        state.scrollLeft = gallery.scrollLeft;
    }});
    gallery.addEventListener('mousemove', (e) => {{
        if (!state.dragging) return;
        e.preventDefault();
        const x = e.pageX - gallery.offsetLeft;
        const walk = (x - state.startX) * DRAG_SPEED;
        gallery.scrollLeft = state.scrollLeft - walk;
    }});
    const endDrag = () => {{ state.dragging = false; }};
    gallery.addEventListener('mouseup', endDrag);
    gallery.addEventListener('mouseleave', endDrag);
}})();
</script>"#,
        drag_speed = DRAG_SPEED,
        embed_base = EMBED_BASE
    )
}
