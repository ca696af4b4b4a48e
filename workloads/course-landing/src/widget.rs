//! Interactive sidebar: media selection, trailer playback and drag-scroll.
//!
//! `SidebarWidget` is the server-side model of the sidebar island. It
//! renders the initial markup, and the island script in `script.rs`
//! applies the same transitions in the browser.

use crate::data::Media;
use crate::sections::escape_html;

/// Scroll distance per pixel of pointer movement.
pub const DRAG_SPEED: f64 = 1.5;

/// Base URL of the embedded player.
pub const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Drag-scroll bookkeeping for the thumbnail strip.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    /// Pointer x relative to the strip when the drag started.
    pub start_x: f64,
    /// Strip scroll offset when the drag started.
    pub scroll_left: f64,
}

/// Sidebar widget state.
#[derive(Debug, Clone)]
pub struct SidebarWidget {
    media: Vec<Media>,
    selected: Option<usize>,
    playing: bool,
    drag: DragState,
}

impl SidebarWidget {
    /// Start with the first media entry selected and nothing playing.
    pub fn new(media: Vec<Media>) -> Self {
        let selected = if media.is_empty() { None } else { Some(0) };
        Self {
            media,
            selected,
            playing: false,
            drag: DragState::default(),
        }
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_media(&self) -> Option<&Media> {
        self.selected.and_then(|i| self.media.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Select a media entry and stop playback.
    ///
    /// Returns `false` (and changes nothing) for an index outside the list.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.media.len() {
            return false;
        }
        self.selected = Some(index);
        self.playing = false;
        true
    }

    /// Start playback if the selected entry is a playable video.
    pub fn play(&mut self) -> bool {
        if self.selected_media().and_then(Media::video_id).is_some() {
            self.playing = true;
        }
        self.playing
    }

    /// Player URL for the selected entry, while playing.
    pub fn embed_url(&self) -> Option<String> {
        if !self.playing {
            return None;
        }
        self.selected_media()
            .and_then(Media::video_id)
            .map(|id| format!("{}{}", EMBED_BASE, id))
    }

    /// Pointer pressed on the strip.
    pub fn pointer_down(&mut self, page_x: f64, offset_left: f64, scroll_left: f64) {
        self.drag = DragState {
            dragging: true,
            start_x: page_x - offset_left,
            scroll_left,
        };
    }

    /// Pointer moved over the strip.
    ///
    /// Returns the new scroll offset while dragging, `None` otherwise.
    pub fn pointer_move(&self, page_x: f64, offset_left: f64) -> Option<f64> {
        if !self.drag.dragging {
            return None;
        }
        let x = page_x - offset_left;
        let walk = (x - self.drag.start_x) * DRAG_SPEED;
        Some(self.drag.scroll_left - walk)
    }

    pub fn pointer_up(&mut self) {
        self.drag.dragging = false;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Render the main panel: the player while playing, otherwise the
    /// selected thumbnail (or `fallback_image`) with a play button for videos.
    pub fn render_panel(&self, fallback_image: &str, player_title: &str) -> String {
        if let Some(url) = self.embed_url() {
            return format!(
                r#"<div class="media-panel" data-panel>
    <iframe class="player" src="{}" title="{}" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe>
</div>"#,
                escape_html(&url),
                escape_html(player_title)
            );
        }

        let selected = self.selected_media();
        let image = selected
            .map(|m| m.thumbnail_url.as_str())
            .filter(|url| !url.is_empty())
            .unwrap_or(fallback_image);
        let play_button = if selected.and_then(Media::video_id).is_some() {
            r#"
    <button type="button" class="play-button" data-play aria-label="Play trailer">▶</button>"#
        } else {
            ""
        };

        format!(
            r#"<div class="media-panel" data-panel>
    <img class="media-main" src="{}" alt="Video thumbnail" width="400" height="250">{}
</div>"#,
            escape_html(image),
            play_button
        )
    }

    /// Render the draggable thumbnail strip. Entries without a thumbnail
    /// are skipped but keep their index.
    pub fn render_gallery(&self) -> String {
        let thumbs: String = self
            .media
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_thumbnail())
            .map(|(i, m)| {
                let selected = self.selected == Some(i);
                format!(
                    r#"<button type="button" class="thumb{}" data-index="{}" aria-pressed="{}"><img src="{}" alt="{}" width="100" height="100" loading="lazy" draggable="false"></button>"#,
                    if selected { " selected" } else { "" },
                    i,
                    selected,
                    escape_html(&m.thumbnail_url),
                    escape_html(&m.name)
                )
            })
            .collect();

        format!(
            r#"<div class="image-gallery draggable" data-gallery>{}</div>"#,
            thumbs
        )
    }
}
