//! Product data models.

use serde::{Deserialize, Serialize};

use super::nullable;
use super::section::*;

/// Envelope around the product document.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Product,
}

/// A course product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "nullable")]
    pub slug: String,
    pub id: serde_json::Value,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// HTML.
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub media: Vec<Media>,
    #[serde(deserialize_with = "nullable")]
    pub checklist: Vec<ChecklistItem>,
    pub seo: serde_json::Value,
    pub cta_text: Option<CtaText>,
    #[serde(deserialize_with = "nullable")]
    pub sections: Vec<Section>,
}

/// Kind of a media entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    #[default]
    Image,
    /// Rendered like an image.
    #[serde(other)]
    Unknown,
}

/// Gallery entry: a trailer video or an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub resource_type: ResourceType,
    /// YouTube video ID for videos.
    pub resource_value: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub thumbnail_url: String,
}

impl Media {
    /// Video ID, when this entry can be played.
    pub fn video_id(&self) -> Option<&str> {
        match self.resource_type {
            ResourceType::Video => self
                .resource_value
                .as_deref()
                .filter(|id| !id.trim().is_empty()),
            _ => None,
        }
    }

    /// Whether the entry has a thumbnail to show in the gallery.
    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail_url.trim().is_empty()
    }
}

/// Sidebar "what's included" entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistItem {
    pub id: serde_json::Value,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(deserialize_with = "nullable")]
    pub color: String,
    #[serde(deserialize_with = "nullable")]
    pub list_page_visibility: bool,
}

/// Call-to-action button text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaText {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

impl Product {
    /// Decode the API envelope and return the product.
    pub fn from_response(body: &str) -> Result<Self, serde_json::Error> {
        let response: ProductResponse = serde_json::from_str(body)?;
        Ok(response.data)
    }

    pub fn instructors(&self) -> Option<&SectionBody<Instructor>> {
        self.sections.iter().find_map(|s| match s {
            Section::Instructors(body) => Some(body),
            _ => None,
        })
    }

    pub fn features(&self) -> Option<&SectionBody<Feature>> {
        self.sections.iter().find_map(|s| match s {
            Section::Features(body) => Some(body),
            _ => None,
        })
    }

    pub fn pointers(&self) -> Option<&SectionBody<Pointer>> {
        self.sections.iter().find_map(|s| match s {
            Section::Pointers(body) => Some(body),
            _ => None,
        })
    }

    pub fn feature_explanations(&self) -> Option<&SectionBody<FeatureExplanation>> {
        self.sections.iter().find_map(|s| match s {
            Section::FeatureExplanations(body) => Some(body),
            _ => None,
        })
    }

    pub fn about(&self) -> Option<&SectionBody<AboutEntry>> {
        self.sections.iter().find_map(|s| match s {
            Section::About(body) => Some(body),
            _ => None,
        })
    }

    /// Checklist entries shown on the page, in order.
    pub fn visible_checklist(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.checklist.iter().filter(|item| item.list_page_visibility)
    }

    /// Media entries with a thumbnail, keeping their index in `media`.
    pub fn gallery(&self) -> impl Iterator<Item = (usize, &Media)> {
        self.media.iter().enumerate().filter(|(_, m)| m.has_thumbnail())
    }

    /// Thumbnail of the first media entry, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.media
            .first()
            .map(|m| m.thumbnail_url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// CTA button label (empty when the product has none).
    pub fn cta_label(&self) -> &str {
        self.cta_text.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }

    /// Title from the SEO block, falling back to the product title.
    pub fn page_title(&self) -> &str {
        self.seo
            .get("title")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn checklist_item(text: &str, visible: bool) -> ChecklistItem {
        ChecklistItem {
            text: text.to_string(),
            list_page_visibility: visible,
            ..Default::default()
        }
    }

    #[test]
    fn test_decodes_envelope() {
        let body = json!({
            "code": 200,
            "message": "success",
            "data": {
                "slug": "ielts-course",
                "id": 153,
                "title": "IELTS Course",
                "description": "<p>Get ready</p>",
                "media": [
                    { "name": "preview_gallery", "resource_type": "video", "resource_value": "zrlYnaZftEQ", "thumbnail_url": "https://cdn/thumb.jpg" },
                    { "name": "sqr_img", "resource_type": "image", "resource_value": "https://cdn/sq.png", "thumbnail_url": "" }
                ],
                "checklist": [
                    { "id": "1", "text": "Total enrolled 32995", "icon": "https://cdn/i.png", "color": "black", "list_page_visibility": true }
                ],
                "seo": [],
                "cta_text": { "name": "Enroll", "value": "enroll" },
                "sections": [{ "type": "bundle_items", "values": [] }]
            }
        })
        .to_string();

        let product = Product::from_response(&body).unwrap();
        assert_eq!(product.title, "IELTS Course");
        assert_eq!(product.media.len(), 2);
        assert_eq!(product.media[0].video_id(), Some("zrlYnaZftEQ"));
        assert_eq!(product.media[1].video_id(), None);
        assert_eq!(product.cta_label(), "Enroll");
        assert_eq!(product.sections, [Section::Other]);
        // `seo` is an empty list in some payloads
        assert_eq!(product.page_title(), "IELTS Course");
    }

    #[test]
    fn test_null_section_values_do_not_fail_the_page() {
        let body = r#"{"code":200,"message":"ok","data":{"sections":[{"type":"pointers","name":"What you will learn","values":null}]}}"#;

        let product = Product::from_response(body).unwrap();
        let pointers = product.pointers().unwrap();
        assert_eq!(pointers.name, "What you will learn");
        assert!(pointers.values.is_empty());
    }

    #[test]
    fn test_missing_data_is_an_error() {
        assert!(Product::from_response(r#"{"code":404,"message":"not found"}"#).is_err());
        assert!(Product::from_response("not json").is_err());
    }

    #[test]
    fn test_unknown_resource_type() {
        let media: Media =
            serde_json::from_value(json!({ "resource_type": "pdf", "resource_value": "x" })).unwrap();
        assert_eq!(media.resource_type, ResourceType::Unknown);
        assert_eq!(media.video_id(), None);
    }

    #[test]
    fn test_first_section_of_a_type_wins() {
        let product = Product {
            sections: vec![
                Section::Other,
                Section::Features(SectionBody::new("First", Vec::new())),
                Section::Features(SectionBody::new("Second", Vec::new())),
            ],
            ..Default::default()
        };

        assert_eq!(product.features().unwrap().name, "First");
        assert!(product.pointers().is_none());
    }

    #[test]
    fn test_visible_checklist_keeps_order() {
        let product = Product {
            checklist: vec![
                checklist_item("a", true),
                checklist_item("b", false),
                checklist_item("c", true),
                checklist_item("d", true),
            ],
            ..Default::default()
        };

        let texts: Vec<_> = product.visible_checklist().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["a", "c", "d"]);
    }

    #[test]
    fn test_gallery_skips_empty_thumbnails() {
        let product = Product {
            media: vec![
                Media { thumbnail_url: "https://cdn/0.jpg".into(), ..Default::default() },
                Media::default(),
                Media { thumbnail_url: "https://cdn/2.jpg".into(), ..Default::default() },
            ],
            ..Default::default()
        };

        let indices: Vec<_> = product.gallery().map(|(i, _)| i).collect();
        assert_eq!(indices, [0, 2]);
        assert_eq!(product.cover_image(), Some("https://cdn/0.jpg"));
        assert_eq!(Product::default().cover_image(), None);
    }

    #[test]
    fn test_seo_title_preferred() {
        let product = Product {
            title: "IELTS Course".into(),
            seo: json!({ "title": "IELTS Course by Munzereen Shahid" }),
            ..Default::default()
        };
        assert_eq!(product.page_title(), "IELTS Course by Munzereen Shahid");
    }
}
