//! Timeline and message content
//!
//! Static sample content is embedded as JSON. Populating a container always
//! clears it first, so repeated calls never duplicate tiles.

use serde::{Deserialize, Serialize};

use crate::assets::svg_data_uri;

/// Built-in card content
const SAMPLE_CONTENT: &str = include_str!("../assets/card_content.json");

/// One photo in the timeline strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: String,
    pub title: String,
    /// Image URL, or inline SVG markup
    pub image: String,
    pub caption: String,
}

impl TimelineEntry {
    /// Source for the `<img>`: inline SVG becomes a data URI, anything else is used as-is
    pub fn image_src(&self) -> String {
        if self.image.trim_start().starts_with("<svg") {
            svg_data_uri(&self.image)
        } else {
            self.image.clone()
        }
    }

    pub fn alt_text(&self) -> String {
        format!("{} - {}", self.title, self.caption)
    }
}

/// A short message shown on its own tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(pub String);

impl Message {
    /// Tile markup with the text escaped
    pub fn tile_html(&self) -> String {
        format!("<p>{}</p>", escape_html(&self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardContent {
    pub timeline: Vec<TimelineEntry>,
    pub messages: Vec<Message>,
}

impl CardContent {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The built-in sample content
    pub fn sample() -> Self {
        Self::from_json(SAMPLE_CONTENT).unwrap_or_else(|e| {
            log::warn!("Embedded card content is invalid ({}), using empty content", e);
            Self {
                timeline: Vec::new(),
                messages: Vec::new(),
            }
        })
    }
}

/// Escape `& < > "` for safe insertion into markup
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// A container that content can be written into
pub trait ContentTarget {
    /// Remove everything from the container
    fn clear(&mut self);
    /// Append an `<img>`
    fn append_image(&mut self, src: &str, alt: &str);
    /// Append a `.message-tile` with the given inner markup
    fn append_message_tile(&mut self, inner_html: &str);
}

/// Clear both containers and fill them from `content`
pub fn populate(
    content: &CardContent,
    timeline: &mut impl ContentTarget,
    messages: &mut impl ContentTarget,
) {
    timeline.clear();
    for entry in &content.timeline {
        timeline.append_image(&entry.image_src(), &entry.alt_text());
    }

    messages.clear();
    for message in &content.messages {
        messages.append_message_tile(&message.tile_html());
    }
}

/// A DOM element used as a content container (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct DomContainer {
    document: web_sys::Document,
    element: web_sys::Element,
}

#[cfg(target_arch = "wasm32")]
impl DomContainer {
    pub fn by_id(document: &web_sys::Document, id: &str) -> Option<Self> {
        let element = document.get_element_by_id(id)?;
        Some(Self {
            document: document.clone(),
            element,
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl ContentTarget for DomContainer {
    fn clear(&mut self) {
        self.element.set_inner_html("");
    }

    fn append_image(&mut self, src: &str, alt: &str) {
        let Ok(img) = self.document.create_element("img") else {
            return;
        };
        let _ = img.set_attribute("src", src);
        let _ = img.set_attribute("alt", alt);
        let _ = img.set_attribute("loading", "lazy");
        let _ = self.element.append_child(&img);
    }

    fn append_message_tile(&mut self, inner_html: &str) {
        let Ok(tile) = self.document.create_element("div") else {
            return;
        };
        tile.set_class_name("message-tile");
        tile.set_inner_html(inner_html);
        let _ = self.element.append_child(&tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// In-memory container mirroring what the DOM would hold
    #[derive(Default)]
    struct MemoryTarget {
        images: Vec<(String, String)>,
        tiles: Vec<String>,
    }

    impl ContentTarget for MemoryTarget {
        fn clear(&mut self) {
            self.images.clear();
            self.tiles.clear();
        }

        fn append_image(&mut self, src: &str, alt: &str) {
            self.images.push((src.to_string(), alt.to_string()));
        }

        fn append_message_tile(&mut self, inner_html: &str) {
            self.tiles.push(inner_html.to_string());
        }
    }

    #[test]
    fn test_sample_content_loads() {
        let content = CardContent::sample();
        assert_eq!(content.timeline.len(), 3);
        assert_eq!(content.messages.len(), 4);
        assert_eq!(content.timeline[0].year, "1985");
        assert_eq!(content.timeline[2].title, "Family Trip");
        assert_eq!(content.messages[1], Message("Your laugh is our sun".into()));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b class="x">Tom & Jerry</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("it's"), "it's");
    }

    #[test]
    fn test_tile_html() {
        let msg = Message("<script>alert(1)</script>".into());
        assert_eq!(msg.tile_html(), "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_timeline_alt_and_src() {
        let content = CardContent::sample();
        let entry = &content.timeline[1];
        assert_eq!(entry.alt_text(), "Graduation - Caps, smiles and proud hearts");
        assert!(entry.image_src().starts_with("data:image/svg+xml"));

        let photo = TimelineEntry {
            year: "2020".into(),
            title: "Garden".into(),
            image: "photos/garden.jpg".into(),
            caption: "Roses".into(),
        };
        assert_eq!(photo.image_src(), "photos/garden.jpg");
    }

    #[test]
    fn test_populate_is_idempotent() {
        let content = CardContent::sample();
        let mut timeline = MemoryTarget::default();
        let mut messages = MemoryTarget::default();

        populate(&content, &mut timeline, &mut messages);
        let first_images = timeline.images.clone();
        let first_tiles = messages.tiles.clone();

        populate(&content, &mut timeline, &mut messages);
        assert_eq!(timeline.images, first_images);
        assert_eq!(messages.tiles, first_tiles);
        assert_eq!(timeline.images.len(), content.timeline.len());
        assert_eq!(messages.tiles.len(), content.messages.len());
    }

    #[test]
    fn test_populate_replaces_stale_children() {
        let mut timeline = MemoryTarget::default();
        let mut messages = MemoryTarget::default();
        messages.append_message_tile("<p>old</p>");
        timeline.append_image("old.png", "old");

        populate(&CardContent::sample(), &mut timeline, &mut messages);
        assert!(!messages.tiles.iter().any(|t| t == "<p>old</p>"));
        assert!(!timeline.images.iter().any(|(src, _)| src == "old.png"));
    }

    #[test]
    fn test_content_from_json() {
        let json = r#"{"timeline":[],"messages":["a & b"]}"#;
        let content = CardContent::from_json(json).expect("valid json");
        assert_eq!(content.messages[0].tile_html(), "<p>a &amp; b</p>");
        assert!(CardContent::from_json("{").is_err());
    }

    proptest! {
        #[test]
        fn prop_tile_never_contains_raw_specials(text in ".*") {
            let html = Message(text).tile_html();
            let inner = &html[3..html.len() - 4];
            prop_assert!(!inner.contains('<'));
            prop_assert!(!inner.contains('>'));
            prop_assert!(!inner.contains('"'));
            // Every '&' starts one of the four entities
            for (i, _) in inner.match_indices('&') {
                let rest = &inner[i..];
                prop_assert!(
                    rest.starts_with("&amp;")
                        || rest.starts_with("&lt;")
                        || rest.starts_with("&gt;")
                        || rest.starts_with("&quot;")
                );
            }
        }
    }
}
