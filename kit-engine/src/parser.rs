//! # Response Parser
//!
//! Turns the ordered parts of a multi-part model reply into titled assets.
//!
//! The model announces each image's title in a text part placed just before
//! the image. Parsing is a two-state walk over the parts:
//!
//! - a text part is normalised and becomes the pending title, replacing any
//!   earlier one that was never claimed
//! - an image part is emitted with the pending title (or the caller's default)
//!   and the slot is emptied
//!
//! Text after the last image is dropped. Exactly one asset is produced per image.

use kit_core::GeneratedAsset;

/// One fragment of a model reply, stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Text(String),
    Image {
        media_type: String,
        /// Base64 payload.
        data: String,
    },
}

impl ResponsePart {
    pub fn text(text: impl Into<String>) -> Self {
        ResponsePart::Text(text.into())
    }

    pub fn image(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        ResponsePart::Image { media_type: media_type.into(), data: data.into() }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, ResponsePart::Image { .. })
    }
}

/// Title waiting for the next image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TitleSlot {
    #[default]
    Empty,
    Pending(String),
}

impl TitleSlot {
    /// Store a new pending title, discarding whatever was there.
    pub fn fill(&mut self, title: String) {
        *self = TitleSlot::Pending(title);
    }

    /// Empty the slot, returning its title when it holds a non-empty one.
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(self) {
            TitleSlot::Pending(title) if !title.is_empty() => Some(title),
            _ => None,
        }
    }
}

/// Strip every `*`, then the first literal `Title:`, then surrounding whitespace.
pub fn normalize_title(raw: &str) -> String {
    raw.replace('*', "").replacen("Title:", "", 1).trim().to_string()
}

/// Parse reply parts into assets, one per image part, in order.
///
/// `default_title` applies to images with no pending title; an empty default is
/// the same as none.
pub fn parse_parts<'a, I>(parts: I, default_title: Option<&str>) -> Vec<GeneratedAsset>
where
    I: IntoIterator<Item = &'a ResponsePart>,
{
    let default_title = default_title.filter(|t| !t.is_empty());
    let mut slot = TitleSlot::Empty;
    let mut assets = Vec::new();

    for part in parts {
        match part {
            ResponsePart::Text(text) => slot.fill(normalize_title(text)),
            ResponsePart::Image { media_type, data } => {
                let title = slot.take().or_else(|| default_title.map(str::to_string));
                assets.push(GeneratedAsset::new(format!("data:{media_type};base64,{data}"), title));
            }
        }
    }
    assets
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn img(data: &str) -> ResponsePart {
        ResponsePart::image("image/png", data)
    }

    #[test]
    fn normalizes_markdown_and_title_prefix() {
        assert_eq!(normalize_title("**Title: Instagram Post**"), "Instagram Post");
        assert_eq!(normalize_title("  Title: Title: twice "), "Title: twice");
        assert_eq!(normalize_title("***"), "");
        assert_eq!(normalize_title("Spanish Version"), "Spanish Version");
    }

    #[test]
    fn text_image_image_titles_only_the_first() {
        let parts = vec![ResponsePart::text("Title: Billboard"), img("AAA"), img("BBB")];
        let assets = parse_parts(&parts, None);
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].title.as_deref(), Some("Billboard"));
        assert_eq!(assets[0].image, "data:image/png;base64,AAA");
        assert_eq!(assets[1].title, None);
    }

    #[test]
    fn default_title_fills_untitled_images() {
        let parts = vec![img("AAA"), ResponsePart::text("Custom"), img("BBB")];
        let assets = parse_parts(&parts, Some("QR Code"));
        assert_eq!(assets[0].title.as_deref(), Some("QR Code"));
        assert_eq!(assets[1].title.as_deref(), Some("Custom"));
    }

    #[test]
    fn later_text_overwrites_and_trailing_text_is_dropped() {
        let parts = vec![
            ResponsePart::text("first"),
            ResponsePart::text("second"),
            img("AAA"),
            ResponsePart::text("orphan"),
        ];
        let assets = parse_parts(&parts, None);
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].title.as_deref(), Some("second"));
    }

    #[test]
    fn empty_normalized_text_falls_back_to_default() {
        let parts = vec![ResponsePart::text("Title: first"), ResponsePart::text("**"), img("AAA")];
        let assets = parse_parts(&parts, Some("QR Code"));
        assert_eq!(assets[0].title.as_deref(), Some("QR Code"));
    }

    #[test]
    fn text_only_reply_yields_nothing() {
        let parts = vec![ResponsePart::text("I can't help with that.")];
        assert!(parse_parts(&parts, Some("QR Code")).is_empty());
    }

    #[test]
    fn empty_default_is_no_title() {
        let assets = parse_parts(&[img("AAA")], Some(""));
        assert_eq!(assets[0].title, None);
    }

    fn arb_part() -> impl Strategy<Value = ResponsePart> {
        prop_oneof![
            "[ -~]{0,24}".prop_map(ResponsePart::Text),
            "[A-Za-z0-9+/]{4,16}".prop_map(|data| ResponsePart::image("image/png", data)),
        ]
    }

    proptest! {
        #[test]
        fn one_asset_per_image_part(parts in proptest::collection::vec(arb_part(), 0..32)) {
            let images = parts.iter().filter(|p| p.is_image()).count();
            let assets = parse_parts(&parts, None);
            prop_assert_eq!(assets.len(), images);
            for asset in &assets {
                prop_assert!(asset.image.starts_with("data:image/png;base64,"));
                let title = asset.title.as_deref();
                prop_assert!(title.is_none_or(|t| !t.is_empty() && !t.contains('*')));
            }
        }
    }
}
