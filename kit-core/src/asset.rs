//! Image payloads: source images going out, generated assets coming back.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KitError, Result};

/// Maximum accepted size for a decoded image payload (20 MB).
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// An encoded image ready to be attached to a generation request.
///
/// Produced once (from an upload, a file, or a previous generation) and never
/// mutated afterwards. Downstream requests decode their own copy instead of
/// sharing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAsset {
    bytes: Vec<u8>,
    media_type: String,
}

impl SourceAsset {
    pub fn new(bytes: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self { bytes: bytes.into(), media_type: media_type.into() }
    }

    /// Decode a standard base64 payload.
    pub fn from_base64(media_type: impl Into<String>, data: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(data.trim())
            .map_err(|e| KitError::InvalidDataUrl(format!("invalid base64 payload: {e}")))?;
        Self::checked(bytes, media_type.into())
    }

    /// Parse a `data:<media type>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| KitError::InvalidDataUrl("missing 'data:' prefix".to_string()))?;
        let (media_type, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or_else(|| KitError::InvalidDataUrl("missing ';base64,' marker".to_string()))?;
        if media_type.is_empty() {
            return Err(KitError::InvalidDataUrl("empty media type".to_string()));
        }
        Self::from_base64(media_type, payload)
    }

    /// Read an image from disk, guessing the media type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let media_type =
            mime_guess::from_path(path).first_or_octet_stream().essence_str().to_string();
        Self::checked(bytes, media_type)
    }

    fn checked(bytes: Vec<u8>, media_type: String) -> Result<Self> {
        if bytes.is_empty() {
            return Err(KitError::InvalidDataUrl("image payload is empty".to_string()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(KitError::InvalidDataUrl(format!(
                "image payload is {} bytes, limit is {MAX_IMAGE_BYTES}",
                bytes.len()
            )));
        }
        Ok(Self { bytes, media_type })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    pub fn to_data_url(&self) -> String {
        format!("{DATA_URL_PREFIX}{}{BASE64_MARKER}{}", self.media_type, self.to_base64())
    }

    /// File extension matching the media type, used when writing assets to disk.
    pub fn extension(&self) -> &'static str {
        match self.media_type.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

/// One generated image plus an optional title.
///
/// `image` is a self-contained data URL so it can be displayed directly and
/// re-encoded on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAsset {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GeneratedAsset {
    pub fn new(image: impl Into<String>, title: Option<String>) -> Self {
        Self { image: image.into(), title }
    }

    pub fn from_source(source: &SourceAsset, title: Option<String>) -> Self {
        Self { image: source.to_data_url(), title }
    }

    /// Decode the image back into a fresh source payload.
    pub fn to_source(&self) -> Result<SourceAsset> {
        SourceAsset::from_data_url(&self.image)
    }
}

pub const UNTITLED_FORMAT: &str = "Untitled Format";

/// A reformatted deliverable. Unlike other assets it always carries a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatAsset {
    pub format: String,
    pub image: String,
}

impl From<GeneratedAsset> for FormatAsset {
    fn from(asset: GeneratedAsset) -> Self {
        let format = asset
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_FORMAT.to_string());
        Self { format, image: asset.image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn data_url_round_trip_keeps_media_type() {
        let asset = SourceAsset::new(PNG_HEADER, "image/png");
        let url = asset.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));

        let decoded = SourceAsset::from_data_url(&url).unwrap();
        assert_eq!(decoded.media_type(), "image/png");
        assert_eq!(decoded.bytes(), PNG_HEADER);
    }

    #[test]
    fn rejects_malformed_data_urls() {
        assert!(matches!(
            SourceAsset::from_data_url("image/png;base64,AAAA"),
            Err(KitError::InvalidDataUrl(_))
        ));
        assert!(SourceAsset::from_data_url("data:image/png,AAAA").is_err());
        assert!(SourceAsset::from_data_url("data:;base64,AAAA").is_err());
        assert!(SourceAsset::from_data_url("data:image/png;base64,@@@").is_err());
        assert!(SourceAsset::from_data_url("data:image/png;base64,").is_err());
    }

    #[test]
    fn reads_file_and_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.jpg");
        std::fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();

        let asset = SourceAsset::from_path(&path).unwrap();
        assert_eq!(asset.media_type(), "image/jpeg");
        assert_eq!(asset.extension(), "jpg");
    }

    #[test]
    fn format_asset_falls_back_to_untitled() {
        let titled =
            GeneratedAsset::new("data:image/png;base64,AA==", Some("Postcard (4x6 inches)".into()));
        assert_eq!(FormatAsset::from(titled).format, "Postcard (4x6 inches)");

        let untitled = GeneratedAsset::new("data:image/png;base64,AA==", None);
        assert_eq!(FormatAsset::from(untitled).format, UNTITLED_FORMAT);
    }

    #[test]
    fn generated_asset_decodes_to_fresh_source() {
        let source = SourceAsset::new(PNG_HEADER, "image/png");
        let asset = GeneratedAsset::from_source(&source, None);
        assert_eq!(asset.to_source().unwrap(), source);
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn media_type_survives_round_trip(
                bytes in proptest::collection::vec(any::<u8>(), 1..256),
                subtype in "[a-z]{2,8}",
            ) {
                let media_type = format!("image/{subtype}");
                let asset = SourceAsset::new(bytes, media_type.clone());
                let decoded = SourceAsset::from_data_url(&asset.to_data_url()).unwrap();
                prop_assert_eq!(decoded.media_type(), media_type.as_str());
                prop_assert_eq!(decoded.bytes(), asset.bytes());
            }
        }
    }
}
