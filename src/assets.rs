//! Background asset loading
//!
//! The background is published as a small JSON document with one field
//! holding a Base64 image. It is fetched once per render, before any page
//! is produced; any failure aborts that render.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use log::debug;

use crate::error::{RendererError, RendererResult};
use crate::image_utils::{prepare_image, EmbeddedImage};
use crate::json_helpers;

/// Field of the asset document holding the Base64 image
pub const DEFAULT_ASSET_KEY: &str = "image";

/// Decoded page background, ready to embed
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    image: EmbeddedImage,
}

impl BackgroundImage {
    /// Decode raw image bytes (PNG, JPEG, ...)
    pub fn from_bytes(bytes: &[u8]) -> RendererResult<Self> {
        let image = prepare_image(bytes).map_err(|e| match e {
            RendererError::ImageError(msg) => RendererError::AssetDecode(msg),
            other => other,
        })?;
        Ok(Self { image })
    }

    /// Decode a Base64 payload, with or without a `data:<mime>;base64,` prefix
    pub fn from_base64(payload: &str) -> RendererResult<Self> {
        let payload = payload.trim();
        let payload = match payload.strip_prefix("data:") {
            Some(rest) => rest
                .split_once(',')
                .map(|(_, data)| data)
                .ok_or_else(|| RendererError::AssetDecode("data URI without payload".to_string()))?,
            None => payload,
        };
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = general_purpose::STANDARD.decode(compact)?;
        Self::from_bytes(&bytes)
    }

    /// Decode the asset JSON document and read the image from `key`
    pub fn from_asset_json(json: &str, key: &str) -> RendererResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| RendererError::AssetDecode(format!("asset document is not JSON: {}", e)))?;
        let payload = json_helpers::get_str(&value, key)
            .map_err(|_| RendererError::AssetDecode(format!("asset document has no string field '{}'", key)))?;
        Self::from_base64(payload)
    }

    pub fn image(&self) -> &EmbeddedImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width, self.image.height)
    }
}

/// Where the background comes from. Called once per render.
pub trait AssetSource {
    fn fetch(&self) -> RendererResult<BackgroundImage>;
}

impl<F> AssetSource for F
where
    F: Fn() -> RendererResult<BackgroundImage>,
{
    fn fetch(&self) -> RendererResult<BackgroundImage> {
        self()
    }
}

/// Asset document stored on disk (the statically served file)
#[derive(Debug, Clone)]
pub struct JsonFileAsset {
    path: PathBuf,
    key: String,
}

impl JsonFileAsset {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_key(path, DEFAULT_ASSET_KEY)
    }

    pub fn with_key(path: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            key: key.to_string(),
        }
    }
}

impl AssetSource for JsonFileAsset {
    fn fetch(&self) -> RendererResult<BackgroundImage> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            RendererError::AssetFetch(format!("{}: {}", self.path.display(), e))
        })?;
        debug!("Loaded asset document {} ({} bytes)", self.path.display(), json.len());
        BackgroundImage::from_asset_json(&json, &self.key)
    }
}

/// Asset document already held in memory
#[derive(Debug, Clone)]
pub struct JsonBytesAsset {
    json: String,
    key: String,
}

impl JsonBytesAsset {
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json: json.into(),
            key: DEFAULT_ASSET_KEY.to_string(),
        }
    }
}

impl AssetSource for JsonBytesAsset {
    fn fetch(&self) -> RendererResult<BackgroundImage> {
        BackgroundImage::from_asset_json(&self.json, &self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_utils::fixtures;

    fn encoded_png() -> String {
        general_purpose::STANDARD.encode(fixtures::png_bytes(2, 3))
    }

    #[test]
    fn test_from_asset_json() {
        let json = format!(r#"{{"image": "{}"}}"#, encoded_png());
        let bg = BackgroundImage::from_asset_json(&json, "image").unwrap();
        assert_eq!(bg.dimensions(), (2, 3));
    }

    #[test]
    fn test_data_uri_prefix_is_stripped() {
        let bg = BackgroundImage::from_base64(&format!("data:image/png;base64,{}", encoded_png())).unwrap();
        assert_eq!(bg.dimensions(), (2, 3));
    }

    #[test]
    fn test_decode_failures_are_asset_decode_errors() {
        let missing_key = BackgroundImage::from_asset_json(r#"{"img": "abc"}"#, "image");
        assert!(matches!(missing_key, Err(RendererError::AssetDecode(_))));

        let not_json = BackgroundImage::from_asset_json("<html>", "image");
        assert!(matches!(not_json, Err(RendererError::AssetDecode(_))));

        let bad_base64 = BackgroundImage::from_base64("***");
        assert!(matches!(bad_base64, Err(RendererError::AssetDecode(_))));

        let not_an_image = BackgroundImage::from_base64(&general_purpose::STANDARD.encode(b"hello"));
        assert!(matches!(not_an_image, Err(RendererError::AssetDecode(_))));
    }

    #[test]
    fn test_missing_file_is_fetch_error() {
        let source = JsonFileAsset::new("/nonexistent/rundown-background.json");
        assert!(matches!(source.fetch(), Err(RendererError::AssetFetch(_))));
    }

    #[test]
    fn test_file_asset_round_trip() {
        let path = std::env::temp_dir().join(format!("rundown-asset-{}.json", std::process::id()));
        std::fs::write(&path, format!(r#"{{"background": "{}"}}"#, encoded_png())).unwrap();
        let bg = JsonFileAsset::with_key(&path, "background").fetch().unwrap();
        assert_eq!(bg.dimensions(), (2, 3));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_closure_source() {
        let failing = || -> RendererResult<BackgroundImage> {
            Err(RendererError::AssetFetch("offline".to_string()))
        };
        assert!(failing.fetch().is_err());
        assert!(JsonBytesAsset::new(format!(r#"{{"image": "{}"}}"#, encoded_png())).fetch().is_ok());
    }
}
