//! Image field with automatic dimension capture.
//!
//! When an editor picks an image, the field records its intrinsic size so
//! pages can reserve layout space before the image loads.

use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ureq::Agent;

use crate::error::FieldError;

/// Largest remote image body read while probing.
const MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

/// Intrinsic image size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Source of image dimensions.
pub trait DimensionProbe: Send + Sync {
    /// Determine the dimensions of the image at `src`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be located or decoded.
    fn probe(&self, src: &str) -> Result<Dimensions, FieldError>;
}

/// Value of an image field as stored in a CMS document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageField {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl ImageField {
    /// Set the image source and capture its dimensions.
    ///
    /// An empty `src` clears the field. If probing fails the source is kept,
    /// the dimensions are cleared and a warning is returned.
    pub fn set_src(&mut self, src: &str, probe: &dyn DimensionProbe) -> Option<String> {
        let src = src.trim();
        if src.is_empty() {
            self.clear();
            return None;
        }

        self.src = Some(src.to_owned());
        match probe.probe(src) {
            Ok(dims) => {
                debug!(src, width = dims.width, height = dims.height, "Captured image dimensions");
                self.width = Some(dims.width);
                self.height = Some(dims.height);
                None
            }
            Err(e) => {
                warn!(src, error = %e, "Failed to capture image dimensions");
                self.width = None;
                self.height = None;
                Some(format!("Could not determine dimensions of {src}: {e}"))
            }
        }
    }

    /// Remove the image, resetting dimensions and alt text.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the field has an image.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.src.is_some()
    }
}

/// Probes media in the public directory, falling back to HTTP.
///
/// Absolute `http(s)` sources are fetched only when their origin is the
/// media base URL's origin or one of the allowed origins; any other URL is
/// rejected as unsupported. Other sources are resolved against the public
/// directory; a source not found there is fetched from the media base URL
/// when one is configured.
#[derive(Debug)]
pub struct MediaProbe {
    public_dir: PathBuf,
    media_base_url: Option<String>,
    allowed_origins: Vec<String>,
    agent: Agent,
}

impl MediaProbe {
    #[must_use]
    pub fn new(public_dir: impl Into<PathBuf>, media_base_url: Option<String>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(15)))
            .http_status_as_error(false)
            .build();
        let media_base_url = media_base_url.map(|u| u.trim_end_matches('/').to_owned());
        let allowed_origins = media_base_url.as_deref().and_then(origin).into_iter().collect();
        Self {
            public_dir: public_dir.into(),
            media_base_url,
            allowed_origins,
            agent: config.into(),
        }
    }

    /// Also allow fetching absolute URLs from these origins.
    #[must_use]
    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for origin in origins.into_iter().filter_map(|o| origin(o.as_ref())) {
            if !self.allowed_origins.contains(&origin) {
                self.allowed_origins.push(origin);
            }
        }
        self
    }

    fn is_allowed(&self, url: &str) -> bool {
        origin(url).is_some_and(|o| self.allowed_origins.contains(&o))
    }

    fn local_path(&self, src: &str) -> Result<PathBuf, FieldError> {
        let rel = Path::new(src.trim_start_matches('/'));
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(FieldError::UnsupportedSource(src.to_owned()));
        }
        Ok(self.public_dir.join(rel))
    }

    fn fetch(&self, url: &str) -> Result<Dimensions, FieldError> {
        debug!(url, "Fetching image");
        let response = self.agent.get(url).call()?;
        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FieldError::HttpResponse { status });
        }
        let bytes = response
            .into_body()
            .with_config()
            .limit(MAX_IMAGE_BYTES)
            .read_to_vec()?;
        decode_dimensions(&bytes)
    }
}

impl DimensionProbe for MediaProbe {
    fn probe(&self, src: &str) -> Result<Dimensions, FieldError> {
        if is_http(src) {
            if !self.is_allowed(src) {
                return Err(FieldError::UnsupportedSource(src.to_owned()));
            }
            return self.fetch(src);
        }
        if src.contains("://") || src.starts_with("data:") {
            return Err(FieldError::UnsupportedSource(src.to_owned()));
        }

        let path = self.local_path(src)?;
        if path.is_file() {
            let (width, height) = image::image_dimensions(&path)?;
            return Ok(Dimensions { width, height });
        }

        match &self.media_base_url {
            Some(base) => self.fetch(&format!("{base}/{}", src.trim_start_matches('/'))),
            None => Err(FieldError::Io {
                path,
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }
}

fn is_http(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// `scheme://authority` of an http(s) URL, lowercased.
fn origin(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return None;
    }
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if authority.is_empty() {
        return None;
    }
    Some(format!("{scheme}://{}", authority.to_ascii_lowercase()))
}

/// Read dimensions from an encoded image header.
///
/// # Errors
///
/// Returns an error if the format is unknown or the header is malformed.
pub fn decode_dimensions(bytes: &[u8]) -> Result<Dimensions, FieldError> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?
        .into_dimensions()?;
    Ok(Dimensions { width, height })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::codecs::png::PngEncoder;
    use image::{ImageEncoder, RgbImage};
    use pretty_assertions::assert_eq;

    use super::*;

    struct FixedProbe(Option<Dimensions>);

    impl DimensionProbe for FixedProbe {
        fn probe(&self, src: &str) -> Result<Dimensions, FieldError> {
            self.0
                .ok_or_else(|| FieldError::UnsupportedSource(src.to_owned()))
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([236, 72, 21]));
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buf
    }

    #[test]
    fn test_set_src_captures_dimensions() {
        let mut field = ImageField {
            alt: Some("Diagram".to_owned()),
            ..ImageField::default()
        };

        let probe = FixedProbe(Some(Dimensions {
            width: 640,
            height: 480,
        }));
        let warning = field.set_src("/img/a.png", &probe);

        assert_eq!(warning, None);
        assert_eq!(
            field,
            ImageField {
                src: Some("/img/a.png".to_owned()),
                width: Some(640),
                height: Some(480),
                alt: Some("Diagram".to_owned()),
            }
        );
    }

    #[test]
    fn test_probe_failure_keeps_src() {
        let mut field = ImageField {
            src: Some("/old.png".to_owned()),
            width: Some(1),
            height: Some(1),
            alt: None,
        };

        let warning = field.set_src("/missing.png", &FixedProbe(None));

        assert!(warning.is_some_and(|w| w.contains("/missing.png")));
        assert_eq!(field.src.as_deref(), Some("/missing.png"));
        assert_eq!((field.width, field.height), (None, None));
    }

    #[test]
    fn test_clearing_src_resets_fields() {
        let mut field = ImageField {
            src: Some("/a.png".to_owned()),
            width: Some(10),
            height: Some(20),
            alt: Some("A".to_owned()),
        };

        let warning = field.set_src("", &FixedProbe(None));

        assert_eq!(warning, None);
        assert_eq!(field, ImageField::default());
        assert!(!field.is_set());
    }

    #[test]
    fn test_field_json_shape() {
        let field: ImageField = serde_json::from_str(r#"{"src": "/a.png", "alt": "A"}"#).unwrap();

        assert_eq!(field.width, None);
        assert_eq!(
            serde_json::to_value(ImageField::default()).unwrap(),
            serde_json::json!({"src": null, "width": null, "height": null, "alt": null})
        );
    }

    #[test]
    fn test_media_probe_reads_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/shot.png"), png_bytes(32, 16)).unwrap();

        let probe = MediaProbe::new(dir.path(), None);

        assert_eq!(
            probe.probe("/img/shot.png").unwrap(),
            Dimensions { width: 32, height: 16 }
        );
    }

    #[test]
    fn test_media_probe_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let probe = MediaProbe::new(dir.path(), None);

        assert!(matches!(probe.probe("/nope.png"), Err(FieldError::Io { .. })));
    }

    #[test]
    fn test_media_probe_rejects_escape() {
        let dir = tempfile::tempdir().unwrap();
        let probe = MediaProbe::new(dir.path(), None);

        assert!(matches!(
            probe.probe("../secret.png"),
            Err(FieldError::UnsupportedSource(_))
        ));
        assert!(matches!(
            probe.probe("ftp://host/a.png"),
            Err(FieldError::UnsupportedSource(_))
        ));
    }

    #[test]
    fn test_media_probe_rejects_unlisted_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let probe = MediaProbe::new(dir.path(), None);

        for src in [
            "http://127.0.0.1/x.png",
            "http://169.254.169.254/latest/meta-data",
            "https://internal.local/a.png",
        ] {
            assert!(
                matches!(probe.probe(src), Err(FieldError::UnsupportedSource(_))),
                "{src} should be rejected"
            );
        }
    }

    #[test]
    fn test_media_probe_allowed_origins() {
        let dir = tempfile::tempdir().unwrap();
        let base = Some("https://media.example.com/assets/".to_owned());
        let probe =
            MediaProbe::new(dir.path(), base).with_allowed_origins(["https://CDN.example.com"]);

        assert!(probe.is_allowed("https://media.example.com/other/a.png"));
        assert!(probe.is_allowed("https://cdn.example.com/a.png?v=2"));
        assert!(!probe.is_allowed("http://media.example.com/a.png"));
        assert!(!probe.is_allowed("https://media.example.com.evil.io/a.png"));
        assert!(!probe.is_allowed("https://media.example.com@127.0.0.1/a.png"));
        assert!(matches!(
            probe.probe("http://127.0.0.1/x.png"),
            Err(FieldError::UnsupportedSource(_))
        ));
    }

    #[test]
    fn test_origin() {
        assert_eq!(
            origin("HTTPS://Media.Example.com:8443/a.png").as_deref(),
            Some("https://media.example.com:8443")
        );
        assert_eq!(origin("https://host#frag").as_deref(), Some("https://host"));
        assert_eq!(origin("ftp://host/a.png"), None);
        assert_eq!(origin("https:///a.png"), None);
    }

    #[test]
    fn test_decode_dimensions() {
        assert_eq!(
            decode_dimensions(&png_bytes(3, 7)).unwrap(),
            Dimensions { width: 3, height: 7 }
        );
        assert!(decode_dimensions(b"not an image").is_err());
    }
}
