//! Custom CMS editor fields for Shelf.
//!
//! - [`ImageField`]: records an image's intrinsic size when its source is set
//! - [`ThemeSelector`]: validates theme choices against the configured themes

mod error;
mod image_field;
mod theme;

pub use error::FieldError;
pub use image_field::{DimensionProbe, Dimensions, ImageField, MediaProbe, decode_dimensions};
pub use theme::{Theme, ThemeSelector};
