//! API reference extraction for Shelf.
//!
//! Parses OpenAPI 3.x and Swagger 2.0 JSON documents into a flat list of
//! [`Endpoint`]s that documentation pages render:
//!
//! - Operations are listed in document order, methods in the order
//!   `get put post delete options head patch trace`
//! - Path-level parameters are merged into each operation (operation-level
//!   parameters with the same name and location win)
//! - Local `$ref`s are resolved; recursive schemas are left as `$ref` at the
//!   point of recursion
//! - Swagger `body` and `formData` parameters become a [`RequestBody`]
//! - Descriptions are rendered from CommonMark to HTML
//!
//! # Example
//!
//! ```
//! let spec = shelf_openapi::parse_str(
//!     r#"{"openapi": "3.0.0", "info": {"title": "Pets", "version": "1"},
//!         "paths": {"/pets": {"get": {"responses": {"200": {"description": "OK"}}}}}}"#,
//! )?;
//!
//! assert_eq!(spec.endpoints[0].path, "/pets");
//! # Ok::<(), shelf_openapi::OpenApiError>(())
//! ```

mod error;
mod library;
mod markdown;
mod model;
mod parse;
mod resolve;

pub use error::OpenApiError;
pub use library::SpecLibrary;
pub use markdown::render_markdown;
pub use model::{
    ApiSpec, DEFAULT_TAG, Endpoint, Method, Parameter, ParameterLocation, RequestBody, Response,
    Tag, TagGroup,
};
pub use parse::{parse, parse_str};
