//! API reference model.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// HTTP method of an operation, in the order operations are listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    /// All methods in listing order.
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Key of the operation inside a path item.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.key().to_ascii_uppercase())
    }
}

/// Where a parameter is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

/// Operation parameter (path, query, header or cookie).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    /// Description rendered to HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema with local references inlined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Request payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub content_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Documented response of an operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Status code or `default`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Single operation on a path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: Vec<Response>,
}

impl Endpoint {
    /// Stable anchor id for linking to the endpoint.
    #[must_use]
    pub fn anchor(&self) -> String {
        if let Some(id) = &self.operation_id {
            return id.clone();
        }
        let mut anchor = self.method.key().to_owned();
        for c in self.path.chars() {
            if c.is_ascii_alphanumeric() {
                anchor.push(c.to_ascii_lowercase());
            } else if !anchor.ends_with('-') {
                anchor.push('-');
            }
        }
        anchor.trim_end_matches('-').to_owned()
    }
}

/// Tag declared at the top level of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Endpoints sharing a tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TagGroup<'a> {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub endpoints: Vec<&'a Endpoint>,
}

/// Tag used for endpoints without one.
pub const DEFAULT_TAG: &str = "default";

/// Parsed API description.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpec {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub endpoints: Vec<Endpoint>,
}

impl ApiSpec {
    /// Group endpoints by tag.
    ///
    /// Declared tags come first in declaration order, then undeclared tags
    /// in order of first use. An endpoint with several tags appears in each
    /// group; untagged endpoints go to [`DEFAULT_TAG`]. Empty groups are
    /// omitted.
    #[must_use]
    pub fn group_by_tag(&self) -> Vec<TagGroup<'_>> {
        let mut groups: Vec<TagGroup<'_>> = self
            .tags
            .iter()
            .map(|t| TagGroup {
                tag: t.name.clone(),
                description: t.description.as_deref(),
                endpoints: Vec::new(),
            })
            .collect();

        for endpoint in &self.endpoints {
            let tags: Vec<&str> = if endpoint.tags.is_empty() {
                vec![DEFAULT_TAG]
            } else {
                endpoint.tags.iter().map(String::as_str).collect()
            };
            for tag in tags {
                match groups.iter_mut().find(|g| g.tag == tag) {
                    Some(group) => group.endpoints.push(endpoint),
                    None => groups.push(TagGroup {
                        tag: tag.to_owned(),
                        description: None,
                        endpoints: vec![endpoint],
                    }),
                }
            }
        }

        groups.retain(|g| !g.endpoints.is_empty());
        groups
    }
}
