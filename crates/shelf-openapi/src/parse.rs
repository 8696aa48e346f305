//! OpenAPI 3.x and Swagger 2.0 parsing.

use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::error::OpenApiError;
use crate::markdown::render_markdown;
use crate::model::{
    ApiSpec, Endpoint, Method, Parameter, ParameterLocation, RequestBody, Response, Tag,
};
use crate::resolve::Resolver;

const JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Keys of a Swagger 2.0 non-body parameter that describe its schema.
const SWAGGER_SCHEMA_KEYS: &[&str] = &[
    "type",
    "format",
    "items",
    "enum",
    "default",
    "minimum",
    "maximum",
    "pattern",
    "collectionFormat",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dialect {
    OpenApi3,
    Swagger2,
}

impl Dialect {
    fn detect(document: &Value) -> Result<Self, OpenApiError> {
        if let Some(version) = document.get("openapi").and_then(Value::as_str) {
            return if version.starts_with("3.") {
                Ok(Self::OpenApi3)
            } else {
                Err(OpenApiError::UnsupportedVersion(format!("openapi {version}")))
            };
        }
        match document.get("swagger").and_then(Value::as_str) {
            Some("2.0") => Ok(Self::Swagger2),
            Some(other) => Err(OpenApiError::UnsupportedVersion(format!("swagger {other}"))),
            None => Err(OpenApiError::UnsupportedVersion(
                "missing 'openapi' or 'swagger' field".to_owned(),
            )),
        }
    }
}

/// Parse an API description from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not JSON or the document is not a
/// supported OpenAPI/Swagger version.
pub fn parse_str(source: &str) -> Result<ApiSpec, OpenApiError> {
    let document: Value = serde_json::from_str(source)?;
    parse(&document)
}

/// Parse an API description document.
///
/// # Errors
///
/// Returns an error for unsupported versions and for path items or
/// operation parts whose `$ref` cannot be resolved.
pub fn parse(document: &Value) -> Result<ApiSpec, OpenApiError> {
    let dialect = Dialect::detect(document)?;
    let parser = SpecParser {
        dialect,
        document,
        resolver: Resolver::new(document),
    };
    parser.parse()
}

struct SpecParser<'a> {
    dialect: Dialect,
    document: &'a Value,
    resolver: Resolver<'a>,
}

impl<'a> SpecParser<'a> {
    fn parse(&self) -> Result<ApiSpec, OpenApiError> {
        let info = self.document.get("info");
        let title = info
            .and_then(|i| str_field(i, "title"))
            .unwrap_or("API")
            .to_owned();
        let version = info
            .and_then(|i| str_field(i, "version"))
            .unwrap_or_default()
            .to_owned();

        let tags = self
            .document
            .get("tags")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|t| {
                Some(Tag {
                    name: str_field(t, "name")?.to_owned(),
                    description: markdown_field(t, "description"),
                })
            })
            .collect();

        let mut endpoints = Vec::new();
        if let Some(paths) = self.document.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                let item = self.resolver.deref(item)?;
                self.parse_path_item(path, item, &mut endpoints)?;
            }
        }
        debug!(title, endpoints = endpoints.len(), "Parsed API description");

        Ok(ApiSpec {
            title,
            version,
            description: info.and_then(|i| markdown_field(i, "description")),
            tags,
            endpoints,
        })
    }

    fn parse_path_item(
        &self,
        path: &str,
        item: &'a Value,
        endpoints: &mut Vec<Endpoint>,
    ) -> Result<(), OpenApiError> {
        let shared = self.raw_parameters(item.get("parameters"))?;

        for method in Method::ALL {
            let Some(operation) = item.get(method.key()) else {
                continue;
            };

            let mut raw = shared.clone();
            for param in self.raw_parameters(operation.get("parameters"))? {
                match raw.iter().position(|p| same_parameter(p, param)) {
                    Some(i) => raw[i] = param,
                    None => raw.push(param),
                }
            }

            endpoints.push(self.parse_operation(method, path, operation, &raw)?);
        }
        Ok(())
    }

    fn raw_parameters(&self, list: Option<&'a Value>) -> Result<Vec<&'a Value>, OpenApiError> {
        list.and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|p| self.resolver.deref(p))
            .collect()
    }

    fn parse_operation(
        &self,
        method: Method,
        path: &str,
        operation: &'a Value,
        raw_parameters: &[&'a Value],
    ) -> Result<Endpoint, OpenApiError> {
        let mut parameters = Vec::new();
        let mut body_param = None;
        let mut form_params = Vec::new();

        for &param in raw_parameters {
            match str_field(param, "in") {
                Some("body") => body_param = Some(param),
                Some("formData") => form_params.push(param),
                Some(location) => match ParameterLocation::parse(location) {
                    Some(location) => parameters.push(self.parameter(param, location)),
                    None => warn!(path, location, "Skipping parameter with unknown location"),
                },
                None => warn!(path, "Skipping parameter without location"),
            }
        }

        let request_body = match self.dialect {
            Dialect::OpenApi3 => operation
                .get("requestBody")
                .map(|body| self.openapi_request_body(body))
                .transpose()?,
            Dialect::Swagger2 => self.swagger_request_body(operation, body_param, &form_params),
        };

        Ok(Endpoint {
            method,
            path: path.to_owned(),
            operation_id: str_field(operation, "operationId").map(str::to_owned),
            summary: str_field(operation, "summary").map(str::to_owned),
            description: markdown_field(operation, "description"),
            tags: operation
                .get("tags")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            deprecated: bool_field(operation, "deprecated"),
            parameters,
            request_body,
            responses: self.responses(operation.get("responses"))?,
        })
    }

    fn parameter(&self, param: &Value, location: ParameterLocation) -> Parameter {
        Parameter {
            name: str_field(param, "name").unwrap_or_default().to_owned(),
            location,
            required: location == ParameterLocation::Path || bool_field(param, "required"),
            description: markdown_field(param, "description"),
            schema: self.parameter_schema(param),
        }
    }

    fn parameter_schema(&self, param: &Value) -> Option<Value> {
        if let Some(schema) = param.get("schema") {
            return Some(self.resolver.expand(schema));
        }
        let inline: Map<String, Value> = SWAGGER_SCHEMA_KEYS
            .iter()
            .filter_map(|&k| param.get(k).map(|v| (k.to_owned(), self.resolver.expand(v))))
            .collect();
        (!inline.is_empty()).then_some(Value::Object(inline))
    }

    fn openapi_request_body(&self, body: &'a Value) -> Result<RequestBody, OpenApiError> {
        let body = self.resolver.deref(body)?;
        let (content_types, schema) = self.media_content(body.get("content"));
        Ok(RequestBody {
            description: markdown_field(body, "description"),
            required: bool_field(body, "required"),
            content_types,
            schema,
        })
    }

    fn swagger_request_body(
        &self,
        operation: &Value,
        body_param: Option<&Value>,
        form_params: &[&Value],
    ) -> Option<RequestBody> {
        let consumes = self.consumes(operation);

        if let Some(param) = body_param {
            return Some(RequestBody {
                description: markdown_field(param, "description"),
                required: bool_field(param, "required"),
                content_types: if consumes.is_empty() {
                    vec![JSON.to_owned()]
                } else {
                    consumes
                },
                schema: param.get("schema").map(|s| self.resolver.expand(s)),
            });
        }

        if form_params.is_empty() {
            return None;
        }
        let content_type = if consumes.iter().any(|c| c == MULTIPART) {
            MULTIPART
        } else {
            FORM_URLENCODED
        };
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in form_params {
            let name = str_field(param, "name").unwrap_or_default();
            if bool_field(param, "required") {
                required.push(Value::from(name));
            }
            let mut schema = self.parameter_schema(param).unwrap_or_else(|| json!({}));
            if let (Some(description), Value::Object(map)) =
                (str_field(param, "description"), &mut schema)
            {
                map.insert("description".to_owned(), Value::from(description));
            }
            properties.insert(name.to_owned(), schema);
        }

        Some(RequestBody {
            description: None,
            required: !required.is_empty(),
            content_types: vec![content_type.to_owned()],
            schema: Some(json!({
                "type": "object",
                "properties": properties,
                "required": required,
            })),
        })
    }

    fn consumes(&self, operation: &Value) -> Vec<String> {
        operation
            .get("consumes")
            .or_else(|| self.document.get("consumes"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    }

    fn responses(&self, responses: Option<&'a Value>) -> Result<Vec<Response>, OpenApiError> {
        let Some(responses) = responses.and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        responses
            .iter()
            .filter(|(status, _)| !status.starts_with("x-"))
            .map(|(status, response)| {
                let response = self.resolver.deref(response)?;
                let schema = match self.dialect {
                    Dialect::OpenApi3 => self.media_content(response.get("content")).1,
                    Dialect::Swagger2 => response.get("schema").map(|s| self.resolver.expand(s)),
                };
                Ok::<_, OpenApiError>(Response {
                    status: status.clone(),
                    description: markdown_field(response, "description"),
                    schema,
                })
            })
            .collect()
    }

    /// Content types of an OpenAPI 3 `content` map and the schema of the
    /// preferred one (JSON when present, else the first).
    fn media_content(&self, content: Option<&Value>) -> (Vec<String>, Option<Value>) {
        let Some(content) = content.and_then(Value::as_object) else {
            return (Vec::new(), None);
        };
        let types = content.keys().cloned().collect();
        let preferred = content
            .get(JSON)
            .or_else(|| content.values().next())
            .and_then(|media| media.get("schema"))
            .map(|schema| self.resolver.expand(schema));
        (types, preferred)
    }
}

fn same_parameter(a: &Value, b: &Value) -> bool {
    str_field(a, "name") == str_field(b, "name") && str_field(a, "in") == str_field(b, "in")
}

fn str_field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value.get(key).and_then(Value::as_str)
}

fn bool_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn markdown_field(value: &Value, key: &str) -> Option<String> {
    str_field(value, key)
        .filter(|s| !s.trim().is_empty())
        .map(render_markdown)
}
