//! Directory of API description files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::OpenApiError;
use crate::model::ApiSpec;
use crate::parse::parse_str;

/// API descriptions stored as `<name>.json` files in one directory.
#[derive(Clone, Debug)]
pub struct SpecLibrary {
    dir: PathBuf,
}

impl SpecLibrary {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of available specs, sorted. A missing directory has none.
    ///
    /// # Errors
    ///
    /// Returns `OpenApiError::Io` if the directory cannot be read.
    pub fn names(&self) -> Result<Vec<String>, OpenApiError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(OpenApiError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "json"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_owned))
            .filter(|name| is_valid_name(name))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Load and parse the reference document called `name`.
    ///
    /// # Errors
    ///
    /// Returns `OpenApiError::InvalidName` for names with path characters,
    /// `OpenApiError::NotFound` if no such file exists, and parse errors
    /// otherwise.
    pub fn load(&self, name: &str) -> Result<ApiSpec, OpenApiError> {
        if !is_valid_name(name) {
            return Err(OpenApiError::InvalidName(name.to_owned()));
        }
        let path = self.dir.join(format!("{name}.json"));
        debug!(path = %path.display(), "Loading API description");

        let source = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                OpenApiError::NotFound(name.to_owned())
            } else {
                OpenApiError::Io { path, source }
            }
        })?;
        parse_str(&source)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
