//! Request-type catalog loading and lookup.
//!
//! The catalog lives in a `request-types/` directory: `catalog.toml` maps
//! request type codes to the human descriptions the portal expects in its
//! query strings, and each implemented type has a `<CODE>.toml` document
//! with its field definitions.

use crate::definition::FieldDefinitions;
use crate::error::{CatalogError, Result};
use intake_core::RequestType;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// On-disk shape of `catalog.toml`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    /// Request type code -> human description
    types: BTreeMap<String, String>,
}

/// Catalog of request types and their field definition documents.
///
/// The catalog table is loaded eagerly; field definition documents are
/// loaded on demand per request type. A type present in the table without
/// a definition document is *known but unimplemented*, which is a distinct
/// failure from an unknown code.
#[derive(Debug, Clone)]
pub struct RequestCatalog {
    /// Request type code -> human description
    types: BTreeMap<String, String>,

    /// Directory holding the per-type definition documents
    definitions_dir: PathBuf,
}

impl RequestCatalog {
    /// Open a catalog from the given directory.
    ///
    /// # Errors
    /// Returns error if the directory or its `catalog.toml` is missing or
    /// unparseable.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        if !dir.is_dir() {
            return Err(CatalogError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let catalog_path = dir.join("catalog.toml");
        let contents =
            std::fs::read_to_string(&catalog_path).map_err(|e| CatalogError::LoadError {
                path: catalog_path.display().to_string(),
                source: e,
            })?;

        let file: CatalogFile = toml::from_str(&contents).map_err(|e| CatalogError::ParseError {
            path: catalog_path.display().to_string(),
            source: e,
        })?;

        info!(
            count = file.types.len(),
            dir = %dir.display(),
            "loaded request-type catalog"
        );

        Ok(Self {
            types: file.types,
            definitions_dir: dir,
        })
    }

    /// Open the catalog from the default `request-types/` directory.
    ///
    /// Walks up from the current directory looking for the workspace root
    /// (a `Cargo.toml` containing `[workspace]`).
    ///
    /// # Errors
    /// Returns error if no catalog directory can be found.
    pub fn with_default_dir() -> Result<Self> {
        let mut current_dir = std::env::current_dir()?;

        loop {
            let cargo_toml = current_dir.join("Cargo.toml");
            if cargo_toml.exists() {
                if let Ok(contents) = std::fs::read_to_string(&cargo_toml) {
                    if contents.contains("[workspace]") {
                        return Self::open(current_dir.join("request-types"));
                    }
                }
            }

            if let Some(parent) = current_dir.parent() {
                current_dir = parent.to_path_buf();
            } else {
                break;
            }
        }

        Self::open(PathBuf::from("request-types"))
    }

    /// Look up the human description for a request type.
    ///
    /// # Errors
    /// Returns `UnknownRequestType` if the code is absent from the catalog.
    pub fn lookup(&self, request_type: &RequestType) -> Result<&str> {
        self.types
            .get(request_type.as_str())
            .map(String::as_str)
            .ok_or_else(|| CatalogError::UnknownRequestType {
                code: request_type.as_str().to_string(),
            })
    }

    /// Load the field definitions for a request type.
    ///
    /// # Errors
    /// Returns `UnknownRequestType` if the code is absent from the catalog,
    /// or `NotImplemented` if the code is listed but no definition document
    /// exists for it.
    pub fn field_definitions(&self, request_type: &RequestType) -> Result<FieldDefinitions> {
        // Unknown code and known-but-undefined are different failures.
        self.lookup(request_type)?;

        let path = self.definition_path(request_type);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::NotImplemented {
                    code: request_type.as_str().to_string(),
                });
            }
            Err(e) => {
                return Err(CatalogError::LoadError {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        let definitions: FieldDefinitions =
            toml::from_str(&contents).map_err(|e| CatalogError::ParseError {
                path: path.display().to_string(),
                source: e,
            })?;

        debug!(
            request_type = %request_type,
            fields = definitions.len(),
            "loaded field definitions"
        );

        Ok(definitions)
    }

    /// The full request type code -> description table.
    #[must_use]
    pub fn request_types(&self) -> &BTreeMap<String, String> {
        &self.types
    }

    /// Check whether a request type is listed in the catalog.
    #[must_use]
    pub fn contains(&self, request_type: &RequestType) -> bool {
        self.types.contains_key(request_type.as_str())
    }

    /// Number of request types in the catalog.
    #[must_use]
    pub fn count(&self) -> usize {
        self.types.len()
    }

    /// Build a catalog from an in-memory type table, bypassing `catalog.toml`.
    ///
    /// Definition documents are still resolved against `definitions_dir`.
    #[must_use]
    pub fn from_parts(
        types: BTreeMap<String, String>,
        definitions_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            types,
            definitions_dir: definitions_dir.into(),
        }
    }

    fn definition_path(&self, request_type: &RequestType) -> PathBuf {
        self.definitions_dir
            .join(format!("{}.toml", request_type.as_str()))
    }
}
