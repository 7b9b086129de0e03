use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::info;

use super::products::ProductCatalog;
use super::schema::ValidationSchema;

/// Supplies the validation schema and product catalog for the running session.
pub trait ReferenceDataSource: Send + Sync {
    fn validation_schema(&self) -> Result<Arc<ValidationSchema>, ReferenceDataError>;
    fn product_catalog(&self) -> Result<Arc<ProductCatalog>, ReferenceDataError>;
}

/// Reference data could not be produced. Callers may retry.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("reference data unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("product catalog contains no products")]
    EmptyCatalog,
}

/// Reference data fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct StaticReferenceData {
    schema: Arc<ValidationSchema>,
    catalog: Arc<ProductCatalog>,
}

impl Default for StaticReferenceData {
    fn default() -> Self {
        Self::standard()
    }
}

impl StaticReferenceData {
    pub fn new(schema: ValidationSchema, catalog: ProductCatalog) -> Result<Self, ReferenceDataError> {
        if catalog.is_empty() {
            return Err(ReferenceDataError::EmptyCatalog);
        }

        Ok(Self {
            schema: Arc::new(schema),
            catalog: Arc::new(catalog),
        })
    }

    pub fn standard() -> Self {
        Self {
            schema: Arc::new(ValidationSchema::standard()),
            catalog: Arc::new(ProductCatalog::standard()),
        }
    }

    /// Load overrides from JSON files, falling back to the built-in data for any path not given.
    pub fn from_paths(
        schema_path: Option<&Path>,
        products_path: Option<&Path>,
    ) -> Result<Self, ReferenceDataError> {
        let schema = match schema_path {
            Some(path) => {
                let schema = read_json::<ValidationSchema>(path)?;
                info!(path = %path.display(), "loaded validation rules");
                schema
            }
            None => ValidationSchema::standard(),
        };

        let catalog = match products_path {
            Some(path) => {
                let catalog = read_json::<ProductCatalog>(path)?;
                info!(path = %path.display(), products = catalog.products.len(), "loaded product catalog");
                catalog
            }
            None => ProductCatalog::standard(),
        };

        Self::new(schema, catalog)
    }
}

impl ReferenceDataSource for StaticReferenceData {
    fn validation_schema(&self) -> Result<Arc<ValidationSchema>, ReferenceDataError> {
        Ok(Arc::clone(&self.schema))
    }

    fn product_catalog(&self) -> Result<Arc<ProductCatalog>, ReferenceDataError> {
        Ok(Arc::clone(&self.catalog))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReferenceDataError> {
    let file = File::open(path).map_err(|source| ReferenceDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ReferenceDataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
