//! Product catalog loading.
//!
//! The catalog is a JSON array of products on disk. It is re-read on every
//! call so edits to the file show up without a restart.

use std::path::{Path, PathBuf};

use checkout_core::Product;
use thiserror::Error;

/// Reasons a catalog file could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the product catalog from a JSON file.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog, falling back to an empty one.
    ///
    /// Read and parse failures are logged and never reach the caller.
    pub async fn load(&self) -> Vec<Product> {
        match self.try_load().await {
            Ok(products) => {
                let ready = products.iter().filter(|p| p.is_checkout_ready()).count();
                tracing::info!(
                    path = %self.path.display(),
                    total = products.len(),
                    checkout_ready = ready,
                    "Catalog loaded"
                );
                products
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog, serving empty catalog");
                Vec::new()
            }
        }
    }

    /// Load the catalog, returning the failure instead of degrading.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or is not a JSON
    /// array of products.
    pub async fn try_load(&self) -> Result<Vec<Product>, CatalogError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn catalog_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_products() {
        let file = catalog_file(
            r#"[
                {"id": "soap-500g", "price": 500, "images": ["soap.jpg"], "stripe_price_id": "price_soap"},
                {"id": "cake", "price": 3000, "pickup_only": true, "available": false}
            ]"#,
        );

        let products = CatalogLoader::new(file.path()).load().await;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "soap-500g");
        assert!(products[0].is_checkout_ready());
        assert!(products[1].pickup_only);
        assert!(!products[1].is_checkout_ready());
    }

    #[tokio::test]
    async fn test_null_fields_do_not_drop_catalog() {
        let file = catalog_file(
            r#"[
                {"id": "soap", "price": 4.99, "variants": null, "images": null, "stripe_price_id": "price_soap"},
                {"id": "jam", "price": 800, "pickup_only": null, "images": ["jam.jpg"], "stripe_price_id": "price_jam"}
            ]"#,
        );
        let loader = CatalogLoader::new(file.path());

        let products = loader.try_load().await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products[0].variants.is_empty());
        assert!(products[0].images.is_empty());
        assert_eq!(products[0].price, None);
        assert!(!products[1].pickup_only);
        assert!(products[1].is_checkout_ready());
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CatalogLoader::new(dir.path().join("products.json"));

        assert!(loader.load().await.is_empty());
        assert!(matches!(
            loader.try_load().await,
            Err(CatalogError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_yields_empty_catalog() {
        let file = catalog_file(r#"{"id": "not-an-array"}"#);
        let loader = CatalogLoader::new(file.path());

        assert!(loader.load().await.is_empty());
        assert!(matches!(
            loader.try_load().await,
            Err(CatalogError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_changes_are_picked_up_without_restart() {
        let file = catalog_file("[]");
        let loader = CatalogLoader::new(file.path());
        assert!(loader.load().await.is_empty());

        std::fs::write(file.path(), r#"[{"id": "honey"}]"#).unwrap();
        assert_eq!(loader.load().await.len(), 1);
    }
}
