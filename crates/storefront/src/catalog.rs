//! Product variant catalog.
//!
//! The cart store resolves line items against this catalog. It is loaded once
//! at startup from a JSON array of variants in the same camelCase shape the
//! cart payloads use.

use std::collections::HashMap;
use std::path::Path;

use cart_sidebar_core::{ProductVariant, VariantId};
use thiserror::Error;

/// Errors loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a valid variant list.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share a variant ID.
    #[error("duplicate variant in catalog: {0}")]
    DuplicateVariant(VariantId),
}

/// In-memory variant lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    variants: HashMap<VariantId, ProductVariant>,
}

impl Catalog {
    /// Build a catalog from a list of variants.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateVariant` if two variants share an ID.
    pub fn from_variants(
        variants: impl IntoIterator<Item = ProductVariant>,
    ) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();
        for variant in variants {
            let id = variant.id.clone();
            if map.insert(id.clone(), variant).is_some() {
                return Err(CatalogError::DuplicateVariant(id));
            }
        }
        Ok(Self { variants: map })
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or contains duplicates.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let variants: Vec<ProductVariant> = serde_json::from_str(json)?;
        Self::from_variants(variants)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            variants = catalog.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Look up a variant by ID.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant> {
        self.variants.get(id)
    }

    /// Number of variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the catalog has no variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "id": "v1",
            "name": "M",
            "sku": "SHIRT-M",
            "quantityAvailable": 5,
            "pricing": { "price": { "gross": { "amount": "20.00" } } },
            "product": { "id": "p1", "name": "Shirt" }
        },
        { "id": "v2", "name": "One size" }
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let shirt = catalog.variant(&VariantId::new("v1")).unwrap();
        assert_eq!(shirt.sku.as_deref(), Some("SHIRT-M"));
        assert!(shirt.unit_price().is_some());

        let unpriced = catalog.variant(&VariantId::new("v2")).unwrap();
        assert!(unpriced.unit_price().is_none());
        assert!(catalog.variant(&VariantId::new("missing")).is_none());
    }

    #[test]
    fn test_duplicate_variant() {
        let json = r#"[{ "id": "v1" }, { "id": "v1" }]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateVariant(id) if id.as_str() == "v1"));
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/catalog.json");
        let catalog = Catalog::from_path(&path).unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
