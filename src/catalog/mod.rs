//! Item catalog
//!
//! A static, read-only list of ranking candidates with stable identifiers.
//! The ranking engine never writes to it; selections copy items out of it.

pub mod park;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CatalogError;
use crate::ranking::traits::Rankable;

pub use park::{national_parks, Park};

/// Read-only collection of candidates indexed by id
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<T>",
    into = "Vec<T>",
    bound(
        serialize = "T: Serialize + Rankable",
        deserialize = "T: for<'a> Deserialize<'a> + Rankable"
    )
)]
pub struct Catalog<T: Rankable> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Rankable> Catalog<T> {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(items: Vec<T>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.id().to_string(), i).is_some() {
                return Err(CatalogError::DuplicateId(item.id().to_string()));
            }
        }
        Ok(Self { items, index })
    }

    /// Load a catalog from a JSON array of items
    pub fn from_json(json: &str) -> Result<Self, CatalogError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let items: Vec<T> = serde_json::from_str(json).map_err(|e| {
            CatalogError::Deserialization(format!("Failed to parse catalog: {}", e))
        })?;
        Self::new(items)
    }

    /// Look up an item by id
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).and_then(|&i| self.items.get(i))
    }

    /// Look up an item by id, failing if it is unknown
    pub fn require(&self, id: &str) -> Result<&T, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownId(id.to_string()))
    }

    /// Check whether the catalog has an item with `id`
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All items in catalog order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Catalog<Park> {
    /// The built-in national park catalog
    pub fn national_parks() -> Self {
        let parks = national_parks();
        let index = parks
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            items: parks,
            index,
        }
    }
}

impl<T: Rankable> TryFrom<Vec<T>> for Catalog<T> {
    type Error = CatalogError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<T: Rankable> From<Catalog<T>> for Vec<T> {
    fn from(catalog: Catalog<T>) -> Self {
        catalog.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_parks_lookup() {
        let catalog = Catalog::national_parks();
        assert_eq!(catalog.len(), 62);
        let grca = catalog.get("grca").map(|p| p.name.as_str());
        assert_eq!(grca, Some("Grand Canyon"));
        assert!(catalog.contains("yell"));
        assert!(catalog.get("nope").is_none());
        assert!(matches!(
            catalog.require("nope"),
            Err(CatalogError::UnknownId(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![
            Park::new("acad", "Acadia", "Maine", 1916),
            Park::new("acad", "Acadia again", "Maine", 1916),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "acad"));
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[
            {"id": "a", "name": "Alpha", "state": "X", "established": 1900},
            {"id": "b", "name": "Beta", "state": "Y", "established": 1950}
        ]"#;
        let catalog: Catalog<Park> = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[1].name, "Beta");

        assert!(matches!(
            Catalog::<Park>::from_json("[{]"),
            Err(CatalogError::Deserialization(_))
        ));
    }

    #[test]
    fn test_catalog_serde_roundtrip_revalidates() {
        let items = vec!["x".to_string(), "y".to_string()];
        let catalog = Catalog::new(items).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"["x","y"]"#);

        let dup: Result<Catalog<String>, _> = serde_json::from_str(r#"["x","x"]"#);
        assert!(dup.is_err());
    }
}
