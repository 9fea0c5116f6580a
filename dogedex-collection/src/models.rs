//! Collection domain models
//!
//! `CatalogItem` and `OwnershipRecord` come from the two sources;
//! `CollectionEntry` is what the reconciler hands to presenters.

use dogedex_common::api::DogDto;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entry in the reference catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    /// Ordinal position in the catalog (1-based on the public API)
    pub index: u32,
    pub name: String,
    pub category: String,
    /// Remaining descriptive fields (height, weight, temperament, ...)
    pub attributes: BTreeMap<String, String>,
    pub image_ref: String,
}

impl CatalogItem {
    /// Item with only identity and name set
    pub fn new(id: i64, index: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            index,
            name: name.into(),
            category: String::new(),
            attributes: BTreeMap::new(),
            image_ref: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }
}

impl From<DogDto> for CatalogItem {
    fn from(dto: DogDto) -> Self {
        let attributes = [
            ("height_female", dto.height_female),
            ("height_male", dto.height_male),
            ("life_expectancy", dto.life_expectancy),
            ("temperament", dto.temperament),
            ("weight_female", dto.weight_female),
            ("weight_male", dto.weight_male),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_string(), value))
        .collect();

        Self {
            id: dto.id,
            index: dto.index,
            name: dto.name,
            category: dto.dog_type,
            attributes,
            image_ref: dto.image_url,
        }
    }
}

/// Identity of a catalog item owned by the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnershipRecord {
    pub item_id: i64,
}

impl OwnershipRecord {
    pub fn new(item_id: i64) -> Self {
        Self { item_id }
    }
}

impl From<&CatalogItem> for OwnershipRecord {
    fn from(item: &CatalogItem) -> Self {
        Self::new(item.id)
    }
}

impl From<DogDto> for OwnershipRecord {
    fn from(dto: DogDto) -> Self {
        Self::new(dto.id)
    }
}

/// Catalog item annotated with ownership
///
/// Unowned entries carry only `id` and `index`; every descriptive field is
/// empty so the item is not revealed until collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: i64,
    pub index: u32,
    pub name: String,
    pub category: String,
    pub attributes: BTreeMap<String, String>,
    pub image_ref: String,
    pub owned: bool,
}

impl CollectionEntry {
    /// Owned entry keeping every field of the catalog item
    pub fn owned(item: CatalogItem) -> Self {
        Self {
            id: item.id,
            index: item.index,
            name: item.name,
            category: item.category,
            attributes: item.attributes,
            image_ref: item.image_ref,
            owned: true,
        }
    }

    /// Unowned entry revealing only position
    pub fn unowned(id: i64, index: u32) -> Self {
        Self {
            id,
            index,
            name: String::new(),
            category: String::new(),
            attributes: BTreeMap::new(),
            image_ref: String::new(),
            owned: false,
        }
    }
}
