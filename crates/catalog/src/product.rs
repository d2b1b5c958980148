//! Product records as loaded from the snapshot files.

use serde::{Deserialize, Deserializer, Serialize};

use lumina_core::{Price, ProductId};

/// A category label from the deployment's category manifest.
///
/// The manifest (not a hard-coded enum) defines the fixed set, so this is
/// a comparison-friendly newtype rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CategoryName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A catalog product. Immutable for the duration of a session.
///
/// The snapshot files are hand-maintained, so deserialization is lenient:
/// ids and prices accept both JSON numbers and strings, `image` accepts a
/// single URL or a list, and a missing `category` is back-filled by the
/// loader from the file it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: Option<CategoryName>,
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, deserialize_with = "de_images")]
    pub image: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// First image URL, the one product cards show.
    pub fn primary_image(&self) -> Option<&str> {
        self.image.first().map(String::as_str)
    }

    pub fn category_str(&self) -> &str {
        self.category.as_ref().map(CategoryName::as_str).unwrap_or("")
    }
}

fn de_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::One(url)) => vec![url],
        Some(Raw::Many(urls)) => urls,
        None => Vec::new(),
    })
}
