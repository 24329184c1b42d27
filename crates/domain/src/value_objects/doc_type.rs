//! DocType - logical partitions inside the search index
//!
//! The search backend groups documents by a literal type tag. The facade
//! pins a handful of them; generic reads accept whatever the caller names.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Type tag selecting a partition within the search index
///
/// Equality and hashing follow the wire tag, so `Custom("orders")` and
/// `Orders` are the same partition.
#[derive(Debug, Clone, Default)]
pub enum DocType {
    /// Catalog products
    #[default]
    Product,
    /// Category tags
    Tags,
    /// Category attributes
    Attributes,
    /// Customer orders
    Orders,
    /// Any other partition named by the caller
    Custom(String),
}

impl DocType {
    /// Wire tag sent to the search backend
    pub fn as_str(&self) -> &str {
        match self {
            DocType::Product => "product",
            DocType::Tags => "tags",
            DocType::Attributes => "attributes",
            DocType::Orders => "orders",
            DocType::Custom(name) => name,
        }
    }
}

impl PartialEq for DocType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for DocType {}

impl Hash for DocType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl FromStr for DocType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for DocType {
    fn from(s: &str) -> Self {
        // Tags are case-sensitive on the backend, so no normalisation here.
        match s {
            "product" => DocType::Product,
            "tags" => DocType::Tags,
            "attributes" => DocType::Attributes,
            "orders" => DocType::Orders,
            custom => DocType::Custom(custom.to_string()),
        }
    }
}

impl From<String> for DocType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DocType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(DocType::from(tag))
    }
}
