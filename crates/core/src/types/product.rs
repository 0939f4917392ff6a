//! Catalog products and their variants.
//!
//! Products are read from the catalog JSON file. Only the fields the checkout
//! needs are typed; everything else (names, descriptions, categories) is kept
//! in `extra` so the catalog can be served back unchanged.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier, also used as the cart line identifier.
    pub id: String,
    /// Purchasable variants. A variant id can be put in the cart directly.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub variants: Vec<Variant>,
    /// Unit price in minor currency units. Anything but a whole number is
    /// treated as missing.
    #[serde(
        default,
        deserialize_with = "lenient_minor_units",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<i64>,
    /// Cannot be shipped; must be collected in the store. Any truthy value
    /// counts.
    #[serde(default, deserialize_with = "truthy")]
    pub pickup_only: bool,
    /// `None` counts as available. Only an explicit `false` hides a product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// Image references (paths or URLs).
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    /// Payment processor price identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_price_id: Option<String>,
    /// Remaining catalog fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A variant of a product (size, weight, scent, ...).
///
/// Variants inherit the pickup-only flag of their parent product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant identifier.
    pub id: String,
    /// Unit price in minor currency units, overrides the product price.
    #[serde(
        default,
        deserialize_with = "lenient_minor_units",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<i64>,
    /// Payment processor price identifier, overrides the product's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_price_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Whether the product is offered at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available != Some(false)
    }

    /// Available and has at least one image to show at checkout.
    #[must_use]
    pub fn is_checkout_ready(&self) -> bool {
        self.is_available() && !self.images.is_empty()
    }

    /// Whether `id` names this product or one of its variants.
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        self.id == id || self.variants.iter().any(|v| v.id == id)
    }

    /// Find a variant by id.
    #[must_use]
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Price identifier for `id`: the variant's when it has one, else the product's.
    ///
    /// Empty identifiers count as missing.
    #[must_use]
    pub fn price_id_for(&self, id: &str) -> Option<&str> {
        self.variant(id)
            .and_then(|v| non_empty(v.stripe_price_id.as_deref()))
            .or_else(|| non_empty(self.stripe_price_id.as_deref()))
    }

    /// Unit price for `id`: the variant's when it has one, else the product's.
    #[must_use]
    pub fn unit_price_for(&self, id: &str) -> Option<i64> {
        self.variant(id).and_then(|v| v.price).or(self.price)
    }
}

/// Find the first product whose id or one of whose variant ids equals `id`.
#[must_use]
pub fn find_product<'a>(catalog: &'a [Product], id: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| p.matches(id))
}

/// Every identifier (product and variant) that cannot be shipped.
#[must_use]
pub fn pickup_only_ids(catalog: &[Product]) -> HashSet<&str> {
    catalog
        .iter()
        .filter(|p| p.pickup_only)
        .flat_map(|p| {
            std::iter::once(p.id.as_str()).chain(p.variants.iter().map(|v| v.id.as_str()))
        })
        .collect()
}

fn non_empty(id: Option<&str>) -> Option<&str> {
    id.filter(|s| !s.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_minor_units<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        _ => None,
    })
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
