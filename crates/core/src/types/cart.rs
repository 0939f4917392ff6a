//! Cart lines as submitted by the browser.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A requested cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product or variant identifier.
    pub id: String,
    /// Requested quantity. Missing, zero, negative, fractional or
    /// non-numeric values all become 1.
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub qty: u32,
}

impl CartLine {
    /// Create a cart line.
    #[must_use]
    pub fn new(id: impl Into<String>, qty: u32) -> Self {
        Self {
            id: id.into(),
            qty: if qty == 0 { 1 } else { qty },
        }
    }
}

const fn default_quantity() -> u32 {
    1
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(quantity_from_value(&value).unwrap_or_else(default_quantity))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantity_from_value(value: &Value) -> Option<u32> {
    let qty = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        })?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(qty).ok().filter(|&q| q > 0)
}
