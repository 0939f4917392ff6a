//! Domain types for the checkout.

pub mod cart;
pub mod price;
pub mod product;
pub mod shipping;

pub use cart::CartLine;
pub use price::{CurrencyCode, Price};
pub use product::{Product, Variant, find_product, pickup_only_ids};
pub use shipping::{FREE_SHIPPING_THRESHOLD, ShippingRates, ShippingRegion, TierRates, WeightTier};
