//! Catalog inspection.

use std::path::Path;

use checkout_core::{CurrencyCode, Price, Product};
use checkout_storefront::catalog::CatalogLoader;

/// Print one row per product and variant.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or parsed. Unlike the
/// server, the CLI does not fall back to an empty catalog.
pub async fn list(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let products = CatalogLoader::new(path).try_load().await?;

    println!(
        "{:<32} {:>10}  {:<24} {:<7} READY",
        "ID", "PRICE", "STRIPE PRICE", "PICKUP"
    );
    for product in &products {
        for row in rows(product) {
            println!("{row}");
        }
    }

    let ready = products.iter().filter(|p| p.is_checkout_ready()).count();
    println!();
    println!("{} products, {ready} ready for checkout", products.len());

    Ok(())
}

fn rows(product: &Product) -> Vec<String> {
    let ready = if product.is_checkout_ready() { "yes" } else { "no" };
    let pickup = if product.pickup_only { "yes" } else { "no" };

    let mut rows = vec![format!(
        "{:<32} {:>10}  {:<24} {:<7} {ready}",
        product.id,
        format_price(product.price),
        product.stripe_price_id.as_deref().unwrap_or("-"),
        pickup,
    )];

    for variant in &product.variants {
        rows.push(format!(
            "  {:<30} {:>10}  {:<24} {:<7} {ready}",
            variant.id,
            format_price(product.unit_price_for(&variant.id)),
            product.price_id_for(&variant.id).unwrap_or("-"),
            pickup,
        ));
    }

    rows
}

fn format_price(minor_units: Option<i64>) -> String {
    minor_units.map_or_else(
        || "-".to_string(),
        |units| Price::from_minor_units(units, CurrencyCode::EUR).to_string(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_include_variants_with_inherited_values() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "honey",
                "price": 800,
                "images": ["honey.jpg"],
                "pickup_only": true,
                "stripe_price_id": "price_honey",
                "variants": [{ "id": "honey-1kg", "price": 1500 }]
            }"#,
        )
        .unwrap();

        let rows = rows(&product);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("honey "));
        assert!(rows[0].contains("€8.00"));
        assert!(rows[0].ends_with("yes"));
        assert!(rows[1].contains("honey-1kg"));
        assert!(rows[1].contains("€15.00"));
        assert!(rows[1].contains("price_honey"));
    }

    #[test]
    fn test_missing_price_is_dash() {
        assert_eq!(format_price(None), "-");
        assert_eq!(format_price(Some(1999)), "€19.99");
    }
}
