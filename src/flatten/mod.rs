use crate::model::{Characteristic, FieldValue, NO_CATEGORY, OutputRow, Product, Sku};
use crate::sanitize::{clean_text, clean_value};

/// Characteristic marker for lot-controlled products.
pub const LOT_MARKER: &str = "Lote";
/// Characteristic marker for products with an expiry date.
pub const EXPIRY_MARKER: &str = "Data de Validade";

/// Flattens every product, preserving product and SKU order.
pub fn flatten_products(products: &[Product]) -> Vec<OutputRow> {
    products.iter().flat_map(flatten_product).collect()
}

/// Expands a product into one row per SKU. Products without SKUs produce no
/// rows.
pub fn flatten_product(product: &Product) -> Vec<OutputRow> {
    let category = category_label(product);
    let has_lot_control = has_characteristic(&product.characteristics, LOT_MARKER);
    let has_expiry_control = has_characteristic(&product.characteristics, EXPIRY_MARKER);

    let code = clean_value(product.code.clone());
    let description = clean_value(product.commercial_description.clone());
    let unit_of_measure = clean_value(product.unit_of_measure.clone());

    product
        .skus
        .iter()
        .map(|sku| OutputRow {
            code: code.clone(),
            description: description.clone(),
            category: category.clone(),
            unit_of_measure: unit_of_measure.clone(),
            sku_description: clean_value(sku.description.clone()),
            barcode: first_barcode(sku),
            sku_situation: clean_value(sku.situation.clone()),
            has_lot_control,
            has_expiry_control,
        })
        .collect()
}

/// Sanitized category description, or [`NO_CATEGORY`] when the product has no
/// category object or the object has no textual description.
pub fn category_label(product: &Product) -> String {
    product
        .category
        .as_ref()
        .and_then(|category| category.description.as_deref())
        .map(clean_text)
        .unwrap_or_else(|| NO_CATEGORY.to_string())
}

/// Case-sensitive substring match against the characteristic descriptions.
pub fn has_characteristic(characteristics: &[Characteristic], marker: &str) -> bool {
    characteristics.iter().any(|characteristic| {
        characteristic
            .description
            .as_text()
            .is_some_and(|description| description.contains(marker))
    })
}

/// Value of the first barcode entry. A missing list, an empty list, or a
/// malformed first entry all give an empty string.
pub fn first_barcode(sku: &Sku) -> FieldValue {
    match sku.barcodes.first() {
        Some(Some(barcode)) if !barcode.value.is_empty() => clean_value(barcode.value.clone()),
        _ => FieldValue::Text(String::new()),
    }
}
