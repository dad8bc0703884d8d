//! Cart line items and the product variant data they resolve to.
//!
//! Field names follow the camelCase shape of the storefront GraphQL API so a
//! cart payload can be deserialized directly.

use serde::{Deserialize, Serialize};

use super::id::{AttributeId, AttributeValueId, CartLineId, ProductId, VariantId};
use super::price::TaxedMoney;

/// Product image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// Image URL.
    pub url: String,
    /// High-density image URL.
    #[serde(default)]
    pub url2x: Option<String>,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt: Option<String>,
}

/// Parent product of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantProduct {
    /// Product ID.
    #[serde(default)]
    pub id: Option<ProductId>,
    /// Product name.
    #[serde(default)]
    pub name: Option<String>,
    /// Product thumbnail.
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

/// Pricing for a single unit of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VariantPricing {
    /// Unit price.
    #[serde(default)]
    pub price: Option<TaxedMoney>,
}

/// Attribute definition (e.g., "Size").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRef {
    /// Attribute ID.
    #[serde(default)]
    pub id: Option<AttributeId>,
    /// Attribute name.
    #[serde(default)]
    pub name: Option<String>,
}

/// One value of an attribute (e.g., "XL").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    /// Value ID.
    #[serde(default)]
    pub id: Option<AttributeValueId>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw value (slug, hex color, ...).
    #[serde(default)]
    pub value: Option<String>,
}

/// An attribute with its selected values, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAttribute {
    /// The attribute.
    pub attribute: AttributeRef,
    /// Selected values. Some payloads contain null entries.
    #[serde(default)]
    pub values: Vec<Option<AttributeValue>>,
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant ID.
    pub id: VariantId,
    /// Variant name (e.g., "XL / Blue").
    #[serde(default)]
    pub name: String,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
    /// Units in stock, when inventory is tracked.
    #[serde(default)]
    pub quantity_available: Option<u32>,
    /// Unit pricing.
    #[serde(default)]
    pub pricing: Option<VariantPricing>,
    /// Parent product.
    #[serde(default)]
    pub product: Option<VariantProduct>,
    /// Selected attributes.
    #[serde(default)]
    pub attributes: Vec<SelectedAttribute>,
}

impl ProductVariant {
    /// Unit price of this variant, if published.
    #[must_use]
    pub fn unit_price(&self) -> Option<&TaxedMoney> {
        self.pricing.as_ref().and_then(|p| p.price.as_ref())
    }
}

/// A line in the cart.
///
/// A line without a resolved `variant` or `total_price` is incomplete: its
/// data is still being resolved and it cannot be displayed as a row yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart line ID. Lines created offline may not have one yet.
    #[serde(default)]
    pub id: Option<CartLineId>,
    /// Resolved variant.
    #[serde(default)]
    pub variant: Option<ProductVariant>,
    /// Quantity (always positive).
    pub quantity: u32,
    /// Unit price multiplied by quantity.
    #[serde(default)]
    pub total_price: Option<TaxedMoney>,
}

impl CartItem {
    /// Whether both the variant and the total price are resolved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.variant.is_some() && self.total_price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_deserialize_minimal_line() {
        let json = r#"{
            "id": "1",
            "variant": {
                "id": "v1",
                "product": { "id": "p1", "name": "Shirt" },
                "quantityAvailable": 5
            },
            "quantity": 2,
            "totalPrice": { "gross": { "amount": 40 } }
        }"#;

        let item: CartItem = serde_json::from_str(json).expect("valid cart line");
        assert!(item.is_complete());
        assert_eq!(item.id, Some(CartLineId::new("1")));
        assert_eq!(item.quantity, 2);

        let variant = item.variant.expect("variant present");
        assert_eq!(variant.quantity_available, Some(5));
        assert!(variant.unit_price().is_none());
        assert_eq!(
            variant.product.and_then(|p| p.name).as_deref(),
            Some("Shirt")
        );
        assert_eq!(
            item.total_price.map(|t| t.gross.amount),
            Some(Decimal::from(40))
        );
    }

    #[test]
    fn test_incomplete_without_total() {
        let item = CartItem {
            id: None,
            variant: None,
            quantity: 1,
            total_price: Some(TaxedMoney::default()),
        };
        assert!(!item.is_complete());
    }

    #[test]
    fn test_attribute_values_allow_nulls() {
        let json = r#"{
            "attribute": { "id": "a1", "name": "Size" },
            "values": [ { "id": "s", "name": "S" }, null ]
        }"#;
        let attr: SelectedAttribute = serde_json::from_str(json).expect("valid attribute");
        assert_eq!(attr.values.len(), 2);
        assert!(attr.values[1].is_none());
    }
}
