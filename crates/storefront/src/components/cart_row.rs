//! Cart row component types.
//!
//! A row renders one resolved cart line: thumbnail, name, optional SKU and
//! attributes, a quantity control bounded by stock, unit and total prices,
//! and a remove action. Rows are rendered by including
//! `components/cart_row.html` with a `row` and a `msg` in scope.

use cart_sidebar_core::{CartItem, CartLineId, SelectedAttribute, Thumbnail};

/// Image shown when a product has no thumbnail.
pub const PLACEHOLDER_THUMBNAIL: &str = "/static/images/no-photo.svg";

/// Upper bound on entries in the quantity dropdown.
const MAX_QUANTITY_OPTIONS: u32 = 99;

/// Row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Compact layout used inside the sidebar.
    Condense,
    /// Full-width layout used on the cart page.
    Page,
}

impl RowKind {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Condense => "condense",
            Self::Page => "page",
        }
    }

    #[must_use]
    pub const fn is_condensed(self) -> bool {
        matches!(self, Self::Condense)
    }
}

/// Where a row's forms submit to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActions {
    /// Endpoint receiving `variant_id` to remove a line.
    pub remove_url: String,
    /// Endpoint receiving `variant_id` and `quantity`.
    pub update_url: String,
    /// Element ID swapped with the response when submitting via HTMX.
    /// `None` submits as a plain form post.
    pub hx_target: Option<String>,
}

/// Thumbnail display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailView {
    pub url: String,
    pub url_2x: Option<String>,
    pub alt: String,
}

impl ThumbnailView {
    fn resolve(thumbnail: Option<&Thumbnail>) -> Self {
        thumbnail.map_or_else(
            || Self {
                url: PLACEHOLDER_THUMBNAIL.to_string(),
                url_2x: None,
                alt: String::new(),
            },
            |t| Self {
                url: t.url.clone(),
                url_2x: t.url2x.clone(),
                alt: t.alt.clone().unwrap_or_default(),
            },
        )
    }
}

/// Attribute display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeView {
    pub name: String,
    pub values: Vec<String>,
}

impl From<&SelectedAttribute> for AttributeView {
    fn from(selected: &SelectedAttribute) -> Self {
        Self {
            name: selected.attribute.name.clone().unwrap_or_default(),
            values: selected
                .values
                .iter()
                .map(|value| {
                    value
                        .as_ref()
                        .and_then(|v| v.name.clone())
                        .unwrap_or_default()
                })
                .collect(),
        }
    }
}

/// One entry of the quantity dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityOption {
    pub value: u32,
    pub selected: bool,
}

/// Cart row display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub kind: RowKind,
    /// Stable list key: `id-<line id>`, or `idx-<index>` for lines without one.
    pub key: String,
    pub index: usize,
    pub product_id: String,
    pub variant_id: String,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: u32,
    pub max_quantity: u32,
    pub quantity_options: Vec<QuantityOption>,
    pub thumbnail: ThumbnailView,
    pub unit_price: String,
    pub total_price: String,
    pub attributes: Vec<AttributeView>,
    pub actions: RowActions,
}

impl CartRowView {
    /// Build a row for a cart line.
    ///
    /// Returns `None` for incomplete lines (no variant or no total price).
    #[must_use]
    pub fn from_item(
        kind: RowKind,
        index: usize,
        item: &CartItem,
        actions: RowActions,
    ) -> Option<Self> {
        let variant = item.variant.as_ref()?;
        let total_price = item.total_price.as_ref()?;
        let product = variant.product.as_ref();

        // Untracked stock is unlimited; stock of zero keeps the line's quantity
        let max_quantity = match variant.quantity_available {
            None => MAX_QUANTITY_OPTIONS.max(item.quantity),
            Some(0) => item.quantity,
            Some(available) => available,
        };

        Some(Self {
            kind,
            key: row_key(item.id.as_ref(), index),
            index,
            product_id: product
                .and_then(|p| p.id.as_ref())
                .map(ToString::to_string)
                .unwrap_or_default(),
            variant_id: variant.id.to_string(),
            name: product.and_then(|p| p.name.clone()).unwrap_or_default(),
            sku: variant.sku.clone().filter(|sku| !sku.is_empty()),
            quantity: item.quantity,
            max_quantity,
            quantity_options: quantity_options(item.quantity, max_quantity),
            thumbnail: ThumbnailView::resolve(product.and_then(|p| p.thumbnail.as_ref())),
            unit_price: variant
                .unit_price()
                .map(|price| price.display())
                .unwrap_or_default(),
            total_price: total_price.display(),
            attributes: variant.attributes.iter().map(AttributeView::from).collect(),
            actions,
        })
    }
}

/// List key for a row.
///
/// Index-based keys are not stable across reorders; lines only lack an ID
/// before the store has persisted them.
#[must_use]
pub fn row_key(id: Option<&CartLineId>, index: usize) -> String {
    id.map_or_else(|| format!("idx-{index}"), |id| format!("id-{id}"))
}

/// Dropdown choices `1..=max`, always including the current quantity.
fn quantity_options(current: u32, max_quantity: u32) -> Vec<QuantityOption> {
    let upper = max_quantity.min(MAX_QUANTITY_OPTIONS).max(current).max(1);
    (1..=upper)
        .map(|value| QuantityOption {
            value,
            selected: value == current,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cart_sidebar_core::{
        AttributeRef, AttributeValue, CurrencyCode, Money, ProductVariant, TaxedMoney,
        VariantPricing, VariantProduct,
    };

    use super::*;

    fn actions() -> RowActions {
        RowActions {
            remove_url: "/remove".to_string(),
            update_url: "/update".to_string(),
            hx_target: None,
        }
    }

    fn shirt(quantity: u32, available: Option<u32>) -> CartItem {
        CartItem {
            id: Some(CartLineId::new("1")),
            variant: Some(ProductVariant {
                id: "v1".into(),
                name: "M".to_string(),
                sku: Some("SHIRT-M".to_string()),
                quantity_available: available,
                pricing: Some(VariantPricing {
                    price: Some(TaxedMoney::untaxed(Money::from_cents(
                        2000,
                        CurrencyCode::USD,
                    ))),
                }),
                product: Some(VariantProduct {
                    id: Some("p1".into()),
                    name: Some("Shirt".to_string()),
                    thumbnail: None,
                }),
                attributes: vec![SelectedAttribute {
                    attribute: AttributeRef {
                        id: None,
                        name: Some("Size".to_string()),
                    },
                    values: vec![
                        Some(AttributeValue {
                            id: None,
                            name: Some("M".to_string()),
                            value: None,
                        }),
                        None,
                    ],
                }],
            }),
            quantity,
            total_price: Some(TaxedMoney::untaxed(Money::from_cents(
                2000 * i64::from(quantity),
                CurrencyCode::USD,
            ))),
        }
    }

    #[test]
    fn test_row_from_item() {
        let row = CartRowView::from_item(RowKind::Condense, 0, &shirt(2, Some(5)), actions())
            .unwrap();

        assert_eq!(row.key, "id-1");
        assert_eq!(row.name, "Shirt");
        assert_eq!(row.product_id, "p1");
        assert_eq!(row.variant_id, "v1");
        assert_eq!(row.sku.as_deref(), Some("SHIRT-M"));
        assert_eq!(row.quantity, 2);
        assert_eq!(row.max_quantity, 5);
        assert_eq!(row.unit_price, "$20.00");
        assert_eq!(row.total_price, "$40.00");
        assert_eq!(row.thumbnail.url, PLACEHOLDER_THUMBNAIL);
        assert_eq!(
            row.attributes,
            vec![AttributeView {
                name: "Size".to_string(),
                values: vec!["M".to_string(), String::new()],
            }]
        );
    }

    #[test]
    fn test_max_quantity_without_stock() {
        // Untracked stock lets the quantity go up
        let untracked = CartRowView::from_item(RowKind::Page, 0, &shirt(3, None), actions())
            .unwrap();
        assert_eq!(untracked.max_quantity, 99);
        assert_eq!(untracked.quantity_options.len(), 99);
        assert!(untracked.quantity_options[2].selected);

        let sold_out = CartRowView::from_item(RowKind::Page, 0, &shirt(3, Some(0)), actions())
            .unwrap();
        assert_eq!(sold_out.max_quantity, 3);
    }

    #[test]
    fn test_incomplete_item_has_no_row() {
        let mut item = shirt(1, None);
        item.total_price = None;
        assert!(CartRowView::from_item(RowKind::Condense, 0, &item, actions()).is_none());

        let mut item = shirt(1, None);
        item.variant = None;
        assert!(CartRowView::from_item(RowKind::Condense, 0, &item, actions()).is_none());
    }

    #[test]
    fn test_row_key_fallback() {
        assert_eq!(row_key(Some(&CartLineId::new("abc")), 4), "id-abc");
        assert_eq!(row_key(None, 4), "idx-4");
    }

    #[test]
    fn test_quantity_options() {
        let options = quantity_options(2, 4);
        let values: Vec<u32> = options.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
        assert_eq!(
            options.iter().filter(|o| o.selected).map(|o| o.value).collect::<Vec<_>>(),
            vec![2]
        );

        // Stock dropped below the line quantity: current stays selectable
        assert_eq!(quantity_options(6, 3).len(), 6);
        assert_eq!(quantity_options(1, 5_000).len(), 99);
    }

    #[test]
    fn test_thumbnail_alt_defaults_to_empty() {
        let thumbnail = Thumbnail {
            url: "/img/shirt.jpg".to_string(),
            url2x: Some("/img/shirt@2x.jpg".to_string()),
            alt: None,
        };
        let view = ThumbnailView::resolve(Some(&thumbnail));
        assert_eq!(view.alt, "");
        assert_eq!(view.url_2x.as_deref(), Some("/img/shirt@2x.jpg"));
    }
}
