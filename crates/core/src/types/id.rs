//! Newtype IDs for type-safe entity references.
//!
//! Cart data arrives as opaque string identifiers (GraphQL-style global IDs),
//! so every wrapper here is backed by a `String`. Use the `define_id!` macro
//! to create wrappers that prevent accidentally mixing IDs from different
//! entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `Display`, `From<&str>` and `From<String>` implementations
///
/// # Example
///
/// ```rust
/// # use cart_sidebar_core::define_id;
/// define_id!(LineId);
/// define_id!(SkuId);
///
/// let line_id = LineId::new("line-1");
/// let sku_id = SkuId::new("line-1");
///
/// // These are different types, so this won't compile:
/// // let _: LineId = sku_id;
/// assert_eq!(line_id.as_str(), sku_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CartLineId);
define_id!(VariantId);
define_id!(ProductId);
define_id!(AttributeId);
define_id!(AttributeValueId);
