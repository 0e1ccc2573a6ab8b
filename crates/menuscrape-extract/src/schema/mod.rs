//! Schema variants: the known shapes of the menu payload across page revisions.
//!
//! Each variant either produces the common [`RestaurantTree`] or explains why it
//! does not apply. The registry tries them in a fixed order and reports every
//! attempt when none matches.

mod schema_org;
mod zomato_legacy;
mod zomato_order;

use serde_json::Value;

use crate::error::{SchemaError, VariantMismatch};
use crate::payload::MenuPayload;
use crate::tree::{CategoryNode, RestaurantTree};

pub use schema_org::SchemaOrgMenu;
pub use zomato_legacy::ZomatoLegacyMenu;
pub use zomato_order::ZomatoOrderMenu;

pub trait SchemaVariant: Send + Sync {
    fn name(&self) -> &'static str;

    /// Decode the payload into categories in payload order.
    ///
    /// # Errors
    ///
    /// Returns `VariantMismatch` when the payload does not have this variant's shape.
    fn categories(&self, payload: &MenuPayload) -> Result<Vec<CategoryNode>, VariantMismatch>;
}

pub struct SchemaRegistry {
    variants: Vec<Box<dyn SchemaVariant>>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
            .with(ZomatoOrderMenu)
            .with(ZomatoLegacyMenu)
            .with(SchemaOrgMenu)
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            variants: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, variant: impl SchemaVariant + 'static) -> Self {
        self.variants.push(Box::new(variant));
        self
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.variants.iter().map(|v| v.name()).collect()
    }

    /// # Errors
    ///
    /// Returns `SchemaError` listing each attempted variant when none matches.
    pub fn parse(&self, payload: &MenuPayload) -> Result<RestaurantTree, SchemaError> {
        let mut attempted = Vec::with_capacity(self.variants.len());
        for variant in &self.variants {
            match variant.categories(payload) {
                Ok(categories) => {
                    let tree = RestaurantTree {
                        identity: payload.identity.clone(),
                        schema: variant.name(),
                        categories,
                    };
                    tracing::debug!(
                        schema = variant.name(),
                        categories = tree.categories.len(),
                        items = tree.item_count(),
                        "parsed menu tree"
                    );
                    return Ok(tree);
                }
                Err(reason) => {
                    tracing::debug!(schema = variant.name(), "schema variant mismatch: {reason}");
                    attempted.push((variant.name(), reason));
                }
            }
        }
        Err(SchemaError { attempted })
    }
}

/// Parse a payload with the default variants.
///
/// # Errors
///
/// Returns `SchemaError` when the payload matches no known variant.
pub fn parse(payload: &MenuPayload) -> Result<RestaurantTree, SchemaError> {
    SchemaRegistry::default().parse(payload)
}

/// The `pages.restaurant.<id>` entry for the payload's restaurant.
///
/// Prefers the entry keyed by the identity id, then the first entry.
pub(crate) fn restaurant_entry<'a>(
    payload: &'a MenuPayload,
) -> Result<&'a Value, VariantMismatch> {
    let map = payload
        .data
        .pointer("/pages/restaurant")
        .and_then(Value::as_object)
        .ok_or_else(|| VariantMismatch::new("missing pages.restaurant"))?;
    payload
        .identity
        .id
        .as_deref()
        .and_then(|id| map.get(id))
        .or_else(|| map.values().next())
        .ok_or_else(|| VariantMismatch::new("pages.restaurant is empty"))
}

/// Require an array at `pointer` under `base`.
pub(crate) fn array_at<'a>(
    base: &'a Value,
    pointer: &str,
    label: &str,
) -> Result<&'a Vec<Value>, VariantMismatch> {
    match base.pointer(pointer) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(VariantMismatch::new(format!("{label} is not a list"))),
        None => Err(VariantMismatch::new(format!("missing {label}"))),
    }
}

/// Optional list: absent or null means empty, any other non-list is a mismatch.
pub(crate) fn optional_array<'a>(
    base: &'a Value,
    key: &str,
    label: &str,
) -> Result<&'a [Value], VariantMismatch> {
    match base.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(VariantMismatch::new(format!("{label} is not a list"))),
    }
}

/// Require a JSON object, reporting `label` on mismatch.
pub(crate) fn object<'a>(value: &'a Value, label: &str) -> Result<&'a Value, VariantMismatch> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(VariantMismatch::new(format!("{label} is not an object")))
    }
}
