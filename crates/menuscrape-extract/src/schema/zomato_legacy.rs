use serde_json::Value;

use super::{SchemaVariant, array_at, object, optional_array, restaurant_entry};
use crate::error::VariantMismatch;
use crate::json::{item_from, text};
use crate::payload::MenuPayload;
use crate::tree::{CategoryEntry, CategoryNode, ItemNode, SubCategoryNode};

const DIETARY_KEYS: &[&str] = &["dietary_slugs", "dietary_tags", "tags"];

/// Older dine-in page state: `pages.restaurant.<id>.menu.categories`.
///
/// A category may carry `items`, `subcategories`, or both. Direct items are
/// listed before sub-categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZomatoLegacyMenu;

impl SchemaVariant for ZomatoLegacyMenu {
    fn name(&self) -> &'static str {
        "zomato_legacy_menu"
    }

    fn categories(&self, payload: &MenuPayload) -> Result<Vec<CategoryNode>, VariantMismatch> {
        let entry = restaurant_entry(payload)?;
        array_at(entry, "/menu/categories", "menu.categories")?
            .iter()
            .map(parse_category)
            .collect()
    }
}

fn parse_category(value: &Value) -> Result<CategoryNode, VariantMismatch> {
    let category = object(value, "category")?;
    let mut entries: Vec<CategoryEntry> = parse_items(category)?
        .into_iter()
        .map(CategoryEntry::Item)
        .collect();

    let subs = match category.get("subcategories") {
        Some(_) => optional_array(category, "subcategories", "category.subcategories")?,
        None => optional_array(category, "sub_categories", "category.sub_categories")?,
    };
    for sub in subs {
        let sub = object(sub, "sub-category")?;
        entries.push(CategoryEntry::SubCategory(SubCategoryNode {
            name: text(sub, &["name"]),
            items: parse_items(sub)?,
        }));
    }

    Ok(CategoryNode {
        name: text(category, &["name"]),
        entries,
    })
}

fn parse_items(parent: &Value) -> Result<Vec<ItemNode>, VariantMismatch> {
    optional_array(parent, "items", "items")?
        .iter()
        .map(|item| object(item, "item").map(|item| item_from(item, DIETARY_KEYS)))
        .collect()
}
