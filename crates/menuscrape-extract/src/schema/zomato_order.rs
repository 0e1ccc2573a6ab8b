use serde_json::Value;

use super::{SchemaVariant, array_at, object, optional_array, restaurant_entry};
use crate::error::VariantMismatch;
use crate::json::{item_from, text};
use crate::payload::MenuPayload;
use crate::tree::{CategoryEntry, CategoryNode, ItemNode, SubCategoryNode};

/// Current order-page state: `pages.restaurant.<id>.order.menuList.menus`.
///
/// Each menu is a category and each menu category a sub-category. A menu
/// category with a blank name puts its items directly under the menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZomatoOrderMenu;

impl SchemaVariant for ZomatoOrderMenu {
    fn name(&self) -> &'static str {
        "zomato_order_menu"
    }

    fn categories(&self, payload: &MenuPayload) -> Result<Vec<CategoryNode>, VariantMismatch> {
        let entry = restaurant_entry(payload)?;
        array_at(entry, "/order/menuList/menus", "order.menuList.menus")?
            .iter()
            .map(parse_menu)
            .collect()
    }
}

fn parse_menu(wrapper: &Value) -> Result<CategoryNode, VariantMismatch> {
    let menu = object(wrapper.get("menu").unwrap_or(wrapper), "menu")?;
    let mut entries = Vec::new();

    for node in optional_array(menu, "categories", "menu.categories")? {
        let category = object(node.get("category").unwrap_or(node), "menu category")?;
        let items = optional_array(category, "items", "category.items")?
            .iter()
            .map(parse_item)
            .collect::<Result<Vec<_>, _>>()?;

        let name = text(category, &["name"]);
        if name.trim().is_empty() {
            entries.extend(items.into_iter().map(CategoryEntry::Item));
        } else {
            entries.push(CategoryEntry::SubCategory(SubCategoryNode { name, items }));
        }
    }

    Ok(CategoryNode {
        name: text(menu, &["name"]),
        entries,
    })
}

fn parse_item(wrapper: &Value) -> Result<ItemNode, VariantMismatch> {
    let item = object(wrapper.get("item").unwrap_or(wrapper), "item")?;
    Ok(item_from(item, &["dietary_slugs"]))
}
