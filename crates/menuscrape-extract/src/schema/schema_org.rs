use serde_json::Value;

use super::{SchemaVariant, object};
use crate::error::VariantMismatch;
use crate::json::{RESTAURANT_TYPES, has_type, one_or_many, raw_price, string_list, text};
use crate::payload::MenuPayload;
use crate::tree::{CategoryEntry, CategoryNode, ItemNode, RawPrice, SubCategoryNode};

/// schema.org `Restaurant.hasMenu` embedded as JSON-LD.
///
/// Top-level sections are categories and their direct child sections are
/// sub-categories. Deeper sections are folded into the nearest sub-category,
/// keeping document order. Items sitting directly on a menu form a category
/// named after the menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOrgMenu;

impl SchemaVariant for SchemaOrgMenu {
    fn name(&self) -> &'static str {
        "schema_org_menu"
    }

    fn categories(&self, payload: &MenuPayload) -> Result<Vec<CategoryNode>, VariantMismatch> {
        let data = &payload.data;
        if !has_type(data, RESTAURANT_TYPES) {
            return Err(VariantMismatch::new("not a schema.org restaurant"));
        }
        let menus: Vec<&Value> = match data.get("hasMenu") {
            None => return Err(VariantMismatch::new("missing hasMenu")),
            Some(Value::String(_)) => {
                return Err(VariantMismatch::new("hasMenu links to another page"));
            }
            Some(Value::Array(menus)) => menus.iter().collect(),
            Some(menu @ Value::Object(_)) => vec![menu],
            Some(_) => return Err(VariantMismatch::new("hasMenu is not an object")),
        };

        let mut categories = Vec::new();
        for menu in menus {
            let menu = object(menu, "hasMenu entry")?;
            let direct = items_of(menu)?;
            if !direct.is_empty() {
                categories.push(CategoryNode {
                    name: text(menu, &["name"]),
                    entries: direct.into_iter().map(CategoryEntry::Item).collect(),
                });
            }
            for section in one_or_many(menu.get("hasMenuSection")) {
                categories.push(parse_section(section)?);
            }
        }
        Ok(categories)
    }
}

fn parse_section(section: &Value) -> Result<CategoryNode, VariantMismatch> {
    let mut entries: Vec<CategoryEntry> = items_of(section)?
        .into_iter()
        .map(CategoryEntry::Item)
        .collect();
    for sub in one_or_many(section.get("hasMenuSection")) {
        let mut items = Vec::new();
        collect_deep(sub, &mut items)?;
        entries.push(CategoryEntry::SubCategory(SubCategoryNode {
            name: text(sub, &["name"]),
            items,
        }));
    }
    Ok(CategoryNode {
        name: text(section, &["name"]),
        entries,
    })
}

fn collect_deep(section: &Value, out: &mut Vec<ItemNode>) -> Result<(), VariantMismatch> {
    out.extend(items_of(section)?);
    for nested in one_or_many(section.get("hasMenuSection")) {
        collect_deep(nested, out)?;
    }
    Ok(())
}

fn items_of(parent: &Value) -> Result<Vec<ItemNode>, VariantMismatch> {
    match parent.get("hasMenuItem") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v @ (Value::Array(_) | Value::Object(_))) => {
            one_or_many(Some(v)).into_iter().map(parse_item).collect()
        }
        Some(_) => Err(VariantMismatch::new("hasMenuItem is not a list")),
    }
}

fn parse_item(value: &Value) -> Result<ItemNode, VariantMismatch> {
    let item = object(value, "menu item")?;
    let offer_price = one_or_many(item.get("offers"))
        .first()
        .map(|offer| raw_price(offer, &["price"]))
        .unwrap_or_default();
    let price = match offer_price {
        RawPrice::Absent => raw_price(item, &["price"]),
        found => found,
    };
    Ok(ItemNode {
        name: text(item, &["name"]),
        price,
        desc: text(item, &["description"]),
        dietary: string_list(item, &["suitableForDiet"]),
    })
}
