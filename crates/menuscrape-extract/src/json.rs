//! Lenient accessors over `serde_json::Value` shared by locator and schema variants.

use serde_json::Value;

use crate::tree::{ItemNode, RawPrice};

/// schema.org types accepted as "the restaurant".
pub(crate) const RESTAURANT_TYPES: &[&str] = &[
    "Restaurant",
    "FoodEstablishment",
    "CafeOrCoffeeShop",
    "FastFoodRestaurant",
    "Bakery",
    "BarOrPub",
];

/// Treat a single object as a one-element list and anything else as empty.
pub(crate) fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(v @ Value::Object(_)) => vec![v],
        _ => Vec::new(),
    }
}

/// First of `keys` holding a string (or number) value, or empty.
pub(crate) fn text(value: &Value, keys: &[&str]) -> String {
    for key in keys {
        match value.get(*key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

pub(crate) fn raw_price(value: &Value, keys: &[&str]) -> RawPrice {
    for key in keys {
        match value.get(*key) {
            Some(Value::Number(n)) => return RawPrice::Number(n.clone()),
            Some(Value::String(s)) if !s.trim().is_empty() => return RawPrice::Text(s.clone()),
            _ => {}
        }
    }
    RawPrice::Absent
}

/// Tags from the first present key: a list of strings or `{slug|name}` objects,
/// or a single comma-separated string.
pub(crate) fn string_list(value: &Value, keys: &[&str]) -> Vec<String> {
    for key in keys {
        match value.get(*key) {
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Object(_) => {
                            let slug = text(item, &["slug", "name", "tag"]);
                            (!slug.is_empty()).then_some(slug)
                        }
                        _ => None,
                    })
                    .collect();
            }
            Some(Value::String(s)) => {
                return s
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect();
            }
            _ => {}
        }
    }
    Vec::new()
}

/// Count objects that look like menu items: a name plus a price or offer, or an
/// explicit schema.org `MenuItem`.
pub(crate) fn count_items(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.iter().map(count_items).sum(),
        Value::Object(map) => {
            let has_name = matches!(map.get("name"), Some(Value::String(_)));
            let priced = map.contains_key("price") || map.contains_key("offers");
            let typed = has_type(value, &["MenuItem"]);
            let own = usize::from((has_name && priced) || typed);
            own + map.values().map(count_items).sum::<usize>()
        }
        _ => 0,
    }
}

/// Whether `@type` (a string or list of strings) names one of `types`.
pub(crate) fn has_type(value: &Value, types: &[&str]) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => types.iter().any(|want| t.eq_ignore_ascii_case(want)),
        Some(Value::Array(ts)) => ts.iter().any(|t| {
            t.as_str()
                .is_some_and(|t| types.iter().any(|want| t.eq_ignore_ascii_case(want)))
        }),
        _ => false,
    }
}

/// Build an item from the common field spellings found across page revisions.
pub(crate) fn item_from(value: &Value, dietary_keys: &[&str]) -> ItemNode {
    ItemNode {
        name: text(value, &["name", "item_name", "title"]),
        price: raw_price(value, &["price", "display_price", "default_price"]),
        desc: text(value, &["desc", "description"]),
        dietary: string_list(value, dietary_keys),
    }
}
