use serde_json::Value;

use crate::json::{RESTAURANT_TYPES, has_type, text};
use crate::payload::RestaurantIdentity;

/// Find the restaurant a candidate describes.
///
/// Looks at the Zomato page-state map (`pages.restaurant.<id>`), then at
/// schema.org restaurant objects, then at a bare `restaurant` object.
#[must_use]
pub fn find_identity(data: &Value) -> Option<RestaurantIdentity> {
    page_state_identity(data)
        .or_else(|| schema_org_identity(data))
        .or_else(|| {
            let restaurant = data.get("restaurant")?;
            named(restaurant, text(restaurant, &["id", "res_id"]))
        })
}

fn page_state_identity(data: &Value) -> Option<RestaurantIdentity> {
    let restaurants = data.pointer("/pages/restaurant")?.as_object()?;
    restaurants.iter().find_map(|(key, entry)| {
        let info = entry.pointer("/sections/SECTION_BASIC_INFO");
        let name = info
            .map(|i| text(i, &["name"]))
            .filter(|n| !n.trim().is_empty())
            .or_else(|| entry.get("info").map(|i| text(i, &["name"])))
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| text(entry, &["name"]));
        if name.trim().is_empty() {
            return None;
        }
        let id = info
            .map(|i| text(i, &["res_id", "resId"]))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| key.clone());
        Some(RestaurantIdentity {
            name: name.trim().to_owned(),
            id: Some(id),
        })
    })
}

fn schema_org_identity(data: &Value) -> Option<RestaurantIdentity> {
    if !has_type(data, RESTAURANT_TYPES) {
        return None;
    }
    named(data, text(data, &["@id", "identifier"]))
}

fn named(value: &Value, id: String) -> Option<RestaurantIdentity> {
    let name = text(value, &["name"]);
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(RestaurantIdentity {
        name: name.to_owned(),
        id: (!id.is_empty()).then_some(id),
    })
}
