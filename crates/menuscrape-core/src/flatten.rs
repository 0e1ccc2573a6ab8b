use menuscrape_extract::{CategoryEntry, ItemNode, RestaurantTree};

use crate::normalize::{normalize_desc, normalize_dietary, normalize_price};
use crate::record::MenuRecord;

/// Records produced from one tree plus the number of items dropped for having
/// no name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    pub records: Vec<MenuRecord>,
    pub excluded: usize,
}

/// Walks `tree` depth-first in payload order, emitting one record per named
/// item. Category and sub-category names are carried down unchanged except
/// for surrounding whitespace.
#[must_use]
pub fn flatten(tree: &RestaurantTree) -> Flattened {
    let restaurant = tree.identity.name.trim();
    let mut out = Flattened {
        records: Vec::with_capacity(tree.item_count()),
        excluded: 0,
    };

    for category in &tree.categories {
        let category_name = category.name.trim();
        for entry in &category.entries {
            match entry {
                CategoryEntry::Item(item) => out.push(restaurant, category_name, "", item),
                CategoryEntry::SubCategory(sub) => {
                    let sub_name = sub.name.trim();
                    for item in &sub.items {
                        out.push(restaurant, category_name, sub_name, item);
                    }
                }
            }
        }
    }

    if out.excluded > 0 {
        tracing::warn!(
            restaurant,
            excluded = out.excluded,
            kept = out.records.len(),
            "skipped menu items without a name"
        );
    }
    out
}

impl Flattened {
    fn push(&mut self, restaurant: &str, category: &str, sub_category: &str, item: &ItemNode) {
        let name = item.name.trim();
        if name.is_empty() {
            self.excluded += 1;
            return;
        }
        self.records.push(MenuRecord {
            restaurant: restaurant.to_owned(),
            category: category.to_owned(),
            sub_category: sub_category.to_owned(),
            item_name: name.to_owned(),
            price: normalize_price(&item.price),
            desc: normalize_desc(&item.desc),
            dietary_slugs: normalize_dietary(&item.dietary),
        });
    }
}
