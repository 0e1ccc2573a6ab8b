use crate::payload::RestaurantIdentity;

/// A price as it appeared in the payload, before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawPrice {
    Number(serde_json::Number),
    Text(String),
    #[default]
    Absent,
}

/// A menu item. Missing optional fields are empty, never absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemNode {
    /// Empty when the payload had no usable name.
    pub name: String,
    pub price: RawPrice,
    pub desc: String,
    /// Raw dietary tags in payload order.
    pub dietary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubCategoryNode {
    pub name: String,
    pub items: Vec<ItemNode>,
}

/// A category holds sub-categories, items, or a mix of both, in payload order.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryEntry {
    SubCategory(SubCategoryNode),
    Item(ItemNode),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryNode {
    pub name: String,
    pub entries: Vec<CategoryEntry>,
}

impl CategoryNode {
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                CategoryEntry::SubCategory(sub) => sub.items.len(),
                CategoryEntry::Item(_) => 1,
            })
            .sum()
    }
}

/// Schema-independent menu for one restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantTree {
    pub identity: RestaurantIdentity,
    /// Name of the schema variant that produced this tree.
    pub schema: &'static str,
    pub categories: Vec<CategoryNode>,
}

impl RestaurantTree {
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(CategoryNode::item_count).sum()
    }
}
