use std::fmt;

use serde::{Deserialize, Serialize};

/// Column order of every tabular rendering of a [`MenuRecord`].
pub const COLUMNS: [&str; 7] = [
    "restaurant",
    "category",
    "sub_category",
    "item_name",
    "price",
    "desc",
    "dietary_slugs",
];

/// A normalized price: a decimal amount when one could be read, otherwise the
/// original text unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(serde_json::Number),
    Text(String),
}

impl Price {
    #[must_use]
    pub fn as_amount(&self) -> Option<&serde_json::Number> {
        match self {
            Self::Amount(n) => Some(n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One menu item with its full category lineage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub restaurant: String,
    pub category: String,
    /// Empty when the item sits directly under its category.
    pub sub_category: String,
    pub item_name: String,
    pub price: Price,
    pub desc: String,
    pub dietary_slugs: Vec<String>,
}

impl MenuRecord {
    /// Cell values in [`COLUMNS`] order. Dietary slugs are joined with `", "`.
    #[must_use]
    pub fn cells(&self) -> [String; 7] {
        [
            self.restaurant.clone(),
            self.category.clone(),
            self.sub_category.clone(),
            self.item_name.clone(),
            self.price.to_string(),
            self.desc.clone(),
            self.dietary_slugs.join(", "),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MenuRecord {
        MenuRecord {
            restaurant: "Truffles".into(),
            category: "Burgers".into(),
            sub_category: String::new(),
            item_name: "All American Cheese Burger".into(),
            price: Price::Amount(199.into()),
            desc: String::new(),
            dietary_slugs: vec!["non-veg".into(), "egg".into()],
        }
    }

    #[test]
    fn price_display() {
        assert_eq!(Price::Amount(199.into()).to_string(), "199");
        assert_eq!(Price::Text("Market price".into()).to_string(), "Market price");
    }

    #[test]
    fn json_shape_follows_columns() {
        let value = serde_json::to_value(record()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        let mut expected: Vec<_> = COLUMNS.iter().map(|c| (*c).to_owned()).collect();
        expected.sort();
        assert_eq!(keys, expected);
        assert_eq!(value["price"], 199);
        assert_eq!(value["sub_category"], "");
        assert_eq!(value["dietary_slugs"], serde_json::json!(["non-veg", "egg"]));
    }

    #[test]
    fn text_price_serializes_as_string() {
        let mut r = record();
        r.price = Price::Text("MRP".into());
        assert_eq!(serde_json::to_value(&r).unwrap()["price"], "MRP");
    }

    #[test]
    fn deserializes_both_price_forms() {
        let json = r#"{"restaurant":"T","category":"C","sub_category":"","item_name":"I",
            "price":"ask","desc":"","dietary_slugs":[]}"#;
        let r: MenuRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.price, Price::Text("ask".into()));
        let json = json.replace(r#""ask""#, "250");
        let r: MenuRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r.price.as_amount().and_then(serde_json::Number::as_u64), Some(250));
    }

    #[test]
    fn cells_follow_column_order() {
        let cells = record().cells();
        assert_eq!(cells[0], "Truffles");
        assert_eq!(cells[2], "");
        assert_eq!(cells[4], "199");
        assert_eq!(cells[6], "non-veg, egg");
    }
}
