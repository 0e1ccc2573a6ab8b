//! Field normalization applied while flattening.

use std::sync::LazyLock;

use menuscrape_extract::RawPrice;
use regex::Regex;

use crate::record::Price;

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:₹|\$|€|£|¥|rs\.?|inr|usd|eur|gbp)?\s*((?:[0-9]+|[0-9]{1,2}(?:,[0-9]{2})*,[0-9]{3})(?:\.[0-9]+)?)\s*(?:₹|\$|€|£|¥|rs\.?|inr|usd|eur|gbp|/-)?$",
    )
    .expect("valid price regex")
});

static PLAIN_DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("valid decimal regex"));

const SCHEMA_PREFIXES: [&str; 3] = ["https://schema.org/", "http://schema.org/", "schema:"];

/// Reads a decimal amount out of a raw price, keeping the original text when
/// the value is not a single plain amount.
#[must_use]
pub fn normalize_price(raw: &RawPrice) -> Price {
    match raw {
        RawPrice::Number(n) => Price::Amount(n.clone()),
        RawPrice::Absent => Price::Text(String::new()),
        RawPrice::Text(text) => parse_amount(text).map_or_else(|| Price::Text(text.clone()), Price::Amount),
    }
}

/// Parses `text` as a plain decimal once currency markers and digit group
/// separators are removed.
///
/// Groups must follow Indian digit grouping (`1,00,000`, `12,500`). Any other
/// comma layout, such as `120,150` for a half/full pair, is not an amount.
#[must_use]
pub fn parse_amount(text: &str) -> Option<serde_json::Number> {
    let caps = PRICE_RE.captures(text.trim())?;
    let digits = caps.get(1)?.as_str().replace(',', "");
    let unpadded = digits.trim_start_matches('0');
    if unpadded.is_empty() || unpadded.starts_with('.') {
        parse_plain_decimal(&format!("0{unpadded}"))
    } else {
        parse_plain_decimal(unpadded)
    }
}

/// Accepts only `digits[.digits]`, with no sign, exponent, or whitespace.
#[must_use]
pub fn parse_plain_decimal(text: &str) -> Option<serde_json::Number> {
    if PLAIN_DECIMAL_RE.is_match(text) {
        serde_json::from_str(text).ok()
    } else {
        None
    }
}

#[must_use]
pub fn normalize_desc(desc: &str) -> String {
    desc.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonicalizes dietary tags, dropping empties and repeats while keeping
/// first-seen order.
#[must_use]
pub fn normalize_dietary(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for slug in tags.iter().filter_map(|t| canonical_slug(t)) {
        if !out.contains(&slug) {
            out.push(slug);
        }
    }
    out
}

#[must_use]
pub fn canonical_slug(tag: &str) -> Option<String> {
    let tag = tag.trim();
    let tag = SCHEMA_PREFIXES
        .iter()
        .find_map(|p| tag.strip_prefix(p))
        .unwrap_or(tag);
    let slug = slugify(tag);
    if slug.is_empty() {
        return None;
    }
    let canonical = match slug.as_str() {
        "veg" | "vegetarian" | "vegetariandiet" | "vegetarian-diet" | "pure-veg" | "veg-only" => "veg",
        "non-veg" | "nonveg" | "non-vegetarian" | "nonvegetarian" | "contains-meat" => "non-veg",
        "egg" | "eggs" | "contains-egg" | "contains-eggs" | "egg-based" => "egg",
        "vegan" | "vegandiet" | "vegan-diet" => "vegan",
        "jain" | "jain-food" => "jain",
        "gluten-free" | "glutenfree" | "glutenfreediet" | "gluten-free-diet" => "gluten-free",
        "halal" | "halaldiet" | "halal-diet" => "halal",
        "kosher" | "kosherdiet" | "kosher-diet" => "kosher",
        _ => return Some(slug),
    };
    Some(canonical.to_owned())
}

/// Lowercases and replaces every run of non-alphanumerics with a single `-`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
