/// The one restaurant a payload describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantIdentity {
    pub name: String,
    pub id: Option<String>,
}

/// A structurally valid menu blob found in a page.
///
/// Always carries exactly one non-empty restaurant identity.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuPayload {
    pub identity: RestaurantIdentity,
    /// Name of the embedding convention the payload was found through.
    pub convention: &'static str,
    pub data: serde_json::Value,
    /// Item-like objects counted during location, used to rank candidates.
    pub item_count: usize,
}
