//! Locates the menu payload embedded in a restaurant page and decodes it into a
//! schema-independent tree.

#![forbid(unsafe_code)]

pub mod error;
mod json;
pub mod locator;
pub mod payload;
pub mod schema;
pub mod tree;

pub use error::{NotFoundError, SchemaError, VariantMismatch};
pub use locator::{Embedding, EmbeddingRegistry, Page, locate, select_best};
pub use payload::{MenuPayload, RestaurantIdentity};
pub use schema::{SchemaRegistry, SchemaVariant, parse};
pub use tree::{CategoryEntry, CategoryNode, ItemNode, RawPrice, RestaurantTree, SubCategoryNode};
