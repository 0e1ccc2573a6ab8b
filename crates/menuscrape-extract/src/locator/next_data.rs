use serde_json::Value;

use super::{Embedding, Page};

/// `<script id="__NEXT_DATA__" type="application/json">` from server-rendered pages.
///
/// The page state sits under `props.pageProps.initialState` when present,
/// otherwise under `props.pageProps`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextData;

impl Embedding for NextData {
    fn name(&self) -> &'static str {
        "next_data"
    }

    fn candidates(&self, page: &Page<'_>) -> Vec<Result<Value, String>> {
        page.texts("script#__NEXT_DATA__")
            .into_iter()
            .map(|raw| {
                let root: Value = serde_json::from_str(raw.trim()).map_err(|e| e.to_string())?;
                Ok(unwrap_page_props(root))
            })
            .collect()
    }
}

fn unwrap_page_props(mut root: Value) -> Value {
    for pointer in ["/props/pageProps/initialState", "/props/pageProps"] {
        if let Some(inner) = root.pointer_mut(pointer)
            && inner.is_object()
        {
            return inner.take();
        }
    }
    root
}
