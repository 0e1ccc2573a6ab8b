use serde_json::Value;

use super::{Embedding, Page};

/// schema.org blocks in `<script type="application/ld+json">`.
///
/// Arrays and `@graph` containers are expanded so each object is its own candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LdJson;

impl Embedding for LdJson {
    fn name(&self) -> &'static str {
        "ld_json"
    }

    fn candidates(&self, page: &Page<'_>) -> Vec<Result<Value, String>> {
        let mut out = Vec::new();
        for raw in page.texts(r#"script[type="application/ld+json"]"#) {
            match serde_json::from_str::<Value>(raw.trim()) {
                Ok(value) => expand(value, &mut out),
                Err(e) => out.push(Err(e.to_string())),
            }
        }
        out
    }
}

fn expand(value: Value, out: &mut Vec<Result<Value, String>>) {
    match value {
        Value::Array(items) => {
            for item in items {
                expand(item, out);
            }
        }
        Value::Object(mut map) => match map.remove("@graph") {
            Some(graph) => expand(graph, out),
            None => out.push(Ok(Value::Object(map))),
        },
        other => out.push(Ok(other)),
    }
}
