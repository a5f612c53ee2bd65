//! JSON-LD structured data helpers
//!
//! Blocks are read from `<script type="application/ld+json">`. A block may be
//! a single object, an array of objects or an object with an `@graph` array;
//! all three are flattened into a list of nodes. Blocks that fail to parse are
//! ignored.

use scraper::{Html, Selector};
use serde_json::Value;

/// Raw text of every JSON-LD script block, in document order
pub fn json_ld_blocks(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|script| script.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Parsed and flattened JSON-LD nodes
pub fn json_ld_nodes(document: &Html) -> Vec<Value> {
    let mut nodes = Vec::new();

    for block in json_ld_blocks(document) {
        match serde_json::from_str::<Value>(block.trim()) {
            Ok(value) => flatten_into(value, &mut nodes),
            Err(e) => tracing::debug!("Ignoring unparseable JSON-LD block: {}", e),
        }
    }

    nodes
}

fn flatten_into(value: Value, nodes: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, nodes);
            }
        }
        Value::Object(mut map) => {
            let graph = map.remove("@graph");
            nodes.push(Value::Object(map));
            if let Some(graph) = graph {
                flatten_into(graph, nodes);
            }
        }
        _ => {}
    }
}

/// Returns true if the node's `@type` is, or includes, `Product`
pub fn is_product_node(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => t == "Product",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("Product")),
        _ => false,
    }
}

/// Returns true if any JSON-LD block declares `"@type": "Product"`
///
/// Blocks that are not valid JSON still count when their compacted text
/// contains the declaration.
pub fn has_product_block(document: &Html) -> bool {
    if json_ld_nodes(document).iter().any(is_product_node) {
        return true;
    }

    json_ld_blocks(document).iter().any(|block| {
        let compact: String = block.chars().filter(|c| !c.is_whitespace()).collect();
        compact.contains(r#""@type":"Product""#)
    })
}

/// First non-empty `description` among the JSON-LD nodes, Product nodes first
pub fn json_ld_description(document: &Html) -> Option<String> {
    let nodes = json_ld_nodes(document);
    let description = |node: &&Value| {
        node.get("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    };

    nodes
        .iter()
        .filter(|node| is_product_node(node))
        .find_map(|node| description(&node))
        .or_else(|| nodes.iter().find_map(|node| description(&node)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(scripts: &[&str]) -> Html {
        let body: String = scripts
            .iter()
            .map(|s| format!(r#"<script type="application/ld+json">{}</script>"#, s))
            .collect();
        Html::parse_document(&format!("<html><head>{}</head><body></body></html>", body))
    }

    #[test]
    fn test_product_object() {
        let document = doc(&[r#"{"@context":"https://schema.org","@type":"Product","name":"X100"}"#]);
        assert!(has_product_block(&document));
    }

    #[test]
    fn test_product_in_graph() {
        let document = doc(&[
            r#"{"@graph":[{"@type":"WebPage"},{"@type":["Thing","Product"],"description":"From graph"}]}"#,
        ]);
        assert!(has_product_block(&document));
        assert_eq!(json_ld_description(&document), Some("From graph".to_string()));
    }

    #[test]
    fn test_non_product_block() {
        let document = doc(&[r#"{"@type":"Organization","description":"We sell things"}"#]);
        assert!(!has_product_block(&document));
        assert_eq!(
            json_ld_description(&document),
            Some("We sell things".to_string())
        );
    }

    #[test]
    fn test_invalid_json_falls_back_to_text() {
        let document = doc(&[r#"{"@type" : "Product", "name": "X100",, }"#]);
        assert!(json_ld_nodes(&document).is_empty());
        assert!(has_product_block(&document));
    }

    #[test]
    fn test_product_description_preferred() {
        let document = doc(&[
            r#"{"@type":"BreadcrumbList","description":"Crumbs"}"#,
            r#"[{"@type":"Product","description":"  The X100 blender  "}]"#,
        ]);
        assert_eq!(
            json_ld_description(&document),
            Some("The X100 blender".to_string())
        );
    }
}
