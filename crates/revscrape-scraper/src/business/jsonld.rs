//! schema.org JSON-LD hints for business metadata.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use serde_json::Value;

static JSON_LD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid json-ld selector")
});

const BUSINESS_TYPES: &[&str] = &[
    "LocalBusiness",
    "Restaurant",
    "FoodEstablishment",
    "Store",
    "CafeOrCoffeeShop",
    "BarOrPub",
];

/// Street, locality, region, postal code, in that order.
const ADDRESS_PARTS: &[&str] = &[
    "streetAddress",
    "addressLocality",
    "addressRegion",
    "postalCode",
];

/// All business-typed JSON-LD nodes in the page, in document order.
///
/// Accepts a top-level object, a top-level array, or an `@graph` container.
/// Blocks that are not valid JSON are skipped.
pub(super) fn business_nodes(scope: ElementRef<'_>) -> Vec<Value> {
    let mut nodes = Vec::new();

    for script in scope.select(&JSON_LD) {
        let raw: String = script.text().collect();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            tracing::debug!("skipping JSON-LD block that is not valid JSON");
            continue;
        };

        let mut candidates = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        let graph: Vec<Value> = candidates
            .iter()
            .filter_map(|item| item.get("@graph").and_then(Value::as_array))
            .flatten()
            .cloned()
            .collect();
        candidates.extend(graph);

        nodes.extend(candidates.into_iter().filter(is_business_node));
    }

    nodes
}

/// `@type` may be a plain string or an array of strings.
fn is_business_node(item: &Value) -> bool {
    let matches = |t: &str| BUSINESS_TYPES.iter().any(|b| t.eq_ignore_ascii_case(b));
    match item.get("@type") {
        Some(Value::String(s)) => matches(s),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

/// `aggregateRating.ratingValue`, given as a number or a numeric string.
pub(super) fn aggregate_rating(node: &Value) -> Option<f64> {
    let value = node.get("aggregateRating")?.get("ratingValue")?;
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// `address` as an object (parts joined by spaces, blanks skipped) or a plain string.
pub(super) fn address(node: &Value) -> Option<String> {
    let text = match node.get("address")? {
        Value::String(s) => s.trim().to_string(),
        Value::Object(map) => ADDRESS_PARTS
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
