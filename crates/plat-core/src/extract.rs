//! Ordered field extraction over raw provider JSON.
//!
//! Provider payloads have drifted through several historical shapes, and
//! different endpoints place the same fact at different paths. Instead of
//! optional-chaining at every call site, each canonical field is resolved
//! through an ordered list of dot-paths tried highest-priority first. The
//! valuation chain in particular must be reproduced exactly: providers place
//! the "true" market value in different spots depending on endpoint.

use serde_json::Value;

/// Market-value fallback chain, highest priority first.
///
/// 1. live assessment market value
/// 2. calculated total value
/// 3. assessed total value
/// 4. last sale amount
pub const MARKET_VALUE_CHAIN: [&str; 4] = [
    "assessment.market.mktttlvalue",
    "assessment.calculations.calcttlvalue",
    "assessment.assessed.assdttlvalue",
    "sale.amount.saleamt",
];

/// Walk a dot-separated path into a JSON object.
#[must_use]
pub fn value_at<'a>(v: &'a Value, path: &str) -> Option<&'a Value> {
    let mut cur = v;
    for seg in path.split('.') {
        cur = cur.get(seg)?;
    }
    if cur.is_null() { None } else { Some(cur) }
}

/// String at `path`; numbers are stringified, empty strings are absent.
#[must_use]
pub fn str_at(v: &Value, path: &str) -> Option<String> {
    match value_at(v, path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Number at `path`; providers ship coordinates and some sizes as numeric
/// strings, so both representations are accepted.
#[must_use]
pub fn f64_at(v: &Value, path: &str) -> Option<f64> {
    match value_at(v, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whole-number at `path`, via the same lenient parse as [`f64_at`].
#[must_use]
pub fn u32_at(v: &Value, path: &str) -> Option<u32> {
    let n = f64_at(v, path)?;
    if n.is_finite() && n >= 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(n.round() as u32)
    } else {
        None
    }
}

/// First path in `chain` that yields a string.
#[must_use]
pub fn first_str(v: &Value, chain: &[&str]) -> Option<String> {
    chain.iter().find_map(|p| str_at(v, p))
}

/// First path in `chain` that yields a number.
#[must_use]
pub fn first_f64(v: &Value, chain: &[&str]) -> Option<f64> {
    chain.iter().find_map(|p| f64_at(v, p))
}

/// First path in `chain` that yields a whole number.
#[must_use]
pub fn first_u32(v: &Value, chain: &[&str]) -> Option<u32> {
    chain.iter().find_map(|p| u32_at(v, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[test]
    fn value_at_walks_nested_objects() {
        let v = json!({"a": {"b": {"c": 7}}});
        assert_eq!(value_at(&v, "a.b.c").unwrap(), &json!(7));
        assert!(value_at(&v, "a.b.missing").is_none());
    }

    #[test]
    fn null_leaves_are_absent() {
        let v = json!({"a": {"b": null}});
        assert!(value_at(&v, "a.b").is_none());
        assert!(str_at(&v, "a.b").is_none());
    }

    #[test]
    fn f64_accepts_numeric_strings() {
        let v = json!({"location": {"latitude": "40.76158", "longitude": -73.98009}});
        assert_eq!(f64_at(&v, "location.latitude"), Some(40.76158));
        assert_eq!(f64_at(&v, "location.longitude"), Some(-73.98009));
    }

    #[test]
    fn empty_strings_are_absent() {
        let v = json!({"address": {"line1": "   "}});
        assert!(str_at(&v, "address.line1").is_none());
    }

    #[rstest]
    #[case::live_market_wins(
        json!({
            "assessment": {
                "market": {"mktttlvalue": 2_500_000},
                "assessed": {"assdttlvalue": 1_100_000}
            },
            "sale": {"amount": {"saleamt": 1_900_000}}
        }),
        Some(2_500_000.0)
    )]
    #[case::calculated_over_assessed(
        json!({
            "assessment": {
                "calculations": {"calcttlvalue": 2_000_000},
                "assessed": {"assdttlvalue": 1_100_000}
            }
        }),
        Some(2_000_000.0)
    )]
    #[case::sale_amount_is_last_resort(
        json!({"sale": {"amount": {"saleamt": 875_000}}}),
        Some(875_000.0)
    )]
    #[case::empty_payload(json!({}), None)]
    fn market_chain_falls_through_in_order(#[case] payload: Value, #[case] expected: Option<f64>) {
        assert_eq!(first_f64(&payload, &MARKET_VALUE_CHAIN), expected);
    }
}
