//! The provider's response envelope.
//!
//! Every property endpoint wraps its payloads in
//! `{"status": {...}, "property": [...]}`. The payloads themselves stay
//! untyped — their shapes vary by endpoint and era, and normalizing them is
//! `plat-core`'s job.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub property: Vec<Value>,
}

impl Envelope {
    /// The provider sometimes reports empty searches inside a 200 envelope.
    pub fn is_no_result(&self) -> bool {
        self.status.msg == "SuccessWithoutResult"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn envelope_parses_status_and_payloads() {
        let env: Envelope = serde_json::from_str(
            r#"{
                "status": {"code": 0, "msg": "SuccessWithResult"},
                "property": [{"identifier": {"attomId": 1}}, {"identifier": {"attomId": 2}}]
            }"#,
        )
        .unwrap();
        assert_eq!(env.status.code, 0);
        assert_eq!(env.property.len(), 2);
        assert!(!env.is_no_result());
    }

    #[test]
    fn in_envelope_no_result_is_detected() {
        let env: Envelope = serde_json::from_str(
            r#"{"status": {"code": 1, "msg": "SuccessWithoutResult"}}"#,
        )
        .unwrap();
        assert!(env.is_no_result());
        assert!(env.property.is_empty());
    }

    #[test]
    fn missing_fields_default() {
        let env: Envelope = serde_json::from_str("{}").unwrap();
        assert_eq!(env.status.msg, "");
        assert!(env.property.is_empty());
    }
}
