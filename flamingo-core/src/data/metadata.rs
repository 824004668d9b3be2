//! Descriptive metadata: a loose string → scalar mapping.
//!
//! Yahoo reports numbers either bare (`"beta": 0.61`) or wrapped
//! (`"beta": {"raw": 0.61, "fmt": "0.61"}`); both flatten to `MetaValue::Number`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One metadata scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Number(f64),
    Text(String),
}

impl MetaValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetaValue::Number(n) => Some(*n),
            MetaValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            MetaValue::Number(_) => None,
        }
    }

    /// Flatten a JSON leaf. Objects without a numeric `raw`, arrays, nulls
    /// and empty strings carry nothing displayable.
    pub fn from_json(value: &Value) -> Option<MetaValue> {
        match value {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(MetaValue::Number),
            Value::String(s) if !s.trim().is_empty() => Some(MetaValue::Text(s.clone())),
            Value::Object(obj) => obj
                .get("raw")
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite())
                .map(MetaValue::Number),
            _ => None,
        }
    }
}

/// Metadata keyed by provider field name (`trailingPE`, `sector`, ...).
pub type Metadata = BTreeMap<String, MetaValue>;

/// Numeric field lookup.
pub fn number(meta: &Metadata, key: &str) -> Option<f64> {
    meta.get(key).and_then(MetaValue::as_number)
}

/// Text field lookup.
pub fn text<'a>(meta: &'a Metadata, key: &str) -> Option<&'a str> {
    meta.get(key).and_then(MetaValue::as_text)
}

/// Copy every displayable field of a JSON object into `meta`.
///
/// Existing keys are kept: the first module to report a field wins.
pub fn merge_object(meta: &mut Metadata, object: &serde_json::Map<String, Value>) {
    for (key, value) in object {
        if meta.contains_key(key) {
            continue;
        }
        if let Some(v) = MetaValue::from_json(value) {
            meta.insert(key.clone(), v);
        }
    }
}

/// Flatten a quoteSummary payload: `{"quoteSummary": {"result": [{module: {...}}]}}`.
pub fn parse_quote_summary(payload: &Value) -> Metadata {
    let mut meta = Metadata::new();
    let modules = payload
        .pointer("/quoteSummary/result/0")
        .and_then(Value::as_object);
    if let Some(modules) = modules {
        for module in modules.values() {
            if let Some(obj) = module.as_object() {
                merge_object(&mut meta, obj);
            }
        }
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_raw_wrappers_and_text() {
        let payload = json!({
            "quoteSummary": {
                "result": [{
                    "summaryDetail": {
                        "trailingPE": {"raw": 27.4, "fmt": "27.40"},
                        "marketCap": {"raw": 6.1e12, "fmt": "6.1T"},
                        "dividendYield": {},
                        "maxAge": 1
                    },
                    "assetProfile": {
                        "sector": "Technology",
                        "industry": "Information Technology Services",
                        "longBusinessSummary": "Provides consulting.",
                        "companyOfficers": []
                    }
                }],
                "error": null
            }
        });
        let meta = parse_quote_summary(&payload);
        assert_eq!(number(&meta, "trailingPE"), Some(27.4));
        assert_eq!(number(&meta, "marketCap"), Some(6.1e12));
        assert_eq!(text(&meta, "sector"), Some("Technology"));
        assert!(!meta.contains_key("dividendYield"));
        assert!(!meta.contains_key("companyOfficers"));
    }

    #[test]
    fn first_module_wins() {
        let mut meta = Metadata::new();
        meta.insert("marketCap".into(), MetaValue::Number(1.0));
        let obj = json!({"marketCap": {"raw": 2.0}}).as_object().unwrap().clone();
        merge_object(&mut meta, &obj);
        assert_eq!(number(&meta, "marketCap"), Some(1.0));
    }

    #[test]
    fn malformed_payload_is_empty() {
        assert!(parse_quote_summary(&json!({"finance": {"error": "Unauthorized"}})).is_empty());
        assert!(parse_quote_summary(&json!(null)).is_empty());
    }

    #[test]
    fn typed_lookups_do_not_coerce() {
        let mut meta = Metadata::new();
        meta.insert("sector".into(), MetaValue::Text("Energy".into()));
        assert_eq!(number(&meta, "sector"), None);
        assert_eq!(text(&meta, "missing"), None);
    }
}
