//! Check reports and deterministic failure witnesses.
//!
//! Two independent runs over the same semantic failure MUST produce
//! identical witness IDs.
//!
//! Algorithm:
//! 1. Build the canonical witness key (schema, class, axiom, context)
//! 2. Serialize canonically — sorted keys, no whitespace
//! 3. witnessId = "u1_" || base32hex_lower(SHA256(keyBytes))

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Failure class constants.
pub mod failure_class {
    pub const IMPROPER_FILTER: &str = "improper_filter";
    pub const CAUCHY_FAILURE: &str = "cauchy_failure";
    pub const LIMIT_MISSING: &str = "limit_missing";
    pub const COVER_MISSING: &str = "cover_missing";
    pub const SEPARATION_FAILURE: &str = "separation_failure";
    pub const PREMISE_FAILURE: &str = "premise_failure";
    pub const CONVERGENCE_FAILURE: &str = "convergence_failure";
    pub const CONTINUITY_FAILURE: &str = "continuity_failure";
}

/// Axiom reference constants: which law a witness speaks about.
pub mod axiom {
    pub const CAUCHY_PRODUCT: &str = "CAUCHY.PRODUCT";
    pub const CAUCHY_PUSHFORWARD: &str = "CAUCHY.PUSHFORWARD";
    pub const COMPLETE_LIMIT: &str = "COMPLETE.LIMIT";
    pub const COMPLETE_SEPARATION: &str = "COMPLETE.SEPARATION";
    pub const BOUNDED_COVER: &str = "BOUNDED.COVER";
    pub const BOUNDED_ULTRA: &str = "BOUNDED.ULTRA";
    pub const COMPACT_SPLIT: &str = "COMPACT.SPLIT";
    pub const CONV_UNIFORM: &str = "CONV.UNIFORM";
    pub const CONV_LOCAL: &str = "CONV.LOCAL";
    pub const CONV_CONTINUITY: &str = "CONV.CONTINUITY";
    pub const CONV_COMPOSE: &str = "CONV.COMPOSE";
}

/// Compute a witness ID from the canonical witness key fields.
pub fn compute_witness_id(class: &str, axiom: &str, context: Option<&Value>) -> String {
    let mut map = serde_json::Map::new();
    map.insert("schema".to_string(), Value::Number(1.into()));
    map.insert("class".to_string(), Value::String(class.to_string()));
    map.insert("axiom".to_string(), Value::String(axiom.to_string()));
    map.insert(
        "context".to_string(),
        context.cloned().unwrap_or(Value::Null),
    );
    let key_bytes = canonical_bytes(&Value::Object(map));
    let hash = Sha256::digest(&key_bytes);
    let encoded = base32hex_lower_no_pad(&hash);
    format!("u1_{encoded}")
}

/// Canonical serialization: lexicographically sorted keys, no
/// insignificant whitespace, plain decimal integers.
fn canonical_bytes(value: &Value) -> Vec<u8> {
    match value {
        Value::Null => b"null".to_vec(),
        Value::Bool(b) => {
            if *b {
                b"true".to_vec()
            } else {
                b"false".to_vec()
            }
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                format!("{i}").into_bytes()
            } else if let Some(u) = n.as_u64() {
                format!("{u}").into_bytes()
            } else if let Some(f) = n.as_f64() {
                format!("{f}").into_bytes()
            } else {
                n.to_string().into_bytes()
            }
        }
        Value::String(_) => serde_json::to_vec(value).unwrap_or_default(),
        Value::Array(arr) => {
            let mut buf = vec![b'['];
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                buf.extend_from_slice(&canonical_bytes(v));
            }
            buf.push(b']');
            buf
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut buf = vec![b'{'];
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                buf.extend_from_slice(
                    &serde_json::to_vec(&Value::String((*key).clone())).unwrap_or_default(),
                );
                buf.push(b':');
                buf.extend_from_slice(&canonical_bytes(&map[*key]));
            }
            buf.push(b'}');
            buf
        }
    }
}

/// RFC 4648 base32hex, lowercase, without padding (alphabet 0-9 a-v).
fn base32hex_lower_no_pad(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuv";

    let mut result = String::new();
    let mut bits: u64 = 0;
    let mut num_bits: u32 = 0;

    for &byte in data {
        bits = (bits << 8) | (byte as u64);
        num_bits += 8;

        while num_bits >= 5 {
            num_bits -= 5;
            let idx = ((bits >> num_bits) & 0x1f) as usize;
            result.push(ALPHABET[idx] as char);
        }
    }

    if num_bits > 0 {
        let idx = ((bits << (5 - num_bits)) & 0x1f) as usize;
        result.push(ALPHABET[idx] as char);
    }

    result
}

/// Render a serializable value into a report context, falling back to
/// null rather than failing a check over a rendering problem.
pub fn render<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// One failure witness: what was refuted, against which law, where.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckFailure {
    /// Deterministic witness ID.
    pub witness_id: String,

    /// Failure classification.
    pub class: String,

    /// The law the witness speaks about.
    pub axiom: String,

    /// Human-readable description.
    pub message: String,

    /// Structured context (entourage descriptions, points, indices).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl CheckFailure {
    /// Create a failure with computed witness ID.
    pub fn new(
        class: impl Into<String>,
        axiom: impl Into<String>,
        message: impl Into<String>,
        context: Option<Value>,
    ) -> Self {
        let class = class.into();
        let axiom = axiom.into();
        let witness_id = compute_witness_id(&class, &axiom, context.as_ref());
        Self {
            witness_id,
            class,
            axiom,
            message: message.into(),
            context,
        }
    }

    /// Ordering key: class, axiom, context rendering, witness ID.
    fn sort_key(&self) -> (&str, &str, String, &str) {
        (
            &self.class,
            &self.axiom,
            self.context
                .as_ref()
                .map(|c| serde_json::to_string(c).unwrap_or_default())
                .unwrap_or_default(),
            &self.witness_id,
        )
    }
}

impl PartialOrd for CheckFailure {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheckFailure {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Verdict of a check: a refutation is an answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Satisfied,
    Refuted,
}

/// The result of one predicate check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Schema version (always 1).
    pub schema: u32,

    /// Which check ran (e.g. "cauchy", "complete").
    pub check: String,

    /// The outcome.
    pub verdict: Verdict,

    /// Positive witnesses: the certificates a satisfied verdict rests on
    /// (per-entourage basis sets, covers, limits, thresholds).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub witnesses: Vec<Value>,

    /// Failure witnesses (empty when satisfied), sorted canonically.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    /// A satisfied verdict carrying its certificates.
    pub fn satisfied(check: impl Into<String>, witnesses: Vec<Value>) -> Self {
        Self {
            schema: 1,
            check: check.into(),
            verdict: Verdict::Satisfied,
            witnesses,
            failures: vec![],
        }
    }

    /// A refuted verdict. Failures are sorted canonically.
    pub fn refuted(check: impl Into<String>, mut failures: Vec<CheckFailure>) -> Self {
        failures.sort();
        Self {
            schema: 1,
            check: check.into(),
            verdict: Verdict::Refuted,
            witnesses: vec![],
            failures,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.verdict == Verdict::Satisfied
    }

    /// Fold sub-reports into one: satisfied iff all pieces are, carrying
    /// all witnesses and failures.
    pub fn combine(check: impl Into<String>, parts: Vec<CheckReport>) -> Self {
        let mut witnesses = Vec::new();
        let mut failures = Vec::new();
        for part in parts {
            witnesses.extend(part.witnesses);
            failures.extend(part.failures);
        }
        if failures.is_empty() {
            Self::satisfied(check, witnesses)
        } else {
            Self::refuted(check, failures)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn witness_id_determinism() {
        let id1 = compute_witness_id(failure_class::CAUCHY_FAILURE, axiom::CAUCHY_PRODUCT, None);
        let id2 = compute_witness_id(failure_class::CAUCHY_FAILURE, axiom::CAUCHY_PRODUCT, None);
        assert_eq!(id1, id2);
        assert!(id1.starts_with("u1_"));
    }

    #[test]
    fn witness_id_sensitivity() {
        let id1 = compute_witness_id(failure_class::CAUCHY_FAILURE, axiom::CAUCHY_PRODUCT, None);
        let id2 = compute_witness_id(failure_class::LIMIT_MISSING, axiom::COMPLETE_LIMIT, None);
        assert_ne!(id1, id2);

        let ctx1 = json!({"entourage": "basis[0]"});
        let ctx2 = json!({"entourage": "basis[1]"});
        let id3 =
            compute_witness_id(failure_class::CAUCHY_FAILURE, axiom::CAUCHY_PRODUCT, Some(&ctx1));
        let id4 =
            compute_witness_id(failure_class::CAUCHY_FAILURE, axiom::CAUCHY_PRODUCT, Some(&ctx2));
        assert_ne!(id3, id4);
    }

    #[test]
    fn canonical_key_ordering() {
        let v = json!({"b": 1, "a": {"d": null, "c": [1, 2]}});
        let s = String::from_utf8(canonical_bytes(&v)).unwrap();
        assert_eq!(s, r#"{"a":{"c":[1,2],"d":null},"b":1}"#);
    }

    #[test]
    fn base32hex_alphabet() {
        let hash = Sha256::digest(b"");
        let encoded = base32hex_lower_no_pad(&hash);
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='v').contains(&c))
        );
    }

    #[test]
    fn refuted_failures_sorted() {
        let f1 = CheckFailure::new(
            failure_class::LIMIT_MISSING,
            axiom::COMPLETE_LIMIT,
            "later",
            None,
        );
        let f2 = CheckFailure::new(
            failure_class::CAUCHY_FAILURE,
            axiom::CAUCHY_PRODUCT,
            "earlier",
            None,
        );
        let report = CheckReport::refuted("cauchy", vec![f1, f2]);
        assert_eq!(report.failures[0].class, failure_class::CAUCHY_FAILURE);
        assert_eq!(report.failures[1].class, failure_class::LIMIT_MISSING);
    }

    #[test]
    fn combine_folds_verdicts() {
        let good = CheckReport::satisfied("a", vec![json!({"ok": true})]);
        let bad = CheckReport::refuted(
            "b",
            vec![CheckFailure::new(
                failure_class::COVER_MISSING,
                axiom::BOUNDED_COVER,
                "no cover",
                None,
            )],
        );
        let all = CheckReport::combine("compact", vec![good.clone(), bad]);
        assert!(!all.is_satisfied());

        let all_good = CheckReport::combine("compact", vec![good.clone(), good]);
        assert!(all_good.is_satisfied());
        assert_eq!(all_good.witnesses.len(), 2);
    }
}
