//! CBOR-LD byte encoding of example documents.
//!
//! Emits the uncompressed CBOR-LD mode: the document as plain CBOR wrapped in
//! the CBOR-LD tag 0x0500. Registry-based semantic compression stays in
//! external encoders.
use crate::diag;
use crate::envelope::{Envelope, EnvelopeContext, EnvelopeError, Enveloper, Format};
use async_trait::async_trait;
use ciborium::value::Value as Cbor;
use serde_json::Value;
use specvc_core::example::VcExample;
use specvc_core::text::{escape_html, wrap_columns};

/// CBOR tag marking an uncompressed CBOR-LD document.
pub const CBOR_LD_UNCOMPRESSED_TAG: u64 = 0x0500;

const WRAP_WIDTH: usize = 75;

/// Encodes a JSON-LD document as uncompressed CBOR-LD bytes.
pub fn encode(document: &Value) -> Result<Vec<u8>, EnvelopeError> {
    let tagged = Cbor::Tag(CBOR_LD_UNCOMPRESSED_TAG, Box::new(to_cbor(document)));
    let mut bytes = Vec::new();
    ciborium::into_writer(&tagged, &mut bytes).map_err(|e| EnvelopeError::Cbor(e.to_string()))?;
    Ok(bytes)
}

/// Converts a JSON value into its CBOR representation.
pub fn to_cbor(value: &Value) -> Cbor {
    match value {
        Value::Null => Cbor::Null,
        Value::Bool(b) => Cbor::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cbor::Integer(i.into())
            } else if let Some(u) = n.as_u64() {
                Cbor::Integer(u.into())
            } else {
                Cbor::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => Cbor::Text(s.clone()),
        Value::Array(items) => Cbor::Array(items.iter().map(to_cbor).collect()),
        Value::Object(map) => Cbor::Map(
            map.iter()
                .map(|(k, v)| (Cbor::Text(k.clone()), to_cbor(v)))
                .collect(),
        ),
    }
}

/// Secures an example as CBOR-LD bytes.
pub struct CborLdEnveloper;

#[async_trait]
impl Enveloper for CborLdEnveloper {
    fn format(&self) -> Format {
        Format::CborLd
    }

    async fn envelope(
        &self,
        _example: &VcExample,
        document: &Value,
        _context: &EnvelopeContext,
    ) -> Result<Envelope, EnvelopeError> {
        let bytes = encode(document)?;
        let hex = hex::encode(&bytes);
        let decoded: Cbor = ciborium::from_reader(bytes.as_slice())
            .map_err(|e| EnvelopeError::Cbor(e.to_string()))?;
        let html = format!(
            "<h1>application/ld+json</h1>\n<pre>{}</pre>\
             \n<h1>application/cbor-diagnostic</h1>\
             \n<div class=\"cbor-ld-text\">\n<pre><code>{}</code></pre>\n</div>\
             \n<h1>application/cbor-ld</h1>\n<div class=\"cbor-ld-text\">\n{}\n</div>",
            escape_html(&serde_json::to_string_pretty(document)?),
            escape_html(&diag::render(&decoded)),
            wrap_columns(&hex, WRAP_WIDTH)
        );
        Ok(Envelope {
            format: Format::CborLd,
            label: "CBOR-LD".to_string(),
            raw: hex,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use specvc_core::data::TEST_UNSIGNED_VC;
    use specvc_core::keys::ExampleKeyring;

    #[test]
    fn test_encode_prefixes_cbor_ld_tag() {
        let document: Value = serde_json::from_str(TEST_UNSIGNED_VC).unwrap();
        let bytes = encode(&document).unwrap();
        // Tag 0x0500 encodes as 0xd9 0x05 0x00.
        assert_eq!(&bytes[..3], &[0xd9, 0x05, 0x00]);
    }

    #[test]
    fn test_encode_round_trip() {
        let document: Value = serde_json::from_str(TEST_UNSIGNED_VC).unwrap();
        let bytes = encode(&document).unwrap();
        let decoded: Cbor = ciborium::from_reader(bytes.as_slice()).unwrap();
        match decoded {
            Cbor::Tag(tag, inner) => {
                assert_eq!(tag, CBOR_LD_UNCOMPRESSED_TAG);
                assert!(matches!(*inner, Cbor::Map(_)));
            }
            other => panic!("expected tagged value, got {:?}", other),
        }
    }

    #[test]
    fn test_to_cbor_scalars() {
        assert_eq!(to_cbor(&json!(null)), Cbor::Null);
        assert_eq!(to_cbor(&json!(true)), Cbor::Bool(true));
        assert_eq!(to_cbor(&json!(42)), Cbor::Integer(42.into()));
        assert_eq!(to_cbor(&json!(-1)), Cbor::Integer((-1).into()));
        assert_eq!(to_cbor(&json!(1.5)), Cbor::Float(1.5));
        assert_eq!(to_cbor(&json!("a")), Cbor::Text("a".to_string()));
    }

    #[test]
    fn test_to_cbor_collections() {
        let value = to_cbor(&json!({"a": [1, 2]}));
        match value {
            Cbor::Map(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].0, Cbor::Text("a".to_string()));
                assert_eq!(
                    entries[0].1,
                    Cbor::Array(vec![Cbor::Integer(1.into()), Cbor::Integer(2.into())])
                );
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_envelope_cbor_ld() {
        let context = EnvelopeContext::new(ExampleKeyring::generate().unwrap());
        let example = VcExample::new(1, TEST_UNSIGNED_VC.to_string());
        let document: Value = example.parse().unwrap();

        let envelope = CborLdEnveloper
            .envelope(&example, &document, &context)
            .await
            .unwrap();
        assert!(envelope.raw.starts_with("d90500"));
        assert!(envelope.html.contains("application/cbor-diagnostic"));
        assert!(envelope.html.contains("1280(")); // diagnostic notation of the tag
    }
}
