//! SD-JWT envelopes with per-claim issuer disclosures.
//!
//! Every top-level `credentialSubject` claim becomes a selectively
//! disclosable claim: a salted `[salt, name, value]` disclosure array,
//! base64url-encoded, hashed into the payload's `_sd` digest list. Signing is
//! delegated to the JOSE library; hashing to the SHA-2 library.
use crate::envelope::{Envelope, EnvelopeContext, EnvelopeError, Enveloper, Format};
use crate::jose::to_josekit_jwk;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use josekit::jws::{self, JwsHeader, ES256};
use rand::RngCore;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use specvc_core::example::{DocumentKind, VcExample};
use specvc_core::text::escape_html;

/// Hash algorithm identifier carried in the `_sd_alg` claim.
const SD_ALG: &str = "sha-256";

/// A selectively disclosable claim.
#[derive(Debug, Clone, PartialEq)]
pub struct Disclosure {
    /// Claim name within `credentialSubject`.
    pub name: String,
    /// Claim value.
    pub value: Value,
    /// base64url-encoded `[salt, name, value]` array.
    pub encoded: String,
    /// base64url SHA-256 digest of the encoded disclosure.
    pub digest: String,
}

impl Disclosure {
    fn new(name: String, value: Value) -> Self {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        let salt = URL_SAFE_NO_PAD.encode(salt);
        let encoded = URL_SAFE_NO_PAD.encode(json!([&salt, &name, &value]).to_string());
        let digest = hash_encoded_disclosure(&encoded);
        Self {
            name,
            value,
            encoded,
            digest,
        }
    }

    /// The decoded `[salt, name, value]` contents.
    fn contents(&self) -> Value {
        let bytes = URL_SAFE_NO_PAD
            .decode(&self.encoded)
            .expect("disclosure was encoded above");
        serde_json::from_slice(&bytes).expect("disclosure was serialized above")
    }
}

/// base64url SHA-256 digest of an encoded disclosure.
pub fn hash_encoded_disclosure(encoded: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(encoded.as_bytes()))
}

/// Replaces the top-level `credentialSubject` claims with an `_sd` digest
/// list and returns the payload together with the disclosures.
fn split_claims(document: &Value) -> (Value, Vec<Disclosure>) {
    let mut payload = document.clone();
    let claims = match payload
        .get("credentialSubject")
        .and_then(Value::as_object)
        .cloned()
    {
        Some(claims) if !claims.is_empty() => claims,
        _ => return (payload, vec![]),
    };
    let disclosures: Vec<Disclosure> = claims
        .into_iter()
        .map(|(name, value)| Disclosure::new(name, value))
        .collect();
    let digests: Vec<&str> = disclosures.iter().map(|d| d.digest.as_str()).collect();
    payload["credentialSubject"] = json!({ "_sd": digests });
    payload["_sd_alg"] = json!(SD_ALG);
    (payload, disclosures)
}

/// Secures an example as an SD-JWT.
pub struct SdJwtEnveloper;

impl SdJwtEnveloper {
    fn encoded_html(token: &str) -> String {
        let (jws, disclosures) = match token.split_once('~') {
            Some((jws, rest)) => (jws, rest.split('~').collect::<Vec<_>>()),
            None => (token, vec![]),
        };
        let segments: Vec<&str> = jws.split('.').collect();
        let mut html = format!(
            "<div class=\"sd-jwt-compact\"><span class=\"sd-jwt-header\">{}</span>\
             .<span class=\"sd-jwt-payload\">{}</span>\
             .<span class=\"sd-jwt-signature\">{}</span>",
            segments.first().unwrap_or(&""),
            segments.get(1).unwrap_or(&""),
            segments.get(2).unwrap_or(&"")
        );
        for disclosure in disclosures {
            html.push_str(&format!(
                "~<span class=\"sd-jwt-disclosure\">{}</span>",
                disclosure
            ));
        }
        html.push_str("</div>");
        html
    }

    fn disclosures_html(disclosures: &[Disclosure]) -> Result<String, EnvelopeError> {
        let mut html = String::from("<div class=\"disclosures\">");
        for disclosure in disclosures {
            html.push_str(&format!(
                "\n<div class=\"disclosure\">\
                 \n<h3 id=\"sd-jwt-claim-{digest}\">Claim: <span class=\"claim-name\">{name}</span></h3>\
                 \n<p><strong>SHA-256 Hash:</strong> <span class=\"hash\">{digest}</span></p>\
                 \n<p><strong>Disclosure(s):</strong> <span class=\"disclosure-value\">{encoded}</span></p>\
                 \n<p><strong>Contents:</strong> <span class=\"contents\">{contents}</span></p>\
                 \n</div>",
                digest = disclosure.digest,
                name = escape_html(&disclosure.name),
                encoded = disclosure.encoded,
                contents = escape_html(&serde_json::to_string(&disclosure.contents())?),
            ));
        }
        html.push_str("\n</div>");
        Ok(html)
    }
}

#[async_trait]
impl Enveloper for SdJwtEnveloper {
    fn format(&self) -> Format {
        Format::SdJwt
    }

    async fn envelope(
        &self,
        example: &VcExample,
        document: &Value,
        context: &EnvelopeContext,
    ) -> Result<Envelope, EnvelopeError> {
        let kind = DocumentKind::detect(document)?;
        let kid = example
            .verification_method
            .clone()
            .unwrap_or_else(|| context.keyring().p256_verification_method());
        let (payload, disclosures) = split_claims(document);

        let token_type = kind
            .sd_jwt_media_type()
            .trim_start_matches("application/")
            .to_string();
        let mut header = JwsHeader::new();
        header.set_token_type(token_type.clone());
        header.set_key_id(kid.clone());

        let signer = ES256.signer_from_jwk(&to_josekit_jwk(context.keyring().p256_key())?)?;
        let payload_bytes = serde_json::to_vec(&payload)?;
        let jws = jws::serialize_compact(&payload_bytes, &header, &signer)?;

        let token = std::iter::once(jws.as_str())
            .chain(disclosures.iter().map(|d| d.encoded.as_str()))
            .collect::<Vec<_>>()
            .join("~");

        let uid = format!("sd-jwt-{}", example.index);
        let header_json = json!({"alg": "ES256", "typ": token_type, "kid": kid});
        let decoded_html = format!(
            "<pre class=\"header-value\">{}</pre>\n<pre class=\"payload-value\">{}</pre>",
            escape_html(&serde_json::to_string_pretty(&header_json)?),
            escape_html(&serde_json::to_string_pretty(&payload)?)
        );
        let html = format!(
            "<div class=\"sd-jwt-tabbed\" data-media-type=\"{media_type}\">\
             \n<input type=\"radio\" id=\"{uid}-encoded\" name=\"{uid}-tabs\" checked=\"checked\" tabindex=\"0\">\
             \n<input type=\"radio\" id=\"{uid}-decoded\" name=\"{uid}-tabs\" tabindex=\"0\">\
             \n<input type=\"radio\" id=\"{uid}-disclosures\" name=\"{uid}-tabs\" tabindex=\"0\">\
             \n<ul class=\"sd-jwt-tabs\">\
             \n<li class=\"sd-jwt-tab\"><label for=\"{uid}-encoded\">Encoded</label></li>\
             \n<li class=\"sd-jwt-tab\"><label for=\"{uid}-decoded\">Decoded</label></li>\
             \n<li class=\"sd-jwt-tab\"><label for=\"{uid}-disclosures\">Issuer Disclosures</label></li>\
             \n</ul>\
             \n<div class=\"sd-jwt-tab-content\" id=\"{uid}-content-encoded\">\n{encoded}\n</div>\
             \n<div class=\"sd-jwt-tab-content\" id=\"{uid}-content-decoded\">\n{decoded}\n</div>\
             \n<div class=\"sd-jwt-tab-content\" id=\"{uid}-content-disclosures\">\n{disclosures}\n</div>\
             \n</div>",
            media_type = kind.sd_jwt_media_type(),
            uid = uid,
            encoded = Self::encoded_html(&token),
            decoded = decoded_html,
            disclosures = Self::disclosures_html(&disclosures)?,
        );

        Ok(Envelope {
            format: Format::SdJwt,
            label: "Secured with SD-JWT".to_string(),
            raw: token,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specvc_core::data::{TEST_UNSIGNED_VC, TEST_UNSIGNED_VP};
    use specvc_core::keys::ExampleKeyring;

    #[test]
    fn test_split_claims() {
        let document: Value = serde_json::from_str(TEST_UNSIGNED_VC).unwrap();
        let (payload, disclosures) = split_claims(&document);
        assert_eq!(disclosures.len(), 2);
        assert_eq!(payload["_sd_alg"], SD_ALG);
        let digests = payload["credentialSubject"]["_sd"].as_array().unwrap();
        assert_eq!(digests.len(), 2);
        for disclosure in &disclosures {
            assert!(digests.contains(&json!(disclosure.digest)));
        }
        // The original claims must no longer appear in the payload.
        assert!(payload["credentialSubject"].get("alumniOf").is_none());
    }

    #[test]
    fn test_split_claims_without_subject() {
        let document: Value = serde_json::from_str(TEST_UNSIGNED_VP).unwrap();
        let (payload, disclosures) = split_claims(&document);
        assert!(disclosures.is_empty());
        assert_eq!(payload, document);
    }

    #[test]
    fn test_disclosure_round_trip() {
        let disclosure = Disclosure::new("alumniOf".to_string(), json!("Example University"));
        let contents = disclosure.contents();
        let array = contents.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[1], "alumniOf");
        assert_eq!(array[2], "Example University");
        assert_eq!(
            disclosure.digest,
            hash_encoded_disclosure(&disclosure.encoded)
        );
        // 32 bytes of SHA-256 without padding.
        assert_eq!(disclosure.digest.len(), 43);
    }

    #[test]
    fn test_distinct_salts() {
        let first = Disclosure::new("a".to_string(), json!(1));
        let second = Disclosure::new("a".to_string(), json!(1));
        assert_ne!(first.encoded, second.encoded);
        assert_ne!(first.digest, second.digest);
    }

    #[tokio::test]
    async fn test_envelope_sd_jwt() {
        let context = EnvelopeContext::new(ExampleKeyring::generate().unwrap());
        let example = VcExample::new(3, TEST_UNSIGNED_VC.to_string());
        let document: Value = example.parse().unwrap();

        let envelope = SdJwtEnveloper
            .envelope(&example, &document, &context)
            .await
            .unwrap();

        let segments: Vec<&str> = envelope.raw.split('~').collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].split('.').count(), 3);

        assert!(envelope.html.contains("sd-jwt-3-encoded"));
        assert!(envelope.html.contains("Issuer Disclosures"));
        assert!(envelope.html.contains("application/vc+sd-jwt"));
    }
}
