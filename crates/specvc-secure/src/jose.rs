//! VC-JWT envelopes via JOSE compact signing.
use crate::envelope::{Envelope, EnvelopeContext, EnvelopeError, Enveloper, Format};
use async_trait::async_trait;
use chrono::DateTime;
use josekit::jwk::Jwk;
use josekit::jws::{JwsHeader, ES256};
use josekit::jwt::{self, JwtPayload};
use serde_json::{json, Map, Value};
use specvc_core::example::{DocumentKind, VcExample};
use specvc_core::text::{escape_html, wrap_columns};

const WRAP_WIDTH: usize = 75;

/// Converts a signing key to its josekit representation via JWK JSON.
pub(crate) fn to_josekit_jwk(jwk: &ssi::jwk::JWK) -> Result<Jwk, EnvelopeError> {
    Ok(Jwk::from_bytes(serde_json::to_vec(jwk)?)?)
}

/// Converts an XML Schema datetime value to a UNIX timestamp.
fn xml_datetime_to_unix_timestamp(datetime: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(datetime)
        .ok()
        .map(|dt| dt.timestamp())
}

/// Secures an example as a VC-JWT.
pub struct JwtEnveloper;

impl JwtEnveloper {
    /// Maps credential members onto registered JWT claims, duplicating them
    /// alongside the full document under the `vc` claim.
    fn claims(document: &Value) -> Map<String, Value> {
        let mut claims = Map::new();
        if let Some(exp) = document
            .get("expirationDate")
            .or_else(|| document.get("validUntil"))
            .and_then(Value::as_str)
            .and_then(xml_datetime_to_unix_timestamp)
        {
            claims.insert("exp".to_string(), json!(exp));
        }
        let issuer = match document.get("issuer") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Object(obj)) => obj.get("id").and_then(Value::as_str).map(String::from),
            _ => None,
        };
        if let Some(iss) = issuer {
            claims.insert("iss".to_string(), json!(iss));
        }
        if let Some(nbf) = document
            .get("issuanceDate")
            .or_else(|| document.get("validFrom"))
            .and_then(Value::as_str)
            .and_then(xml_datetime_to_unix_timestamp)
        {
            claims.insert("nbf".to_string(), json!(nbf));
        }
        if let Some(jti) = document.get("id").and_then(Value::as_str) {
            claims.insert("jti".to_string(), json!(jti));
        }
        if let Some(sub) = document
            .get("credentialSubject")
            .and_then(|subject| subject.get("id"))
            .and_then(Value::as_str)
        {
            claims.insert("sub".to_string(), json!(sub));
        }
        claims.insert("vc".to_string(), document.clone());
        claims
    }
}

#[async_trait]
impl Enveloper for JwtEnveloper {
    fn format(&self) -> Format {
        Format::VcJwt
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

        let claims = Self::claims(document);
        let mut payload = JwtPayload::new();
        for (name, value) in &claims {
            payload.set_claim(name, Some(value.clone()))?;
        }

        let mut header = JwsHeader::new();
        header.set_token_type("JWT");
        header.set_key_id(kid.clone());

        let signer = ES256.signer_from_jwk(&to_josekit_jwk(context.keyring().p256_key())?)?;
        let token = jwt::encode_with_signer(&payload, &header, &signer)?;

        let header_json = json!({"alg": "ES256", "typ": "JWT", "kid": kid});
        let description = format!(
            "---------------- JWT header ---------------\n{}\
             \n\n--------------- JWT payload ---------------\n\
             // NOTE: The example below uses a valid VC-JWT serialization\n\
             //       that duplicates the iss, nbf, jti, and sub fields in the\n\
             //       Verifiable Credential (vc) field.\n\n{}\
             \n\n--------------- JWT ---------------\n\n{}",
            serde_json::to_string_pretty(&header_json)?,
            serde_json::to_string_pretty(&Value::Object(claims))?,
            token
        );

        let html = format!(
            "<div class=\"jose-text\" data-media-type=\"{}\"><pre>{}</pre></div>",
            kind.jose_media_type(),
            escape_html(&wrap_columns(&description, WRAP_WIDTH))
        );
        Ok(Envelope {
            format: Format::VcJwt,
            label: "Secured with VC-JWT".to_string(),
            raw: token,
            html,
        })
    }
}
