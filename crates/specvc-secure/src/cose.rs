//! COSE_Sign1 envelopes.
use crate::diag;
use crate::envelope::{Envelope, EnvelopeContext, EnvelopeError, Enveloper, Format};
use crate::jose::to_josekit_jwk;
use async_trait::async_trait;
use ciborium::value::Value as Cbor;
use coset::{iana, CoseSign1Builder, HeaderBuilder, TaggedCborSerializable};
use josekit::jws::{JwsSigner, ES256};
use serde_json::Value;
use specvc_core::example::{DocumentKind, VcExample};
use specvc_core::text::{escape_html, wrap_columns};

const WRAP_WIDTH: usize = 75;

/// Secures an example as a COSE_Sign1 envelope.
pub struct CoseEnveloper;

#[async_trait]
impl Enveloper for CoseEnveloper {
    fn format(&self) -> Format {
        Format::Cose
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
        let signer = ES256.signer_from_jwk(&to_josekit_jwk(context.keyring().p256_key())?)?;

        let protected = HeaderBuilder::new()
            .algorithm(iana::Algorithm::ES256)
            .key_id(kid.into_bytes())
            .build();
        let payload = serde_json::to_vec_pretty(document)?;
        let sign1 = CoseSign1Builder::new()
            .protected(protected)
            .payload(payload)
            .try_create_signature(b"", |bytes| signer.sign(bytes))
            .map_err(EnvelopeError::Jose)?
            .build();
        let bytes = sign1.to_tagged_vec()?;
        let hex = hex::encode(&bytes);

        let decoded: Cbor = ciborium::from_reader(bytes.as_slice())
            .map_err(|e| EnvelopeError::Cbor(e.to_string()))?;
        let media_type = kind.cose_media_type();
        let html = format!(
            "<h1>{}</h1>\n<pre>{}</pre>\
             \n<h1>application/cbor-diagnostic</h1>\
             \n<div class=\"cose-text\">\n<pre><code>{}</code></pre>\n</div>\
             \n<h1>{}</h1>\n<div class=\"cose-text\">\n{}\n</div>",
            media_type.replace("+cose", ""),
            escape_html(&serde_json::to_string_pretty(document)?),
            escape_html(&diag::render(&decoded)),
            media_type,
            wrap_columns(&hex, WRAP_WIDTH)
        );
        Ok(Envelope {
            format: Format::Cose,
            label: "Secured with COSE".to_string(),
            raw: hex,
            html,
        })
    }
}
