//! Data Integrity proof envelopes.
//!
//! Proof generation is delegated entirely to the signature-suite library; this
//! module selects the suite and key, attaches the proof and renders the signed
//! document.
use crate::envelope::{Envelope, EnvelopeContext, EnvelopeError, Enveloper, Format};
use async_trait::async_trait;
use did_method_key::DIDKey;
use serde_json::Value;
use specvc_core::example::{DocumentKind, VcExample};
use specvc_core::text::{escape_html, wrap_columns};
use ssi::did::DIDMethod;
use ssi::jwk::JWK;
use ssi::ldp::ProofSuiteType;
use ssi::vc::{Credential, LinkedDataProofOptions, Presentation, ProofPurpose, URI};

/// Column width of the preformatted proof output.
const WRAP_WIDTH: usize = 75;

/// Attaches a Data Integrity proof to a credential or presentation example.
pub struct DataIntegrityEnveloper {
    format: Format,
}

impl DataIntegrityEnveloper {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    fn suite_type(&self) -> ProofSuiteType {
        match self.format {
            Format::DataIntegrityEddsa | Format::DataIntegrityEcdsa => {
                ProofSuiteType::DataIntegrityProof
            }
            Format::Ed25519Signature2020 => ProofSuiteType::Ed25519Signature2020,
            _ => unreachable!("not a Data Integrity format"),
        }
    }

    /// The signing key for this suite: P-256 for the ECDSA cryptosuite,
    /// Ed25519 otherwise.
    fn signing_key<'a>(&self, context: &'a EnvelopeContext) -> &'a JWK {
        match self.format {
            Format::DataIntegrityEcdsa => context.keyring().p256_key(),
            _ => context.keyring().ed25519_key(),
        }
    }

    fn verification_method(&self, example: &VcExample, context: &EnvelopeContext) -> String {
        if let Some(vm) = &example.verification_method {
            return vm.clone();
        }
        match self.format {
            Format::DataIntegrityEcdsa => context.keyring().p256_verification_method(),
            _ => context.keyring().ed25519_verification_method(),
        }
    }

    fn options(&self, verification_method: String, purpose: ProofPurpose) -> LinkedDataProofOptions {
        LinkedDataProofOptions {
            verification_method: Some(URI::String(verification_method)),
            proof_purpose: Some(purpose),
            type_: Some(self.suite_type()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Enveloper for DataIntegrityEnveloper {
    fn format(&self) -> Format {
        self.format
    }

    async fn envelope(
        &self,
        example: &VcExample,
        document: &Value,
        context: &EnvelopeContext,
    ) -> Result<Envelope, EnvelopeError> {
        let kind = DocumentKind::detect(document)?;
        let key = self.signing_key(context);
        let verification_method = self.verification_method(example, context);
        let mut context_loader = context.context_loader()?;
        let resolver = DIDKey.to_resolver();

        let signed = match kind {
            DocumentKind::Credential => {
                let mut credential: Credential = serde_json::from_value(document.clone())?;
                credential.validate_unsigned()?;
                let options = self.options(verification_method, ProofPurpose::AssertionMethod);
                let proof = credential
                    .generate_proof(key, &options, resolver, &mut context_loader)
                    .await?;
                credential.add_proof(proof);
                serde_json::to_value(&credential)?
            }
            DocumentKind::Presentation => {
                let mut presentation: Presentation = serde_json::from_value(document.clone())?;
                presentation.validate_unsigned()?;
                let options = self.options(verification_method, ProofPurpose::Authentication);
                let proof = presentation
                    .generate_proof(key, &options, resolver, &mut context_loader)
                    .await?;
                presentation.add_proof(proof);
                serde_json::to_value(&presentation)?
            }
        };

        let raw = serde_json::to_string_pretty(&signed)?;
        let html = format!(
            "<pre>{}</pre>",
            escape_html(&wrap_columns(&raw, WRAP_WIDTH))
        );
        Ok(Envelope {
            format: self.format,
            label: format!("Secured with Data Integrity ({})", self.format.id()),
            raw,
            html,
        })
    }
}
