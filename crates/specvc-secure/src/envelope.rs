//! Envelope format registry and the enveloper seam.
use async_trait::async_trait;
use serde_json::Value;
use specvc_core::example::{ExampleError, VcExample};
use specvc_core::keys::{ExampleKeyring, KeyringError};
use ssi::jsonld::ContextLoader;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An error relating to securing an example with an envelope format.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Wrapped error for an example error.
    #[error("A wrapped variant for an example error: {0}")]
    Example(ExampleError),
    /// Wrapped error for a keyring error.
    #[error("A wrapped variant for a keyring error: {0}")]
    Keyring(KeyringError),
    /// Wrapped error for ssi-vc error.
    #[error("A wrapped variant for an SSI VC error: {0}")]
    VC(ssi::vc::Error),
    /// Wrapped error for ssi-ldp error.
    #[error("A wrapped variant for an SSI LDP error: {0}")]
    LDP(ssi::ldp::Error),
    /// Wrapped error for a josekit error.
    #[error("A wrapped variant for a JOSE error: {0}")]
    Jose(josekit::JoseError),
    /// Wrapped error for a coset error.
    #[error("A wrapped variant for a COSE error: {0}")]
    Cose(coset::CoseError),
    /// CBOR encoding failure.
    #[error("CBOR encoding failed: {0}")]
    Cbor(String),
    /// QR encoding failure.
    #[error("A wrapped variant for a QR encoding error: {0}")]
    Qr(qrcode::types::QrError),
    /// PNG encoding failure for a QR image.
    #[error("QR image encoding failed: {0}")]
    QrImage(String),
    /// Failure seeding the JSON-LD context loader.
    #[error("Failed to load JSON-LD contexts: {0}")]
    Context(String),
    /// Wrapped error for a JSON error.
    #[error("A wrapped variant for a JSON error: {0}")]
    Json(serde_json::Error),
    /// Format identifier not in the registry.
    #[error("Unknown format identifier: {0}")]
    UnknownFormat(String),
}

impl From<ExampleError> for EnvelopeError {
    fn from(err: ExampleError) -> Self {
        EnvelopeError::Example(err)
    }
}

impl From<KeyringError> for EnvelopeError {
    fn from(err: KeyringError) -> Self {
        EnvelopeError::Keyring(err)
    }
}

impl From<ssi::vc::Error> for EnvelopeError {
    fn from(err: ssi::vc::Error) -> Self {
        EnvelopeError::VC(err)
    }
}

impl From<ssi::ldp::Error> for EnvelopeError {
    fn from(err: ssi::ldp::Error) -> Self {
        EnvelopeError::LDP(err)
    }
}

impl From<josekit::JoseError> for EnvelopeError {
    fn from(err: josekit::JoseError) -> Self {
        EnvelopeError::Jose(err)
    }
}

impl From<coset::CoseError> for EnvelopeError {
    fn from(err: coset::CoseError) -> Self {
        EnvelopeError::Cose(err)
    }
}

impl From<qrcode::types::QrError> for EnvelopeError {
    fn from(err: qrcode::types::QrError) -> Self {
        EnvelopeError::Qr(err)
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        EnvelopeError::Json(err)
    }
}

/// An envelope format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `DataIntegrityProof` with the `eddsa-2022` cryptosuite.
    DataIntegrityEddsa,
    /// `DataIntegrityProof` with the `ecdsa-2019` cryptosuite.
    DataIntegrityEcdsa,
    /// The legacy `Ed25519Signature2020` suite.
    Ed25519Signature2020,
    /// JOSE compact JWS over the credential (VC-JWT).
    VcJwt,
    /// SD-JWT with per-claim disclosures.
    SdJwt,
    /// COSE_Sign1 envelope.
    Cose,
    /// CBOR-LD byte encoding (uncompressed mode).
    CborLd,
    /// QR code image of the CBOR-LD encoding.
    Qr,
}

impl Format {
    /// Canonical identifier, as used in configuration and `data-vc-tabs`.
    pub fn id(&self) -> &'static str {
        match self {
            Format::DataIntegrityEddsa => "eddsa-2022",
            Format::DataIntegrityEcdsa => "ecdsa-2019",
            Format::Ed25519Signature2020 => "Ed25519Signature2020",
            Format::VcJwt => "vc-jwt",
            Format::SdJwt => "sd-jwt",
            Format::Cose => "cose",
            Format::CborLd => "cbor-ld",
            Format::Qr => "qr",
        }
    }

    /// All formats in the registry, in default tab order.
    pub fn all() -> &'static [Format] {
        &[
            Format::Ed25519Signature2020,
            Format::DataIntegrityEddsa,
            Format::DataIntegrityEcdsa,
            Format::VcJwt,
            Format::SdJwt,
            Format::Cose,
            Format::CborLd,
            Format::Qr,
        ]
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Format {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eddsa-2022" | "eddsa-rdfc-2022" => Ok(Format::DataIntegrityEddsa),
            "ecdsa-2019" | "ecdsa-rdfc-2019" => Ok(Format::DataIntegrityEcdsa),
            "Ed25519Signature2020" => Ok(Format::Ed25519Signature2020),
            "vc-jwt" => Ok(Format::VcJwt),
            "sd-jwt" => Ok(Format::SdJwt),
            "cose" => Ok(Format::Cose),
            "cbor-ld" => Ok(Format::CborLd),
            "qr" => Ok(Format::Qr),
            _ => Err(EnvelopeError::UnknownFormat(s.to_string())),
        }
    }
}

/// A secured rendition of an example under one envelope format.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// The format that produced this envelope.
    pub format: Format,
    /// Human-readable tab label.
    pub label: String,
    /// Raw envelope serialization: signed JSON, compact token, or lowercase hex.
    pub raw: String,
    /// Rendered HTML fragment for the tab body.
    pub html: String,
}

/// Shared state passed to envelopers: key material and any additional JSON-LD
/// context documents.
pub struct EnvelopeContext {
    keyring: ExampleKeyring,
    contexts: HashMap<String, String>,
}

impl EnvelopeContext {
    pub fn new(keyring: ExampleKeyring) -> Self {
        Self {
            keyring,
            contexts: HashMap::new(),
        }
    }

    /// Adds extra JSON-LD context documents (URL to pre-parsed JSON string),
    /// the analog of registering custom contexts with the document loader.
    pub fn with_contexts(mut self, contexts: HashMap<String, String>) -> Self {
        self.contexts = contexts;
        self
    }

    pub fn keyring(&self) -> &ExampleKeyring {
        &self.keyring
    }

    /// Builds a JSON-LD context loader seeded with the static contexts plus
    /// any configured extras.
    pub fn context_loader(&self) -> Result<ContextLoader, EnvelopeError> {
        if self.contexts.is_empty() {
            return Ok(ContextLoader::default());
        }
        ContextLoader::default()
            .with_context_map_from(self.contexts.clone())
            .map_err(|e| EnvelopeError::Context(e.to_string()))
    }
}

/// An enveloper secures an example document with one envelope format and
/// renders the result as an HTML tab fragment.
#[async_trait]
pub trait Enveloper {
    /// The format this enveloper produces.
    fn format(&self) -> Format;

    /// Secures `document` and renders the tab fragment. `example` supplies
    /// the index and any per-example overrides.
    async fn envelope(
        &self,
        example: &VcExample,
        document: &Value,
        context: &EnvelopeContext,
    ) -> Result<Envelope, EnvelopeError>;
}

/// Returns the enveloper for a format identifier.
pub fn enveloper(format: Format) -> Box<dyn Enveloper + Send + Sync> {
    match format {
        Format::DataIntegrityEddsa | Format::DataIntegrityEcdsa | Format::Ed25519Signature2020 => {
            Box::new(crate::data_integrity::DataIntegrityEnveloper::new(format))
        }
        Format::VcJwt => Box::new(crate::jose::JwtEnveloper),
        Format::SdJwt => Box::new(crate::sd_jwt::SdJwtEnveloper),
        Format::Cose => Box::new(crate::cose::CoseEnveloper),
        Format::CborLd => Box::new(crate::cbor_ld::CborLdEnveloper),
        Format::Qr => Box::new(crate::qr::QrEnveloper),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trip() {
        for format in Format::all() {
            assert_eq!(&Format::from_str(format.id()).unwrap(), format);
        }
    }

    #[test]
    fn test_format_aliases() {
        assert_eq!(
            Format::from_str("eddsa-rdfc-2022").unwrap(),
            Format::DataIntegrityEddsa
        );
        assert_eq!(
            Format::from_str("ecdsa-rdfc-2019").unwrap(),
            Format::DataIntegrityEcdsa
        );
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(
            Format::from_str("bbs-2023"),
            Err(EnvelopeError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_registry_covers_all_formats() {
        for format in Format::all() {
            assert_eq!(enveloper(*format).format(), *format);
        }
    }
}
