//! Per-run key material for securing examples.
//!
//! Keys are generated afresh on every run: example envelopes are illustrative,
//! so no key is ever persisted or reused across documents.
use did_method_key::DIDKey;
use ssi::did::{DIDMethod, Source};
use ssi::jwk::JWK;
use thiserror::Error;

/// An error relating to example key material.
#[derive(Error, Debug)]
pub enum KeyringError {
    /// Wrapped error for ssi-jwk error.
    #[error("A wrapped variant for an SSI JWK error: {0}")]
    JWK(ssi::jwk::Error),
    /// Failed to derive a did:key DID from a generated key.
    #[error("Failed to derive a did:key DID for curve: {0}")]
    DIDGeneration(String),
}

impl From<ssi::jwk::Error> for KeyringError {
    fn from(err: ssi::jwk::Error) -> Self {
        KeyringError::JWK(err)
    }
}

/// Key material used to secure the examples of one document.
pub struct ExampleKeyring {
    ed25519: JWK,
    p256: JWK,
    ed25519_did: String,
    p256_did: String,
}

impl ExampleKeyring {
    /// Generates an Ed25519 and a P-256 keypair and derives their did:key DIDs.
    pub fn generate() -> Result<Self, KeyringError> {
        let ed25519 = JWK::generate_ed25519()?;
        let p256 = JWK::generate_p256()?;
        let ed25519_did = did_key_did(&ed25519, "Ed25519")?;
        let p256_did = did_key_did(&p256, "P-256")?;
        Ok(Self {
            ed25519,
            p256,
            ed25519_did,
            p256_did,
        })
    }

    /// The Ed25519 signing key.
    pub fn ed25519_key(&self) -> &JWK {
        &self.ed25519
    }

    /// The P-256 signing key.
    pub fn p256_key(&self) -> &JWK {
        &self.p256
    }

    pub fn ed25519_did(&self) -> &str {
        &self.ed25519_did
    }

    pub fn p256_did(&self) -> &str {
        &self.p256_did
    }

    /// Verification method URL for the Ed25519 key, in the did:key
    /// `did#fragment` convention where the fragment repeats the multibase
    /// public key.
    pub fn ed25519_verification_method(&self) -> String {
        did_key_verification_method(&self.ed25519_did)
    }

    /// Verification method URL for the P-256 key.
    pub fn p256_verification_method(&self) -> String {
        did_key_verification_method(&self.p256_did)
    }
}

fn did_key_did(jwk: &JWK, curve: &str) -> Result<String, KeyringError> {
    DIDKey
        .generate(&Source::Key(jwk))
        .ok_or_else(|| KeyringError::DIDGeneration(curve.to_string()))
}

fn did_key_verification_method(did: &str) -> String {
    format!("{}#{}", did, did.trim_start_matches("did:key:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_keyring() {
        let keyring = ExampleKeyring::generate().unwrap();
        // Multicodec prefixes from the did:key method: z6Mk for Ed25519, zDn for P-256.
        assert!(keyring.ed25519_did().starts_with("did:key:z6Mk"));
        assert!(keyring.p256_did().starts_with("did:key:zDn"));
    }

    #[test]
    fn test_verification_method_fragment() {
        let keyring = ExampleKeyring::generate().unwrap();
        let vm = keyring.ed25519_verification_method();
        let (did, fragment) = vm.split_once('#').unwrap();
        assert_eq!(did, keyring.ed25519_did());
        assert_eq!(fragment, did.trim_start_matches("did:key:"));
    }

    #[test]
    fn test_distinct_keys_per_run() {
        let first = ExampleKeyring::generate().unwrap();
        let second = ExampleKeyring::generate().unwrap();
        assert_ne!(first.ed25519_did(), second.ed25519_did());
        assert_ne!(first.p256_did(), second.p256_did());
    }
}
