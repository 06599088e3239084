//! Envelope formats for securing Verifiable Credential examples.
pub mod cbor_ld;
pub mod cose;
pub mod data_integrity;
pub mod diag;
pub mod envelope;
pub mod jose;
pub mod qr;
pub mod sd_jwt;

pub use envelope::{enveloper, Envelope, EnvelopeContext, EnvelopeError, Enveloper, Format};
