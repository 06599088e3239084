//! Core types and logic for securing Verifiable Credential examples (markup independent).
pub mod config;
pub mod data;
pub mod example;
pub mod keys;
pub mod text;

/// Environment variable name for the specvc config file.
pub const SPECVC_CONFIG: &str = "SPECVC_CONFIG";

/// Class name used to tag credential example elements in a specification document.
pub const EXAMPLE_CLASS: &str = "vc";

/// Element attribute holding a whitespace-separated list of tab format identifiers.
pub const VC_TABS_ATTRIBUTE: &str = "data-vc-tabs";

/// Element attribute overriding the verification method used in proofs.
pub const VC_VM_ATTRIBUTE: &str = "data-vc-vm";
