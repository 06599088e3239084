//! Shared test data.
#![allow(dead_code)]

/// An unsigned credential in the W3C VC data model v1 shape, using contexts
/// bundled with the JSON-LD static loader.
pub const TEST_UNSIGNED_VC: &str = r##"{
  "@context": [
    "https://www.w3.org/2018/credentials/v1",
    "https://www.w3.org/2018/credentials/examples/v1"
  ],
  "id": "http://example.edu/credentials/1872",
  "type": ["VerifiableCredential", "AlumniCredential"],
  "issuer": "https://example.edu/issuers/565049",
  "issuanceDate": "2010-01-01T19:23:24Z",
  "expirationDate": "2030-01-01T19:23:24Z",
  "credentialSubject": {
    "id": "did:example:ebfeb1f712ebc6f1c276e12ec21",
    "alumniOf": "Example University"
  }
}"##;

/// An unsigned presentation.
pub const TEST_UNSIGNED_VP: &str = r##"{
  "@context": ["https://www.w3.org/2018/credentials/v1"],
  "type": ["VerifiablePresentation"],
  "holder": "did:example:ebfeb1f712ebc6f1c276e12ec21"
}"##;

/// The credential above as it would appear in a specification document,
/// annotated with editorial comments.
pub const TEST_COMMENTED_VC: &str = r##"{
  "@context": [
    "https://www.w3.org/2018/credentials/v1",
    "https://www.w3.org/2018/credentials/examples/v1"
  ],
  "id": "http://example.edu/credentials/1872",
  "type": ["VerifiableCredential", "AlumniCredential"],
  // comment: the issuer property is defined in the linked spec
  "issuer": "https://example.edu/issuers/565049",
  "issuanceDate": "2010-01-01T19:23:24Z",
  "credentialSubject": {
    "id": "did:example:ebfeb1f712ebc6f1c276e12ec21",
    "alumniOf": "Example University" // comment: a claim about the subject
  }
}"##;

/// A specification document fragment carrying two credential examples.
pub const TEST_SPEC_DOCUMENT: &str = r##"<!DOCTYPE html>
<html>
<head>
<title>Example Specification</title>
</head>
<body>
<section>
<p>An example credential:</p>
<pre class="example vc" title="A simple credential">
{
  "@context": [
    "https://www.w3.org/2018/credentials/v1",
    "https://www.w3.org/2018/credentials/examples/v1"
  ],
  "id": "http://example.edu/credentials/1872",
  "type": ["VerifiableCredential", "AlumniCredential"],
  "issuer": "https://example.edu/issuers/565049",
  "issuanceDate": "2010-01-01T19:23:24Z",
  "credentialSubject": {
    "id": "did:example:ebfeb1f712ebc6f1c276e12ec21",
    "alumniOf": "Example University"
  }
}
</pre>
<pre class="example vc" data-vc-tabs="vc-jwt" title="Restricted tabs">
{
  "@context": [
    "https://www.w3.org/2018/credentials/v1",
    "https://www.w3.org/2018/credentials/examples/v1"
  ],
  "id": "http://example.edu/credentials/3732",
  "type": ["VerifiableCredential", "AlumniCredential"],
  "issuer": "https://example.edu/issuers/565049",
  "issuanceDate": "2012-04-18T09:30:00Z",
  "credentialSubject": {
    "id": "did:example:c276e12ec21ebfeb1f712ebc6f1",
    "alumniOf": "Example University"
  }
}
</pre>
</section>
</body>
</html>"##;
