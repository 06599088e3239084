//! Credential example extraction from specification documents.
use serde_json::Value;
use thiserror::Error;

/// An error relating to a credential example block.
#[derive(Error, Debug)]
pub enum ExampleError {
    /// Example text is not valid JSON.
    #[error("Example text is not valid JSON: {0}")]
    InvalidJson(serde_json::Error),
    /// No type member in example document.
    #[error("No type member in example document.")]
    MissingType,
    /// Neither a credential nor a presentation.
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),
}

impl From<serde_json::Error> for ExampleError {
    fn from(err: serde_json::Error) -> Self {
        ExampleError::InvalidJson(err)
    }
}

/// A credential example block extracted from a specification document.
#[derive(Debug, Clone, PartialEq)]
pub struct VcExample {
    /// Position of the example in the document, numbered from 1.
    pub index: usize,
    /// Raw text content of the example element.
    pub text: String,
    /// Per-example tab format identifiers from the `data-vc-tabs` attribute.
    pub tab_types: Option<Vec<String>>,
    /// Per-example verification method from the `data-vc-vm` attribute.
    pub verification_method: Option<String>,
}

impl VcExample {
    pub fn new(index: usize, text: String) -> Self {
        Self {
            index,
            text,
            tab_types: None,
            verification_method: None,
        }
    }

    /// Example text with entities decoded and comment lines stripped, ready for JSON parsing.
    pub fn cleaned_text(&self) -> String {
        strip_comment_lines(&decode_entities(&self.text))
    }

    /// Parses the example as a JSON document.
    pub fn parse(&self) -> Result<Value, ExampleError> {
        Ok(serde_json::from_str(&self.cleaned_text())?)
    }

    /// Tab format identifiers for this example, if the element carried any.
    pub fn tab_types(&self) -> Option<&[String]> {
        self.tab_types.as_deref().filter(|tabs| !tabs.is_empty())
    }
}

/// Strips `// ` line comments from example text.
///
/// The comment marker is slash-slash-space, so URLs such as `https://` inside
/// JSON strings survive.
pub fn strip_comment_lines(text: &str) -> String {
    text.lines()
        .map(|line| match line.find("// ") {
            Some(pos) => &line[..pos],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decodes the basic HTML entities found in markup-embedded JSON.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Whether an example document is a credential or a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Credential,
    Presentation,
}

impl DocumentKind {
    /// Detects the document kind from the JSON `type` member.
    pub fn detect(document: &Value) -> Result<Self, ExampleError> {
        let types: Vec<&str> = match document.get("type") {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(arr)) => arr.iter().filter_map(Value::as_str).collect(),
            _ => return Err(ExampleError::MissingType),
        };
        if types.contains(&"VerifiableCredential") {
            Ok(DocumentKind::Credential)
        } else if types.contains(&"VerifiablePresentation")
            || types.contains(&"EnvelopedVerifiablePresentation")
        {
            Ok(DocumentKind::Presentation)
        } else {
            Err(ExampleError::UnknownDocumentType(types.join(", ")))
        }
    }

    pub fn jose_media_type(&self) -> &'static str {
        match self {
            DocumentKind::Credential => "application/vc+jwt",
            DocumentKind::Presentation => "application/vp+jwt",
        }
    }

    pub fn sd_jwt_media_type(&self) -> &'static str {
        match self {
            DocumentKind::Credential => "application/vc+sd-jwt",
            DocumentKind::Presentation => "application/vp+sd-jwt",
        }
    }

    pub fn cose_media_type(&self) -> &'static str {
        match self {
            DocumentKind::Credential => "application/vc-ld+cose",
            DocumentKind::Presentation => "application/vp-ld+cose",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{TEST_COMMENTED_VC, TEST_UNSIGNED_VC, TEST_UNSIGNED_VP};

    #[test]
    fn test_strip_comment_lines() {
        let stripped = strip_comment_lines(TEST_COMMENTED_VC);
        assert!(!stripped.contains("comment"));
        // The URL double-slash must survive.
        assert!(stripped.contains("https://www.w3.org/2018/credentials/v1"));
        let value: Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["type"][1], "AlumniCredential");
    }

    #[test]
    fn test_strip_whole_comment_line() {
        let stripped = strip_comment_lines("{\n// a comment line\n\"a\": 1\n}");
        assert_eq!(stripped, "{\n\n\"a\": 1\n}");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("&quot;a&quot; &amp; &lt;b&gt;"),
            "\"a\" & <b>"
        );
    }

    #[test]
    fn test_parse_example() {
        let example = VcExample::new(1, TEST_COMMENTED_VC.to_string());
        let value = example.parse().unwrap();
        assert_eq!(value["credentialSubject"]["alumniOf"], "Example University");
    }

    #[test]
    fn test_parse_failure() {
        let example = VcExample::new(1, "not json".to_string());
        assert!(matches!(example.parse(), Err(ExampleError::InvalidJson(_))));
    }

    #[test]
    fn test_detect_document_kind() {
        let vc: Value = serde_json::from_str(TEST_UNSIGNED_VC).unwrap();
        let vp: Value = serde_json::from_str(TEST_UNSIGNED_VP).unwrap();
        assert_eq!(DocumentKind::detect(&vc).unwrap(), DocumentKind::Credential);
        assert_eq!(
            DocumentKind::detect(&vp).unwrap(),
            DocumentKind::Presentation
        );
        let neither = serde_json::json!({"type": ["SomethingElse"]});
        assert!(matches!(
            DocumentKind::detect(&neither),
            Err(ExampleError::UnknownDocumentType(_))
        ));
    }

    #[test]
    fn test_media_types() {
        assert_eq!(
            DocumentKind::Credential.jose_media_type(),
            "application/vc+jwt"
        );
        assert_eq!(
            DocumentKind::Presentation.sd_jwt_media_type(),
            "application/vp+sd-jwt"
        );
        assert_eq!(
            DocumentKind::Credential.cose_media_type(),
            "application/vc-ld+cose"
        );
    }

    #[test]
    fn test_tab_types_empty_attribute() {
        let mut example = VcExample::new(1, TEST_UNSIGNED_VC.to_string());
        example.tab_types = Some(vec![]);
        assert!(example.tab_types().is_none());
        example.tab_types = Some(vec!["vc-jwt".to_string()]);
        assert_eq!(example.tab_types().unwrap(), ["vc-jwt".to_string()]);
    }
}
