//! Scan pass: locate credential example elements in a document.
use crate::errors::DocumentError;
use lol_html::{element, text, HtmlRewriter, Settings};
use specvc_core::example::VcExample;
use specvc_core::{VC_TABS_ATTRIBUTE, VC_VM_ATTRIBUTE};
use std::cell::RefCell;
use std::rc::Rc;

/// Collects every element carrying the example class, with its text content
/// and per-example configuration attributes. Examples are numbered in
/// document order from 1.
pub fn scan(html: &str, example_class: &str) -> Result<Vec<VcExample>, DocumentError> {
    let selector = format!(".{}", example_class);
    let examples = Rc::new(RefCell::new(Vec::<VcExample>::new()));
    let element_examples = examples.clone();
    let text_examples = examples.clone();

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!(selector.clone(), move |el| {
                    let mut examples = element_examples.borrow_mut();
                    let index = examples.len() + 1;
                    let mut example = VcExample::new(index, String::new());
                    example.tab_types = el.get_attribute(VC_TABS_ATTRIBUTE).map(|attr| {
                        attr.split_whitespace().map(String::from).collect()
                    });
                    example.verification_method = el.get_attribute(VC_VM_ATTRIBUTE);
                    examples.push(example);
                    Ok(())
                }),
                text!(selector, move |chunk| {
                    if let Some(example) = text_examples.borrow_mut().last_mut() {
                        example.text.push_str(chunk.as_str());
                    }
                    Ok(())
                }),
            ],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );
    rewriter.write(html.as_bytes())?;
    rewriter.end()?;

    let examples = examples.borrow().clone();
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use specvc_core::data::TEST_SPEC_DOCUMENT;
    use specvc_core::EXAMPLE_CLASS;

    #[test]
    fn test_scan_finds_examples_in_order() {
        let examples = scan(TEST_SPEC_DOCUMENT, EXAMPLE_CLASS).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].index, 1);
        assert_eq!(examples[1].index, 2);
        assert!(examples[0].text.contains("http://example.edu/credentials/1872"));
        assert!(examples[1].text.contains("http://example.edu/credentials/3732"));
    }

    #[test]
    fn test_scan_reads_data_attributes() {
        let examples = scan(TEST_SPEC_DOCUMENT, EXAMPLE_CLASS).unwrap();
        assert!(examples[0].tab_types.is_none());
        assert_eq!(
            examples[1].tab_types.as_deref(),
            Some(&["vc-jwt".to_string()][..])
        );
    }

    #[test]
    fn test_scan_reads_verification_method() {
        let html = r#"<pre class="vc" data-vc-vm="did:example:123#key-1">{}</pre>"#;
        let examples = scan(html, EXAMPLE_CLASS).unwrap();
        assert_eq!(
            examples[0].verification_method.as_deref(),
            Some("did:example:123#key-1")
        );
    }

    #[test]
    fn test_scan_ignores_unmarked_elements() {
        let html = r#"<pre class="example">{}</pre><p>prose</p>"#;
        let examples = scan(html, EXAMPLE_CLASS).unwrap();
        assert!(examples.is_empty());
    }

    #[test]
    fn test_scanned_example_parses() {
        let examples = scan(TEST_SPEC_DOCUMENT, EXAMPLE_CLASS).unwrap();
        let document = examples[0].parse().unwrap();
        assert_eq!(document["credentialSubject"]["alumniOf"], "Example University");
    }
}
