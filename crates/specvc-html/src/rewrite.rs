//! Rewrite pass and the end-to-end document pipeline.
use crate::errors::DocumentError;
use crate::render::{self, Tab};
use crate::scan::scan;
use lol_html::html_content::ContentType;
use lol_html::{element, HtmlRewriter, Settings};
use serde_json::Value;
use specvc_core::config::CoreConfig;
use specvc_core::example::VcExample;
use specvc_secure::{enveloper, EnvelopeContext, Format};
use std::str::FromStr;
use tracing::error;

/// Secures one example under each of its tab formats.
///
/// Returns `None` when the example text does not parse as JSON. A failure in
/// any single format is logged and that tab skipped; neither other tabs nor
/// other examples are affected.
async fn secure_example(
    example: &VcExample,
    config: &CoreConfig,
    context: &EnvelopeContext,
) -> Option<Vec<Tab>> {
    let document: Value = match example.parse() {
        Ok(document) => document,
        Err(e) => {
            error!(
                example = example.index,
                "Failed to parse Verifiable Credential example: {}", e
            );
            return None;
        }
    };

    let mut tabs = vec![Tab::new(
        "unsigned",
        "Verifiable Credential",
        format!("<pre>{}</pre>", example.text.trim_matches('\n')),
    )];
    let tab_ids = example
        .tab_types()
        .unwrap_or_else(|| config.default_tabs.as_slice());
    for id in tab_ids {
        let format = match Format::from_str(id) {
            Ok(format) => format,
            Err(e) => {
                error!(example = example.index, "Skipping tab: {}", e);
                continue;
            }
        };
        match enveloper(format).envelope(example, &document, context).await {
            Ok(envelope) => tabs.push(Tab::new(format.id(), &envelope.label, envelope.html)),
            Err(e) => {
                error!(
                    example = example.index,
                    format = %format,
                    "Failed to secure example: {}",
                    e
                );
            }
        }
    }
    Some(tabs)
}

/// Processes a rendered specification document: replaces every credential
/// example element with a tab group of secured views and injects the tab
/// styles into the document head.
pub async fn process_document(
    html: &str,
    config: &CoreConfig,
    context: &EnvelopeContext,
) -> Result<String, DocumentError> {
    let examples = scan(html, &config.example_class)?;
    if examples.is_empty() {
        return Ok(html.to_string());
    }

    let mut groups: Vec<Option<Vec<Tab>>> = Vec::with_capacity(examples.len());
    let mut max_tabs = 1;
    for example in &examples {
        let tabs = secure_example(example, config, context).await;
        if let Some(tabs) = &tabs {
            max_tabs = max_tabs.max(tabs.len());
        }
        groups.push(tabs);
    }

    let style_block = format!("<style>{}\n</style>", render::styles(max_tabs));
    let has_head = html.contains("<head");
    let any_tabs = groups.iter().any(Option::is_some);

    let mut styles_pending = any_tabs && !has_head;
    let fragments: Vec<Option<String>> = examples
        .iter()
        .zip(groups)
        .map(|(example, tabs)| {
            tabs.map(|tabs| {
                let group = render::tab_group(example.index, &tabs);
                if styles_pending {
                    // No head to carry the styles; emit them with the first
                    // tab group instead.
                    styles_pending = false;
                    format!("{}\n{}", style_block, group)
                } else {
                    group
                }
            })
        })
        .collect();

    rewrite_document(
        html,
        &config.example_class,
        fragments,
        (any_tabs && has_head).then(|| style_block),
    )
}

/// Streaming rewrite: replaces each matched element with its prepared
/// fragment and appends the style block to the document head.
fn rewrite_document(
    html: &str,
    example_class: &str,
    fragments: Vec<Option<String>>,
    head_styles: Option<String>,
) -> Result<String, DocumentError> {
    let selector = format!(".{}", example_class);
    let mut output = Vec::new();
    {
        let mut position = 0usize;
        let mut handlers = vec![element!(selector, move |el| {
            let current = position;
            position += 1;
            if let Some(Some(fragment)) = fragments.get(current) {
                el.replace(fragment, ContentType::Html);
            }
            Ok(())
        })];
        if let Some(styles) = head_styles {
            handlers.push(element!("head", move |el| {
                el.append(&styles, ContentType::Html);
                Ok(())
            }));
        }
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: handlers,
                ..Settings::default()
            },
            |chunk: &[u8]| output.extend_from_slice(chunk),
        );
        rewriter.write(html.as_bytes())?;
        rewriter.end()?;
    }
    Ok(String::from_utf8(output)?)
}
