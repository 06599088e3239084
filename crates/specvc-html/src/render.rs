//! Tab-group markup and styles for secured example views.
use specvc_core::text::escape_html;

/// One tab in a secured example tab group.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    /// Id suffix, unique within the example's tab group.
    pub suffix: String,
    /// Tab label text.
    pub label: String,
    /// HTML content of the tab body.
    pub content_html: String,
}

impl Tab {
    pub fn new(suffix: &str, label: &str, content_html: String) -> Self {
        Self {
            suffix: suffix.to_string(),
            label: label.to_string(),
            content_html,
        }
    }
}

/// Builds the tab group markup for one example: hidden radio inputs, tab
/// labels, then one content division per tab. The radio inputs precede their
/// siblings so the checked state can drive visibility from the stylesheet
/// alone.
pub fn tab_group(index: usize, tabs: &[Tab]) -> String {
    let mut html = String::from("<div class=\"vc-tabbed\">\n");
    for (position, tab) in tabs.iter().enumerate() {
        let checked = if position == 0 { " checked=\"checked\"" } else { "" };
        html.push_str(&format!(
            "<input type=\"radio\" id=\"vc-tab{index}{suffix}\" name=\"vc-tabs{index}\"{checked}>\n",
            index = index,
            suffix = tab.suffix,
            checked = checked
        ));
    }
    html.push_str("<ul class=\"vc-tabs\">\n");
    for tab in tabs {
        html.push_str(&format!(
            "<li class=\"vc-tab\"><label for=\"vc-tab{}{}\">{}</label></li>\n",
            index,
            tab.suffix,
            escape_html(&tab.label)
        ));
    }
    html.push_str("</ul>\n");
    for tab in tabs {
        html.push_str(&format!(
            "<div class=\"vc-tab-content\">\n{}\n</div>\n",
            tab.content_html
        ));
    }
    html.push_str("</div>");
    html
}

/// The style block injected once per document. The `nth-of-type` selectors
/// are generated up to the widest tab group in the document.
pub fn styles(max_tabs: usize) -> String {
    let radio_labels: Vec<String> = (1..=max_tabs)
        .map(|j| {
            format!(
                ".vc-tabbed [type=\"radio\"]:nth-of-type({j}):checked ~ .vc-tabs .vc-tab:nth-of-type({j}) label"
            )
        })
        .collect();
    let radio_selector: Vec<String> = (1..=max_tabs)
        .map(|j| {
            format!(".vc-tabbed [type=\"radio\"]:nth-of-type({j}):checked ~ .vc-tab-content:nth-of-type({j})")
        })
        .collect();
    let sd_jwt_labels: Vec<String> = (1..=3)
        .map(|j| {
            format!(
                ".sd-jwt-tabbed [type=\"radio\"]:nth-of-type({j}):checked ~ .sd-jwt-tabs .sd-jwt-tab:nth-of-type({j}) label"
            )
        })
        .collect();
    let sd_jwt_selector: Vec<String> = (1..=3)
        .map(|j| {
            format!(
                ".sd-jwt-tabbed [type=\"radio\"]:nth-of-type({j}):checked ~ .sd-jwt-tab-content:nth-of-type({j})"
            )
        })
        .collect();

    format!(
        r#"
  .vc-tabbed {{
    overflow-x: hidden;
    margin: 0 0;
  }}

  .vc-tabbed [type="radio"], .sd-jwt-tabbed [type="radio"] {{
    display: none;
  }}

  .vc-tabs, .sd-jwt-tabs {{
    display: flex;
    align-items: stretch;
    list-style: none;
    padding: 0;
    border-bottom: 1px solid #ccc;
  }}

  li.vc-tab, li.sd-jwt-tab {{
    margin: unset;
  }}

  .vc-tab > label, .sd-jwt-tab > label {{
    display: block;
    margin-bottom: -1px;
    padding: .4em .5em;
    border: 1px solid #ccc;
    border-top-right-radius: .4em;
    border-top-left-radius: .4em;
    background: #eee;
    color: #666;
    cursor: pointer;
    transition: all 0.3s;
  }}
  .vc-tab:hover label, .sd-jwt-tab:hover label {{
    border-left-color: #333;
    border-top-color: #333;
    border-right-color: #333;
    color: #333;
  }}

  .vc-tab-content, .sd-jwt-tab-content {{
    display: none;
  }}

  .jwt-compact, .sd-jwt-compact, .cose-text, .cbor-ld-text, .vc-qr-text {{
    word-break: break-all;
    font-family: monospace;
  }}

  .jwt-header, .sd-jwt-header {{
    color: #921600;
  }}

  .jwt-payload, .sd-jwt-payload {{
    color: #00695c;
  }}

  .jwt-signature, .sd-jwt-signature {{
    color: #3f51b5;
  }}

  .sd-jwt-disclosure {{
    color: #9c27b0;
  }}

  {radio_labels} {{
    border-bottom-color: #fff;
    background: #fff;
    color: #222;
  }}

  {radio_selector} {{
    display: block;
  }}

  {sd_jwt_labels} {{
    border-bottom-color: #fff;
    background: #fff;
    color: #222;
  }}

  {sd_jwt_selector} {{
    display: block;
  }}"#,
        radio_labels = radio_labels.join(",\n  "),
        radio_selector = radio_selector.join(",\n  "),
        sd_jwt_labels = sd_jwt_labels.join(",\n  "),
        sd_jwt_selector = sd_jwt_selector.join(",\n  ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tabs() -> Vec<Tab> {
        vec![
            Tab::new("unsigned", "Verifiable Credential", "<pre>{}</pre>".to_string()),
            Tab::new("vc-jwt", "Secured with VC-JWT", "<pre>ey...</pre>".to_string()),
        ]
    }

    #[test]
    fn test_tab_group_structure() {
        let html = tab_group(1, &test_tabs());
        assert!(html.starts_with("<div class=\"vc-tabbed\">"));
        assert_eq!(html.matches("<input type=\"radio\"").count(), 2);
        assert_eq!(html.matches("checked=\"checked\"").count(), 1);
        assert_eq!(html.matches("<div class=\"vc-tab-content\">").count(), 2);
        assert!(html.contains("id=\"vc-tab1unsigned\""));
        assert!(html.contains("for=\"vc-tab1vc-jwt\""));
        assert!(html.contains("name=\"vc-tabs1\""));
    }

    #[test]
    fn test_tab_group_checks_first_tab_only() {
        let html = tab_group(2, &test_tabs());
        // The checked attribute belongs to the first (unsigned) input.
        assert!(html.contains(
            "<input type=\"radio\" id=\"vc-tab2unsigned\" name=\"vc-tabs2\" checked=\"checked\">"
        ));
        assert!(html.contains("<input type=\"radio\" id=\"vc-tab2vc-jwt\" name=\"vc-tabs2\">"));
    }

    #[test]
    fn test_styles_generate_selectors_per_tab_count() {
        let css = styles(4);
        assert!(css.contains(
            ".vc-tabbed [type=\"radio\"]:nth-of-type(4):checked ~ .vc-tab-content:nth-of-type(4)"
        ));
        assert!(!css.contains(
            ".vc-tabbed [type=\"radio\"]:nth-of-type(5):checked ~ .vc-tab-content:nth-of-type(5)"
        ));
    }

    #[test]
    fn test_styles_cover_sd_jwt_sub_tabs() {
        let css = styles(1);
        assert!(css.contains(".sd-jwt-tabbed [type=\"radio\"]:nth-of-type(3)"));
    }

    #[test]
    fn test_tab_label_escaped() {
        let tabs = vec![Tab::new("x", "<script>", String::new())];
        let html = tab_group(1, &tabs);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
