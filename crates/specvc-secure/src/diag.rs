//! CBOR diagnostic notation rendering (RFC 8949 §8) for example display.
use ciborium::value::Value as Cbor;

/// Renders a CBOR value in diagnostic notation, with nested structures
/// indented two spaces per level.
pub fn render(value: &Cbor) -> String {
    render_level(value, 0)
}

fn render_level(value: &Cbor, level: usize) -> String {
    let indent = "  ".repeat(level);
    let inner_indent = "  ".repeat(level + 1);
    match value {
        Cbor::Integer(i) => i128::from(*i).to_string(),
        Cbor::Bytes(bytes) => format!("h'{}'", hex::encode(bytes)),
        Cbor::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() {
                format!("{:.1}", f)
            } else {
                format!("{}", f)
            }
        }
        Cbor::Text(text) => format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\"")),
        Cbor::Bool(b) => b.to_string(),
        Cbor::Null => "null".to_string(),
        Cbor::Tag(tag, inner) => format!("{}({})", tag, render_level(inner, level)),
        Cbor::Array(items) => {
            if items.is_empty() {
                "[]".to_string()
            } else {
                let rendered: Vec<String> = items
                    .iter()
                    .map(|item| format!("{}{}", inner_indent, render_level(item, level + 1)))
                    .collect();
                format!("[\n{}\n{}]", rendered.join(",\n"), indent)
            }
        }
        Cbor::Map(entries) => {
            if entries.is_empty() {
                "{}".to_string()
            } else {
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|(key, val)| {
                        format!(
                            "{}{}: {}",
                            inner_indent,
                            render_level(key, level + 1),
                            render_level(val, level + 1)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{}}}", rendered.join(",\n"), indent)
            }
        }
        _ => "undefined".to_string(),
    }
}
