use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a titled table section; used by commands whose table view is split
/// into several parts.
pub fn section<T: Serialize>(title: &str, value: &T) -> anyhow::Result<()> {
    println!("{title}");
    println!("{}\n", render_table(value)?);
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(&["key", "value"], &rows, options()))
        }
        scalar => Ok(table::render_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options(),
        )),
    }
}

/// Columns are the union of the objects' keys.
fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(none)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) if v.is_f64() => format!("{:.4}", v.as_f64().unwrap_or_default()),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(value_to_cell).collect::<Vec<_>>().join(", "),
        other @ Value::Object(_) => {
            serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>"))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Ranked {
        disease: &'static str,
        probability: f64,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Ranked { disease: "Dengue", probability: 0.5 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["disease"], "Dengue");
        assert_eq!(parsed["probability"], 0.5);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Ranked { disease: "Dengue", probability: 0.5 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Ranked { disease: "Dengue", probability: 0.5 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("disease"));
        assert!(out.contains("0.5000"));
    }

    #[test]
    fn table_render_for_array_keeps_field_order() {
        let value = vec![
            Ranked { disease: "Dengue", probability: 0.7 },
            Ranked { disease: "Malaria", probability: 0.3 },
        ];
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap_or_default();
        assert!(header.find("disease") < header.find("probability"));
        assert!(out.contains("Malaria"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let out = render(&Vec::<Ranked>::new(), OutputFormat::Table).unwrap();
        assert_eq!(out, "(none)");
    }
}
