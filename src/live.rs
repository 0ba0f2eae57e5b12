//! Capabilities a rendered component can offer beyond its static markup

use serde_json::Value;

/// Anything that can produce its rendered markup
pub trait Markup {
    fn html(&self) -> String;
}

/// Runtime state that never reaches the static markup
pub trait LiveValues {
    /// Current value of the `index`-th `input`, `textarea` or `select`, counted in
    /// document order
    fn control_value(&self, index: usize) -> Option<BoundValue>;

    /// Non-string bindings of the `index`-th element, counted in document order
    fn bound_attributes(&self, index: usize) -> Vec<(String, BoundValue)>;
}

/// A mounted component. Live values are optional; without them the passes that
/// need them are skipped.
pub trait ComponentWrapper: Markup {
    fn live_values(&self) -> Option<&dyn LiveValues> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Array(Vec<BoundValue>),
    /// Keys in insertion order
    Object(Vec<(String, BoundValue)>),
    Function { source: String },
}

impl From<Value> for BoundValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => BoundValue::Null,
            Value::Bool(b) => BoundValue::Bool(b),
            Value::Number(n) => BoundValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => BoundValue::Text(s),
            Value::Array(items) => BoundValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                BoundValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for BoundValue {
    fn from(s: &str) -> Self {
        BoundValue::Text(s.to_string())
    }
}

/// Compact, source-like text for a bound value: `{a:1,'b-c':[true,null]}`
pub fn stringify(value: &BoundValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &BoundValue) {
    match value {
        BoundValue::Undefined => out.push_str("undefined"),
        BoundValue::Null => out.push_str("null"),
        BoundValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        BoundValue::Number(n) => write_number(out, *n),
        BoundValue::Text(s) => write_quoted(out, s),
        BoundValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        BoundValue::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if is_identifier(key) {
                    out.push_str(key);
                } else {
                    write_quoted(out, key);
                }
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
        BoundValue::Function { source } => out.push_str(source),
    }
}

fn write_number(out: &mut String, n: f64) {
    if n.is_nan() {
        out.push_str("NaN");
    } else if n.is_infinite() {
        out.push_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    } else {
        out.push_str(&n.to_string());
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify() {
        let value = BoundValue::from(json!({ "a": 1, "b-c": "x", "d": [1, 2.5, null] }));
        assert_eq!(stringify(&value), "{a:1,'b-c':'x',d:[1,2.5,null]}");
        assert_eq!(stringify(&"it's".into()), r"'it\'s'");
        assert_eq!(stringify(&BoundValue::Undefined), "undefined");
        assert_eq!(stringify(&BoundValue::Bool(false)), "false");
        assert_eq!(stringify(&BoundValue::Number(f64::INFINITY)), "Infinity");
        assert_eq!(
            stringify(&BoundValue::Function {
                source: "() => {}".to_string()
            }),
            "() => {}"
        );
        assert_eq!(stringify(&BoundValue::Object(Vec::new())), "{}");
    }
}
