use serde_json::Value;

/// Normalizes a source object's content value into indexable text.
/// Strings are trimmed; anything else is rendered back to compact JSON so
/// structured content still contributes terms.
pub fn normalize_content(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(text)) => text.trim().to_string(),
		Some(other) => other.to_string(),
	}
}

/// Whitespace tokenization, case-sensitive, no stemming. Both index build
/// and query tokenization go through here so the two always agree.
pub fn tokenize(text: &str) -> Vec<&str> {
	text.split_whitespace().collect()
}
