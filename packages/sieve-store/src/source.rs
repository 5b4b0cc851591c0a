use std::{fs, path::Path};

use serde_json::Value;

use sieve_domain::{Record, text};

use crate::{Error, Result};

/// Reads a line-delimited JSON file into one value per non-blank line.
pub fn read_jsonl(path: &Path) -> Result<Vec<Value>> {
	if !path.exists() {
		return Err(Error::SourceNotFound { path: path.to_path_buf() });
	}

	let raw = fs::read_to_string(path)?;
	let mut out = Vec::new();

	for line in raw.lines() {
		let line = line.trim();

		if line.is_empty() {
			continue;
		}

		out.push(serde_json::from_str(line)?);
	}

	Ok(out)
}

/// Loads the corpus from a JSONL source and assigns each kept document its
/// stable position. Documents whose normalized content is shorter than
/// `min_content_chars` are excluded from indexing.
pub fn load_corpus(source: &Path, min_content_chars: usize) -> Result<Vec<Record>> {
	let raw = read_jsonl(source)?;
	let mut records = Vec::new();
	let mut skipped = 0_usize;

	for value in raw {
		let object = match value {
			Value::Object(object) => object,
			other => {
				tracing::warn!(line = %other, "Skipping non-object corpus line.");

				skipped += 1;

				continue;
			},
		};
		let text = text::normalize_content(object.get("content"));

		if text.is_empty() || text.chars().count() < min_content_chars {
			skipped += 1;

			continue;
		}

		let index = records.len();
		let id = match object.get("id") {
			Some(Value::String(id)) => id.clone(),
			Some(other) => other.to_string(),
			None => index.to_string(),
		};
		let mut metadata = object;

		metadata.remove("content");
		metadata.remove("id");

		records.push(Record { index, id, text, metadata });
	}

	if skipped > 0 {
		tracing::info!(count = skipped, "Excluded documents below the minimum content length.");
	}

	Ok(records)
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn missing_source_is_a_distinct_error() {
		let err = read_jsonl(Path::new("no/such/file.jsonl")).unwrap_err();
		assert!(matches!(err, Error::SourceNotFound { .. }));
	}

	#[test]
	fn loads_records_with_stable_positions() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir.");
		let path = dir.path().join("corpus.jsonl");
		let mut file = fs::File::create(&path).expect("Failed to create corpus file.");

		writeln!(file, r#"{{"id": "a", "content": "cat sat mat", "lang": "en"}}"#).unwrap();
		writeln!(file).unwrap();
		writeln!(file, r#"{{"id": "b", "content": "x"}}"#).unwrap();
		writeln!(file, r#"{{"content": "dog ran fast"}}"#).unwrap();

		let records = load_corpus(&path, 4).expect("Failed to load corpus.");

		assert_eq!(records.len(), 2);
		assert_eq!(records[0].index, 0);
		assert_eq!(records[0].id, "a");
		assert_eq!(records[0].text, "cat sat mat");
		assert_eq!(records[0].metadata.get("lang"), Some(&serde_json::json!("en")));
		assert_eq!(records[1].index, 1);
		assert_eq!(records[1].id, "1");
		assert_eq!(records[1].text, "dog ran fast");
	}
}
