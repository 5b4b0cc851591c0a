use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One document of the corpus. The sequence of records is fixed after the
/// corpus is loaded; `index` is the record's position in that sequence and
/// is what every score vector aligns on.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Record {
	pub index: usize,
	pub id: String,
	/// Normalized content used for tokenization and embedding.
	pub text: String,
	/// Remaining fields of the source object, kept for display.
	#[serde(default)]
	pub metadata: Map<String, Value>,
}

/// A scored record, the result unit of every search operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
	pub record: Record,
	pub score: f32,
}
