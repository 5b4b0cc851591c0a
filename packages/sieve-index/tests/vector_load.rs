use std::path::Path;

use sieve_config::EmbeddingProviderConfig;
use sieve_domain::Record;
use sieve_index::VectorIndex;
use sieve_store::artifacts;

fn embedding_cfg(dimensions: u32) -> EmbeddingProviderConfig {
	EmbeddingProviderConfig {
		api_base: "http://localhost".to_string(),
		api_key: "test".to_string(),
		path: "/v1/embeddings".to_string(),
		model: "test-model".to_string(),
		dimensions,
		batch_size: 8,
		timeout_ms: 1_000,
		default_headers: serde_json::Map::new(),
	}
}

fn records(count: usize) -> Vec<Record> {
	(0..count)
		.map(|index| Record {
			index,
			id: format!("doc-{index}"),
			text: format!("document {index}"),
			metadata: serde_json::Map::new(),
		})
		.collect()
}

fn write_artifacts(dir: &Path, records: &[Record], matrix: &[Vec<f32>]) {
	artifacts::save_records(dir, records).expect("Failed to save records.");
	artifacts::save_matrix(dir, matrix).expect("Failed to save matrix.");
}

#[test]
fn load_is_pure_deserialization_and_ranks_by_similarity() {
	let dir = tempfile::tempdir().expect("Failed to create temp dir.");
	let matrix = vec![vec![1.0_f32, 0.0], vec![0.0, 1.0], vec![0.7, 0.7]];

	write_artifacts(dir.path(), &records(3), &matrix);

	let mut index = VectorIndex::new(dir.path(), embedding_cfg(2));

	index.load().expect("Failed to load index.");

	let out = index.search_with_vector(&[1.0, 0.0], 3).expect("Search failed.");
	let positions: Vec<usize> = out.iter().map(|c| c.record.index).collect();

	assert_eq!(positions, vec![0, 2, 1]);
	assert!(out[0].score > out[1].score);
	assert!(out[1].score > out[2].score);
}

#[test]
fn top_k_truncates_and_ties_break_by_position() {
	let dir = tempfile::tempdir().expect("Failed to create temp dir.");
	let matrix = vec![vec![0.0_f32, 1.0], vec![1.0, 0.0], vec![2.0, 0.0]];

	write_artifacts(dir.path(), &records(3), &matrix);

	let mut index = VectorIndex::new(dir.path(), embedding_cfg(2));

	index.load().expect("Failed to load index.");

	// Rows 1 and 2 are parallel, so their cosine scores tie exactly and the
	// earlier position must win.
	let out = index.search_with_vector(&[1.0, 0.0], 2).expect("Search failed.");
	let positions: Vec<usize> = out.iter().map(|c| c.record.index).collect();

	assert_eq!(positions, vec![1, 2]);
}

#[test]
fn load_rejects_row_count_drift() {
	let dir = tempfile::tempdir().expect("Failed to create temp dir.");
	let matrix = vec![vec![1.0_f32, 0.0]];

	write_artifacts(dir.path(), &records(2), &matrix);

	let mut index = VectorIndex::new(dir.path(), embedding_cfg(2));

	assert!(matches!(index.load(), Err(sieve_index::Error::VectorCountMismatch { .. })));
}

#[test]
fn query_dimension_drift_is_rejected() {
	let dir = tempfile::tempdir().expect("Failed to create temp dir.");
	let matrix = vec![vec![1.0_f32, 0.0]];

	write_artifacts(dir.path(), &records(1), &matrix);

	let mut index = VectorIndex::new(dir.path(), embedding_cfg(2));

	index.load().expect("Failed to load index.");

	assert!(matches!(
		index.scores(&[1.0, 0.0, 0.0]),
		Err(sieve_index::Error::DimensionMismatch { .. })
	));
}
