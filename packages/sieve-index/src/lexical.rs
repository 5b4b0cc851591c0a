use std::{collections::HashMap, path::PathBuf};

use sieve_domain::{Candidate, Record, text};
use sieve_store::artifacts;

use crate::{Error, Result, rank};

pub const BM25_K1: f32 = 1.5;
pub const BM25_B: f32 = 0.75;

#[derive(Debug)]
struct Posting {
	doc: u32,
	term_frequency: u32,
}

/// Okapi BM25 term statistics: per-term postings, per-document lengths and
/// the corpus average length. The IDF uses the `ln(1 + ...)` variant so
/// scores stay non-negative for very common terms.
#[derive(Debug)]
struct Bm25Model {
	postings: HashMap<String, Vec<Posting>>,
	doc_lengths: Vec<u32>,
	avgdl: f32,
}
impl Bm25Model {
	fn fit(tokenized: &[Vec<&str>]) -> Self {
		let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
		let mut doc_lengths = Vec::with_capacity(tokenized.len());
		let mut total_length = 0_u64;

		for (doc, tokens) in tokenized.iter().enumerate() {
			doc_lengths.push(tokens.len() as u32);

			total_length += tokens.len() as u64;

			let mut term_frequencies: HashMap<&str, u32> = HashMap::new();

			for token in tokens {
				*term_frequencies.entry(*token).or_insert(0) += 1;
			}
			for (term, term_frequency) in term_frequencies {
				postings
					.entry(term.to_string())
					.or_default()
					.push(Posting { doc: doc as u32, term_frequency });
			}
		}

		let avgdl = if doc_lengths.is_empty() {
			0.0
		} else {
			total_length as f32 / doc_lengths.len() as f32
		};

		Self { postings, doc_lengths, avgdl }
	}

	/// Dense score vector over the whole corpus. Repeated query tokens
	/// contribute once per occurrence, matching the tokenized-query
	/// semantics of the build side.
	fn scores(&self, query_tokens: &[&str]) -> Vec<f32> {
		let mut scores = vec![0.0_f32; self.doc_lengths.len()];

		if self.doc_lengths.is_empty() {
			return scores;
		}

		let n = self.doc_lengths.len() as f32;

		for token in query_tokens {
			let Some(postings) = self.postings.get(*token) else { continue };
			let df = postings.len() as f32;
			let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();

			for posting in postings {
				let dl = self.doc_lengths[posting.doc as usize] as f32;
				let tf = posting.term_frequency as f32;
				let tf_norm =
					(tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * dl / self.avgdl));

				scores[posting.doc as usize] += idf * tf_norm;
			}
		}

		scores
	}
}

struct Built {
	model: Bm25Model,
	records: Vec<Record>,
}

/// Term-frequency relevance index with an explicit build/load lifecycle.
/// Queries against an unbuilt index fail with [`Error::NotBuilt`].
pub struct LexicalIndex {
	workdir: PathBuf,
	built: Option<Built>,
}
impl LexicalIndex {
	pub fn new(workdir: impl Into<PathBuf>) -> Self {
		Self { workdir: workdir.into(), built: None }
	}

	/// Tokenizes `texts` by whitespace (case-sensitive, no stemming), fits
	/// the term statistics and persists the record sequence. The records
	/// carry the same normalized text, which is what [`Self::load`]
	/// re-tokenizes.
	pub fn build(&mut self, texts: &[String], records: Vec<Record>) -> Result<()> {
		if records.is_empty() {
			return Err(Error::EmptyCorpus);
		}
		if texts.len() != records.len() {
			return Err(Error::InputMismatch { texts: texts.len(), records: records.len() });
		}

		let tokenized: Vec<Vec<&str>> = texts.iter().map(|t| text::tokenize(t)).collect();
		let model = Bm25Model::fit(&tokenized);

		artifacts::save_records(&self.workdir, &records)?;
		tracing::info!(docs = records.len(), "Lexical index built.");

		self.built = Some(Built { model, records });

		Ok(())
	}

	/// Reconstructs the model from the persisted record sequence by
	/// re-tokenizing the stored texts. Deterministic parameters make the
	/// reloaded model score-identical to the one `build` produced; the cost
	/// of that choice is a reload proportional to corpus size.
	pub fn load(&mut self) -> Result<()> {
		let records = artifacts::load_records(&self.workdir)?;

		if records.is_empty() {
			return Err(Error::EmptyCorpus);
		}

		let tokenized: Vec<Vec<&str>> = records.iter().map(|r| text::tokenize(&r.text)).collect();
		let model = Bm25Model::fit(&tokenized);

		self.built = Some(Built { model, records });

		Ok(())
	}

	/// Full-corpus score vector for `query`, aligned with the record
	/// sequence.
	pub fn scores(&self, query: &str) -> Result<Vec<f32>> {
		let built = self.built.as_ref().ok_or(Error::NotBuilt)?;

		Ok(built.model.scores(&text::tokenize(query)))
	}

	pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<Candidate>> {
		let built = self.built.as_ref().ok_or(Error::NotBuilt)?;
		let scores = built.model.scores(&text::tokenize(query));

		Ok(rank::top_candidates(&built.records, &scores, top_k))
	}

	pub fn records(&self) -> Result<&[Record]> {
		Ok(&self.built.as_ref().ok_or(Error::NotBuilt)?.records)
	}

	pub fn is_built(&self) -> bool {
		self.built.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn corpus() -> (Vec<String>, Vec<Record>) {
		let texts: Vec<String> =
			["cat sat mat", "dog ran fast", "cat and dog play"].iter().map(|t| t.to_string()).collect();
		let records = texts
			.iter()
			.enumerate()
			.map(|(index, text)| Record {
				index,
				id: format!("doc-{index}"),
				text: text.clone(),
				metadata: serde_json::Map::new(),
			})
			.collect();

		(texts, records)
	}

	#[test]
	fn search_before_build_fails_with_not_built() {
		let index = LexicalIndex::new("unused");

		assert!(matches!(index.search("cat", 1), Err(Error::NotBuilt)));
		assert!(matches!(index.scores("cat"), Err(Error::NotBuilt)));
	}

	#[test]
	fn empty_corpus_is_rejected() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir.");
		let mut index = LexicalIndex::new(dir.path());

		assert!(matches!(index.build(&[], Vec::new()), Err(Error::EmptyCorpus)));
		assert!(!index.is_built());
	}

	#[test]
	fn document_matching_both_terms_ranks_first() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir.");
		let (texts, records) = corpus();
		let mut index = LexicalIndex::new(dir.path());

		index.build(&texts, records).expect("Failed to build index.");

		let out = index.search("cat dog", 2).expect("Search failed.");

		assert_eq!(out.len(), 2);
		assert_eq!(out[0].record.index, 2);
		assert!(out[0].score > out[1].score);
	}

	#[test]
	fn scores_cover_the_whole_corpus() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir.");
		let (texts, records) = corpus();
		let mut index = LexicalIndex::new(dir.path());

		index.build(&texts, records).expect("Failed to build index.");

		let scores = index.scores("cat").expect("Scoring failed.");

		assert_eq!(scores.len(), 3);
		assert!(scores[0] > 0.0);
		assert_eq!(scores[1], 0.0);
		assert!(scores[2] > 0.0);
	}

	#[test]
	fn unknown_terms_score_zero_everywhere() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir.");
		let (texts, records) = corpus();
		let mut index = LexicalIndex::new(dir.path());

		index.build(&texts, records).expect("Failed to build index.");

		let scores = index.scores("zebra").expect("Scoring failed.");

		assert!(scores.iter().all(|&s| s == 0.0));
	}

	#[test]
	fn tokenization_is_case_sensitive() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir.");
		let (texts, records) = corpus();
		let mut index = LexicalIndex::new(dir.path());

		index.build(&texts, records).expect("Failed to build index.");

		let scores = index.scores("Cat").expect("Scoring failed.");

		assert!(scores.iter().all(|&s| s == 0.0));
	}
}
