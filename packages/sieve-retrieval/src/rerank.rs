use std::future::Future;

use sieve_config::RankerProviderConfig;
use sieve_domain::Candidate;
use sieve_providers::ranker;

/// External ranking capability: a query plus enumerated document texts in,
/// a raw ordering judgment out. Kept to one method so tests can substitute
/// a deterministic fake for the network-backed implementation.
pub trait RankingOracle {
	fn rank(
		&self,
		query: &str,
		documents: &[String],
	) -> impl Future<Output = sieve_providers::Result<String>> + Send;
}

/// Oracle backed by the chat-completion ranking provider.
pub struct ChatRanker {
	cfg: RankerProviderConfig,
}
impl ChatRanker {
	pub fn new(cfg: RankerProviderConfig) -> Self {
		Self { cfg }
	}
}
impl RankingOracle for ChatRanker {
	async fn rank(&self, query: &str, documents: &[String]) -> sieve_providers::Result<String> {
		ranker::rank(&self.cfg, query, documents).await
	}
}

/// Reorders a bounded candidate list according to the oracle's judgment.
/// Scores are carried through untouched; only the order changes. Every
/// failure mode degrades to the original input order, so reranking can
/// never lose a query that retrieval answered.
pub struct Reranker<O> {
	oracle: O,
}
impl<O> Reranker<O>
where
	O: RankingOracle,
{
	pub fn new(oracle: O) -> Self {
		Self { oracle }
	}

	pub async fn rerank(&self, query: &str, candidates: Vec<Candidate>) -> Vec<Candidate> {
		if candidates.is_empty() {
			return candidates;
		}

		let documents: Vec<String> =
			candidates.iter().map(|candidate| candidate.record.text.clone()).collect();
		let judgment = match self.oracle.rank(query, &documents).await {
			Ok(judgment) => judgment,
			Err(err) => {
				tracing::warn!(error = %err, "Ranking capability failed. Keeping original order.");

				return candidates;
			},
		};

		apply_judgment(candidates, &judgment)
	}
}

/// Applies a raw ordering judgment to the candidate list. An unparsable
/// judgment or one with no usable position returns the input unchanged.
pub fn apply_judgment(candidates: Vec<Candidate>, judgment: &str) -> Vec<Candidate> {
	let Some(order) = parse_order(judgment) else {
		tracing::warn!("Failed to parse ranking judgment. Keeping original order.");

		return candidates;
	};
	let positions = validate_positions(&order, candidates.len());

	if positions.is_empty() {
		tracing::warn!("Ranking judgment contained no usable position. Keeping original order.");

		return candidates;
	}

	let mut slots: Vec<Option<Candidate>> = candidates.into_iter().map(Some).collect();

	positions.into_iter().filter_map(|position| slots[position].take()).collect()
}

/// The judgment is expected to be a JSON array of integers.
pub fn parse_order(judgment: &str) -> Option<Vec<i64>> {
	serde_json::from_str(judgment).ok()
}

/// Drops out-of-range and repeated positions, preserving the relative order
/// of the valid ones. The result can never exceed `len`.
fn validate_positions(order: &[i64], len: usize) -> Vec<usize> {
	let mut seen = vec![false; len];
	let mut out = Vec::new();

	for &raw in order {
		let position = match usize::try_from(raw) {
			Ok(position) if position < len => position,
			_ => {
				tracing::warn!(position = raw, "Position out of range in ranking judgment.");

				continue;
			},
		};

		if seen[position] {
			tracing::warn!(position = raw, "Repeated position in ranking judgment.");

			continue;
		}

		seen[position] = true;

		out.push(position);
	}

	out
}
