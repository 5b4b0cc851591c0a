use std::cmp::Ordering;

use sieve_domain::{Candidate, Record};

/// Descending score comparison. NaN sorts last so a poisoned score can never
/// displace a real one.
pub fn cmp_score_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

/// Selects the `top_k` highest-scoring records, ties broken by ascending
/// record position, so repeated identical queries return identical results.
pub fn top_candidates(records: &[Record], scores: &[f32], top_k: usize) -> Vec<Candidate> {
	let mut order: Vec<usize> = (0..records.len().min(scores.len())).collect();

	order.sort_by(|&left, &right| {
		cmp_score_desc(scores[left], scores[right]).then_with(|| left.cmp(&right))
	});

	order
		.into_iter()
		.take(top_k)
		.map(|position| Candidate { record: records[position].clone(), score: scores[position] })
		.collect()
}
