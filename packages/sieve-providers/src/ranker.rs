use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use sieve_config::RankerProviderConfig;

use crate::{Error, Result};

/// Asks the chat model to order the enumerated documents by relevance to the
/// query and returns its raw reply text. The reply is expected to be a JSON
/// array of 0-based positions but may be anything; interpreting it is the
/// caller's concern.
pub async fn rank(cfg: &RankerProviderConfig, query: &str, documents: &[String]) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
		"messages": [
			{ "role": "system", "content": "You are a ranking assistant. Return only JSON." },
			{ "role": "user", "content": ranking_prompt(query, documents) },
		],
	});
	let res = client
		.post(&url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	chat_content(json)
}

fn ranking_prompt(query: &str, documents: &[String]) -> String {
	let docs_text = documents
		.iter()
		.enumerate()
		.map(|(position, text)| format!("[{position}] {text}"))
		.collect::<Vec<_>>()
		.join("\n\n");

	format!(
		"Query: {query}\n\n\
		Documents:\n{docs_text}\n\n\
		Task: Rank the above documents from most to least relevant to the query. \
		Return a JSON array of document indices (0-based) in descending order of relevance. \
		Respond ONLY with valid JSON."
	)
}

fn chat_content(json: Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(|content| content.trim().to_string())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Ranking response is missing message content.".to_string(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": " [2, 0, 1] " } }
			]
		});

		assert_eq!(chat_content(json).expect("parse failed"), "[2, 0, 1]");
	}

	#[test]
	fn missing_content_is_an_error() {
		let json = serde_json::json!({ "choices": [] });

		assert!(chat_content(json).is_err());
	}

	#[test]
	fn prompt_enumerates_documents_by_position() {
		let documents = vec!["cat sat mat".to_string(), "dog ran fast".to_string()];
		let prompt = ranking_prompt("cat dog", &documents);

		assert!(prompt.contains("Query: cat dog"));
		assert!(prompt.contains("[0] cat sat mat"));
		assert!(prompt.contains("[1] dog ran fast"));
	}
}
