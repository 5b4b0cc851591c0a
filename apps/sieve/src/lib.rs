use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use sieve_config::Config;
use sieve_domain::Candidate;
use sieve_index::{LexicalIndex, VectorIndex};
use sieve_retrieval::{ChatRanker, HybridSearcher, Reranker};

const SNIPPET_MAX_CHARS: usize = 400;

#[derive(Debug, Parser)]
#[command(
	version = sieve_cli::VERSION,
	rename_all = "kebab",
	styles = sieve_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Load the corpus and build both indices into the workdir.
	Build,
	/// Query the persisted indices.
	Search {
		query: String,
		#[arg(long, value_enum, default_value_t = Mode::Hybrid)]
		mode: Mode,
		#[arg(long, value_name = "N")]
		top_k: Option<u32>,
		/// Weight of the vector signal in the fused score.
		#[arg(long, value_name = "WEIGHT")]
		alpha: Option<f32>,
		/// Refine the fused order through the ranking provider.
		#[arg(long)]
		rerank: bool,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Mode {
	Lexical,
	Vector,
	Hybrid,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = sieve_config::load(&args.config)?;

	init_tracing(&config);

	match args.command {
		Command::Build => build(&config).await,
		Command::Search { query, mode, top_k, alpha, rerank } =>
			search(&config, &query, mode, top_k, alpha, rerank).await,
	}
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn lexical_workdir(config: &Config) -> PathBuf {
	config.corpus.workdir.join("lexical")
}

fn vector_workdir(config: &Config) -> PathBuf {
	config.corpus.workdir.join("vector")
}

async fn build(config: &Config) -> color_eyre::Result<()> {
	let records =
		sieve_store::source::load_corpus(&config.corpus.source, config.corpus.min_content_chars)?;

	tracing::info!(
		docs = records.len(),
		source = %config.corpus.source.display(),
		"Corpus loaded."
	);

	let texts: Vec<String> = records.iter().map(|record| record.text.clone()).collect();
	let mut lexical = LexicalIndex::new(lexical_workdir(config));

	lexical.build(&texts, records.clone())?;

	let mut vector = VectorIndex::new(vector_workdir(config), config.providers.embedding.clone());

	vector.build(&texts, records).await?;

	tracing::info!("Build finished.");

	Ok(())
}

async fn search(
	config: &Config,
	query: &str,
	mode: Mode,
	top_k: Option<u32>,
	alpha: Option<f32>,
	rerank: bool,
) -> color_eyre::Result<()> {
	if rerank && mode != Mode::Hybrid {
		return Err(eyre::eyre!("--rerank requires --mode hybrid."));
	}

	let top_k = top_k.unwrap_or(config.retrieval.top_k) as usize;
	let alpha = alpha.unwrap_or(config.retrieval.alpha);

	if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
		return Err(eyre::eyre!("alpha must be in the range 0.0-1.0."));
	}

	let results = match mode {
		Mode::Lexical => {
			let mut index = LexicalIndex::new(lexical_workdir(config));

			index.load()?;
			index.search(query, top_k)?
		},
		Mode::Vector => {
			let mut index =
				VectorIndex::new(vector_workdir(config), config.providers.embedding.clone());

			index.load()?;
			index.search(query, top_k).await?
		},
		Mode::Hybrid => {
			let mut lexical = LexicalIndex::new(lexical_workdir(config));

			lexical.load()?;

			let mut vector =
				VectorIndex::new(vector_workdir(config), config.providers.embedding.clone());

			vector.load()?;

			let searcher = HybridSearcher::new(&lexical, &vector);

			if rerank {
				let pool = top_k * config.retrieval.rerank_pool_multiplier as usize;
				let candidates = searcher.search(query, pool, alpha).await?;
				let reranker = Reranker::new(ChatRanker::new(config.providers.ranker.clone()));
				let mut reranked = reranker.rerank(query, candidates).await;

				reranked.truncate(top_k);

				reranked
			} else {
				searcher.search(query, top_k, alpha).await?
			}
		},
	};

	print_results(&results);

	Ok(())
}

fn print_results(results: &[Candidate]) {
	for (position, candidate) in results.iter().enumerate() {
		println!("[{}] score={:.4}", position + 1, candidate.score);
		println!("  id={}", candidate.record.id);
		println!("  snippet={}", snippet(&candidate.record.text));
		println!();
	}
}

fn snippet(text: &str) -> String {
	let truncated: String = text.chars().take(SNIPPET_MAX_CHARS).collect();

	truncated.replace('\n', " ").trim().to_string()
}
