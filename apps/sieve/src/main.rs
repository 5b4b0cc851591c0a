// crates.io
use clap::Parser;
// self
use sieve::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	sieve::run(args).await
}
