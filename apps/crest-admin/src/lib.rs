//! Index administration binary. Talks to the Solr core directly, without a
//! running wave server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crest_storage::solr::{FIELDS_PRESENT_QUERY, SelectQuery, SolrIndex};

#[derive(Debug, Parser)]
#[command(
	version = crest_cli::VERSION,
	rename_all = "kebab",
	styles = crest_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Report how many records the search index holds.
	Status,
	/// Delete every record from the search index.
	Clear,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = crest_config::load(&args.config)?;

	init_tracing(&config)?;
	tracing::debug!(path = %args.config.display(), "Loaded configuration.");

	let index = SolrIndex::new(&config.solr)?;

	match args.command {
		Command::Status => {
			let page = index
				.select(&SelectQuery {
					start: 0,
					rows: 0,
					query: FIELDS_PRESENT_QUERY.clone(),
					filter: "*:*".to_string(),
				})
				.await?;

			println!("{} records indexed at {}.", page.num_found, config.solr.base_url);
		},
		Command::Clear => {
			index.delete_by_query(&FIELDS_PRESENT_QUERY).await?;
			index.commit().await?;

			println!("Search index cleared.");
		},
	}

	Ok(())
}

fn init_tracing(config: &crest_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();
	Ok(())
}
