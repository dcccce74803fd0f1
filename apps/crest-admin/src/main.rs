use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = crest_admin::Args::parse();
	crest_admin::run(args).await
}
