use clap::Parser;
use profile_readme::config::{Cli, Config};
use profile_readme::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let config = Config::from(cli);
    profile_readme::run(&config).await?;

    println!("✨ All done!");
    Ok(())
}
