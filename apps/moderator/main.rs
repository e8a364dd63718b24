use anyhow::Result;
use dotenv::dotenv;
use moderator::config::ModeratorConfig;
use utils::tracing::setup_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_tracing();

    let config = ModeratorConfig::from_env()?;
    let report = moderator::run(&config).await?;
    println!("{report}");

    Ok(())
}
