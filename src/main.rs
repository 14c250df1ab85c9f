use anyhow::Result;
use clap::Parser;
use college_assistant::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    college_assistant::run(args).await
}
