use clap::Parser;
use configuration::ConfigArgs;

/// Serve the gradebook web application.
///
/// `cargo run -p web-server` is the same as `gradebook serve` without `--addr`.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.config.load()?;
    let _log_guard = configuration::init_tracing(&config.log)?;

    web_server::run_server(&config).await
}
