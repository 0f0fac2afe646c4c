use analyzer::ResultsAggregator;
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::{Config, ConfigArgs};
use database::DbRepository;
use std::path::PathBuf;

/// The main entry point for the Gradebook application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load GRADEBOOK__* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let mut config = cli.config.load().context("Failed to load configuration")?;
    let _log_guard = configuration::init_tracing(&config.log)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(addr) = args.addr {
                (config.server.host, config.server.port) = parse_listen_addr(&addr)?;
            }
            web_server::run_server(&config).await
        }
        Commands::Export(args) => handle_export(&config, args.path).await,
        Commands::Results => handle_results(&config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Record students, subjects and marks, and report credit-weighted GPAs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web application.
    Serve(ServeArgs),
    /// Write the results CSV without starting the server.
    Export(ExportArgs),
    /// Print every student's GPA to the terminal.
    Results,
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address, overriding `[server]` in the config (e.g. "0.0.0.0:8080").
    #[arg(long)]
    addr: Option<String>,
}

#[derive(Parser)]
struct ExportArgs {
    /// Output file, overriding `[export] path` in the config.
    #[arg(long)]
    path: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn open_repository(config: &Config) -> anyhow::Result<DbRepository> {
    let db_pool = database::connect_and_migrate(&config.database)
        .await
        .context("Failed to open the database")?;
    Ok(DbRepository::new(db_pool))
}

async fn handle_export(config: &Config, path: Option<PathBuf>) -> anyhow::Result<()> {
    let db_repo = open_repository(config).await?;
    let path = export_target(config, path);

    let rows = ResultsAggregator::default().export(&db_repo, &path).await?;
    println!("Results exported to {} ({} students)", path.display(), rows);
    Ok(())
}

async fn handle_results(config: &Config) -> anyhow::Result<()> {
    let db_repo = open_repository(config).await?;
    let rows = ResultsAggregator::default().run(&db_repo).await?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(analyzer::CSV_HEADER);
    for row in &rows {
        table.add_row(vec![
            row.roll_no.clone(),
            row.name.clone(),
            row.class_label().to_string(),
            row.gpa.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Splits `HOST:PORT` on the last colon, so `[::1]:8080` keeps its brackets.
fn parse_listen_addr(addr: &str) -> anyhow::Result<(String, u16)> {
    let (host, port) = addr
        .rsplit_once(':')
        .context("--addr must look like HOST:PORT")?;
    if host.is_empty() {
        anyhow::bail!("--addr is missing a host");
    }
    let port = port
        .parse()
        .with_context(|| format!("--addr has an invalid port: {port:?}"))?;
    Ok((host.to_string(), port))
}

/// `--path` wins over `[export] path`.
fn export_target(config: &Config, path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| config.export.path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn listen_addr_splits_host_and_port() {
        let (host, port) = parse_listen_addr("0.0.0.0:8080").unwrap();
        assert_eq!(host, "0.0.0.0");
        assert_eq!(port, 8080);
    }

    #[test]
    fn bracketed_ipv6_host_is_kept_whole() {
        let mut config = Config::default();
        (config.server.host, config.server.port) = parse_listen_addr("[::1]:8080").unwrap();
        assert_eq!(config.server.host, "[::1]");
        assert_eq!(config.server.address(), "[::1]:8080");
        assert!(config.server.address().parse::<std::net::SocketAddr>().is_ok());
    }

    #[test]
    fn malformed_listen_addrs_are_rejected() {
        for addr in ["localhost", "localhost:http", "localhost:99999", "localhost:", ":8080"] {
            assert!(parse_listen_addr(addr).is_err(), "{addr} should be rejected");
        }
    }

    #[test]
    fn export_path_flag_overrides_config() {
        let config = Config::default();
        assert_eq!(export_target(&config, None), Path::new("results.csv"));
        assert_eq!(
            export_target(&config, Some(PathBuf::from("out/term1.csv"))),
            Path::new("out/term1.csv")
        );
    }
}
