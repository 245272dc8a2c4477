//! Main CLI parser and global connection options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Query genetics association views backed by ClickHouse and Elasticsearch.
#[derive(Parser, Debug)]
#[command(name = "genassoc")]
#[command(about = "Query genetics association views from the command line")]
#[command(version)]
pub struct Cli {
    /// Base URL of the ClickHouse HTTP interface
    #[arg(long, env = "GENASSOC_WAREHOUSE_URL", global = true)]
    pub warehouse_url: Option<String>,

    /// Default ClickHouse database
    #[arg(long, env = "GENASSOC_WAREHOUSE_DATABASE", global = true)]
    pub warehouse_database: Option<String>,

    /// ClickHouse user
    #[arg(long, env = "GENASSOC_WAREHOUSE_USER", global = true)]
    pub warehouse_user: Option<String>,

    /// ClickHouse password
    #[arg(long, env = "GENASSOC_WAREHOUSE_PASSWORD", global = true, hide_env_values = true)]
    pub warehouse_password: Option<String>,

    /// Base URL of the Elasticsearch cluster
    #[arg(long, env = "GENASSOC_SEARCH_URL", global = true)]
    pub search_url: Option<String>,

    /// JSON file overriding table names, search indices and limits
    #[arg(long, env = "GENASSOC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds for both stores
    #[arg(long, env = "GENASSOC_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "genassoc",
            "--warehouse-url",
            "http://ch:8123",
            "g2v",
            "1_55039974_G_T",
            "--search-url",
            "http://es:9200",
            "--pretty",
        ]);
        assert_eq!(cli.warehouse_url.as_deref(), Some("http://ch:8123"));
        assert_eq!(cli.search_url.as_deref(), Some("http://es:9200"));
        assert!(cli.pretty);
        assert!(matches!(cli.command, Commands::G2v { ref variant_id } if variant_id == "1_55039974_G_T"));
    }
}
