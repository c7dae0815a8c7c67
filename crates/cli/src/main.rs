//! `names` CLI entry-point.
//!
//! Available sub-commands:
//! - `list`     — print every name in the `users` table.
//! - `distinct` — print the distinct values of a column.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use db::NameRepository;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "names",
    about = "Read names from the users table",
    version
)]
struct Cli {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Pool ceiling.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    /// Print results as a JSON array instead of one value per line.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every name in the `users` table.
    List,
    /// List the distinct values of COLUMN in TABLE.
    ///
    /// Both identifiers are pasted into the SQL unescaped.
    Distinct {
        column: String,
        table: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let pool = db::pool::create_pool(&cli.database_url, cli.max_connections)
        .await
        .context("failed to connect to database")?;
    let repo = NameRepository::new(&pool);

    let values = match &cli.command {
        Command::List => repo.get_names().await.context("failed to list names")?,
        Command::Distinct { column, table } => {
            info!("Selecting distinct {column} from {table}");
            repo.select_unique_values(column, table)
                .await
                .with_context(|| format!("failed to select distinct {column} from {table}"))?
        }
    };

    print_values(&values, cli.json)?;
    pool.close().await;
    Ok(())
}

fn print_values(values: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(values)?);
    } else {
        for value in values {
            println!("{value}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_takes_column_then_table() {
        let cli = Cli::try_parse_from([
            "names",
            "--database-url",
            "postgres://localhost/app",
            "distinct",
            "name",
            "users",
        ])
        .unwrap();

        assert_eq!(cli.max_connections, 5);
        match cli.command {
            Command::Distinct { column, table } => {
                assert_eq!(column, "name");
                assert_eq!(table, "users");
            }
            Command::List => panic!("expected distinct"),
        }
    }

    #[test]
    fn json_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "names",
            "--database-url",
            "postgres://localhost/app",
            "list",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        assert!(matches!(cli.command, Command::List));
    }
}
