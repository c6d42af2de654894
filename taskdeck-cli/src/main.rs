//! TaskDeck CLI - Kanban board client for a remote task store.
//!
//! Commands:
//! - `taskdeck board`: Show the board as three lanes of task cards
//! - `taskdeck add --title <TITLE>`: Create a new task
//! - `taskdeck edit <id>`: Edit a task's fields
//! - `taskdeck move <id> <status>`: Move a task to another lane
//! - `taskdeck rm <id>`: Delete a task
//!
//! Environment variables:
//! - TASKDECK_REMOTE_URL: Override the remote task store URL
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

mod cli;
mod commands;
mod table;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskdeck::{BoardStore, GatewayResult, HttpGateway};

use cli::{Cli, Commands};
use commands::CliError;

/// Map a command result to an exit code, printing any error to stderr.
fn handle_result(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Build the gateway from --remote if given, otherwise from the env var,
/// config file, or default.
fn build_gateway(remote: Option<&str>) -> GatewayResult<HttpGateway> {
    match remote {
        Some(url) => HttpGateway::new(url),
        None => HttpGateway::from_env(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("taskdeck=debug,taskdeck_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let gateway = match build_gateway(cli.remote.as_deref()) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Using remote {}", gateway.remote_url());
    let store = BoardStore::new(Arc::new(gateway));

    let exit_code = match cli.command {
        Commands::Board { search, json } => {
            handle_result(commands::run_board(&store, search.as_deref(), json).await)
        }

        Commands::Add {
            title,
            description,
            status,
        } => handle_result(
            commands::run_add(&store, &title, description.as_deref(), status.as_deref()).await,
        ),

        Commands::Edit {
            id,
            title,
            description,
            status,
        } => handle_result(
            commands::run_edit(
                &store,
                &id,
                title.as_deref(),
                description.as_deref(),
                status.as_deref(),
            )
            .await,
        ),

        Commands::Move { id, status } => {
            handle_result(commands::run_move(&store, &id, &status).await)
        }

        Commands::Rm { id } => handle_result(commands::run_rm(&store, &id).await),
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_board() {
        let cli = Cli::parse_from(["taskdeck", "board"]);
        match cli.command {
            Commands::Board { search, json } => {
                assert_eq!(search, None);
                assert!(!json);
            }
            _ => panic!("Expected Board command"),
        }
    }

    #[test]
    fn test_cli_parsing_board_search() {
        let cli = Cli::parse_from(["taskdeck", "board", "--search", "parser"]);
        match cli.command {
            Commands::Board { search, .. } => assert_eq!(search, Some("parser".to_string())),
            _ => panic!("Expected Board command"),
        }
    }

    #[test]
    fn test_cli_parsing_board_json() {
        let cli = Cli::parse_from(["taskdeck", "board", "--json"]);
        match cli.command {
            Commands::Board { json, .. } => assert!(json),
            _ => panic!("Expected Board command"),
        }
    }

    #[test]
    fn test_cli_parsing_add() {
        let cli = Cli::parse_from(["taskdeck", "add", "--title", "Ship the docs"]);
        match cli.command {
            Commands::Add {
                title,
                description,
                status,
            } => {
                assert_eq!(title, "Ship the docs");
                assert_eq!(description, None);
                assert_eq!(status, None);
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_parsing_add_all_fields() {
        let cli = Cli::parse_from([
            "taskdeck",
            "add",
            "--title",
            "Ship the docs",
            "--description",
            "v1 first",
            "--status",
            "in-progress",
        ]);
        match cli.command {
            Commands::Add {
                title,
                description,
                status,
            } => {
                assert_eq!(title, "Ship the docs");
                assert_eq!(description, Some("v1 first".to_string()));
                assert_eq!(status, Some("in-progress".to_string()));
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_parsing_add_requires_title() {
        let result = Cli::try_parse_from(["taskdeck", "add"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_edit() {
        let cli = Cli::parse_from(["taskdeck", "edit", "7", "--title", "Write the lexer"]);
        match cli.command {
            Commands::Edit { id, title, .. } => {
                assert_eq!(id, "7");
                assert_eq!(title, Some("Write the lexer".to_string()));
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_cli_parsing_edit_status_only() {
        let cli = Cli::parse_from(["taskdeck", "edit", "7", "--status", "done"]);
        match cli.command {
            Commands::Edit {
                id, title, status, ..
            } => {
                assert_eq!(id, "7");
                assert_eq!(title, None);
                assert_eq!(status, Some("done".to_string()));
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_cli_parsing_move() {
        let cli = Cli::parse_from(["taskdeck", "move", "7", "done"]);
        match cli.command {
            Commands::Move { id, status } => {
                assert_eq!(id, "7");
                assert_eq!(status, "done");
            }
            _ => panic!("Expected Move command"),
        }
    }

    #[test]
    fn test_cli_parsing_move_requires_status() {
        let result = Cli::try_parse_from(["taskdeck", "move", "7"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_rm() {
        let cli = Cli::parse_from(["taskdeck", "rm", "7"]);
        match cli.command {
            Commands::Rm { id } => assert_eq!(id, "7"),
            _ => panic!("Expected Rm command"),
        }
    }

    #[test]
    fn test_cli_parsing_debug_global() {
        let cli = Cli::parse_from(["taskdeck", "--debug", "board"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_parsing_remote_global() {
        let cli = Cli::parse_from(["taskdeck", "--remote", "http://localhost:4000", "board"]);
        assert_eq!(cli.remote, Some("http://localhost:4000".to_string()));
    }

    #[test]
    fn test_cli_parsing_remote_after_subcommand() {
        let cli = Cli::parse_from(["taskdeck", "board", "--remote", "http://localhost:4000"]);
        assert_eq!(cli.remote, Some("http://localhost:4000".to_string()));
    }

    #[test]
    fn test_handle_result_maps_errors_to_one() {
        assert_eq!(handle_result(Ok(())), 0);
        assert_eq!(
            handle_result(Err(CliError::UnknownTask("42".to_string()))),
            1
        );
    }

    #[test]
    fn test_build_gateway_prefers_explicit_remote() {
        let gateway = build_gateway(Some("http://localhost:4000")).unwrap();
        assert_eq!(gateway.remote_url(), "http://localhost:4000");
    }

    #[test]
    fn test_build_gateway_rejects_garbage() {
        assert!(build_gateway(Some("not a url")).is_err());
    }
}
