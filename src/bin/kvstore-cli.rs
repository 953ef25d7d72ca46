//! KV Store command line client
//!
//! Runs a single command when one is given, otherwise starts an interactive
//! prompt against the server.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use kvstore::KvClient;

#[derive(Parser, Debug)]
#[command(name = "kvstore-cli", about = "Client for the KV Store server")]
struct Cli {
    /// Server base URL
    #[arg(long, default_value = "http://127.0.0.1:9090")]
    server: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Get value for a key
    Get { key: String },
    /// Set key-value pair with optional TTL in seconds
    Set {
        key: String,
        value: String,
        #[arg(allow_negative_numbers = true)]
        ttl: Option<i64>,
    },
    /// Delete a key
    Delete { key: String },
    /// List key-value pairs
    List {
        #[arg(allow_negative_numbers = true)]
        limit: Option<i32>,
    },
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Run(Command),
    Help,
    Clear,
    Quit,
    Empty,
}

const HELP: &str = "\
Available commands:
  get <key>                    - Get value for a key
  set <key> <value> [ttl]      - Set key-value pair with optional TTL
  delete <key>                 - Delete a key
  list [limit]                 - List key-value pairs
  clear                        - Clear screen
  help                         - Show this help
  quit/exit                    - Exit the client
";

/// Parses a prompt line. Errors are usage messages for the user.
fn parse_line(line: &str) -> Result<Input, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return Ok(Input::Empty);
    };

    let input = match (command, args) {
        ("quit" | "exit", _) => Input::Quit,
        ("help", _) => Input::Help,
        ("clear", _) => Input::Clear,
        ("get", [key]) => Input::Run(Command::Get {
            key: key.to_string(),
        }),
        ("get", _) => return Err("Usage: get <key>".to_string()),
        ("set", [key, value]) => Input::Run(Command::Set {
            key: key.to_string(),
            value: value.to_string(),
            ttl: None,
        }),
        ("set", [key, value, ttl]) => {
            let ttl = ttl
                .parse::<i64>()
                .map_err(|err| format!("Invalid TTL value: {}", err))?;
            Input::Run(Command::Set {
                key: key.to_string(),
                value: value.to_string(),
                ttl: Some(ttl),
            })
        }
        ("set", _) => return Err("Usage: set <key> <value> [ttl_seconds]".to_string()),
        ("delete", [key]) => Input::Run(Command::Delete {
            key: key.to_string(),
        }),
        ("delete", _) => return Err("Usage: delete <key>".to_string()),
        ("list", []) => Input::Run(Command::List { limit: None }),
        ("list", [limit]) => {
            let limit = limit
                .parse::<i32>()
                .map_err(|err| format!("Invalid limit value: {}", err))?;
            Input::Run(Command::List { limit: Some(limit) })
        }
        ("list", _) => return Err("Usage: list [limit]".to_string()),
        (other, _) => {
            return Err(format!(
                "Unknown command: {}\nType 'help' for available commands",
                other
            ))
        }
    };

    Ok(input)
}

/// Shortens a table cell to 15 characters.
fn truncate_cell(text: &str) -> String {
    if text.chars().count() > 15 {
        format!("{}...", text.chars().take(12).collect::<String>())
    } else {
        text.to_string()
    }
}

fn render_table(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    out.push_str("┌─────────────────┬─────────────────┐\n");
    out.push_str("│ Key             │ Value           │\n");
    out.push_str("├─────────────────┼─────────────────┤\n");
    for (key, value) in pairs {
        out.push_str(&format!(
            "│ {:<15} │ {:<15} │\n",
            truncate_cell(key),
            truncate_cell(value)
        ));
    }
    out.push_str("└─────────────────┴─────────────────┘\n");
    out
}

/// Executes one command and prints the outcome. Failures are returned so
/// one-shot runs exit non-zero; the prompt prints them and keeps going.
async fn execute(client: &KvClient, command: Command) -> Result<()> {
    match command {
        Command::Get { key } => match client.get(&key).await.context("Get failed")? {
            Some(value) => println!("Key: {}\nValue: {}", key, value),
            None => println!("Key '{}' not found", key),
        },
        Command::Set { key, value, ttl } => {
            if !client.set(&key, &value, ttl).await.context("Set failed")? {
                bail!("Failed to set key '{}'", key);
            }
            println!("Successfully set key '{}' with value '{}'", key, value);
            if let Some(ttl) = ttl {
                println!("TTL: {} seconds", ttl);
            }
        }
        Command::Delete { key } => {
            if client.delete(&key).await.context("Delete failed")? {
                println!("Key '{}' deleted successfully", key);
            } else {
                println!("Key '{}' did not exist", key);
            }
        }
        Command::List { limit } => {
            let pairs = client.list(limit).await.context("List failed")?;
            if pairs.is_empty() {
                println!("No key-value pairs found");
            } else {
                let pairs: Vec<(String, String)> = pairs.into_iter().collect();
                println!("Found {} key-value pairs:", pairs.len());
                print!("{}", render_table(&pairs));
            }
        }
    }

    Ok(())
}

async fn run_interactive(client: &KvClient) -> Result<()> {
    println!("=== KV Store Interactive Client ===");
    println!("Connected to {}", client.base_url());
    println!("Type 'help' for available commands");
    println!("Type 'quit' or 'exit' to exit");
    println!();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"kvstore> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Ok(Input::Empty) => continue,
            Ok(Input::Quit) => {
                println!("Goodbye!");
                break;
            }
            Ok(Input::Help) => println!("{}", HELP),
            Ok(Input::Clear) => print!("\x1b[H\x1b[2J"),
            Ok(Input::Run(command)) => {
                if let Err(err) = execute(client, command).await {
                    println!("{:#}", err);
                }
            }
            Err(usage) => println!("{}", usage),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = KvClient::new(cli.server);

    match cli.command {
        Some(command) => execute(&client, command).await?,
        None => run_interactive(&client).await?,
    }

    Ok(())
}
