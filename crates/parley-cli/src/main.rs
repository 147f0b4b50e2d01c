use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use parley_core::config::Config;
use parley_tools::{ToolCall, ToolContext, schema};

#[derive(Parser)]
#[command(
    name = "parley",
    about = "Voice-agent persona core — drive the tool dispatcher without a live LLM",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tool definitions sent to the LLM API
    Tools {
        /// Restrict to one persona's tools
        #[arg(long)]
        persona: Option<Persona>,
    },

    /// Dispatch a single tool call and print its conversational reply
    Call {
        /// Tool name (e.g. set_mood, store_lead_info, create_order)
        name: String,

        /// Tool arguments as JSON
        #[arg(short, long)]
        params: Option<String>,
    },

    /// Interactive loop: each line is `<tool_name> [json-arguments]`
    Run {
        #[arg(long, value_enum, default_value = "sales")]
        persona: Persona,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Persona {
    Wellness,
    Sales,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_path);
    let config = Arc::new(Config::load(&config_path)?);

    match cli.command {
        Commands::Tools { persona } => {
            let defs = match persona {
                Some(Persona::Wellness) => schema::wellness_definitions(),
                Some(Persona::Sales) => schema::sales_definitions(),
                None => schema::all_definitions(),
            };
            println!("{}", serde_json::to_string_pretty(&defs)?);
        }

        Commands::Call { name, params } => {
            let ctx = ToolContext::from_config(config);
            let arguments = match params {
                Some(raw) => serde_json::from_str(&raw)?,
                None => serde_json::Value::Null,
            };
            let output = ToolCall::parse(&name, arguments)?.dispatch(&ctx).await;
            if output.is_error {
                eprintln!("{}", output.content);
            } else {
                println!("{}", output.content);
            }
        }

        Commands::Run { persona } => run_loop(config, persona).await?,
    }

    Ok(())
}

/// Line-oriented dispatcher loop standing in for the voice runtime.
async fn run_loop(config: Arc<Config>, persona: Persona) -> anyhow::Result<()> {
    let ctx = ToolContext::from_config(config);
    info!(data_dir = %ctx.config.resolved_data_dir().display(), "session started");

    match persona {
        Persona::Wellness => {
            let history = ctx.wellness_log.load_history();
            println!("{}", parley_agent::wellness_greeting(&history));
        }
        Persona::Sales => {
            println!("Hi! Thanks for calling — what can I help you with today?");
        }
    }

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };
        let arguments = if rest.is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(rest) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("bad arguments: {e}");
                    continue;
                }
            }
        };

        match ToolCall::parse(name, arguments) {
            Ok(call) => {
                let call_name = call.name();
                let output = call.dispatch(&ctx).await;
                if persona == Persona::Sales {
                    ctx.lead.record_turn("tool", &format!("{call_name}: {}", output.content));
                }
                println!("{}", output.content);
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    // a wellness session that quit early still leaves history intact; a
    // sales session gets a final snapshot
    if persona == Persona::Sales {
        ToolCall::EndConversation.dispatch(&ctx).await;
    }
    Ok(())
}
