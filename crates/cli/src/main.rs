use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tourism_agents::{AgentConfig, TourismAgent};
use tourism_core::{analyze_query, SCENARIOS};
use tourism_observability::{init_tracing, AppMetrics};
use tourism_responders::{OpenMeteoClient, OverpassClient, ResponderConfig, Responders};

type LiveAgent = TourismAgent<OpenMeteoClient, OverpassClient>;

#[derive(Debug, Parser)]
#[command(name = "tourism")]
#[command(about = "Ask about the weather and places to visit anywhere")]
struct Cli {
    /// Query the weather and places services one after the other.
    #[arg(long)]
    sequential: bool,

    #[arg(long, env = "TOURISM_USER_AGENT")]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Chat,
    Ask { query: String },
    Examples,
    /// Show the extracted place and intent without calling any service.
    Analyze { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("tourism_cli");
    let cli = Cli::parse();

    match &cli.command {
        Command::Analyze { query } => {
            let analysis = analyze_query(query);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::Ask { query } => {
            let agent = build_agent(&cli)?;
            println!("{}", agent.process(query).await);
        }
        Command::Examples => {
            let agent = build_agent(&cli)?;
            run_examples(&agent).await;
        }
        Command::Chat => {
            let agent = build_agent(&cli)?;
            run_chat(&agent).await?;
        }
    }

    Ok(())
}

async fn run_chat(agent: &LiveAgent) -> Result<()> {
    println!("Ask me about weather, places to visit, or both!");
    println!("Type 'quit' to exit.\n");

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if ["quit", "exit", "q"]
            .iter()
            .any(|word| message.eq_ignore_ascii_case(word))
        {
            println!("Safe travels!");
            break;
        }

        if message.is_empty() {
            continue;
        }

        println!("Assistant: {}\n", agent.process(message).await);
    }

    Ok(())
}

async fn run_examples(agent: &LiveAgent) {
    for (index, scenario) in SCENARIOS.iter().enumerate() {
        println!("{}", example_heading(index, scenario.title));
        println!("Description: {}", scenario.description);
        println!("Input: {}", scenario.query);
        println!("Response:\n{}", agent.process(scenario.query).await);
        println!("\n{}\n", "=".repeat(80));
    }
}

fn example_heading(index: usize, title: &str) -> String {
    format!("Example {}: {title}", index + 1)
}

fn build_agent(cli: &Cli) -> Result<LiveAgent> {
    let mut config = ResponderConfig::from_env();
    if let Some(user_agent) = &cli.user_agent {
        config.user_agent = user_agent.clone();
    }

    let responders = Responders::from_config(&config).context("failed to build responders")?;

    let mut agent_config = AgentConfig::from_env();
    if cli.sequential {
        agent_config.parallel_responders = false;
    }

    Ok(TourismAgent::new(
        responders.weather,
        responders.places,
        AppMetrics::shared(),
        agent_config,
    ))
}
