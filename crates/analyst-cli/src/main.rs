//! Command-line interface for the company research agent
//!
//! # Usage
//!
//! ```bash
//! # API key from .env, API_KEY or GEMINI_API_KEY (asked for otherwise)
//! echo "API_KEY=sua_chave_aqui" > .env
//!
//! cargo run --bin analista
//! cargo run --bin analista -- --json
//! ```

mod credentials;
mod render;

use analyst_b3::{CompanyQuery, FinanceAgent, OutputFormat, ResearchConfig};
use analyst_llm::providers::{GeminiConfig, GeminiProvider};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "analista")]
#[command(about = "Relatório automático de empresas brasileiras com Gemini", long_about = None)]
struct Args {
    /// Print a structured JSON report instead of Markdown
    #[arg(long)]
    json: bool,

    /// Gemini model identifier
    #[arg(long)]
    model: Option<String>,

    /// Print Markdown without terminal styling and leave the screen as is
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let dotenv = dotenvy::dotenv();
    analyst_utils::init_tracing()?;
    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "Loaded .env");
    }

    let args = Args::parse();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let Some(api_key) =
        credentials::resolve_api_key(|var| std::env::var(var).ok(), &mut input, &mut stdout)?
    else {
        render::print_fatal(&mut io::stderr(), "Saindo... API Key não fornecida.")?;
        return Ok(ExitCode::FAILURE);
    };

    let mut config = ResearchConfig::from_env()?;
    if let Some(model) = args.model {
        config.model = model;
    }
    if args.json {
        config.output_format = OutputFormat::Structured;
    }
    config.validate()?;

    if !args.plain {
        render::clear_terminal(&mut stdout)?;
    }

    print!("Digite o nome da empresa: ");
    stdout.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;

    let company = match CompanyQuery::parse(&line) {
        Ok(company) => company,
        Err(e) => {
            render::print_fatal(&mut io::stderr(), &e.to_string())?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let provider = GeminiProvider::with_config(
        GeminiConfig::new(api_key)
            .with_api_base(config.gemini_api_base.clone())
            .with_timeout(config.model_timeout.as_secs()),
    )?;

    info!(company = %company, model = %config.model, "Starting research");
    let agent = FinanceAgent::new(Arc::new(provider), config, company.as_str())?;

    if !args.plain {
        render::clear_terminal(&mut stdout)?;
    }
    println!("Gerando relatório... Por favor aguarde.");

    let report = agent.generate_report().await?;

    if !args.plain {
        render::clear_terminal(&mut stdout)?;
    }
    render::print_report(&report, args.plain)?;

    Ok(ExitCode::SUCCESS)
}
