mod tui;

use anyhow::{bail, Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;

use agrofind_core::api::ApiClient;
use agrofind_core::config::AgrofindConfig;
use agrofind_core::error::AgrofindError;
use agrofind_core::model::{Category, HealthState, SearchRequest, SearchResult, SelectedFile};
use agrofind_core::present::{self, BadgeColor};
use agrofind_core::session::{FileSessionStore, SessionGate};

#[derive(Parser)]
#[command(name = "agrofind", about = "AgroFind: busca semântica de documentos agro", version)]
enum Cli {
    /// Start the interactive terminal interface
    Tui,
    /// Persist the session flag (no remote call is made)
    Login,
    /// Clear the session flag
    Logout,
    /// Show session state and remote service health
    Status {
        /// Output the raw health response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Semantic search over the document corpus
    Search {
        /// Query text in natural language
        query: String,
        /// Filter by category (anuncio, organico)
        #[arg(short, long)]
        category: Option<String>,
        /// Output raw JSON instead of result cards
        #[arg(long)]
        json: bool,
    },
    /// Upload a PDF for storage and indexing
    Upload {
        /// Path to the PDF file
        path: String,
        /// Document category (anuncio, organico)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Trigger ingestion of a PDF already in object storage
    Ingest {
        /// Object path (e.g. pdfs/documento.pdf)
        gcs_path: String,
        /// Document category (anuncio, organico)
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AgrofindConfig::load(Some(&std::env::current_dir()?))
        .unwrap_or_else(|_| AgrofindConfig::default_config());

    run(cli, &config).await
}

async fn run(cli: Cli, config: &AgrofindConfig) -> Result<()> {
    match cli {
        Cli::Tui => tui::run_tui(config).await,
        Cli::Login => cmd_login(),
        Cli::Logout => cmd_logout(),
        Cli::Status { json } => cmd_status(config, json).await,
        Cli::Search {
            query,
            category,
            json,
        } => cmd_search(config, &query, category, json).await,
        Cli::Upload { path, category } => cmd_upload(config, &path, category).await,
        Cli::Ingest { gcs_path, category } => cmd_ingest(config, &gcs_path, category).await,
    }
}

fn open_gate() -> Result<SessionGate> {
    let store = FileSessionStore::from_default().context("failed to open session store")?;
    Ok(SessionGate::new(Box::new(store)))
}

/// Every remote operation treats the session flag as a hard precondition.
fn require_auth() -> Result<SessionGate> {
    let gate = open_gate()?;
    if !gate.is_authenticated() {
        bail!("não autenticado — execute `agrofind login` primeiro");
    }
    Ok(gate)
}

fn resolve_category(config: &AgrofindConfig, raw: Option<String>) -> Result<Category> {
    match raw {
        Some(s) => s.parse::<Category>().map_err(|e| anyhow::anyhow!(e)),
        None => Ok(config.default_category()),
    }
}

fn cmd_login() -> Result<()> {
    let mut gate = open_gate()?;
    gate.login().context("failed to persist session")?;
    println!("{} sessão iniciada", "✓".green().bold());
    Ok(())
}

fn cmd_logout() -> Result<()> {
    let mut gate = open_gate()?;
    gate.logout().context("failed to clear session")?;
    println!("{} sessão encerrada", "✓".green().bold());
    Ok(())
}

async fn cmd_status(config: &AgrofindConfig, json: bool) -> Result<()> {
    let gate = open_gate()?;
    if !gate.is_authenticated() {
        println!("{}", "sessão: não autenticado".yellow());
        return Ok(());
    }

    let api = ApiClient::from_config(&config.api)?;
    match api.health().await {
        Ok(health) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&health)?);
                return Ok(());
            }
            let state = HealthState::from_status(&health.status);
            println!("sessão:     {}", "autenticada".green());
            match state {
                HealthState::Healthy => println!("status:     {}", state.label().green().bold()),
                _ => println!("status:     {}", state.label().red().bold()),
            }
            println!("ambiente:   {}", health.environment.cyan());
            println!("vector db:  {}", health.vector_db.cyan());
            println!("vetores:    {}", health.total_vectors.to_string().cyan());
        }
        Err(e) => {
            // A failed probe degrades the indicator; it is never fatal
            tracing::warn!(error = %e, "health check failed");
            println!("sessão:     {}", "autenticada".green());
            println!("status:     {}", HealthState::Unhealthy.label().red().bold());
        }
    }
    Ok(())
}

async fn cmd_search(
    config: &AgrofindConfig,
    query: &str,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let _gate = require_auth()?;
    if query.trim().is_empty() {
        bail!("a busca não pode ser vazia");
    }
    let category = category
        .map(|c| c.parse::<Category>().map_err(|e| anyhow::anyhow!(e)))
        .transpose()?;

    let api = ApiClient::from_config(&config.api)?;
    let request = SearchRequest::new(query.trim(), category);
    let response = match api.search(&request).await {
        Ok(r) => r,
        Err(e) => bail!("{}", present::search_failure_message(&e)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.results.is_empty() {
        println!("{}", "Nenhum resultado encontrado".yellow());
        println!("Tente reformular sua busca ou usar outros termos.");
        return Ok(());
    }

    let noun = if response.results.len() == 1 {
        "resultado encontrado"
    } else {
        "resultados encontrados"
    };
    println!(
        "{} {noun} · {:.0}ms",
        response.results.len().to_string().bold(),
        response.processing_time_ms,
    );
    for (index, result) in response.results.iter().enumerate() {
        print_result_card(index, result);
    }
    Ok(())
}

fn print_result_card(index: usize, result: &SearchResult) {
    let badge = present::category_badge(&result.category);
    let tier = present::relevance_tier(result.similarity_score);
    let percent = present::relevance_percent(result.similarity_score);

    println!();
    println!(
        "{} {}",
        format!("#{}", index + 1).bold(),
        result.filename.bold()
    );

    let mut meta = vec![
        format!("{} {}", badge.icon, paint(badge.color, badge.label)),
        format!("{} {} ({percent} relevante)", paint(tier.color(), "●"), tier.label()),
        present::format_upload_date(&result.upload_date),
        format!("{} palavras", present::word_count(&result.chunk_text)),
    ];
    if let Some(page) = result.page_number {
        meta.push(format!("pág. {page}"));
    }
    println!("  {}", meta.join(" · "));

    println!(
        "  {}",
        present::truncate_chunk(&result.chunk_text, present::CHUNK_PREVIEW_CHARS)
    );
    println!("  {}", result.gcs_url.dimmed());
}

fn paint(color: BadgeColor, text: &str) -> String {
    match color {
        BadgeColor::Blue => text.blue().to_string(),
        BadgeColor::Green => text.green().to_string(),
        BadgeColor::Yellow => text.yellow().to_string(),
        BadgeColor::Gray => text.dimmed().to_string(),
        BadgeColor::Magenta => text.magenta().to_string(),
    }
}

async fn cmd_upload(config: &AgrofindConfig, path: &str, category: Option<String>) -> Result<()> {
    let _gate = require_auth()?;
    let category = resolve_category(config, category)?;

    let file = SelectedFile::select(path).map_err(|e| match e {
        AgrofindError::InvalidInput(msg) => anyhow::anyhow!(msg),
        other => anyhow::anyhow!(other),
    })?;

    println!(
        "{} {} ({:.2} MB)",
        "enviando".dimmed(),
        file.filename,
        file.size_mb()
    );

    let api = ApiClient::from_config(&config.api)?;
    match api.upload_pdf(&file, category).await {
        Ok(response) => {
            println!(
                "{}",
                present::upload_success_message(response.message.as_deref(), &file.filename)
                    .green()
            );
            Ok(())
        }
        Err(e) => bail!("{}", present::upload_failure_message(&e)),
    }
}

async fn cmd_ingest(config: &AgrofindConfig, gcs_path: &str, category: Option<String>) -> Result<()> {
    let _gate = require_auth()?;
    let category = resolve_category(config, category)?;

    let api = ApiClient::from_config(&config.api)?;
    let response = api
        .ingest(gcs_path, category)
        .await
        .with_context(|| format!("failed to ingest {gcs_path}"))?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
