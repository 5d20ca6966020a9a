// rowhook CLI - headless row editing against webhook endpoints.
//
// The original surface for this core was a browser page; the CLI keeps
// the same shape: pick a document, pick a sheet (both remembered
// across invocations), then fetch/search/page rows and push edits or
// deletes through the webhook backend.

mod exit_codes;
mod table;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

use rowhook_client::{EndpointsExhausted, WebhookClient};
use rowhook_config::{ConfigError, DocumentMap, Session, WebhookConfig};
use rowhook_core::{page_slice, page_window, total_pages, RowKey, SheetBuffer, PAGE_SIZE};

use exit_codes::{
    EXIT_CONFIG_INVALID, EXIT_ENDPOINTS_EXHAUSTED, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "rowhook")]
#[command(about = "Edit rows of webhook-backed sheets from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured documents
    Docs,
    /// List the sheets of a document (default: the selected one)
    Sheets { document: Option<String> },
    /// Select a document and optionally one of its sheets
    Use {
        document: String,
        sheet: Option<String>,
    },
    /// Step back out of the sheet selection
    Back {
        /// Also clear the document selection
        #[arg(long)]
        home: bool,
    },
    /// Show the current selection and endpoint configuration
    Status,
    /// Fetch rows for the selected sheet
    Fetch {
        /// Free-text filter applied across all columns
        #[arg(long, short = 's', default_value = "")]
        search: String,
        /// 1-based page of the (filtered) rows
        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,
        /// Print the page as a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Update columns of one row and push the result to the backend
    Update {
        /// The row's row_number, or its position when the sheet has no
        /// row_number column
        row: i64,
        /// Column assignment, may repeat: --set col=value
        #[arg(long = "set", value_name = "COL=VALUE", required = true)]
        set: Vec<String>,
    },
    /// Delete one row permanently
    Delete {
        /// The row's row_number, or its position when the sheet has no
        /// row_number column
        row: i64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    fn usage_hint(msg: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: Some(hint.into()),
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    fn config(err: ConfigError) -> Self {
        Self {
            code: EXIT_CONFIG_INVALID,
            message: err.to_string(),
            hint: Some(
                "set ROWHOOK_LOCALHOST (dev tunnel, plain http) or \
                 ROWHOOK_CUSTOM_DOMAIN (https)"
                    .into(),
            ),
        }
    }

    fn webhook(context: &str, err: EndpointsExhausted) -> Self {
        Self {
            code: EXIT_ENDPOINTS_EXHAUSTED,
            message: format!("{}: {}", context, err),
            hint: None,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let config = WebhookConfig::from_env();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(e.code)
        }
    }
}

fn run(command: Commands, config: &WebhookConfig) -> Result<(), CliError> {
    match command {
        Commands::Docs => cmd_docs(config),
        Commands::Sheets { document } => cmd_sheets(config, document),
        Commands::Use { document, sheet } => cmd_use(config, &document, sheet.as_deref()),
        Commands::Back { home } => cmd_back(home),
        Commands::Status => cmd_status(config),
        Commands::Fetch { search, page, json } => cmd_fetch(config, &search, page, json),
        Commands::Update { row, set } => cmd_update(config, row, &set),
        Commands::Delete { row, yes } => cmd_delete(config, row, yes),
    }
}

// ── Selection commands ──────────────────────────────────────────────

fn cmd_docs(config: &WebhookConfig) -> Result<(), CliError> {
    let map = configured_documents(config)?;
    for document in map.documents() {
        println!("{}", document);
    }
    Ok(())
}

fn cmd_sheets(config: &WebhookConfig, document: Option<String>) -> Result<(), CliError> {
    let map = configured_documents(config)?;
    let session = Session::load();
    let document = match document.or(session.document) {
        Some(doc) => doc,
        None => {
            return Err(CliError::usage_hint(
                "no document selected",
                "run `rowhook use <document>` or pass one: `rowhook sheets <document>`",
            ))
        }
    };
    let sheets = map
        .sheets(&document)
        .ok_or_else(|| CliError::usage(format!("unknown document '{}'", document)))?;
    for sheet in sheets {
        println!("{}", sheet);
    }
    Ok(())
}

fn cmd_use(config: &WebhookConfig, document: &str, sheet: Option<&str>) -> Result<(), CliError> {
    let map = configured_documents(config)?;
    if map.sheets(document).is_none() {
        return Err(CliError::usage(format!("unknown document '{}'", document)));
    }
    if let Some(sheet) = sheet {
        if !map.contains_sheet(document, sheet) {
            return Err(CliError::usage(format!(
                "document '{}' has no sheet '{}'",
                document, sheet
            )));
        }
    }

    let mut session = Session::load();
    session.select_document(document);
    if let Some(sheet) = sheet {
        session.select_sheet(sheet);
    }
    session.save().map_err(CliError::error)?;

    match sheet {
        Some(sheet) => println!("selected {} / {}", document, sheet),
        None => println!("selected {}", document),
    }
    Ok(())
}

fn cmd_back(home: bool) -> Result<(), CliError> {
    let mut session = Session::load();
    if home {
        session.clear();
    } else {
        session.clear_sheet();
    }
    session.save().map_err(CliError::error)?;

    match &session.document {
        Some(document) => println!("selected {}", document),
        None => println!("no selection"),
    }
    Ok(())
}

fn cmd_status(config: &WebhookConfig) -> Result<(), CliError> {
    let session = Session::load();
    println!("document: {}", session.document.as_deref().unwrap_or("-"));
    println!("sheet:    {}", session.sheet.as_deref().unwrap_or("-"));
    println!("documents configured: {}", config.document_map().len());

    let endpoints = config.validate().map_err(CliError::config)?;
    for (name, urls) in [
        ("fetch", &endpoints.fetch),
        ("update", &endpoints.update),
        ("delete", &endpoints.delete),
    ] {
        println!("{} endpoints:", name);
        for url in urls {
            println!("  {}", url);
        }
    }
    Ok(())
}

// ── Row commands ────────────────────────────────────────────────────

fn cmd_fetch(config: &WebhookConfig, search: &str, page: usize, json: bool) -> Result<(), CliError> {
    if page == 0 {
        return Err(CliError::usage("pages are numbered from 1"));
    }
    let (document, sheet) = require_selection()?;
    let client = connect(config)?;
    let buffer = fetch_buffer(&client, &document, &sheet)?;

    let view = buffer.filtered_view(search);
    let pages = total_pages(view.len(), PAGE_SIZE);
    let slice = page_slice(&view, page - 1, PAGE_SIZE);

    if json {
        let body = serde_json::to_string_pretty(&slice)
            .map_err(|e| CliError::error(format!("failed to encode rows: {}", e)))?;
        println!("{}", body);
        return Ok(());
    }

    println!("{} / {}", document, sheet);
    if !search.trim().is_empty() {
        println!("found {} of {} rows", view.len(), buffer.len());
    }
    if slice.is_empty() {
        if view.is_empty() {
            println!("no rows");
        } else {
            println!("no rows on page {} (of {})", page, pages);
        }
    } else {
        print!("{}", table::render_rows(slice));
    }
    if pages > 1 {
        println!("{}", table::render_page_strip(&page_window(pages, page), page));
    }
    Ok(())
}

fn cmd_update(config: &WebhookConfig, row: i64, sets: &[String]) -> Result<(), CliError> {
    let assignments = parse_assignments(sets)?;
    let (document, sheet) = require_selection()?;
    let client = connect(config)?;
    let mut buffer = fetch_buffer(&client, &document, &sheet)?;

    let key = resolve_row(&buffer, row)?;
    let mut updated = buffer
        .get(key)
        .cloned()
        .ok_or_else(|| CliError::usage(format!("row {} not found", row)))?;
    for (column, value) in assignments {
        updated.set(&column, Value::String(value));
    }

    client
        .update_row(&document, &sheet, key, &updated)
        .map_err(|e| CliError::webhook("update failed", e))?;
    buffer.apply_update(key, updated);

    let marker = if buffer.is_edited(key) { ", edited" } else { "" };
    println!("row {} updated in {} ({} rows{})", key, sheet, buffer.len(), marker);
    Ok(())
}

fn cmd_delete(config: &WebhookConfig, row: i64, yes: bool) -> Result<(), CliError> {
    let (document, sheet) = require_selection()?;
    let client = connect(config)?;
    let mut buffer = fetch_buffer(&client, &document, &sheet)?;
    let key = resolve_row(&buffer, row)?;

    if !yes {
        return Err(CliError::usage_hint(
            format!("refusing to delete row {} of {}", key, sheet),
            "re-run with --yes to delete permanently; this cannot be undone",
        ));
    }

    client
        .delete_row(&document, &sheet, key)
        .map_err(|e| CliError::webhook("delete failed", e))?;
    buffer.apply_delete(key);

    println!("row {} deleted from {} ({} rows remain)", key, sheet, buffer.len());
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────

fn configured_documents(config: &WebhookConfig) -> Result<DocumentMap, CliError> {
    let map = config.document_map();
    if map.is_empty() {
        return Err(CliError::usage_hint(
            "no documents configured",
            "set ROWHOOK_DOC_SHEET_CONFIG, e.g. \"Sales:Q1[name],Q2;HR:Roster\"",
        ));
    }
    Ok(map)
}

fn require_selection() -> Result<(String, String), CliError> {
    let session = Session::load();
    match session.selected() {
        Some((document, sheet)) => Ok((document.to_string(), sheet.to_string())),
        None => Err(CliError::usage_hint(
            "no sheet selected",
            "run `rowhook use <document> <sheet>` first",
        )),
    }
}

fn connect(config: &WebhookConfig) -> Result<WebhookClient, CliError> {
    let endpoints = config.validate().map_err(CliError::config)?;
    Ok(WebhookClient::new(endpoints))
}

fn fetch_buffer(
    client: &WebhookClient,
    document: &str,
    sheet: &str,
) -> Result<SheetBuffer, CliError> {
    let rows = client
        .fetch_rows(document, sheet)
        .map_err(|e| CliError::webhook("fetch failed", e))?;
    log::debug!("fetched {} rows from {}/{}", rows.len(), document, sheet);
    let mut buffer = SheetBuffer::new();
    buffer.apply_fetch(rows);
    Ok(buffer)
}

fn resolve_row(buffer: &SheetBuffer, row: i64) -> Result<RowKey, CliError> {
    buffer
        .resolve_key(row)
        .ok_or_else(|| CliError::usage(format!("row {} not found", row)))
}

fn parse_assignments(sets: &[String]) -> Result<Vec<(String, String)>, CliError> {
    sets.iter()
        .map(|raw| {
            raw.split_once('=')
                .map(|(col, value)| (col.trim().to_string(), value.to_string()))
                .filter(|(col, _)| !col.is_empty())
                .ok_or_else(|| {
                    CliError::usage_hint(
                        format!("invalid --set '{}'", raw),
                        "expected COL=VALUE",
                    )
                })
        })
        .collect()
}
