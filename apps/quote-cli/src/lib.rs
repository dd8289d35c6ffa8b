//! # LiftQuote CLI Library
//!
//! Everything behind the `liftquote` binary, kept in a library so the run
//! loop can be tested against an in-memory database.
//!
//! ## Module Organization
//! ```text
//! quote_cli/
//! ├── lib.rs      ◄─── You are here (run loop & logging setup)
//! ├── args.rs     ◄─── Command-line parsing
//! ├── config.rs   ◄─── LIFTQUOTE_* environment configuration
//! ├── render.rs   ◄─── Itemized table output
//! └── error.rs    ◄─── CliError and exit codes
//! ```
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argv ──► args::parse ──► QuoteArgs (raw text)                          │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  QuoteRequest::parse / InvoiceHeader::new ── rejected? ──► exit 2       │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  Database::new(DbConfig)  (only after the input is accepted)            │
//! │                              │                                          │
//! │             ┌────────────────┴────────────────┐                         │
//! │             ▼                                 ▼                         │
//! │   calculate_invoice(request)       issue_invoice(header, request)       │
//! │             │                                 │                         │
//! │             └────────────────┬────────────────┘                         │
//! │                              ▼                                          │
//! │               render::invoice_table  |  --json                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod render;

use liftquote_core::{CompanyInfo, InvoiceHeader, QuoteRequest};
use liftquote_db::repository::settings::COMPANY_NAME;
use liftquote_db::{Database, DbConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use args::QuoteArgs;
use config::QuoteConfig;
use error::CliResult;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Text for stdout.
    pub output: String,
    /// Id of the stored invoice, when one was issued.
    pub invoice_id: Option<i64>,
}

/// Validates input, opens the configured database and runs the quote.
pub async fn run(args: &QuoteArgs, config: &QuoteConfig) -> CliResult<Report> {
    let request = QuoteRequest::parse(&args.floors, &args.system)?;
    let header = party_header(args)?;

    let db_path = args.db_path.clone().unwrap_or_else(|| config.db_path.clone());
    let db = Database::new(DbConfig::new(db_path)).await?;

    let report = quote(&db, &request, header.as_ref(), args.json, config).await;
    db.close().await;
    report
}

/// Prices (and with a header, stores) a validated request.
pub async fn quote(
    db: &Database,
    request: &QuoteRequest,
    header: Option<&InvoiceHeader>,
    json: bool,
    config: &QuoteConfig,
) -> CliResult<Report> {
    debug!(system = %request.system(), floors = request.floors(), "Quoting");

    let (result, invoice_id) = match header {
        Some(header) => {
            let saved = db.issue_invoice(header, request).await?;
            info!(invoice_id = saved.invoice.id, "Invoice issued");
            (saved.result, Some(saved.invoice.id))
        }
        None => (db.calculate_invoice(request).await?, None),
    };

    let output = if json {
        serde_json::to_string_pretty(&result)?
    } else {
        let company = company_info(db, config).await?;
        let mut table = render::invoice_table(
            &company,
            request,
            header,
            &result,
            &config.currency_label,
        );
        if let Some(id) = invoice_id {
            table.push_str(&format!("Saved as invoice #{id}\n"));
        }
        table
    };

    Ok(Report { output, invoice_id })
}

fn party_header(args: &QuoteArgs) -> CliResult<Option<InvoiceHeader>> {
    match &args.party {
        Some((customer, project)) => Ok(Some(InvoiceHeader::new(customer, project)?)),
        None => Ok(None),
    }
}

/// Stored settings first, then `LIFTQUOTE_COMPANY_NAME`, then defaults.
async fn company_info(db: &Database, config: &QuoteConfig) -> CliResult<CompanyInfo> {
    let settings = db.settings();
    let mut company = settings.company_info().await?;

    if settings.get(COMPANY_NAME).await?.is_none() {
        if let Some(name) = &config.company_name {
            company.name = name.clone();
        }
    }

    Ok(company)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=liftquote=trace` - Show trace for liftquote crates only
/// - Default: `info,liftquote=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,liftquote=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================
