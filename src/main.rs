use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use wms_catalog_export::api::{self, ClientConfig, PageLimits, WmsClient};
use wms_catalog_export::export::{RunReport, RunRequest, run_export};
use wms_catalog_export::io::{excel_write, table};
use wms_catalog_export::{ExportError, Result};

/// Unit queried when none is given.
const DEFAULT_UNIT_ID: &str = "ac275b55-90f8-44b8-b8cb-bdcfca969526";

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose, cli.quiet).and_then(|()| run(cli)) {
        match error {
            ExportError::MissingInput(_) => eprintln!("warning: {error}"),
            _ if error.is_auth() => {
                eprintln!("error: {error} (check the client id and secret)")
            }
            _ => eprintln!("error: {error}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let client_id = match &cli.client_id {
        Some(value) => value.clone(),
        None => prompt_secret("client id", "WMS Client ID: ")?,
    };
    let client_secret = match &cli.client_secret {
        Some(value) => value.clone(),
        None => prompt_secret("client secret", "WMS Client Secret: ")?,
    };

    let request = RunRequest::new(&client_id, &client_secret, &cli.unit_id)?.with_limits(PageLimits {
        page_size: cli.page_size,
        max_pages: cli.max_pages,
    });
    let client = WmsClient::new(cli.client_config())?;

    info!(unit_id = %request.unit_id, "querying products");
    let report = run_export(&client, &request);

    let exported = export_rows(&cli, &report);
    match report.finish(exported)? {
        0 => println!("Done: no rows to export."),
        rows => println!("Done: {rows} rows exported to {}", cli.output.display()),
    }
    Ok(())
}

fn export_rows(cli: &Cli, report: &RunReport) -> Result<()> {
    let Some(bytes) = report.workbook()? else {
        return Ok(());
    };
    if cli.preview_rows > 0 {
        print!("{}", table::render_table(&report.rows, cli.preview_rows));
    }
    excel_write::write_workbook(&cli.output, &bytes)?;
    info!(
        rows = report.rows.len(),
        path = %cli.output.display(),
        "workbook written"
    );
    Ok(())
}

fn prompt_secret(field: &'static str, prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).map_err(|source| ExportError::Prompt { field, source })
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("wms_catalog_export=debug")
    } else if quiet {
        EnvFilter::new("wms_catalog_export=warn")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("wms_catalog_export=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()
        .map_err(|error| ExportError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export the WMS product catalog (products, SKUs, barcodes) to an Excel workbook."
)]
struct Cli {
    /// OAuth client id. Prompted for (masked) when not given.
    #[arg(long, env = "WMS_CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,

    /// OAuth client secret. Prompted for (masked) when not given.
    #[arg(long, env = "WMS_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Warehouse unit (UUID) whose catalog is exported.
    #[arg(long, env = "WMS_UNIT_ID", default_value = DEFAULT_UNIT_ID)]
    unit_id: String,

    /// Token endpoint.
    #[arg(long, env = "WMS_AUTH_URL", default_value = api::DEFAULT_AUTH_URL)]
    auth_url: String,

    /// Products listing endpoint.
    #[arg(long, env = "WMS_PRODUCTS_URL", default_value = api::DEFAULT_PRODUCTS_URL)]
    products_url: String,

    /// Products requested per page.
    #[arg(long, default_value_t = api::DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: u32,

    /// Stop after this many pages even if the server reports more.
    #[arg(long, default_value_t = api::DEFAULT_MAX_PAGES, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: u32,

    /// Timeout for the token request, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = api::DEFAULT_AUTH_TIMEOUT.as_secs())]
    auth_timeout: u64,

    /// Timeout for each page request, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = api::DEFAULT_PAGE_TIMEOUT.as_secs())]
    page_timeout: u64,

    /// Ignore proxy settings from the environment.
    #[arg(long)]
    no_proxy: bool,

    /// Path of the exported workbook.
    #[arg(long, short, default_value = excel_write::EXPORT_FILE_NAME)]
    output: PathBuf,

    /// Rows shown in the terminal preview; 0 disables it.
    #[arg(long, default_value_t = 50)]
    preview_rows: usize,

    /// Enable debug logging.
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            auth_url: self.auth_url.clone(),
            products_url: self.products_url.clone(),
            auth_timeout: Duration::from_secs(self.auth_timeout),
            page_timeout: Duration::from_secs(self.page_timeout),
            use_system_proxy: !self.no_proxy,
        }
    }
}
