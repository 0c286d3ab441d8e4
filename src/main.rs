//! application entry point

use crate::kiosk::model::config::KioskConfig;
use clap::Parser;
use derive_more::Display;
use log::info;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

mod kiosk;

const SERVICE_URL_PARSING_FAILED_MSG: &str = "failed to parse the order service url, aborting";
const DOTENV_LOADING_FAILED_MSG: &str = "failed to load envs from dotenv files, aborting";
const DEFAULT_SERVICE_URL: &str = "https://qr-code-backend-final.onrender.com/submit-order";
const DEFAULT_STAFF_PHONE: &str = "919019040426";
const DEFAULT_TABLE_ID: &str = "1";

#[derive(Parser, Debug)]
#[command(name = "kiosk")]
#[command(about = "table-side ordering kiosk for customers arriving over a QR code", version, long_about = None)]
struct Cli {
    /// url scanned from the table QR code, e.g. "https://cafe.example/order?table=4"
    #[arg(long)]
    scan_url: Option<String>,
    /// fixed table id used when no scan url is given
    #[arg(long)]
    table: Option<String>,
    /// order service endpoint
    #[arg(long)]
    service_url: Option<String>,
    /// staff whatsapp number receiving order notifications
    #[arg(long)]
    staff_phone: Option<String>,
    /// directory receiving exported receipts
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();

    // bootstrap
    // a. env
    let env = env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Env::Dev); // default dev env if absent

    match env {
        Env::Prod | Env::Stg => {} // load in CI
        Env::Dev => {
            if Path::new(".env.dev").exists() {
                dotenvy::from_path(Path::new(".env.dev")).expect(DOTENV_LOADING_FAILED_MSG);
            }
        }
    };

    // b. logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // c. run kiosk
    let service_url = args
        .service_url
        .or_else(|| env::var("ORDER_SERVICE_URL").ok())
        .unwrap_or(DEFAULT_SERVICE_URL.to_string());
    let config = KioskConfig::new(
        Url::parse(service_url.as_str()).expect(SERVICE_URL_PARSING_FAILED_MSG),
        args.staff_phone
            .or_else(|| env::var("STAFF_PHONE").ok())
            .unwrap_or(DEFAULT_STAFF_PHONE.to_string()),
        args.export_dir
            .or_else(|| env::var("KIOSK_EXPORT_DIR").ok().map(PathBuf::from))
            .unwrap_or(PathBuf::from(".")),
    );
    let scan_url = args.scan_url.or_else(|| env::var("KIOSK_SCAN_URL").ok());
    let table_id = args
        .table
        .or_else(|| env::var("KIOSK_TABLE_ID").ok())
        .unwrap_or(DEFAULT_TABLE_ID.to_string());
    let table = kiosk::table::resolve(scan_url.as_deref(), Some(table_id.as_str()));

    info!("Kiosk is starting in env={}", env);

    kiosk::run(config, table).await
}

#[derive(Debug, Display)]
#[non_exhaustive]
enum Env {
    Dev,
    Stg,
    Prod,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid Env: {s}")),
        }
    }
}
