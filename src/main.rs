use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::db::properties::SqlitePropertyRepo;
use crate::importer::{ImporterService, RowParser};
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use astra::Server;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod db;
mod domain;
mod errors;
mod importer;
mod lister;
mod responses;
mod router;
mod uploads;


fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn main() {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // 1️⃣ Create the database handle and apply the schema
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    // 2️⃣ Wire the services
    let parser = RowParser::new().widen_price(config.widen_price);
    let repo = SqlitePropertyRepo::new(db);

    // `sukab_property import <file.csv>` loads a local file and exits.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, path] = args.as_slice() {
        if command == "import" {
            run_file_import(ImporterService::new(repo).with_parser(parser), path);
            return;
        }
    }

    let state = AppState::new(repo, parser, config.max_import_bytes);

    // 3️⃣ Start the server
    info!(addr = %config.listen_addr, workers = config.max_workers, "serving HTTP");
    let server = Server::bind(&config.listen_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}

fn run_file_import(importer: ImporterService<SqlitePropertyRepo>, path: &str) {
    match importer.import_path(Path::new(path)) {
        Ok(summary) => {
            info!(%path, "{}", summary.message);
            if summary.outcome.stopped_early {
                error!(%path, "file could not be read to the end");
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!(error = %e, "import failed");
            std::process::exit(1);
        }
    }
}
