use crate::config::AppConfig;
use crate::context::AppContext;
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod context;
mod errors;
mod filters;
mod listings;
mod notifications;
mod responses;
mod router;
mod templates;


fn main() {
    init_tracing();

    // 1️⃣ Configuration from the environment
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration invalid");
            std::process::exit(1);
        }
    };
    let addr = config.bind_addr;
    let workers = config.workers;

    // 2️⃣ Backend client, sessions, notification enabler
    let ctx = match AppContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "could not build the backend client");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    info!(%addr, workers, "starting server at http://{addr}");
    let server = Server::bind(&addr).max_workers(workers);

    let ctx = Arc::new(ctx);
    let handler_ctx = Arc::clone(&ctx);
    let result = server.serve(move |req, _info| match handle(req, &handler_ctx) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    // 4️⃣ Tear down once the workers are gone
    if let Ok(ctx) = Arc::try_unwrap(ctx) {
        ctx.shutdown();
    }
    info!("server shut down cleanly");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hackradar=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
