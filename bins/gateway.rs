use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;
use common::utils::logging::init_logging_json;
use gateway::bootstrap;

fn init_logging() {
    // load .env so RUST_LOG and STORE_URL are honored
    dotenv().ok();
    init_logging_json();
    info!(service = "gateway", event = "logger_init", "tracing subscriber initialized");
}

async fn shutdown_signal(service_id: Uuid) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = "gateway", event = "shutdown_signal", %service_id, "received Ctrl+C, shutting down");
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "gateway",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.gateway,
        Err(e) => {
            error!(service = "gateway", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "gateway",
        event = "start",
        %service_id,
        pid,
        version,
        store_url = %cfg.store_url,
        "gateway service starting"
    );

    match bootstrap::run(cfg, shutdown_signal(service_id)).await {
        Ok(()) => {
            info!(service = "gateway", event = "stop", %service_id, pid, "gateway service stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "gateway", event = "run_failed", error = %e, "gateway::bootstrap::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
