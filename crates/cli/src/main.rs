use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use launchpad_api::{DeployApi, DeployResult};
use launchpad_cli::Config;
use launchpad_core::{Controller, RequestState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with INFO level by default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let watch = std::env::args().any(|arg| arg == "--watch");

    // Load configuration
    let config = Config::load_default()?;

    tracing::info!("Launchpad client starting...");
    tracing::info!("Endpoint: {}", config.endpoint.base_url);

    let api = DeployApi::new(
        config.endpoint.base_url.as_str(),
        Duration::from_secs(config.endpoint.timeout_secs),
    )
    .context("Failed to build HTTP client")?;

    // Non-fatal preflight: a down backend still surfaces per attempt as a
    // connection error, this just says so up front.
    match api.health().await {
        Ok(health) if health.is_healthy() => tracing::info!("Backend is healthy"),
        Ok(health) => tracing::warn!("Backend reports status '{}'", health.status),
        Err(err) => tracing::warn!("Backend health check failed: {err}"),
    }

    println!("Ingresa tu nombre para desplegar tu versión personalizada.");
    println!("(línea vacía para salir)");

    let mut controller = Controller::new();
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let name = line.trim_end_matches(['\r', '\n']);
        if name.is_empty() {
            break;
        }

        let state = controller.submit(&api, name).await;
        render(state);

        if watch {
            if let RequestState::Succeeded(result) = state {
                let pipeline_id = result.pipeline_id.clone();
                watch_pipeline(&api, &config, &pipeline_id).await;
            }
        }
    }

    Ok(())
}

fn render(state: &RequestState) {
    match state {
        RequestState::Succeeded(result) => render_success(result),
        RequestState::Failed(message) => println!("✗ {message}"),
        // submit always settles into a terminal state
        RequestState::Idle | RequestState::Submitting => {}
    }
}

fn render_success(result: &DeployResult) {
    println!("✓ {}", result.message);
    println!("  Pipeline ID: {}", result.pipeline_id);
    if let Some(url) = &result.pipeline_url {
        println!("  Pipeline: {url}");
    }
}

/// Poll the pipeline until it reaches a terminal status or the poll budget
/// runs out.
async fn watch_pipeline(api: &DeployApi, config: &Config, pipeline_id: &str) {
    let interval = Duration::from_secs(config.watch.poll_interval_secs);

    for _ in 0..config.watch.max_polls {
        tokio::time::sleep(interval).await;

        match api.pipeline_status(pipeline_id).await {
            Ok(status) => {
                println!("  [{}] {}", status.status, status.message);
                if status.is_terminal() {
                    return;
                }
            }
            Err(err) => {
                tracing::warn!("Status check for pipeline {pipeline_id} failed: {err}");
                return;
            }
        }
    }

    println!("  El pipeline sigue en ejecución; revisa el enlace más tarde.");
}
