use tokio::signal;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use royalforge_api::app::{cors_layer, create_app};
use royalforge_api::config::AppConfig;
use royalforge_api::state::SharedAppState;
use royalforge_api::utils::init_email_service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = AppConfig::from_env()?;

  let email_service = init_email_service(&config)?;
  let app_state = SharedAppState::new(config.sender.clone(), email_service);
  let app = create_app(app_state).layer(cors_layer(&config.cors_allowed_origins));

  let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

  tracing::info!(
    "Server running on http://{} (email provider: {:?})",
    config.bind_address,
    config.provider
  );

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to install signal handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
