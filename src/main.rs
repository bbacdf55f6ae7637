use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use tracing::info;
use zammad_mcp_gateway::{
    build_app,
    config::{Config, TlsConfig},
    core::{McpCore, ZammadCore},
    logging, tls,
    zammad_client::HttpZammadClient,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let client = Arc::new(HttpZammadClient::new(
        &config.zammad_url,
        &config.zammad_token,
    )?);
    let core: Arc<dyn McpCore> = Arc::new(ZammadCore::new(client));
    core.initialize().await?;

    let bind_socket = config.bind_socket()?;
    let state = AppState::new(config.api_token.clone(), core);
    let app = build_app(state);

    match config.tls {
        Some(tls_config) => {
            let (cert_path, key_path) = match tls_config {
                TlsConfig::Provided { cert, key } => (cert, key),
                TlsConfig::SelfSigned { hostname, cert_dir } => {
                    tls::ensure_self_signed(&hostname, &cert_dir)?
                }
            };
            let rustls = RustlsConfig::from_pem_file(&cert_path, &key_path).await?;

            info!(
                bind_addr = %config.bind_addr,
                bind_port = config.bind_port,
                scheme = "https",
                "server starting"
            );
            axum_server::bind_rustls(bind_socket, rustls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(bind_socket).await?;

            info!(
                bind_addr = %config.bind_addr,
                bind_port = config.bind_port,
                scheme = "http",
                "server starting"
            );
            axum::serve(listener, app.into_make_service()).await?;
        }
    }

    info!("server shutting down");
    Ok(())
}
