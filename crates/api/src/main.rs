use anyhow::Context;

use vendora_api::app::build_app;
use vendora_api::app::routes::catalog::CatalogController;
use vendora_api::config::ApiConfig;
use vendora_api::registry::AdminRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vendora_observability::init();

    let config = ApiConfig::from_env().context("refusing to start with invalid configuration")?;

    let mut registry = AdminRegistry::new();
    registry.register(
        "products",
        "Products",
        "package",
        Box::new(CatalogController::default()),
    )?;

    let bind_addr = config.bind_addr.clone();
    let app = build_app(config, registry);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
