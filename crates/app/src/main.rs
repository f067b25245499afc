use std::sync::Arc;

use server::WebhookService;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "line_ledger={level},server={level},engine={level},line_bot={level},notion={level}",
            level = settings.app.level
        ))
        .init();

    let template = match settings.line.template_path.as_deref() {
        Some(path) => engine::Template::from_path(path)?,
        None => engine::Template::json(line_bot::DEFAULT_TEMPLATE),
    };

    tracing::info!("Found notion settings...");
    let databases = notion::Databases::new(settings.notion.databases)?;
    let store = notion::ApiClient::new(&settings.notion.secret, &settings.notion.api_base)?;

    tracing::info!("Found line settings...");
    let messenger = line_bot::ApiClient::new(
        &settings.line.channel_access_token,
        &settings.line.api_base,
    )?;

    let webhook = WebhookService::builder()
        .channel_secret(&settings.line.channel_secret)
        .databases(databases)
        .store(Arc::new(store))
        .messenger(Arc::new(messenger))
        .template(template)
        .policy(settings.webhook.on_parse_error)
        .reply_on_error(settings.webhook.reply_on_error)
        .build()?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    if let Err(err) = server::run_with_listener(webhook, listener).await {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    Ok(())
}
