use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tgcontext::{Config, Context, DryRun, Extra, Update};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tgcontext=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let update_path = args
        .next()
        .map(PathBuf::from)
        .context("Usage: tgcontext <update.json> [config.toml]")?;

    let config = match args.next().map(PathBuf::from) {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::load(&path)?
        }
        None => Config::default(),
    };

    let raw = tokio::fs::read_to_string(&update_path)
        .await
        .with_context(|| format!("Failed to read update file: {}", update_path.display()))?;
    let update: Update = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse update: {}", update_path.display()))?;

    let ctx = Context::new(update, Arc::new(DryRun), config.bot)?;

    info!("Update {}: {}", ctx.update().update_id, ctx.classification());
    if let Some(chat) = ctx.chat() {
        info!("  Chat: {} ({})", chat.id.0, chat.kind.as_deref().unwrap_or("unknown"));
    }
    if let Some(user) = ctx.from() {
        info!("  From: {} ({})", user.id.0, user.first_name);
    }
    info!("  Available methods: {}", ctx.available_methods().join(", "));

    // Echo text back through the dry-run invoker.
    let text = ctx.effective_message().and_then(|m| m.text()).map(str::to_string);
    if let Some(text) = text {
        if ctx.supports("reply") {
            ctx.reply(text, Extra::new()).await?;
        }
    }

    Ok(())
}
