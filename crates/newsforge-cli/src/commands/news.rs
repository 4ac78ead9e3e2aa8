use anyhow::Result;
use chrono::Utc;

use super::AppContext;
use super::utils::write_json;

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    let settings = ctx.settings().await?;
    let preferences = ctx.settings_service.preferences();
    if let Ok(Some(last)) = preferences.last_news_check() {
        eprintln!("Last checked {}", last.format("%Y-%m-%d %H:%M UTC"));
    }

    let response = ctx.news.search(&settings, query).await?;
    if let Err(err) = preferences.record_news_check(Utc::now()) {
        tracing::warn!("Failed to record news check: {}", err);
    }
    if response.is_empty() {
        eprintln!("No results for '{}'", response.query);
    }
    write_json(&response, None)
}

pub async fn most_viewed(ctx: &AppContext, limit: usize) -> Result<()> {
    let settings = ctx.settings().await?;
    let entries = ctx.news.most_viewed(&settings, limit).await;
    write_json(&entries, None)
}

pub async fn view(ctx: &AppContext, article_id: &str) -> Result<()> {
    let settings = ctx.settings().await?;
    ctx.news.record_view(&settings, article_id).await;
    Ok(())
}

pub async fn affiliate_link(ctx: &AppContext, topic: &str) -> Result<()> {
    let settings = ctx.settings().await?;
    match ctx.backend.affiliate_link(&settings, topic).await {
        Some(link) => write_json(&link, None),
        None => {
            eprintln!("No affiliate link for '{topic}'");
            Ok(())
        }
    }
}

pub async fn affiliate_stats(ctx: &AppContext) -> Result<()> {
    let settings = ctx.settings().await?;
    let stats = ctx.backend.affiliate_stats(&settings).await;
    write_json(&stats, None)
}

pub async fn subscribe(ctx: &AppContext, email: &str) -> Result<()> {
    let settings = ctx.settings().await?;
    ctx.backend.subscribe(&settings, email).await?;
    println!("✅ Subscribed {email}");
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    let settings = ctx.settings().await?;
    ctx.backend.logout(&settings).await?;
    println!("✅ Logged out");
    Ok(())
}
