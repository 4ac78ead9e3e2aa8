use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use newsforge_core::article::{Article, ArticleLength, SynthesizedArticle, Tone, WritingStyle};

use super::AppContext;
use super::utils::{read_json, write_json};

pub async fn synthesize(
    ctx: &AppContext,
    sources: &Path,
    topic: String,
    style: WritingStyle,
    tone: Tone,
    length: ArticleLength,
    out: Option<PathBuf>,
) -> Result<()> {
    let sources: Vec<Article> = read_json(sources)?;
    let settings = ctx.settings().await?;
    let article = ctx
        .dispatcher
        .synthesize_articles(&settings, sources, topic, style, tone, length)
        .await
        .context("Synthesis failed")?;
    write_json(&article, out.as_deref())
}

pub async fn edit(
    ctx: &AppContext,
    article: &Path,
    instructions: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let article: SynthesizedArticle = read_json(article)?;
    let settings = ctx.settings().await?;
    let edited = ctx
        .dispatcher
        .edit_article(&settings, &article, instructions)
        .await
        .context("Edit failed")?;
    write_json(&edited, out.as_deref())
}

pub async fn titles(ctx: &AppContext, article: &Path, count: usize) -> Result<()> {
    let article: SynthesizedArticle = read_json(article)?;
    let settings = ctx.settings().await?;
    for title in ctx.claude.suggest_titles(&settings, &article, count).await? {
        println!("{title}");
    }
    Ok(())
}

pub async fn quality(ctx: &AppContext, article: &Path) -> Result<()> {
    let article: SynthesizedArticle = read_json(article)?;
    let settings = ctx.settings().await?;
    let assessment = ctx.claude.assess_quality(&settings, &article).await?;
    write_json(&assessment, None)
}

pub async fn viral(ctx: &AppContext, article: &Path) -> Result<()> {
    let article: SynthesizedArticle = read_json(article)?;
    let settings = ctx.settings().await?;
    let content = ctx.chatgpt.generate_viral(&settings, &article).await?;
    write_json(&content, None)
}

pub fn publish(ctx: &AppContext, article: &Path) -> Result<()> {
    let article: SynthesizedArticle = read_json(article)?;
    let receipt = ctx.publishing.publish(&article)?;
    write_json(&receipt, None)
}
