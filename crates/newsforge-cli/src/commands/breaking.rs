use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use newsforge_core::article::Article;
use newsforge_core::breaking::{classify_breaking_news_with, get_breaking_news_badge};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::utils::{read_json, write_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifiedArticle<'a> {
    article_id: &'a str,
    title: &'a str,
    #[serde(flatten)]
    result: serde_json::Value,
}

pub fn classify(articles: &Path, seed: Option<u64>, badges_only: bool) -> Result<()> {
    let articles: Vec<Article> = read_json(articles)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Utc::now();

    let mut rows = Vec::with_capacity(articles.len());
    let mut breaking = 0;
    for article in &articles {
        let classification = classify_breaking_news_with(article, now, &mut rng);
        if classification.is_breaking {
            breaking += 1;
        }
        let result = if badges_only {
            serde_json::to_value(get_breaking_news_badge(&classification))?
        } else {
            serde_json::to_value(&classification)?
        };
        rows.push(ClassifiedArticle {
            article_id: &article.id,
            title: &article.title,
            result,
        });
    }

    tracing::info!("{} of {} articles classified as breaking", breaking, articles.len());

    write_json(&rows, None)
}
