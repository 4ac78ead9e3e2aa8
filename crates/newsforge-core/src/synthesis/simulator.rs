//! Client-side article generation used when a backend is unreachable or no
//! usable API key is configured.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Utc};
use serde::Serialize;

use super::insight::{QualityAssessment, ViralContent};
use super::templates::ContentTemplates;
use crate::article::text::{extract_keywords, slugify, split_sentences, truncate_chars};
use crate::article::{
    Article, ProcessingMetrics, SeoMetadata, SynthesisRequest, SynthesizedArticle,
};
use crate::editing::AdvancedEditingEngine;
use crate::error::Result;

/// Quality score stamped on simulated articles.
pub const SIMULATED_QUALITY_SCORE: u8 = 72;

const KEYWORD_LIMIT: usize = 8;
const SUMMARY_MAX_CHARS: usize = 200;
const META_TITLE_MAX_CHARS: usize = 60;
const META_DESCRIPTION_MAX_CHARS: usize = 160;

#[derive(Serialize)]
struct TemplateContext<'a> {
    topic: &'a str,
    keyword: &'a str,
    keywords: String,
    source_count: usize,
    source_list: String,
    tone_phrase: &'a str,
    style: &'a str,
    summary: &'a str,
}

/// Renders [`ContentTemplates`] into complete articles.
#[derive(Debug, Clone)]
pub struct ArticleSimulator {
    templates: Arc<ContentTemplates>,
    engine: AdvancedEditingEngine,
}

impl Default for ArticleSimulator {
    fn default() -> Self {
        Self::new(Arc::new(ContentTemplates::default()))
    }
}

impl ArticleSimulator {
    pub fn new(templates: Arc<ContentTemplates>) -> Self {
        Self {
            templates,
            engine: AdvancedEditingEngine::new(),
        }
    }

    /// Builds an article for `request`, stamping `"<model_tag>-simulated"`.
    pub fn simulate_synthesis(
        &self,
        request: &SynthesisRequest,
        model_tag: &str,
    ) -> Result<SynthesizedArticle> {
        let started = Instant::now();
        let set = self.templates.for_style(request.style)?;

        let keywords = extract_keywords(
            request
                .sources
                .iter()
                .flat_map(|s| [s.title.as_str(), s.content.as_str()]),
            KEYWORD_LIMIT,
        );
        let topic = resolve_topic(&request.topic, &keywords);
        let seed = seed_for(&topic);

        let mut source_names: Vec<&str> = request
            .sources
            .iter()
            .filter_map(|s| s.source.as_deref())
            .collect();
        source_names.dedup();
        let source_list = if source_names.is_empty() {
            "multiple outlets".to_string()
        } else {
            source_names.join(", ")
        };

        let mut ctx = TemplateContext {
            topic: &topic,
            keyword: keywords.first().map(String::as_str).unwrap_or(&topic),
            keywords: keyword_phrase(&keywords, &topic),
            source_count: request.sources.len(),
            source_list,
            tone_phrase: request.tone.phrase(),
            style: request.style.as_ref(),
            summary: "",
        };

        let title = ContentTemplates::render(pick(&set.titles, seed), &ctx)?;
        let intro = ContentTemplates::render(pick(&set.intros, seed), &ctx)?;

        let mut paragraphs = vec![intro.clone()];
        for i in 0..request.length.body_paragraphs() {
            ctx.keyword = if keywords.is_empty() {
                topic.as_str()
            } else {
                keywords[i % keywords.len()].as_str()
            };
            paragraphs.push(ContentTemplates::render(
                pick(&set.paragraphs, seed + i),
                &ctx,
            )?);
        }
        paragraphs.push(ContentTemplates::render(
            pick(&set.conclusions, seed),
            &ctx,
        )?);

        let summary = split_sentences(&intro)
            .into_iter()
            .next()
            .map(|s| truncate_chars(&s, SUMMARY_MAX_CHARS))
            .unwrap_or_default();

        let mut article = SynthesizedArticle {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.clone(),
            content: paragraphs.join("\n\n"),
            summary: summary.clone(),
            topic: topic.clone(),
            word_count: 0,
            reading_time: 0,
            style: request.style,
            tone: request.tone,
            source_ids: request.sources.iter().map(|s| s.id.clone()).collect(),
            created_at: Utc::now(),
            processing_metrics: ProcessingMetrics {
                ai_model_used: simulated_tag(model_tag),
                content_quality_score: SIMULATED_QUALITY_SCORE,
                processing_time_ms: started.elapsed().as_millis() as u64,
                sources_processed: request.sources.len(),
            },
            seo_metadata: Some(SeoMetadata {
                meta_title: truncate_chars(&title, META_TITLE_MAX_CHARS),
                meta_description: truncate_chars(&summary, META_DESCRIPTION_MAX_CHARS),
                keywords: keywords.iter().take(5).cloned().collect(),
                slug: slugify(&title),
            }),
            fact_check_results: None,
        };
        article.refresh_metrics();

        tracing::debug!(
            "Simulated {} article on '{}' ({} words)",
            request.style,
            article.topic,
            article.word_count
        );
        Ok(article)
    }

    /// Runs the local editing engine and stamps `"<model_tag>-simulated"`.
    pub fn simulate_edit(
        &self,
        article: &SynthesizedArticle,
        instructions: &str,
        model_tag: &str,
    ) -> Result<SynthesizedArticle> {
        let mut edited = self.engine.edit(article, instructions)?;
        edited.processing_metrics.ai_model_used = simulated_tag(model_tag);
        Ok(edited)
    }

    /// Up to `count` distinct title suggestions.
    pub fn simulate_titles(&self, article: &SynthesizedArticle, count: usize) -> Result<Vec<String>> {
        let keywords = extract_keywords([article.content.as_str()], 1);
        let ctx = TemplateContext {
            topic: &article.topic,
            keyword: keywords.first().map(String::as_str).unwrap_or(&article.topic),
            keywords: keyword_phrase(&keywords, &article.topic),
            source_count: article.source_ids.len(),
            source_list: String::new(),
            tone_phrase: article.tone.phrase(),
            style: article.style.as_ref(),
            summary: &article.summary,
        };

        let mut titles: Vec<String> = Vec::new();
        for template in &self.templates.title_suggestions {
            let title = ContentTemplates::render(template, &ctx)?;
            if !titles.contains(&title) {
                titles.push(title);
            }
            if titles.len() >= count {
                break;
            }
        }
        Ok(titles)
    }

    /// Hook, body and hashtags for social sharing.
    pub fn simulate_viral(&self, article: &SynthesizedArticle) -> Result<ViralContent> {
        let keywords = extract_keywords([article.title.as_str(), article.content.as_str()], 4);
        let seed = seed_for(&article.topic);
        let ctx = TemplateContext {
            topic: &article.topic,
            keyword: keywords.first().map(String::as_str).unwrap_or(&article.topic),
            keywords: keyword_phrase(&keywords, &article.topic),
            source_count: article.source_ids.len(),
            source_list: String::new(),
            tone_phrase: article.tone.phrase(),
            style: article.style.as_ref(),
            summary: &article.summary,
        };

        let hook = ContentTemplates::render(pick(&self.templates.viral_hooks, seed), &ctx)?;
        let body = ContentTemplates::render(pick(&self.templates.viral_bodies, seed), &ctx)?;
        let hashtags = keywords.iter().map(|k| format!("#{}", k)).collect();

        Ok(ViralContent {
            hook,
            body: body.trim().to_string(),
            hashtags,
        })
    }

    pub fn assess_quality(&self, article: &SynthesizedArticle) -> QualityAssessment {
        QualityAssessment::heuristic(article)
    }

    /// Mock search results for `query`, newest first.
    pub fn simulate_search(&self, query: &str, limit: usize) -> Result<Vec<Article>> {
        let now = Utc::now();
        let ctx = serde_json::json!({ "query": query.trim() });
        self.templates
            .search_results
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, template)| {
                let title = ContentTemplates::render(&template.title, &ctx)?;
                let description = ContentTemplates::render(&template.description, &ctx)?;
                let url = format!("https://news.example.com/{}", slugify(&title));
                Ok(Article::new(title, description.clone())
                    .with_description(description)
                    .with_source(template.source.clone())
                    .with_url(url)
                    .with_published_at(now - Duration::hours(i as i64 * 3)))
            })
            .collect()
    }
}

fn simulated_tag(model_tag: &str) -> String {
    format!("{}{}", model_tag, ProcessingMetrics::SIMULATED_SUFFIX)
}

fn resolve_topic(topic: &str, keywords: &[String]) -> String {
    let topic = topic.trim();
    if !topic.is_empty() {
        return topic.to_string();
    }
    keywords
        .first()
        .cloned()
        .unwrap_or_else(|| "current events".to_string())
}

fn keyword_phrase(keywords: &[String], topic: &str) -> String {
    match keywords {
        [] => topic.to_string(),
        [only] => only.clone(),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().take(2).map(String::as_str).collect();
            format!("{} and {}", head.join(", "), last)
        }
    }
}

fn seed_for(topic: &str) -> usize {
    topic.bytes().map(usize::from).sum()
}

fn pick(items: &[String], seed: usize) -> &str {
    if items.is_empty() {
        return "";
    }
    &items[seed % items.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleLength, Tone, WritingStyle};
    use crate::article::text::split_paragraphs;

    fn request(length: ArticleLength) -> SynthesisRequest {
        SynthesisRequest {
            sources: vec![
                Article::new(
                    "Battery storage expands",
                    "Battery storage projects are expanding across the grid.",
                )
                .with_source("Reuters"),
                Article::new("Grid operators add battery capacity", "Operators add capacity.")
                    .with_source("Bloomberg"),
            ],
            topic: "energy storage".to_string(),
            style: WritingStyle::Journalistic,
            tone: Tone::Professional,
            length,
        }
    }

    #[test]
    fn test_simulated_synthesis_shape() {
        let simulator = ArticleSimulator::default();
        let article = simulator
            .simulate_synthesis(&request(ArticleLength::Medium), "chatgpt")
            .unwrap();

        assert_eq!(article.processing_metrics.ai_model_used, "chatgpt-simulated");
        assert!(article.processing_metrics.is_simulated());
        assert_eq!(article.processing_metrics.sources_processed, 2);
        assert_eq!(article.source_ids.len(), 2);
        // intro + 4 body paragraphs + conclusion
        assert_eq!(split_paragraphs(&article.content).len(), 6);
        assert_eq!(article.word_count, article.content.split_whitespace().count());
        assert!(article.content.contains("battery"));
        assert!(!article.summary.is_empty());
        assert!(article.seo_metadata.is_some());
    }

    #[test]
    fn test_length_controls_paragraph_count() {
        let simulator = ArticleSimulator::default();
        let short = simulator
            .simulate_synthesis(&request(ArticleLength::Short), "claude")
            .unwrap();
        let long = simulator
            .simulate_synthesis(&request(ArticleLength::Long), "claude")
            .unwrap();
        assert!(long.word_count > short.word_count);
        assert_eq!(split_paragraphs(&long.content).len(), 9);
    }

    #[test]
    fn test_blank_topic_falls_back_to_top_keyword() {
        let simulator = ArticleSimulator::default();
        let mut req = request(ArticleLength::Short);
        req.topic = "  ".to_string();
        let article = simulator.simulate_synthesis(&req, "mistral").unwrap();
        assert_eq!(article.topic, "battery");
    }

    #[test]
    fn test_simulated_edit_stamps_tag() {
        let simulator = ArticleSimulator::default();
        let article = simulator
            .simulate_synthesis(&request(ArticleLength::Short), "claude")
            .unwrap();
        let edited = simulator
            .simulate_edit(&article, r#"add "Prices fell last quarter.""#, "claude")
            .unwrap();
        assert!(edited.content.contains("Prices fell last quarter."));
        assert_eq!(edited.processing_metrics.ai_model_used, "claude-simulated");
    }

    #[test]
    fn test_titles_and_viral_content() {
        let simulator = ArticleSimulator::default();
        let article = simulator
            .simulate_synthesis(&request(ArticleLength::Short), "claude")
            .unwrap();

        let titles = simulator.simulate_titles(&article, 3).unwrap();
        assert_eq!(titles.len(), 3);
        assert!(titles[0].contains("Energy Storage"));

        let viral = simulator.simulate_viral(&article).unwrap();
        assert!(!viral.hook.is_empty());
        assert!(viral.hashtags.iter().all(|h| h.starts_with('#')));
    }

    #[test]
    fn test_mock_search_results() {
        let simulator = ArticleSimulator::default();
        let results = simulator.simulate_search("wildfire season", 3).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].title.contains("Wildfire Season"));
        assert!(results.iter().all(|a| a.published_at.is_some()));
    }
}
