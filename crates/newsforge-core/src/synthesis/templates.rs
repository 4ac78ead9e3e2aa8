//! Static content templates used by the local simulators.
//!
//! Templates are minijinja source strings. The whole table can be replaced
//! (e.g. loaded from JSON) without touching the simulator.
//!
//! Available variables: `topic`, `keyword`, `keywords`, `source_count`,
//! `source_list`, `tone_phrase`, `style`, `query`, `index`.

use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;

use crate::article::WritingStyle;
use crate::error::{NewsforgeError, Result};

static ENV: Lazy<Environment<'static>> = Lazy::new(Environment::new);

/// Title/intro/paragraph/conclusion templates for one writing style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTemplates {
    pub titles: Vec<String>,
    pub intros: Vec<String>,
    pub paragraphs: Vec<String>,
    pub conclusions: Vec<String>,
}

/// Title and description template for mock search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultTemplate {
    pub title: String,
    pub description: String,
    pub source: String,
}

/// The complete template resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTemplates {
    pub styles: HashMap<WritingStyle, StyleTemplates>,
    pub title_suggestions: Vec<String>,
    pub viral_hooks: Vec<String>,
    pub viral_bodies: Vec<String>,
    pub search_results: Vec<SearchResultTemplate>,
}

impl ContentTemplates {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn for_style(&self, style: WritingStyle) -> Result<&StyleTemplates> {
        self.styles
            .get(&style)
            .ok_or_else(|| NewsforgeError::not_found("style templates", style.to_string()))
    }

    /// Renders one template string with `ctx`.
    pub fn render<S: Serialize>(template: &str, ctx: S) -> Result<String> {
        Ok(ENV.render_str(template, ctx)?)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_style(style: WritingStyle) -> StyleTemplates {
    match style {
        WritingStyle::Academic => StyleTemplates {
            titles: owned(&[
                "{{ topic | title }}: A Critical Review of Current Evidence",
                "Reassessing {{ topic | title }}: Findings and Implications",
            ]),
            intros: owned(&[
                "This article examines {{ topic }} through the lens of {{ source_count }} contemporary sources. {{ tone_phrase }} the literature converges on a small number of recurring themes, most notably {{ keywords }}.",
                "Recent discussion of {{ topic }} has intensified. Drawing on {{ source_count }} sources, this review situates the debate and identifies open questions.",
            ]),
            paragraphs: owned(&[
                "A first strand of evidence concerns {{ keyword }}. The available reports suggest that its role in {{ topic }} is more significant than earlier accounts acknowledged.",
                "With respect to {{ keyword }}, the sources diverge. Some emphasize structural factors, while others point to short-term developments that may not persist.",
                "Methodologically, claims about {{ keyword }} rest on limited data. Further longitudinal study would strengthen the conclusions drawn here.",
                "Taken together, the material on {{ keyword }} indicates a shift in how {{ topic }} is understood by practitioners and observers alike.",
            ]),
            conclusions: owned(&[
                "In conclusion, the evidence on {{ topic }} is substantive but incomplete. Future research should address the gaps identified above.",
            ]),
        },
        WritingStyle::Journalistic => StyleTemplates {
            titles: owned(&[
                "{{ topic | title }}: What We Know So Far",
                "Inside the Latest Developments on {{ topic | title }}",
            ]),
            intros: owned(&[
                "New developments in {{ topic }} are drawing attention, according to {{ source_count }} reports reviewed for this article. {{ tone_phrase }} the story centers on {{ keywords }}.",
                "{{ topic | capitalize }} is back in the headlines. Reporting from {{ source_list }} points to fast-moving changes.",
            ]),
            paragraphs: owned(&[
                "The most immediate issue is {{ keyword }}. Officials and analysts quoted in the coverage describe it as a key factor in how events unfold.",
                "Reports also highlight {{ keyword }}, which has prompted questions from observers about what comes next.",
                "On {{ keyword }}, accounts differ in detail but agree on the broad direction of events.",
                "Context matters: {{ keyword }} has been part of the {{ topic }} story for some time, and recent reporting adds new detail.",
            ]),
            conclusions: owned(&[
                "The situation around {{ topic }} continues to develop, and further updates are expected as more information becomes available.",
            ]),
        },
        WritingStyle::Blog => StyleTemplates {
            titles: owned(&[
                "Let's Talk About {{ topic | title }}",
                "Why Everyone Is Suddenly Talking About {{ topic | title }}",
            ]),
            intros: owned(&[
                "If you have been following {{ topic }}, you have probably noticed a lot of buzz lately. I went through {{ source_count }} articles so you don't have to. {{ tone_phrase }} it comes down to {{ keywords }}.",
            ]),
            paragraphs: owned(&[
                "First up: {{ keyword }}. This is the part that surprised me most, and it is worth a closer look.",
                "Then there is {{ keyword }}. Honestly, this one deserves more attention than it gets.",
                "Here is my take on {{ keyword }}: it is not as simple as the headlines make it sound.",
                "And finally, {{ keyword }}. Keep an eye on this one.",
            ]),
            conclusions: owned(&[
                "That's the rundown on {{ topic }}. Let me know what you think, and stay tuned for more.",
            ]),
        },
        WritingStyle::Technical => StyleTemplates {
            titles: owned(&[
                "{{ topic | title }}: A Technical Overview",
                "Understanding {{ topic | title }}: Architecture and Trade-offs",
            ]),
            intros: owned(&[
                "This overview summarizes the technical state of {{ topic }} based on {{ source_count }} sources. {{ tone_phrase }} the key components are {{ keywords }}.",
            ]),
            paragraphs: owned(&[
                "Component: {{ keyword }}. Its behavior under load and its integration points determine much of the overall system characteristics.",
                "Regarding {{ keyword }}, implementers should weigh performance against maintainability and document the chosen trade-offs.",
                "Known limitations around {{ keyword }} include incomplete tooling and inconsistent conventions across vendors.",
                "Operationally, {{ keyword }} benefits from monitoring, staged rollout and clear rollback procedures.",
            ]),
            conclusions: owned(&[
                "In summary, {{ topic }} is maturing. Teams adopting it should start small, measure carefully and iterate.",
            ]),
        },
        WritingStyle::Creative => StyleTemplates {
            titles: owned(&[
                "The Story of {{ topic | title }}",
                "Echoes of {{ topic | title }}",
            ]),
            intros: owned(&[
                "Every story has a beginning, and the story of {{ topic }} begins with {{ keywords }}. {{ tone_phrase }} it is a story still being written.",
            ]),
            paragraphs: owned(&[
                "Picture {{ keyword }} as a thread running through the narrative, pulling distant events together.",
                "Then {{ keyword }} enters the scene, and the mood shifts.",
                "Some say {{ keyword }} is the turning point; others insist the real change is still ahead.",
                "Beneath it all, {{ keyword }} hums quietly, shaping what everyone sees.",
            ]),
            conclusions: owned(&[
                "And so the tale of {{ topic }} moves on, its final chapter not yet written.",
            ]),
        },
        WritingStyle::Business => StyleTemplates {
            titles: owned(&[
                "{{ topic | title }}: Market Impact and Strategic Outlook",
                "What {{ topic | title }} Means for Business Leaders",
            ]),
            intros: owned(&[
                "{{ topic | capitalize }} is reshaping priorities for decision-makers. Based on {{ source_count }} sources, {{ tone_phrase | lower }} the main drivers are {{ keywords }}.",
            ]),
            paragraphs: owned(&[
                "Market signal: {{ keyword }}. Companies exposed to it should review their planning assumptions.",
                "From a cost perspective, {{ keyword }} introduces both risk and opportunity.",
                "Competitive dynamics around {{ keyword }} favor organizations that move early and measure results.",
                "Stakeholders will expect clear communication about {{ keyword }} in upcoming reporting cycles.",
            ]),
            conclusions: owned(&[
                "Bottom line: leaders who track {{ topic }} closely will be better placed to act as conditions change.",
            ]),
        },
        WritingStyle::Opinion => StyleTemplates {
            titles: owned(&[
                "Opinion: We Are Getting {{ topic | title }} Wrong",
                "The Case for Rethinking {{ topic | title }}",
            ]),
            intros: owned(&[
                "Much of the conversation about {{ topic }} misses the point. After reading {{ source_count }} reports, I am convinced the real issues are {{ keywords }}.",
            ]),
            paragraphs: owned(&[
                "Consider {{ keyword }}. It is treated as a footnote, yet it sits at the heart of the matter.",
                "Critics will argue that {{ keyword }} is overstated. They are wrong, and the reporting shows why.",
                "We should be honest about {{ keyword }}: ignoring it carries a cost.",
                "If we take {{ keyword }} seriously, the path forward becomes clearer.",
            ]),
            conclusions: owned(&[
                "It is time to change how we think about {{ topic }}. The evidence is there; what is missing is the will.",
            ]),
        },
    }
}

impl Default for ContentTemplates {
    fn default() -> Self {
        Self {
            styles: WritingStyle::iter().map(|s| (s, builtin_style(s))).collect(),
            title_suggestions: owned(&[
                "{{ topic | title }}: What You Need to Know",
                "The Real Story Behind {{ topic | title }}",
                "{{ topic | title }} Explained in Five Minutes",
                "Why {{ topic | title }} Matters Now",
                "{{ topic | title }}: {{ keyword | capitalize }} and Beyond",
            ]),
            viral_hooks: owned(&[
                "Nobody is talking about this side of {{ topic }}.",
                "Stop scrolling: {{ topic }} just changed.",
                "Here is what {{ topic }} means for you, in 30 seconds.",
            ]),
            viral_bodies: owned(&[
                "{{ keyword | capitalize }} is the detail everyone misses. {{ summary }}",
            ]),
            search_results: vec![
                SearchResultTemplate {
                    title: "{{ query | title }}: Latest Developments".to_string(),
                    description: "A roundup of the newest reporting on {{ query }}.".to_string(),
                    source: "Reuters".to_string(),
                },
                SearchResultTemplate {
                    title: "Analysis: What {{ query | title }} Means for the Year Ahead".to_string(),
                    description: "Experts weigh in on the long-term impact of {{ query }}.".to_string(),
                    source: "BBC News".to_string(),
                },
                SearchResultTemplate {
                    title: "{{ query | title }} Explained".to_string(),
                    description: "Key facts and background on {{ query }}.".to_string(),
                    source: "Axios".to_string(),
                },
                SearchResultTemplate {
                    title: "How {{ query | title }} Is Changing the Industry".to_string(),
                    description: "Companies respond to shifting conditions around {{ query }}.".to_string(),
                    source: "TechCrunch".to_string(),
                },
                SearchResultTemplate {
                    title: "Readers React to {{ query | title }}".to_string(),
                    description: "Public response to recent news on {{ query }}.".to_string(),
                    source: "Local Wire".to_string(),
                },
            ],
        }
    }
}
