//! HTTP adapters for the NEWSFORGE backend routes.
//!
//! Each adapter degrades to the local [`ArticleSimulator`] when no usable key
//! is configured or the backend call fails, so callers only see errors that
//! even the simulator could not avoid.
//!
//! [`ArticleSimulator`]: newsforge_core::synthesis::ArticleSimulator

pub mod backend_client;
pub mod chatgpt_adapter;
pub mod claude_adapter;
pub mod gemini_search;
pub mod http;
pub mod mistral_adapter;
mod remote;

pub use backend_client::{AffiliateLink, AffiliateStats, BackendClient, validate_email};
pub use chatgpt_adapter::ChatGptAdapter;
pub use claude_adapter::ClaudeAdapter;
pub use gemini_search::GeminiSearchClient;
pub use http::BackendHttp;
pub use mistral_adapter::MistralAdapter;
pub use remote::RemoteArticleAdapter;
