//! Domain layer for NEWSFORGE: article models, provider routing types, the
//! local editing engine, the breaking-news classifier and the fallback
//! simulator.

pub mod article;
pub mod breaking;
pub mod config;
pub mod editing;
pub mod error;
pub mod geolocation;
pub mod search;
pub mod settings;
pub mod synthesis;

pub use error::{NewsforgeError, Result};
