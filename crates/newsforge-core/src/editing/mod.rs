//! Local natural-language edit engine.
//!
//! Used when no AI service is selected. It is a pattern matcher over a fixed
//! set of instruction categories, not NLP: outputs are often superficial
//! substitutions.

mod engine;
mod intent;
mod operation;

pub use engine::{AdvancedEditingEngine, LOCAL_ENGINE_MODEL};
pub use intent::{EditCategory, EditIntent, LengthDirection, ToneTarget, classify_instruction};
pub use operation::{DeleteTarget, EditOperation, InsertPosition, RestructureKind};
