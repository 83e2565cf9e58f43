pub mod analysis;
pub mod config;
pub mod prompt;

pub use analysis::{
    AnalysisResult, Highlights, ImprovedPrompts, ScoreReport, SignalSet, Subscores, Weakness,
    WeaknessKind,
};
pub use config::{Config, ModelConfig};
pub use prompt::{InvalidPromptError, Prompt};
