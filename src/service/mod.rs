pub mod analysis;
pub mod assembler;
pub mod extraction;
pub mod llm;
pub mod scoring;
pub mod signals;

pub use analysis::{ExternalAnalysisAdapter, ExternalCallError, InstructionTemplate};
pub use assembler::AnalysisService;
pub use llm::{GeminiClient, ModelTransport};
