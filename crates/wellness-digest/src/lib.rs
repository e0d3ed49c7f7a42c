//! Digest generation: context assembly, the model-backed summary generator,
//! and HTML/PDF rendering.

pub mod context;
pub mod error;
pub mod generator;
pub mod llm;
pub mod pdf;
pub mod prompt;
pub mod render;

pub use context::{assemble_context, merge_social_buzz};
pub use error::DigestError;
pub use generator::{parse_summary, SummaryGenerator};
pub use llm::{LlmClient, LlmConfig};
pub use pdf::render_pdf;
pub use render::{render_html, write_html, HTML_FILE_NAME, PDF_FILE_NAME};
