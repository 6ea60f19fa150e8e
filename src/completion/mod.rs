pub mod client;
pub mod parse;
pub mod prompt;

pub use client::*;
pub use parse::*;
pub use prompt::PromptContext;
