pub mod client;
pub mod title;
pub mod types;

pub use client::*;
pub use title::clean_title;
pub use types::*;
