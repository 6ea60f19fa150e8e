pub mod error;
pub mod handlers;
pub mod search;
pub mod types;

#[cfg(test)]
pub(crate) mod fakes;

pub use error::SearchError;
pub use handlers::*;
pub use search::*;
pub use types::*;
