pub mod http;
pub mod token_store;

pub use http::HttpLabApi;
pub use token_store::{FileTokenStorage, MemoryTokenStorage};
