pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::{Site, parse_site_toml, parse_site_toml_str};
pub use error::{Error, Result};
pub use store::PostStore;
pub use types::*;
