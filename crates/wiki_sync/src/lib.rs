pub mod config;
pub mod domain;
pub mod wiki_sync;

pub use config::*;
pub use domain::*;
pub use wiki_sync::*;
