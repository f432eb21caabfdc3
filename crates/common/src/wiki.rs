mod client;
mod config;
mod document_oracle;
mod error;
mod paths;

pub use client::*;
pub use config::*;
pub use document_oracle::*;
pub use paths::*;
