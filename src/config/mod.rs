//! Configuration module for Wall-Archiver
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use wall_archiver::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Posts per wall page: {}", config.crawler.first_chunk_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::load_config;
