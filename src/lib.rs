//! BrandIntel Client Library
//!
//! A production-ready Rust client for the BrandIntel brand-analytics
//! dashboard AI API. Provides a streaming chat client that delivers the
//! assistant's reply incrementally as it is produced, and a fetch-once
//! dashboard summary service.
//!
//! # Features
//!
//! - **Streaming Chat**: consumes the server's line-oriented event stream
//!   chunk by chunk, delivering text increments in arrival order
//! - **Dashboard Summaries**: one-shot AI summaries of dashboard data,
//!   guarded against overlapping requests
//! - **Robust Parsing**: byte-buffered line splitting so multi-byte
//!   characters split across network chunks decode correctly; malformed
//!   lines are skipped, never fatal
//! - **Observability**: `tracing` instrumentation throughout
//! - **Async/Await**: built on Tokio and reqwest
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use brandintel_client::BrandIntelClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BrandIntelClient::builder()
//!         .base_url("http://localhost:8000/api")
//!         .build()?;
//!
//!     let mut reply = String::new();
//!     client
//!         .chat()
//!         .send_message("Summarize this week's sentiment for Acme", |chunk| {
//!             reply.push_str(chunk);
//!         })
//!         .await?;
//!
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```
//!
//! # Dashboard Summary Example
//!
//! ```rust,no_run
//! use brandintel_client::BrandIntelClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BrandIntelClient::from_env()?;
//!
//!     let summary = client
//!         .summary()
//!         .generate(json!({"mentions": 120, "sentiment": 0.74}), "Acme")
//!         .await?;
//!
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod resilience;
pub mod services;
pub mod transport;

// Re-exports for convenience
pub use client::{BrandIntelClient, BrandIntelClientBuilder};
pub use config::BrandIntelConfig;
pub use errors::{BrandIntelError, BrandIntelResult};
pub use services::{ChatRequest, ChatService, SummaryRequest, SummaryService};
pub use transport::StreamEvent;
