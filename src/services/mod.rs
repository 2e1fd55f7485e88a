//! Services for the dashboard AI endpoints.

pub mod chat;
pub mod summary;

pub use chat::{ChatRequest, ChatService};
pub use summary::{SummaryRequest, SummaryService};
