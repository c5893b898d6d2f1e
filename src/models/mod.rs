//! Data models for the agency operations tool.
//!
//! These are the semantic records the API speaks. Backend column naming lives in
//! [`crate::rows`].

mod client;
mod content;
mod gear;
mod member;
mod notes;
mod time_entry;
mod trip;

pub use client::*;
pub use content::*;
pub use gear::*;
pub use member::*;
pub use notes::*;
pub use time_entry::*;
pub use trip::*;
