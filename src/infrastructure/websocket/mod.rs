//! WebSocket plumbing for the live import-progress feed.

pub mod progress_channel;

pub use progress_channel::*;
