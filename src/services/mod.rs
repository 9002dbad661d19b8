// Service exports
pub mod feedback_store;

pub use feedback_store::{FeedbackStore, StoreStats};
