pub mod conversation;
pub mod engine;
