// Saved career roadmaps, one list per user. All routes require auth.

pub mod handlers;
pub mod store;
