//! In-memory repository implementations - used as fallback when the
//! database is not configured, and by handler-level tests.
//!
//! Note: Data is lost on process restart.

mod todo;
mod user;

pub use todo::InMemoryTodoRepository;
pub use user::InMemoryUserRepository;
