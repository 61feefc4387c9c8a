//! Domain entities - the core business objects.

mod todo;
mod user;

pub use todo::Todo;
pub use user::{Role, User};
