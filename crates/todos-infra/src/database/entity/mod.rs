//! SeaORM entities for the users and todos tables.

pub mod todo;
pub mod user;
