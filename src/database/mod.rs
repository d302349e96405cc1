pub mod logs;
pub mod manager;
pub mod models;
pub mod schema;
pub mod settings;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
