// Storage operation traits and implementations
pub mod delete;
pub mod list;

pub use delete::Deleter;
pub use list::Lister;
