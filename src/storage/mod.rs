// storage/mod.rs
// Database access module

pub mod connection;

// Re-export commonly used items
pub use connection::open_connection;
