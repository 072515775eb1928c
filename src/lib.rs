pub mod assemble;
pub mod config;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod table;
