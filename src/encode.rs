pub mod png;
pub mod store;
