pub mod admin;
pub mod queries;
pub mod schema;
pub mod session;
pub mod source;
pub mod stats;
pub mod value;
