pub mod colors;
pub mod path;

pub use path::expand_tilde;
