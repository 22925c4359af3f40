//! Small shared helpers.

pub mod path;
pub mod plural;

pub use path::expand_tilde;
pub use plural::plural_count;
