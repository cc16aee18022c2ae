pub mod topics;
pub mod tree_formatter;
