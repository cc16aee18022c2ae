pub mod context;
pub mod demo;
pub mod dispatcher;
pub mod error;
pub mod live;
pub mod summary;
pub mod tree_builder;
pub mod types;
pub mod validator;
pub mod workflow;
