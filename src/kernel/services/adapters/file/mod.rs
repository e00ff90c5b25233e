//! Local filesystem adapter.

mod local;

pub use local::LocalFileProvider;
