//! Data models: workspace tree and text buffer.

pub mod file_tree;
pub mod text_buffer;

pub use file_tree::{build_file_tree, should_ignore, FileTree, FileTreeRow, NodeId, NodeKind};
pub use text_buffer::{slice_to_cow, TextBuffer};
