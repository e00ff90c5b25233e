//! Core abstractions shared by the kernel and the frontends.

pub mod command;
pub mod event;

pub use command::Command;
