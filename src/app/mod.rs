//! Terminal workbench: input routing, message pumping and rendering on top of
//! the kernel store.

mod workbench;

pub use workbench::Workbench;
