mod rect_collection;
mod undo_stack;

pub use rect_collection::*;
pub use undo_stack::*;
