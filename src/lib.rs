mod depth;
mod error;
mod rbt;

pub use crate::depth::Depth;
pub use crate::error::RbtError;
pub use crate::rbt::{Event, EventHook, Iter, Node, NodeHandle, OpKind, Range, Rbt, Reverse, Stats};
