//! Task management module

pub mod accounting;
pub mod body;
pub mod entity;
pub mod state;
pub mod table;

pub use crate::sys::Tid;
pub use accounting::{Accounting, TaskReport};
pub use body::{Compute, Step, TaskBody};
pub use entity::{Task, TaskFlags};
pub use state::TaskState;
pub use table::{TaskRef, TaskTable};
