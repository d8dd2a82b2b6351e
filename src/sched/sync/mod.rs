//! Sincronização entre tasks

pub mod waitqueue;

pub use waitqueue::{WaitQueue, WaitQueueId};
