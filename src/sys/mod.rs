//! System Definitions (ABI).
//!
//! Contém as constantes e tipos que definem a interface entre o núcleo e o mundo.

pub mod error;
pub mod types;

pub use error::{Errno, KResult};
pub use types::Tid;
