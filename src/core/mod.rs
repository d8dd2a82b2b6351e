//! Core Module
//!
//! Infraestrutura central do núcleo: logging e tempo do sistema.

pub mod logging;
pub mod time;
