//! Tempo do sistema

pub mod clock;

pub use clock::Clock;
