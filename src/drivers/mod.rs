//! # Drivers do Núcleo
//!
//! | Driver   | Arquivo      | Descrição |
//! |----------|--------------|-----------|
//! | Serial   | `serial.rs`  | Sink dos logs do núcleo |
//! | Timer    | `timer.rs`   | Timer periódico (heartbeat do escalonador) |
//! | Disco    | `block/`     | Gerenciador de disco, políticas e disco virtual |
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Tasks (corpos)                 │
//! └─────────────────────────────────────────────┘
//!                      ↓
//! ┌─────────────────────────────────────────────┐
//! │              Núcleo                         │
//! │  - Timer: heartbeat do escalonador          │
//! │  - Block: gerenciador de disco              │
//! │  - Serial: logs de diagnóstico              │
//! └─────────────────────────────────────────────┘
//! ```

pub mod block; // Gerenciador de disco + disco virtual
pub mod serial; // Sink de logs
pub mod timer; // Timer periódico
