//! # Synchronization Primitives
//!
//! Primitivas de sincronização do núcleo (processador lógico único).
//!
//! ## Hierarquia de Uso
//!
//! ```text
//! PreemptGate → Seções críticas contra o tick do timer (reentrante)
//! IrqLine     → Evento assíncrono de dispositivo (flag lock-free)
//! AtomicFlag  → Sinal simples entre contextos (ex: pedido de shutdown)
//! ```
//!
//! ## Regras
//!
//! - **PreemptGate**: todo acesso ao ready set, ao relógio e à
//!   contabilização por tarefa acontece com o portão fechado.
//! - **IrqLine**: o dispositivo só levanta a linha; quem consome é o loop
//!   da tarefa dona do dispositivo.

/// Operações atômicas
pub mod atomic;

/// Portão de preempção
pub mod preempt;


pub use atomic::{AtomicCounter, AtomicFlag, IrqLine};
pub use preempt::{PreemptGate, PreemptGuard};
