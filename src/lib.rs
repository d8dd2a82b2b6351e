//! Anvil - núcleo de escalonamento do Redstone OS.
//!
//! Ponto central de exportação dos módulos.
//!
//! - Escalonador de CPU por prioridades com aging, preempção por quantum
//!   e contabilização de CPU por tarefa.
//! - Escalonador de requisições de disco (FCFS, SSTF, CSCAN) servido por
//!   uma tarefa gerenciadora.

#![cfg_attr(not(test), no_std)]

// Alocação dinâmica (Vec/Box/Arc)
extern crate alloc;

// --- Infraestrutura ---
pub mod core; // Logging, relógio
pub mod drivers; // Serial, timer, disco
pub mod sync; // Portão de preempção, linhas de IRQ
pub mod sys; // Definições de Sistema (Erros, IDs)

// --- Subsistemas ---
pub mod sched; // Scheduler e Tarefas

pub use crate::drivers::block::{IoPolicy, VirtualDisk, VirtualDiskConfig};
pub use crate::sched::config::SchedConfig;
pub use crate::sched::{Kernel, RunOutcome, RunSummary, Step, TaskContext};
