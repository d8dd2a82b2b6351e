//! # Multitasking & Scheduler Subsystem
//!
//! O módulo `sched` decide quem usa a CPU e por quanto tempo, e contabiliza
//! o uso de cada tarefa.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Abstração de Tarefa:** `Task` (TCB), seus estados e sua contabilidade.
//! - **Política de Escalonamento:** prioridade dinâmica com aging, desempate por ID.
//! - **Preempção:** o tick do timer cobra o quantum das tarefas de usuário.
//! - **Despacho:** `Kernel` roda os corpos das tarefas passo a passo.
//!
//! ## 🏗️ Arquitetura: Cooperative + Preemptive
//! 1. **Cooperativo:** o corpo devolve `Step::Yield` ou se suspende numa wait queue.
//! 2. **Preemptivo:** quantum esgotado com o portão aberto força a troca.
//!
//! ```text
//! Kernel::run
//!   ├─ Scheduler::pick_next   (aging, portão fechado)
//!   ├─ hooks::after_switch    (ativação, quantum cheio)
//!   ├─ TaskBody::step         (1 tick de trabalho)
//!   ├─ tick::timer_interrupt  (relógio, quantum)
//!   └─ hooks::before_switch   (tempo de processador)
//! ```
//!
//! ## 🔍 Regras
//! - Tarefas de sistema (IDs 0 e 1, e o gerenciador de disco) não sofrem
//!   aging nem preempção por quantum.
//! - A task corrente nunca está no ready set.
//! - IDs nunca são reutilizados.

pub mod config;
pub mod core;
pub mod scheduler;
pub mod sync;
pub mod task;

#[cfg(test)]
mod test;

pub use self::config::SchedConfig;
pub use self::core::{Kernel, RunOutcome, RunSummary, TaskContext};
pub use self::scheduler::Scheduler;
pub use self::task::{Step, Task, TaskBody, TaskRef, TaskReport, TaskState};
