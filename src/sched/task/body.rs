//! Corpo executável de uma task
//!
//! O despachante não troca pilhas: cada task é uma máquina de estados que
//! executa um passo por vez. Um passo equivale a um tick de CPU; o tick do
//! timer é entregue ao fim de cada passo.

use crate::sched::core::TaskContext;

/// O que a task pede ao despachante ao fim de um passo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Executou um tick de trabalho e quer continuar
    Continue,
    /// Cede a CPU voluntariamente (volta ao ready set)
    Yield,
    /// Termina com o código de saída dado
    Exit(i32),
}

/// Código de uma task.
///
/// Se durante o passo a task se suspendeu (ex: `disk_block_read`), o
/// despachante a retira da CPU independentemente do `Step` devolvido
/// (exceto `Exit`).
pub trait TaskBody {
    fn step(&mut self, ctx: &mut TaskContext<'_>) -> Step;
}

impl<F> TaskBody for F
where
    F: FnMut(&mut TaskContext<'_>) -> Step,
{
    fn step(&mut self, ctx: &mut TaskContext<'_>) -> Step {
        self(ctx)
    }
}

/// Task que consome `ticks` de CPU e termina.
pub struct Compute {
    remaining: u64,
}

impl Compute {
    pub fn new(ticks: u64) -> Self {
        Self { remaining: ticks }
    }
}

impl TaskBody for Compute {
    fn step(&mut self, _ctx: &mut TaskContext<'_>) -> Step {
        if self.remaining == 0 {
            return Step::Exit(0);
        }
        self.remaining -= 1;
        Step::Continue
    }
}
