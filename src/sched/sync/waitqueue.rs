//! Wait queues para bloqueio e sincronização
//!
//! Guardam apenas handles: a task continua na tabela, marcada como
//! `Suspended`. Acordar = tirar daqui e devolver ao ready set
//! (`SchedCore::make_ready`).

use crate::sched::task::TaskRef;
use alloc::collections::VecDeque;

/// Identificador de uma wait queue criada pelo núcleo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaitQueueId(pub(crate) usize);

/// Wait queue - fila FIFO de tarefas bloqueadas aguardando um evento.
#[derive(Debug, Default)]
pub struct WaitQueue {
    waiters: VecDeque<TaskRef>,
}

impl WaitQueue {
    /// Cria nova waitqueue vazia
    pub const fn new() -> Self {
        Self {
            waiters: VecDeque::new(),
        }
    }

    /// Enfileira uma task (já marcada como suspensa)
    pub fn push(&mut self, task: TaskRef) {
        self.waiters.push_back(task);
    }

    /// Retira a primeira task da fila
    pub fn pop(&mut self) -> Option<TaskRef> {
        self.waiters.pop_front()
    }

    /// Retira uma task específica. Retorna `true` se ela estava na fila.
    pub fn remove(&mut self, task: TaskRef) -> bool {
        match self.waiters.iter().position(|&t| t == task) {
            Some(pos) => {
                self.waiters.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }
}
