//! Ready set
//!
//! Conjunto sem ordem das tasks prontas. A seleção varre tudo a cada
//! chamada, então a ordem de inserção não importa.

use crate::sched::task::TaskRef;
use alloc::vec::Vec;

/// Conjunto de tasks prontas
#[derive(Debug, Default)]
pub struct RunQueue {
    tasks: Vec<TaskRef>,
}

impl RunQueue {
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Adiciona task ao conjunto (ignora duplicata)
    pub fn push(&mut self, task: TaskRef) {
        if !self.contains(task) {
            self.tasks.push(task);
        }
    }

    /// Remove a task. Retorna `true` se ela estava presente.
    pub fn remove(&mut self, task: TaskRef) -> bool {
        match self.tasks.iter().position(|&t| t == task) {
            Some(pos) => {
                self.tasks.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, task: TaskRef) -> bool {
        self.tasks.contains(&task)
    }

    pub fn iter(&self) -> impl Iterator<Item = TaskRef> + '_ {
        self.tasks.iter().copied()
    }

    /// Número de tasks na fila
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Verifica se está vazia
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
