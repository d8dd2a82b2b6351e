//! Tabela de tasks (arena)
//!
//! Slots estáveis com contador de geração. Uma `TaskRef` guarda índice e
//! geração; depois que a task termina o slot é reciclado com geração nova
//! e referências antigas passam a falhar (`None`) em vez de apontar para
//! outra task.

use super::entity::Task;
use crate::sys::types::Tid;
use alloc::vec::Vec;

/// Handle de uma task na tabela
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskRef {
    index: u32,
    generation: u32,
}

impl TaskRef {
    /// Índice do slot (debug)
    pub const fn index(self) -> u32 {
        self.index
    }
}

struct Slot {
    generation: u32,
    task: Option<Task>,
}

/// Arena de tasks vivas
pub struct TaskTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    next_tid: u32,
    live: usize,
}

impl TaskTable {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            next_tid: Tid::FIRST_USER.as_u32(),
            live: 0,
        }
    }

    /// Reserva o próximo ID de usuário. IDs nunca são reutilizados.
    pub fn alloc_tid(&mut self) -> Tid {
        let tid = Tid::new(self.next_tid);
        self.next_tid += 1;
        tid
    }

    /// Insere uma task e devolve seu handle
    pub fn insert(&mut self, task: Task) -> TaskRef {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.task = Some(task);
            return TaskRef {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            task: Some(task),
        });
        TaskRef {
            index,
            generation: 0,
        }
    }

    /// Remove a task (término). O slot ganha nova geração.
    pub fn remove(&mut self, r: TaskRef) -> Option<Task> {
        let slot = self.slots.get_mut(r.index as usize)?;
        if slot.generation != r.generation {
            return None;
        }
        let task = slot.task.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(r.index);
        self.live -= 1;
        Some(task)
    }

    pub fn get(&self, r: TaskRef) -> Option<&Task> {
        let slot = self.slots.get(r.index as usize)?;
        if slot.generation != r.generation {
            return None;
        }
        slot.task.as_ref()
    }

    pub fn get_mut(&mut self, r: TaskRef) -> Option<&mut Task> {
        let slot = self.slots.get_mut(r.index as usize)?;
        if slot.generation != r.generation {
            return None;
        }
        slot.task.as_mut()
    }

    /// Handle ainda válido?
    pub fn contains(&self, r: TaskRef) -> bool {
        self.get(r).is_some()
    }

    /// Procura uma task viva pelo ID
    pub fn find(&self, tid: Tid) -> Option<TaskRef> {
        self.iter().find(|(_, t)| t.tid == tid).map(|(r, _)| r)
    }

    /// Percorre as tasks vivas
    pub fn iter(&self) -> impl Iterator<Item = (TaskRef, &Task)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.task.as_ref().map(|t| {
                (
                    TaskRef {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    t,
                )
            })
        })
    }

    /// Número de tasks vivas
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl Default for TaskTable {
    fn default() -> Self {
        Self::new()
    }
}
