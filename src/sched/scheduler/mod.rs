//! Escalonador por prioridades com aging
//!
//! Política: menor prioridade dinâmica vence, empate pelo menor ID.
//! Quando a escolhida é de usuário, todas as OUTRAS tasks de usuário
//! prontas envelhecem um passo (até o teto) e a escolhida volta à sua
//! prioridade estática. Tasks de sistema não envelhecem nem provocam aging.
//!
//! Quem chama segura o portão de preempção fechado durante a seleção
//! (ver `SchedCore::pick_next`).

pub mod runqueue;

pub use runqueue::RunQueue;

use super::config::SchedConfig;
use super::task::{TaskRef, TaskTable};

/// Escalonador: ready set + parâmetros de aging
#[derive(Debug)]
pub struct Scheduler {
    ready: RunQueue,
    aging_step: i32,
    ceiling: i32,
}

impl Scheduler {
    pub fn new(config: &SchedConfig) -> Self {
        Self {
            ready: RunQueue::new(),
            aging_step: config.aging_step,
            ceiling: config.priority_ceiling,
        }
    }

    /// Adiciona task ao ready set
    pub fn enqueue(&mut self, task: TaskRef) {
        self.ready.push(task);
    }

    /// Retira task do ready set (término, suspensão externa)
    pub fn remove(&mut self, task: TaskRef) -> bool {
        self.ready.remove(task)
    }

    /// Número de tasks prontas
    pub fn len(&self) -> usize {
        self.ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    /// Escolhe a próxima task e aplica aging. Não retira do ready set.
    pub fn select_next(&mut self, tasks: &mut TaskTable) -> Option<TaskRef> {
        // Melhor candidata: (prioridade dinâmica, tid) mínimo
        let mut best: Option<(i32, crate::sys::Tid, TaskRef)> = None;
        for r in self.ready.iter() {
            let Some(task) = tasks.get(r) else {
                continue;
            };
            let key = (task.dynamic_prio, task.tid);
            match best {
                Some((prio, tid, _)) if (prio, tid) <= key => {}
                _ => best = Some((key.0, key.1, r)),
            }
        }
        let (_, tid, chosen) = best?;

        crate::ktrace!("(Sched) Escolhida T", tid.as_u32());

        let chosen_is_user = tasks.get(chosen).is_some_and(|t| t.is_user());
        if chosen_is_user {
            for r in self.ready.iter() {
                if r == chosen {
                    continue;
                }
                if let Some(task) = tasks.get_mut(r) {
                    if task.is_user() {
                        task.dynamic_prio = (task.dynamic_prio + self.aging_step).max(self.ceiling);
                    }
                }
            }
            if let Some(task) = tasks.get_mut(chosen) {
                task.dynamic_prio = task.static_prio;
            }
        }

        Some(chosen)
    }

    /// Seleciona e retira do ready set
    pub fn pick_next(&mut self, tasks: &mut TaskTable) -> Option<TaskRef> {
        let next = self.select_next(tasks)?;
        self.ready.remove(next);
        Some(next)
    }
}
