//! Task Control Block

use super::accounting::Accounting;
use super::body::TaskBody;
use super::state::TaskState;
use crate::drivers::block::IoCompletion;
use crate::sched::config::{clamp_priority, PRIORITY_DEFAULT};
use crate::sys::types::Tid;
use alloc::boxed::Box;
use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Classificação da task.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TaskFlags: u32 {
        /// Tarefa de sistema: não sofre aging nem preempção por quantum.
        const SYSTEM       = 1 << 0;
        /// Tarefa principal: seu término pede o shutdown do disco.
        const BOOTSTRAP    = 1 << 1;
        /// Gerenciador de disco.
        const DISK_MANAGER = 1 << 2;
    }
}

/// Task Control Block
pub struct Task {
    /// ID único (nunca reutilizado)
    pub tid: Tid,
    /// Estado atual
    pub state: TaskState,
    /// Prioridade base definida pelo usuário (-20..=20)
    pub static_prio: i32,
    /// Prioridade de trabalho (aging / reset)
    pub dynamic_prio: i32,
    /// Classificação
    pub flags: TaskFlags,
    /// Estatísticas de contabilidade
    pub accounting: Accounting,
    /// Código de saída
    pub exit_code: Option<i32>,
    /// Nome (debug)
    pub name: [u8; 32],

    /// Código da task. `None` enquanto o despachante executa um passo.
    pub(crate) body: Option<Box<dyn TaskBody>>,
    /// Resultado de I/O entregue pelo gerenciador de disco
    pub(crate) io: Option<IoCompletion>,
}

impl Task {
    /// Cria nova task (prioridade padrão, quantum cheio, contabilidade zerada)
    pub fn new(
        tid: Tid,
        name: &str,
        mut flags: TaskFlags,
        body: Box<dyn TaskBody>,
        now: u64,
        quantum: i32,
    ) -> Self {
        // IDs de bootstrap são sempre de sistema
        if tid.is_reserved() {
            flags |= TaskFlags::SYSTEM;
        }

        // Preparar buffer de nome
        let mut name_buf = [0u8; 32];
        // Corta em fronteira de caractere (UTF-8)
        let mut len = name.len().min(31);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        name_buf[..len].copy_from_slice(&name.as_bytes()[..len]);

        Self {
            tid,
            state: TaskState::New,
            static_prio: PRIORITY_DEFAULT,
            dynamic_prio: PRIORITY_DEFAULT,
            flags,
            accounting: Accounting::new(now, quantum),
            exit_code: None,
            name: name_buf,
            body: Some(body),
            io: None,
        }
    }

    /// Nome legível
    pub fn name(&self) -> &str {
        let len = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        core::str::from_utf8(&self.name[..len]).unwrap_or("?")
    }

    /// Tarefa de sistema?
    #[inline]
    pub fn is_system(&self) -> bool {
        self.flags.contains(TaskFlags::SYSTEM)
    }

    /// Tarefa de usuário? (participa de aging e quantum)
    #[inline]
    pub fn is_user(&self) -> bool {
        !self.is_system()
    }

    /// Define a prioridade estática (com clamp) e reinicia a dinâmica
    pub fn set_priority(&mut self, prio: i32) {
        let prio = clamp_priority(prio);
        self.static_prio = prio;
        self.dynamic_prio = prio;
    }

    /// Marca como pronta
    pub fn set_ready(&mut self) {
        self.state = TaskState::Ready;
    }

    /// Marca como suspensa
    pub fn set_suspended(&mut self) {
        self.state = TaskState::Suspended;
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("tid", &self.tid)
            .field("name", &self.name())
            .field("state", &self.state)
            .field("static_prio", &self.static_prio)
            .field("dynamic_prio", &self.dynamic_prio)
            .field("flags", &self.flags)
            .field("accounting", &self.accounting)
            .finish()
    }
}
