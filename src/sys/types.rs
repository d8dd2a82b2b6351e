//! Tipos fundamentais do sistema

use core::fmt;

/// Task ID
///
/// Monotônico, nunca reutilizado: o desempate do escalonador depende de
/// "menor ID = criada antes".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Tid(pub u32);

impl Tid {
    /// Tarefa principal (bootstrap)
    pub const MAIN: Tid = Tid(0);
    /// Despachante (reservado, nunca executa um corpo)
    pub const DISPATCHER: Tid = Tid(1);
    /// Primeiro ID livre para tarefas criadas pelo usuário
    pub const FIRST_USER: Tid = Tid(2);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Um dos dois IDs reservados de bootstrap?
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_USER.0
    }
}

impl fmt::Display for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
