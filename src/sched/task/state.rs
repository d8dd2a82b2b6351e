//! Estados de task

/// Estado de uma task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Recém criada, ainda não entrou no ready set
    New,
    /// Pronta para executar (membro do ready set)
    Ready,
    /// Dona da CPU
    Running,
    /// Bloqueada numa wait queue
    Suspended,
    /// Terminada, relatório já emitido
    Terminated,
}

