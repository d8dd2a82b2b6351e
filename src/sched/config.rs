//! Constantes de configuração do Scheduler
//!
//! Convenção de prioridade: número MENOR = MAIS urgente.

/// Maior prioridade (teto do aging)
pub const PRIORITY_MAX: i32 = -20;

/// Menor prioridade
pub const PRIORITY_MIN: i32 = 20;

/// Prioridade padrão para tarefas novas
pub const PRIORITY_DEFAULT: i32 = 0;

/// Passo de aging aplicado às tarefas não escolhidas
pub const AGING_STEP: i32 = -1;

/// Quantum padrão (Timeslice) em ticks do timer
pub const DEFAULT_QUANTUM: i32 = 20;

/// Intervalo do timer periódico em microssegundos (1 tick = 1 ms)
pub const TIMER_INTERVAL_US: u64 = 1000;

/// Configuração do escalonador em tempo de execução.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedConfig {
    /// Orçamento de ticks concedido a cada ativação de tarefa de usuário
    pub quantum: i32,
    /// Passo de aging (negativo: aproxima do teto)
    pub aging_step: i32,
    /// Teto de prioridade que o aging não ultrapassa
    pub priority_ceiling: i32,
    /// Intervalo do timer em µs
    pub timer_interval_us: u64,
}

impl SchedConfig {
    pub const fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            aging_step: AGING_STEP,
            priority_ceiling: PRIORITY_MAX,
            timer_interval_us: TIMER_INTERVAL_US,
        }
    }

    /// Mesma configuração com outro quantum.
    pub const fn with_quantum(mut self, quantum: i32) -> Self {
        self.quantum = quantum;
        self
    }
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Limita uma prioridade estática ao intervalo válido.
#[inline]
pub const fn clamp_priority(prio: i32) -> i32 {
    if prio < PRIORITY_MAX {
        PRIORITY_MAX
    } else if prio > PRIORITY_MIN {
        PRIORITY_MIN
    } else {
        prio
    }
}
