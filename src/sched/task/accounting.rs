//! Contabilidade de Recursos (Accounting)
//!
//! Este módulo é responsável por rastrear o consumo de CPU de cada tarefa:
//! tempo de processador, ativações e marcas de tempo de escalonamento.
//! Tudo em ticks do relógio do sistema.

use crate::sys::Tid;

/// Estatísticas de uso de recursos de uma tarefa
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accounting {
    /// Tick de criação da tarefa
    pub created_at: u64,

    /// Tempo total de CPU consumido (ticks)
    pub cpu_time: u64,

    /// Início da fatia em andamento. `None` fora da CPU.
    pub slice_start: Option<u64>,

    /// Número de vezes que a tarefa recebeu a CPU
    pub activations: u64,

    /// Quantum restante (ticks). Pode ficar negativo com o portão fechado.
    pub quantum: i32,
}

impl Accounting {
    /// Contabilidade zerada para uma tarefa criada em `now`
    pub fn new(now: u64, quantum: i32) -> Self {
        Self {
            created_at: now,
            quantum,
            ..Self::default()
        }
    }

    /// Registra o início da execução (chamado quando a task ganha a CPU)
    pub fn start_exec(&mut self, now: u64, quantum: i32) {
        self.activations += 1;
        self.slice_start = Some(now);
        self.quantum = quantum;
    }

    /// Registra o fim da execução (chamado quando a task perde a CPU)
    /// Retorna o tempo executado nesta fatia.
    pub fn end_exec(&mut self, now: u64) -> u64 {
        match self.slice_start.take() {
            Some(start) if now >= start => {
                let delta = now - start;
                self.cpu_time += delta;
                delta
            }
            // Sem fatia aberta (ou relógio voltou no tempo?) Ignora.
            _ => 0,
        }
    }

    /// Consome um tick do quantum. Retorna o quantum restante.
    pub fn charge_tick(&mut self) -> i32 {
        self.quantum -= 1;
        self.quantum
    }

    /// Tempo de vida até `now`
    pub fn lifetime(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }
}

/// Relatório final de uma tarefa terminada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskReport {
    pub tid: Tid,
    /// `now - created_at` no término
    pub lifetime: u64,
    /// Tempo de processador acumulado
    pub cpu_time: u64,
    pub activations: u64,
    pub exit_code: i32,
}

impl TaskReport {
    /// Emite a linha legível do relatório.
    ///
    /// Vai direto para a serial: o relatório é saída do sistema, não log,
    /// e sobrevive à feature `no_logs`.
    pub fn emit(&self) {
        use crate::drivers::serial::{emit_dec, emit_nl, emit_str};

        emit_str("(Task) Tarefa ");
        emit_dec(self.tid.as_u32() as u64);
        emit_str(" encerrada: tempo de execução ");
        emit_dec(self.lifetime);
        emit_str(" ticks, tempo de processador ");
        emit_dec(self.cpu_time);
        emit_str(" ticks, ");
        emit_dec(self.activations);
        emit_str(" ativações");
        emit_nl();
    }
}
