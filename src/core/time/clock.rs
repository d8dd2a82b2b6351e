//! Arquivo: core/time/clock.rs
//!
//! Propósito: Relógio do sistema (ticks desde o boot).
//! Um tick corresponde a um disparo do timer periódico (1 ms com a
//! configuração padrão). É o "systime" que todas as outras partes consultam.
//!
//! Detalhes de Implementação:
//! - Usa AtomicU64 para ser lock-free e consultável por `&self`.
//! - Incrementado APENAS pelo handler do tick (`sched::core::tick`).
//! - Monotônico: não existe operação para voltar no tempo.

use core::sync::atomic::{AtomicU64, Ordering};

/// Contador de ticks do sistema.
#[derive(Debug, Default)]
pub struct Clock {
    ticks: AtomicU64,
}

impl Clock {
    /// Relógio novo, parado em zero.
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
        }
    }

    /// Retorna o número atual de ticks.
    #[inline]
    pub fn now(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Avança um tick e retorna o novo valor.
    #[inline]
    pub(crate) fn advance(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Converte ticks em milissegundos dado o intervalo do timer (µs).
#[inline]
pub const fn ticks_to_millis(ticks: u64, interval_us: u64) -> u64 {
    (ticks * interval_us) / 1000
}
