//! Portão de preempção (Preemption Gate)
//!
//! Fecha a preempção por timer enquanto uma seção crítica mexe em estado
//! compartilhado do escalonador ou do gerenciador de disco.
//!
//! # Quando usar
//!
//! - Seleção de tarefa + aging
//! - Hooks de troca de contexto (contabilização)
//! - Criação/término de tarefas, suspend/resume
//!
//! O portão é um contador reentrante: cada `disable()` devolve um guard e
//! o portão só reabre quando o ÚLTIMO guard é solto. Seções críticas
//! aninhadas, retornos antecipados e `?` liberam corretamente.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Chave liga/desliga da preempção.
#[derive(Debug, Default)]
pub struct PreemptGate {
    depth: AtomicUsize,
}

impl PreemptGate {
    /// Cria portão aberto (preempção habilitada).
    pub const fn new() -> Self {
        Self {
            depth: AtomicUsize::new(0),
        }
    }

    /// Preempção habilitada? (nenhum guard vivo)
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.depth.load(Ordering::Acquire) == 0
    }

    /// Número de seções críticas abertas.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Acquire)
    }

    /// Fecha o portão até o guard sair do escopo.
    pub fn disable(self: &Arc<Self>) -> PreemptGuard {
        self.depth.fetch_add(1, Ordering::AcqRel);
        PreemptGuard {
            gate: Arc::clone(self),
        }
    }
}

/// Guard do portão - reabre (um nível) ao sair do escopo
#[must_use = "a preempção reabre assim que o guard é solto"]
#[derive(Debug)]
pub struct PreemptGuard {
    gate: Arc<PreemptGate>,
}

impl Drop for PreemptGuard {
    fn drop(&mut self) {
        let prev = self.gate.depth.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "PreemptGuard solto com portão aberto");
    }
}
