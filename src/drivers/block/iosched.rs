//! Escalonador de requisições de disco
//!
//! Escolhe, sem remover, qual requisição pendente vai ao dispositivo.
//!
//! | Política | Critério                                              |
//! |----------|-------------------------------------------------------|
//! | FCFS     | Ordem de chegada                                      |
//! | SSTF     | Menor `|bloco - cabeça|`                              |
//! | CSCAN    | Menor distância à frente; senão o menor bloco (volta) |
//!
//! Empates em SSTF/CSCAN: vence a primeira encontrada na varredura.

use super::request::DiskRequest;
use alloc::collections::VecDeque;

/// Política de escalonamento de disco
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoPolicy {
    /// First Come, First Served
    Fcfs,
    /// Shortest Seek Time First
    Sstf,
    /// Circular Scan
    Cscan,
}

impl IoPolicy {
    /// Política padrão (escolhida por feature em tempo de compilação)
    #[cfg(feature = "iosched_fcfs")]
    pub const DEFAULT: IoPolicy = IoPolicy::Fcfs;
    #[cfg(all(feature = "iosched_sstf", not(feature = "iosched_fcfs")))]
    pub const DEFAULT: IoPolicy = IoPolicy::Sstf;
    #[cfg(not(any(feature = "iosched_fcfs", feature = "iosched_sstf")))]
    pub const DEFAULT: IoPolicy = IoPolicy::Cscan;

    /// Nome usado no relatório
    pub const fn name(self) -> &'static str {
        match self {
            IoPolicy::Fcfs => "FCFS",
            IoPolicy::Sstf => "SSTF",
            IoPolicy::Cscan => "CSCAN",
        }
    }

    /// Índice da próxima requisição em `pending`, ou `None` se vazio
    pub fn select_next(self, pending: &VecDeque<DiskRequest>, head: u64) -> Option<usize> {
        if pending.is_empty() {
            return None;
        }
        match self {
            IoPolicy::Fcfs => Some(0),
            IoPolicy::Sstf => sstf(pending, head),
            IoPolicy::Cscan => cscan(pending, head),
        }
    }
}

impl Default for IoPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn sstf(pending: &VecDeque<DiskRequest>, head: u64) -> Option<usize> {
    let mut best: Option<(u64, usize)> = None;
    for (i, req) in pending.iter().enumerate() {
        let distance = req.block.abs_diff(head);
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, i));
        }
    }
    best.map(|(_, i)| i)
}

fn cscan(pending: &VecDeque<DiskRequest>, head: u64) -> Option<usize> {
    // (distância à frente, índice) e (bloco, índice) para a volta
    let mut forward: Option<(u64, usize)> = None;
    let mut wrap: Option<(u64, usize)> = None;

    for (i, req) in pending.iter().enumerate() {
        if req.block >= head {
            let distance = req.block - head;
            if forward.map_or(true, |(d, _)| distance < d) {
                forward = Some((distance, i));
            }
        } else if wrap.map_or(true, |(b, _)| req.block < b) {
            wrap = Some((req.block, i));
        }
    }

    forward.or(wrap).map(|(_, i)| i)
}
