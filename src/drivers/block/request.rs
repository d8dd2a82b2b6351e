//! Requisições de disco

use super::traits::{BlockError, DiskOp};
use crate::sched::task::TaskRef;
use alloc::vec::Vec;

/// Requisição pendente
#[derive(Debug)]
pub struct DiskRequest {
    /// Task que pediu (fica suspensa até a conclusão)
    pub task: TaskRef,
    pub op: DiskOp,
    pub block: u64,
    /// Dados a escrever, ou área zerada que receberá a leitura
    pub buffer: Vec<u8>,
}

impl DiskRequest {
    pub fn new(task: TaskRef, op: DiskOp, block: u64, buffer: Vec<u8>) -> Self {
        Self {
            task,
            op,
            block,
            buffer,
        }
    }
}

/// Resultado entregue à task quando ela é acordada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoCompletion {
    pub op: DiskOp,
    pub block: u64,
    /// Conteúdo lido, ou o buffer escrito de volta
    pub data: Vec<u8>,
    pub status: Result<(), BlockError>,
}

impl IoCompletion {
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}
