//! Disco virtual
//!
//! Mídia em memória com uma cabeça de leitura simulada. Cada operação
//! leva `base_latency + distância / seek_divisor` ticks (no mínimo 1).
//! Na conclusão o disco copia os dados, move a cabeça e levanta a IRQ.

use super::traits::{BlockError, DiskDevice, DiskOp};
use crate::sync::IrqLine;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use spin::Mutex;

/// Parâmetros do disco simulado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualDiskConfig {
    pub num_blocks: u64,
    pub block_size: usize,
    /// Ticks fixos por operação
    pub base_latency: u64,
    /// Blocos percorridos por tick de seek (0 = seek gratuito)
    pub seek_divisor: u64,
}

impl VirtualDiskConfig {
    pub const fn new(num_blocks: u64, block_size: usize) -> Self {
        Self {
            num_blocks,
            block_size,
            base_latency: 2,
            seek_divisor: 16,
        }
    }

    /// Mesma geometria com outra latência
    pub const fn with_latency(mut self, base_latency: u64, seek_divisor: u64) -> Self {
        self.base_latency = base_latency;
        self.seek_divisor = seek_divisor;
        self
    }

    fn latency(&self, from: u64, to: u64) -> u64 {
        let seek = match self.seek_divisor {
            0 => 0,
            d => from.abs_diff(to) / d,
        };
        (self.base_latency + seek).max(1)
    }
}

impl Default for VirtualDiskConfig {
    fn default() -> Self {
        Self::new(256, 64)
    }
}

struct InFlight {
    op: DiskOp,
    block: u64,
    buffer: Vec<u8>,
    remaining: u64,
}

struct VdiskState {
    initialized: bool,
    media: Vec<u8>,
    head: u64,
    inflight: Option<InFlight>,
    done: Option<Vec<u8>>,
    irq: Option<Arc<IrqLine>>,
    completed: u64,
}

/// Disco virtual em memória
pub struct VirtualDisk {
    config: VirtualDiskConfig,
    state: Mutex<VdiskState>,
}

impl VirtualDisk {
    pub fn new(config: VirtualDiskConfig) -> Self {
        Self {
            config,
            state: Mutex::new(VdiskState {
                initialized: false,
                media: Vec::new(),
                head: 0,
                inflight: None,
                done: None,
                irq: None,
                completed: 0,
            }),
        }
    }

    pub fn config(&self) -> &VirtualDiskConfig {
        &self.config
    }

    /// Posição física da cabeça
    pub fn head(&self) -> u64 {
        self.state.lock().head
    }

    /// Operações concluídas desde o `init`
    pub fn completed(&self) -> u64 {
        self.state.lock().completed
    }

    /// Lê um bloco diretamente da mídia (inspeção, sem latência)
    pub fn peek(&self, block: u64) -> Option<Vec<u8>> {
        let state = self.state.lock();
        let range = self.block_range(block)?;
        state.media.get(range).map(|bytes| bytes.to_vec())
    }

    fn block_range(&self, block: u64) -> Option<core::ops::Range<usize>> {
        if block >= self.config.num_blocks {
            return None;
        }
        let start = block as usize * self.config.block_size;
        Some(start..start + self.config.block_size)
    }
}

impl DiskDevice for VirtualDisk {
    fn init(&self) -> Result<(), BlockError> {
        let mut state = self.state.lock();
        if state.initialized {
            return Ok(());
        }
        let size = (self.config.num_blocks as usize)
            .checked_mul(self.config.block_size)
            .ok_or(BlockError::HardwareError)?;
        state.media = vec![0; size];
        state.initialized = true;
        crate::kdebug!("(VDisk) Mídia alocada, blocos=", self.config.num_blocks);
        Ok(())
    }

    fn total_blocks(&self) -> u64 {
        self.config.num_blocks
    }

    fn block_size(&self) -> usize {
        self.config.block_size
    }

    fn attach_irq(&self, irq: Arc<IrqLine>) {
        self.state.lock().irq = Some(irq);
    }

    fn issue(&self, op: DiskOp, block: u64, buffer: Vec<u8>) -> Result<(), BlockError> {
        let mut state = self.state.lock();
        if !state.initialized {
            return Err(BlockError::NotFound);
        }
        if state.inflight.is_some() || state.done.is_some() {
            return Err(BlockError::Busy);
        }
        if block >= self.config.num_blocks {
            return Err(BlockError::InvalidBlock);
        }
        if buffer.len() != self.config.block_size {
            return Err(BlockError::InvalidBuffer);
        }

        let remaining = self.config.latency(state.head, block);
        crate::ktrace!("(VDisk) Operação aceita, latência=", remaining);
        state.inflight = Some(InFlight {
            op,
            block,
            buffer,
            remaining,
        });
        Ok(())
    }

    fn tick(&self) {
        let mut state = self.state.lock();
        let finished = match state.inflight.as_mut() {
            Some(op) => {
                op.remaining = op.remaining.saturating_sub(1);
                op.remaining == 0
            }
            None => false,
        };
        if !finished {
            return;
        }

        let Some(mut op) = state.inflight.take() else {
            return;
        };
        let Some(range) = self.block_range(op.block) else {
            return;
        };
        match op.op {
            DiskOp::Read => op.buffer.copy_from_slice(&state.media[range]),
            DiskOp::Write => state.media[range].copy_from_slice(&op.buffer),
        }
        state.head = op.block;
        state.done = Some(op.buffer);
        state.completed += 1;

        if let Some(irq) = state.irq.as_ref() {
            irq.raise();
        }
    }

    fn collect(&self) -> Option<Vec<u8>> {
        self.state.lock().done.take()
    }
}
