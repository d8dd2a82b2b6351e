//! # Camada de Abstração do Disco
//!
//! Contrato entre o gerenciador de disco e o dispositivo (real ou simulado).
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │        TASKS (disk_block_read / disk_block_write)   │
//! └─────────────────────────────────────────────────────┘
//!                          ↓
//! ┌─────────────────────────────────────────────────────┐
//! │   DiskManager + IoPolicy (FCFS / SSTF / CSCAN)      │
//! └─────────────────────────────────────────────────────┘
//!                          ↓
//! ┌─────────────────────────────────────────────────────┐
//! │              DiskDevice Trait                       │
//! │   issue() tick() collect() + IrqLine                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! O dispositivo atende UMA requisição por vez. Ao concluir, levanta a
//! `IrqLine` e guarda o buffer até o gerenciador chamar `collect()`.

use crate::sync::IrqLine;
use crate::sys::Errno;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Tipos de erro para dispositivos de bloco
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockError {
    /// Disco não inicializado, ou gerenciador já encerrado
    NotFound,
    /// Endereço de bloco inválido (fora do intervalo)
    InvalidBlock,
    /// Erro de I/O durante leitura/escrita
    IoError,
    /// Buffer ausente ou com tamanho diferente do bloco
    InvalidBuffer,
    /// Dispositivo ocupado
    Busy,
    /// Geometria inválida ou falha de hardware
    HardwareError,
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::NotFound => write!(f, "Disco não encontrado"),
            BlockError::InvalidBlock => write!(f, "Endereço de bloco inválido"),
            BlockError::IoError => write!(f, "Erro de I/O"),
            BlockError::InvalidBuffer => write!(f, "Buffer inválido"),
            BlockError::Busy => write!(f, "Dispositivo ocupado"),
            BlockError::HardwareError => write!(f, "Erro de hardware"),
        }
    }
}

impl From<BlockError> for Errno {
    fn from(err: BlockError) -> Self {
        match err {
            BlockError::NotFound => Errno::ENODEV,
            BlockError::InvalidBlock | BlockError::InvalidBuffer => Errno::EINVAL,
            BlockError::IoError => Errno::EIO,
            BlockError::Busy => Errno::EBUSY,
            BlockError::HardwareError => Errno::ENXIO,
        }
    }
}

/// Operação de disco
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskOp {
    Read,
    Write,
}

/// Geometria do disco
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Número total de blocos
    pub num_blocks: u64,
    /// Tamanho do bloco em bytes
    pub block_size: usize,
}

impl Geometry {
    /// Calcula o tamanho total em bytes
    pub fn size_bytes(&self) -> u64 {
        self.num_blocks * self.block_size as u64
    }
}

/// Trait para dispositivos de disco
///
/// # Exemplo
///
/// ```ignore
/// device.init()?;
/// device.attach_irq(irq.clone());
/// device.issue(DiskOp::Read, 42, vec![0; device.block_size()])?;
/// // ... ticks ...
/// if irq.acknowledge() {
///     let data = device.collect();
/// }
/// ```
pub trait DiskDevice: Send + Sync {
    /// Prepara o dispositivo
    fn init(&self) -> Result<(), BlockError>;

    /// Retorna o número total de blocos
    fn total_blocks(&self) -> u64;

    /// Retorna o tamanho do bloco em bytes
    fn block_size(&self) -> usize;

    /// Conecta a linha de interrupção de conclusão
    fn attach_irq(&self, irq: Arc<IrqLine>);

    /// Inicia uma operação. O buffer fica com o dispositivo até a conclusão.
    ///
    /// # Argumentos
    /// * `block` - Bloco alvo
    /// * `buffer` - Exatamente `block_size()` bytes (dados a escrever, ou
    ///   área que receberá a leitura)
    fn issue(&self, op: DiskOp, block: u64, buffer: Vec<u8>) -> Result<(), BlockError>;

    /// Um tick de tempo do dispositivo (latência simulada)
    fn tick(&self);

    /// Recolhe o buffer da operação concluída
    fn collect(&self) -> Option<Vec<u8>>;
}
