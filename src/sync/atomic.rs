//! Operações atômicas
//!
//! Flags e contadores lock-free usados como "linhas de IRQ" entre o
//! hardware simulado e o loop de despacho.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Wrapper para AtomicBool com API mais limpa
#[derive(Debug, Default)]
pub struct AtomicFlag(AtomicBool);

impl AtomicFlag {
    pub const fn new(value: bool) -> Self {
        Self(AtomicBool::new(value))
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }

    /// Test-and-set: retorna valor anterior
    pub fn test_and_set(&self) -> bool {
        self.0.swap(true, Ordering::AcqRel)
    }

    /// Test-and-clear: retorna valor anterior e zera a flag
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Contador atômico
#[derive(Debug, Default)]
pub struct AtomicCounter(AtomicU64);

impl AtomicCounter {
    pub const fn new(value: u64) -> Self {
        Self(AtomicU64::new(value))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Incrementa e retorna o valor ANTERIOR
    pub fn inc(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel)
    }
}

/// Linha de interrupção de um dispositivo.
///
/// O dispositivo levanta (`raise`), o consumidor consulta e limpa
/// (`acknowledge`) uma vez por iteração do seu loop. Um disparo que chega
/// com a linha já levantada é absorvido: o consumidor vê um único evento.
#[derive(Debug, Default)]
pub struct IrqLine {
    pending: AtomicFlag,
    raised: AtomicCounter,
}

impl IrqLine {
    pub const fn new() -> Self {
        Self {
            pending: AtomicFlag::new(false),
            raised: AtomicCounter::new(0),
        }
    }

    /// Levanta a linha (chamado pelo dispositivo).
    pub fn raise(&self) {
        self.raised.inc();
        self.pending.set(true);
    }

    /// Há evento pendente?
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Consome o evento pendente. Retorna `true` se havia um.
    pub fn acknowledge(&self) -> bool {
        self.pending.take()
    }

    /// Total de disparos desde a criação.
    pub fn raised_count(&self) -> u64 {
        self.raised.get()
    }
}
