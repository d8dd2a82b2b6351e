//! Timer periódico do sistema.
//!
//! Fonte do "heartbeat" do núcleo. No despachante simulado ele dispara uma
//! vez por tick de CPU (um passo de task ou um tick ocioso); o handler que
//! avança o relógio e cobra o quantum fica em `sched::core::tick`.
//!
//! # Responsabilidades
//! 1. Validar e guardar o intervalo configurado (µs).
//! 2. Contar disparos.
//!
//! # Limitações
//! - Intervalo entre 1 µs e 1 s.

use crate::sync::AtomicCounter;
use crate::sys::Errno;

/// Maior intervalo aceito (1 s)
const MAX_INTERVAL_US: u64 = 1_000_000;

/// Timer de intervalo fixo
#[derive(Debug, Default)]
pub struct IntervalTimer {
    interval_us: u64,
    armed: bool,
    fired: AtomicCounter,
}

impl IntervalTimer {
    /// Timer desarmado
    pub const fn new() -> Self {
        Self {
            interval_us: 0,
            armed: false,
            fired: AtomicCounter::new(0),
        }
    }

    /// Arma o timer com o intervalo dado (µs).
    ///
    /// # Returns
    /// * `Err(Errno::EINVAL)`: intervalo 0 ou acima de 1 s.
    pub fn arm(&mut self, interval_us: u64) -> Result<(), Errno> {
        if interval_us == 0 || interval_us > MAX_INTERVAL_US {
            crate::kwarn!("(Timer) Intervalo inválido: ", interval_us);
            return Err(Errno::EINVAL);
        }
        self.interval_us = interval_us;
        self.armed = true;
        crate::kdebug!("(Timer) Armado, intervalo em us=", interval_us);
        Ok(())
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn interval_us(&self) -> u64 {
        self.interval_us
    }

    /// Um disparo. Retorna `false` se o timer não está armado.
    pub fn fire(&self) -> bool {
        if !self.armed {
            return false;
        }
        self.fired.inc();
        true
    }

    /// Disparos desde que foi armado
    pub fn fired_count(&self) -> u64 {
        self.fired.get()
    }
}
