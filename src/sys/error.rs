//! # Standard Error Codes (Errno)
//!
//! Define os códigos de erro retornados pelas operações do núcleo.
//! Baseado no padrão POSIX para compatibilidade com ferramentas existentes.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Uniformidade:** Operações de tarefa e de disco reportam códigos padronizados.
//! - **Conversion:** `as_isize` produz o valor sentinela negativo (ex: `-22` para EINVAL),
//!   o mesmo contrato de retorno de uma syscall.
//!
//! Erros de argumento são reportados imediatamente, sem alterar estado.

use core::fmt;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    ESRCH = 3,   // No such process
    EIO = 5,     // I/O error
    ENXIO = 6,   // No such device or address
    EBUSY = 16,  // Device or resource busy
    ENODEV = 19, // No such device
    EINVAL = 22, // Invalid argument
}

impl Errno {
    /// Valor sentinela negativo (retorno estilo syscall).
    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Errno::ESRCH => "Tarefa inexistente",
            Errno::EIO => "Erro de I/O",
            Errno::ENXIO => "Endereço de dispositivo inexistente",
            Errno::EBUSY => "Dispositivo ocupado",
            Errno::ENODEV => "Dispositivo inexistente",
            Errno::EINVAL => "Argumento inválido",
        };
        f.write_str(msg)
    }
}

/// Resultado padrão das operações do núcleo.
pub type KResult<T> = Result<T, Errno>;
