//! # Disco
//!
//! Escalonamento de requisições e gerenciador de disco.
//!
//! | Módulo     | Descrição                                         |
//! |------------|---------------------------------------------------|
//! | `traits`   | `DiskDevice`, `BlockError`, geometria             |
//! | `request`  | Requisição pendente e resultado entregue à task   |
//! | `iosched`  | Políticas FCFS / SSTF / CSCAN                     |
//! | `manager`  | Tarefa gerenciadora e protocolo do requisitante   |
//! | `vdisk`    | Disco virtual em memória com latência de seek     |

pub mod iosched;
pub mod manager;
pub mod request;
pub mod traits;
pub mod vdisk;


pub use iosched::IoPolicy;
pub use manager::{DiskManager, DiskStats, ShutdownHandle};
pub use request::{DiskRequest, IoCompletion};
pub use traits::{BlockError, DiskDevice, DiskOp, Geometry};
pub use vdisk::{VirtualDisk, VirtualDiskConfig};
