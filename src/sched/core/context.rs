//! Contexto de execução de uma task
//!
//! `TaskContext` é tudo o que o corpo de uma task enxerga do núcleo
//! durante um passo: relógio, prioridades, criação de tasks, wait queues,
//! portão de preempção e o disco.

use super::SchedCore;
use crate::drivers::block::manager::{self, DiskManager};
use crate::drivers::block::{BlockError, DiskDevice, DiskOp, Geometry, IoCompletion, IoPolicy};
use crate::sched::sync::WaitQueueId;
use crate::sched::task::{TaskBody, TaskFlags, TaskRef, TaskState};
use crate::sync::PreemptGuard;
use crate::sys::{KResult, Tid};
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Acesso ao núcleo a partir de um passo da task `me`
pub struct TaskContext<'a> {
    pub(crate) core: &'a mut SchedCore,
    pub(crate) disk: &'a mut Option<DiskManager>,
    pub(crate) me: TaskRef,
}

impl<'a> TaskContext<'a> {
    /// ID da task em execução
    pub fn id(&self) -> Tid {
        self.core.tasks.get(self.me).map_or(Tid::DISPATCHER, |t| t.tid)
    }

    /// Handle da task em execução
    pub fn task_ref(&self) -> TaskRef {
        self.me
    }

    /// Relógio do sistema (systime)
    pub fn now(&self) -> u64 {
        self.core.clock.now()
    }

    /// Quantum restante da task em execução
    pub fn quantum(&self) -> i32 {
        self.core
            .tasks
            .get(self.me)
            .map_or(0, |t| t.accounting.quantum)
    }

    /// Prioridade estática (`None` = a própria task)
    pub fn priority(&self, target: Option<TaskRef>) -> KResult<i32> {
        self.core.priority(target.unwrap_or(self.me))
    }

    /// Define a prioridade estática (com clamp). `None` = a própria task.
    pub fn set_priority(&mut self, target: Option<TaskRef>, prio: i32) -> KResult<()> {
        self.core.set_priority(target.unwrap_or(self.me), prio)
    }

    /// Estado de uma task (`None` se já terminou)
    pub fn task_state(&self, target: TaskRef) -> Option<TaskState> {
        self.core.tasks.get(target).map(|t| t.state)
    }

    /// Cria uma task de usuário, pronta para executar
    pub fn spawn<B: TaskBody + 'static>(&mut self, name: &str, body: B) -> TaskRef {
        self.core
            .insert_task(name, TaskFlags::empty(), Box::new(body))
    }

    /// Cria uma wait queue nova
    pub fn create_wait_queue(&mut self) -> WaitQueueId {
        self.core.create_wait_queue()
    }

    /// Suspende a task atual na fila. Sai da CPU ao fim do passo.
    pub fn suspend(&mut self, queue: WaitQueueId) -> KResult<()> {
        self.core.suspend_on(self.me, queue)
    }

    /// Acorda a primeira task da fila
    pub fn resume_one(&mut self, queue: WaitQueueId) -> KResult<Option<Tid>> {
        self.core.resume_one(queue)
    }

    /// Fecha o portão de preempção enquanto o guard viver.
    ///
    /// O guard pode ser guardado no corpo e atravessar vários passos.
    pub fn preempt_disable(&self) -> PreemptGuard {
        self.core.gate.disable()
    }

    /// Inicializa o disco e cria o gerenciador
    pub fn disk_init(
        &mut self,
        device: Arc<dyn DiskDevice>,
        policy: IoPolicy,
    ) -> Result<Geometry, BlockError> {
        manager::disk_init(self.core, self.disk, device, policy)
    }

    /// Geometria do disco inicializado
    pub fn disk_geometry(&self) -> Option<Geometry> {
        self.disk.as_ref().map(|d| d.geometry())
    }

    /// Pede a leitura de `block`. Em caso de sucesso a task fica suspensa;
    /// o conteúdo chega via `take_io()` depois de acordar.
    pub fn disk_block_read(&mut self, block: u64) -> Result<(), BlockError> {
        manager::request(self.core, self.disk, self.me, DiskOp::Read, block, None)
    }

    /// Pede a escrita de `data` (exatamente um bloco) em `block`.
    pub fn disk_block_write(&mut self, block: u64, data: Vec<u8>) -> Result<(), BlockError> {
        manager::request(self.core, self.disk, self.me, DiskOp::Write, block, Some(data))
    }

    /// Solicita o encerramento gracioso do gerenciador de disco
    pub fn disk_shutdown(&self) {
        self.core.shutdown.request();
    }

    /// Recolhe o resultado da última operação de disco
    pub fn take_io(&mut self) -> Option<IoCompletion> {
        self.core.tasks.get_mut(self.me).and_then(|t| t.io.take())
    }
}
