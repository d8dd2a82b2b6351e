//! # Orquestrador de Agendamento
//!
//! `SchedCore` guarda o estado do escalonador (tabela de tasks, ready set,
//! task corrente, wait queues, relógio, portão). `Kernel` junta o núcleo,
//! o timer periódico e o gerenciador de disco, e roda o loop de despacho.
//!
//! ## Loop de despacho
//! Um passo de task = um tick de CPU:
//! 1. acorda o gerenciador de disco estacionado se houver trabalho
//! 2. sem task corrente: seleciona (aging) e faz o hand-off-in
//! 3. executa um passo do corpo
//! 4. entrega o tick (relógio, dispositivo, quantum)
//! 5. aplica o resultado: término, suspensão, yield ou preempção
//!
//! Sem task pronta e com o disco ocupado, o tick passa ocioso.

mod context;
mod hooks;
mod tick;

pub use context::TaskContext;

use crate::core::time::Clock;
use crate::drivers::block::manager::{self, DiskManager, DiskStats, ShutdownHandle};
use crate::drivers::block::{BlockError, DiskDevice, Geometry, IoPolicy};
use crate::drivers::timer::IntervalTimer;
use crate::sched::config::SchedConfig;
use crate::sched::scheduler::Scheduler;
use crate::sched::sync::{WaitQueue, WaitQueueId};
use crate::sched::task::{Step, Task, TaskBody, TaskFlags, TaskRef, TaskReport, TaskState, TaskTable};
use crate::sync::PreemptGate;
use crate::sys::{Errno, KResult, Tid};
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Estado do escalonador
pub struct SchedCore {
    pub(crate) config: SchedConfig,
    pub(crate) clock: Clock,
    pub(crate) gate: Arc<PreemptGate>,
    pub(crate) tasks: TaskTable,
    pub(crate) scheduler: Scheduler,
    pub(crate) current: Option<TaskRef>,
    pub(crate) wait_queues: Vec<WaitQueue>,
    pub(crate) reports: Vec<TaskReport>,
    pub(crate) need_resched: bool,
    pub(crate) shutdown: ShutdownHandle,
}

impl SchedCore {
    fn new(config: SchedConfig) -> Self {
        Self {
            config,
            clock: Clock::new(),
            gate: Arc::new(PreemptGate::new()),
            tasks: TaskTable::new(),
            scheduler: Scheduler::new(&config),
            current: None,
            wait_queues: Vec::new(),
            reports: Vec::new(),
            need_resched: false,
            shutdown: ShutdownHandle::new(),
        }
    }

    /// Cria task com ID novo e coloca no ready set
    pub(crate) fn insert_task(
        &mut self,
        name: &str,
        flags: TaskFlags,
        body: Box<dyn TaskBody>,
    ) -> TaskRef {
        let tid = self.tasks.alloc_tid();
        self.admit(tid, name, flags, body)
    }

    fn admit(&mut self, tid: Tid, name: &str, flags: TaskFlags, body: Box<dyn TaskBody>) -> TaskRef {
        let _guard = self.gate.disable();

        let mut task = Task::new(tid, name, flags, body, self.clock.now(), self.config.quantum);
        task.set_ready();
        let system = task.is_system();
        let r = self.tasks.insert(task);
        self.scheduler.enqueue(r);

        if system {
            crate::kdebug!("(Sched) Tarefa de sistema criada, T", tid.as_u32());
        } else {
            crate::kdebug!("(Sched) Tarefa criada, T", tid.as_u32());
        }
        r
    }

    /// Seleciona a próxima task e a retira do ready set
    pub(crate) fn pick_next(&mut self) -> Option<TaskRef> {
        let _guard = self.gate.disable();
        self.scheduler.pick_next(&mut self.tasks)
    }

    /// Hand-off-in
    pub(crate) fn switch_in(&mut self, next: TaskRef) {
        let _guard = self.gate.disable();
        let now = self.clock.now();
        if let Some(task) = self.tasks.get_mut(next) {
            hooks::after_switch(task, now, self.config.quantum);
            task.state = TaskState::Running;
        }
        self.current = Some(next);
        self.need_resched = false;
    }

    /// Hand-off-out da task corrente. `requeue`: volta ao ready set.
    pub(crate) fn switch_out(&mut self, requeue: bool) {
        let _guard = self.gate.disable();
        let Some(current) = self.current.take() else {
            return;
        };
        let now = self.clock.now();
        if let Some(task) = self.tasks.get_mut(current) {
            hooks::before_switch(task, now);
            if requeue {
                task.set_ready();
                self.scheduler.enqueue(current);
            }
        }
        self.need_resched = false;
    }

    /// Termina a task corrente: fatia final, relatório e remoção.
    pub(crate) fn exit_current(&mut self, code: i32) -> Option<TaskReport> {
        let _guard = self.gate.disable();
        let current = self.current.take()?;
        let now = self.clock.now();

        let task = self.tasks.get_mut(current)?;
        let report = hooks::task_exit(task, now, code);
        task.state = TaskState::Terminated;
        let bootstrap = task.flags.contains(TaskFlags::BOOTSTRAP);

        report.emit();
        self.reports.push(report);

        for queue in self.wait_queues.iter_mut() {
            queue.remove(current);
        }
        self.tasks.remove(current);
        self.need_resched = false;

        if bootstrap {
            self.shutdown.request();
        }
        Some(report)
    }

    /// Marca a task como suspensa (sai do ready set se estiver nele)
    pub(crate) fn mark_suspended(&mut self, r: TaskRef) -> KResult<()> {
        let _guard = self.gate.disable();
        let task = self.tasks.get_mut(r).ok_or(Errno::ESRCH)?;
        match task.state {
            TaskState::Running | TaskState::Ready | TaskState::New => {}
            TaskState::Suspended | TaskState::Terminated => return Err(Errno::EINVAL),
        }
        task.set_suspended();
        self.scheduler.remove(r);
        Ok(())
    }

    /// Devolve uma task suspensa ao ready set
    pub(crate) fn make_ready(&mut self, r: TaskRef) -> KResult<()> {
        let _guard = self.gate.disable();
        let task = self.tasks.get_mut(r).ok_or(Errno::ESRCH)?;
        if task.state != TaskState::Suspended {
            return Err(Errno::EINVAL);
        }
        // Acordada no mesmo passo em que se suspendeu: continua na CPU
        if self.current == Some(r) {
            task.state = TaskState::Running;
            return Ok(());
        }
        task.set_ready();
        self.scheduler.enqueue(r);
        Ok(())
    }

    pub(crate) fn priority(&self, r: TaskRef) -> KResult<i32> {
        self.tasks.get(r).map(|t| t.static_prio).ok_or(Errno::ESRCH)
    }

    pub(crate) fn set_priority(&mut self, r: TaskRef, prio: i32) -> KResult<()> {
        let _guard = self.gate.disable();
        let task = self.tasks.get_mut(r).ok_or(Errno::ESRCH)?;
        task.set_priority(prio);
        Ok(())
    }

    pub(crate) fn create_wait_queue(&mut self) -> WaitQueueId {
        self.wait_queues.push(WaitQueue::new());
        WaitQueueId(self.wait_queues.len() - 1)
    }

    /// Suspende `r` na wait queue `queue`
    pub(crate) fn suspend_on(&mut self, r: TaskRef, queue: WaitQueueId) -> KResult<()> {
        if queue.0 >= self.wait_queues.len() {
            return Err(Errno::EINVAL);
        }
        self.mark_suspended(r)?;
        self.wait_queues[queue.0].push(r);
        Ok(())
    }

    /// Acorda a primeira task viva da fila
    pub(crate) fn resume_one(&mut self, queue: WaitQueueId) -> KResult<Option<Tid>> {
        let _guard = self.gate.disable();
        loop {
            let next = self
                .wait_queues
                .get_mut(queue.0)
                .ok_or(Errno::EINVAL)?
                .pop();
            let Some(r) = next else {
                return Ok(None);
            };
            if self.make_ready(r).is_ok() {
                return Ok(self.tasks.get(r).map(|t| t.tid));
            }
        }
    }
}

/// Como terminou uma chamada a `Kernel::run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Todas as tasks terminaram
    Finished,
    /// Há tasks vivas mas nenhuma pode progredir
    Stalled,
    /// Limite de ticks atingido
    BudgetExhausted,
}

/// Resumo de uma execução
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// Ticks decorridos nesta chamada
    pub ticks: u64,
    /// Passos de task executados
    pub steps: u64,
    /// Ticks sem task na CPU (esperando o disco)
    pub idle_ticks: u64,
}

/// Núcleo: escalonador + timer + disco
pub struct Kernel {
    core: SchedCore,
    disk: Option<DiskManager>,
    timer: IntervalTimer,
}

impl Kernel {
    /// Cria o núcleo e arma o timer periódico.
    ///
    /// # Panics
    /// Intervalo de timer inválido: sem timer o sistema não funciona.
    pub fn new(config: SchedConfig) -> Self {
        let mut timer = IntervalTimer::new();
        if let Err(err) = timer.arm(config.timer_interval_us) {
            crate::kerror!("(Timer) Falha ao armar o timer, intervalo=", config.timer_interval_us);
            panic!("timer periódico: {}", err);
        }

        crate::kinfo!("(Sched) Núcleo inicializado, quantum=", config.quantum);
        Self {
            core: SchedCore::new(config),
            disk: None,
            timer,
        }
    }

    pub fn config(&self) -> &SchedConfig {
        &self.core.config
    }

    /// Cria a tarefa principal (ID 0, sistema). Seu término pede o
    /// shutdown do disco.
    pub fn spawn_main<B: TaskBody + 'static>(&mut self, body: B) -> KResult<TaskRef> {
        if self.core.tasks.find(Tid::MAIN).is_some()
            || self.core.reports.iter().any(|r| r.tid == Tid::MAIN)
        {
            return Err(Errno::EBUSY);
        }
        Ok(self
            .core
            .admit(Tid::MAIN, "main", TaskFlags::BOOTSTRAP, Box::new(body)))
    }

    /// Cria uma tarefa de usuário
    pub fn spawn<B: TaskBody + 'static>(&mut self, name: &str, body: B) -> TaskRef {
        self.core.insert_task(name, TaskFlags::empty(), Box::new(body))
    }

    /// Cria uma tarefa de usuário com prioridade estática inicial
    pub fn spawn_with_priority<B: TaskBody + 'static>(
        &mut self,
        name: &str,
        prio: i32,
        body: B,
    ) -> TaskRef {
        let r = self.spawn(name, body);
        if let Some(task) = self.core.tasks.get_mut(r) {
            task.set_priority(prio);
        }
        r
    }

    pub fn now(&self) -> u64 {
        self.core.clock.now()
    }

    pub fn task(&self, r: TaskRef) -> Option<&Task> {
        self.core.tasks.get(r)
    }

    pub fn find(&self, tid: Tid) -> Option<TaskRef> {
        self.core.tasks.find(tid)
    }

    pub fn live_tasks(&self) -> usize {
        self.core.tasks.len()
    }

    pub fn ready_len(&self) -> usize {
        self.core.scheduler.len()
    }

    pub fn current(&self) -> Option<TaskRef> {
        self.core.current
    }

    pub fn priority(&self, r: TaskRef) -> KResult<i32> {
        self.core.priority(r)
    }

    pub fn set_priority(&mut self, r: TaskRef, prio: i32) -> KResult<()> {
        self.core.set_priority(r, prio)
    }

    pub fn create_wait_queue(&mut self) -> WaitQueueId {
        self.core.create_wait_queue()
    }

    pub fn resume_one(&mut self, queue: WaitQueueId) -> KResult<Option<Tid>> {
        self.core.resume_one(queue)
    }

    pub fn preempt_gate(&self) -> &Arc<PreemptGate> {
        &self.core.gate
    }

    /// Relatórios de término, na ordem em que as tasks terminaram
    pub fn reports(&self) -> &[TaskReport] {
        &self.core.reports
    }

    pub fn report_for(&self, tid: Tid) -> Option<&TaskReport> {
        self.core.reports.iter().find(|r| r.tid == tid)
    }

    /// Inicializa o disco e cria o gerenciador (tarefa de sistema)
    pub fn disk_init(
        &mut self,
        device: Arc<dyn DiskDevice>,
        policy: IoPolicy,
    ) -> Result<Geometry, BlockError> {
        manager::disk_init(&mut self.core, &mut self.disk, device, policy)
    }

    pub fn disk(&self) -> Option<&DiskManager> {
        self.disk.as_ref()
    }

    pub fn disk_stats(&self) -> Option<DiskStats> {
        self.disk.as_ref().map(|d| d.stats())
    }

    /// Solicita o encerramento gracioso do gerenciador de disco
    pub fn disk_shutdown(&self) {
        self.core.shutdown.request();
    }

    /// Handle de shutdown utilizável de outra thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.core.shutdown.clone()
    }

    /// Roda até todas as tasks terminarem ou nada mais poder progredir
    pub fn run(&mut self) -> RunSummary {
        self.run_inner(None)
    }

    /// Roda no máximo `max_ticks` ticks
    pub fn run_for(&mut self, max_ticks: u64) -> RunSummary {
        self.run_inner(Some(max_ticks))
    }

    fn run_inner(&mut self, limit: Option<u64>) -> RunSummary {
        let start = self.core.clock.now();
        let mut steps = 0;
        let mut idle_ticks = 0;

        let outcome = loop {
            let elapsed = self.core.clock.now() - start;
            if limit.is_some_and(|max| elapsed >= max) {
                break RunOutcome::BudgetExhausted;
            }

            self.poll_devices();

            if self.core.current.is_none() {
                match self.core.pick_next() {
                    Some(next) => self.core.switch_in(next),
                    None if self.disk.as_ref().is_some_and(|d| d.is_busy()) => {
                        self.cpu_tick();
                        idle_ticks += 1;
                        continue;
                    }
                    None if self.core.tasks.is_empty() => break RunOutcome::Finished,
                    None => {
                        crate::kwarn!("(Sched) Nenhuma task pode progredir, vivas=", self.core.tasks.len());
                        break RunOutcome::Stalled;
                    }
                }
            }

            self.execute_step();
            steps += 1;
        };

        RunSummary {
            outcome,
            ticks: self.core.clock.now() - start,
            steps,
            idle_ticks,
        }
    }

    /// Interrupções "como mensagens": IRQ de disco e pedido de shutdown
    fn poll_devices(&mut self) {
        if let Some(disk) = self.disk.as_mut() {
            disk.poll_wakeup(&mut self.core);
        }
    }

    /// Tick de CPU: timer + dispositivo
    fn cpu_tick(&mut self) {
        if !self.timer.fire() {
            return;
        }
        if let Some(disk) = self.disk.as_ref() {
            disk.device().tick();
        }
        tick::timer_interrupt(&mut self.core);
    }

    /// Executa um passo da task corrente
    fn execute_step(&mut self) {
        let Some(me) = self.core.current else {
            return;
        };
        let Some(mut body) = self.core.tasks.get_mut(me).and_then(|t| t.body.take()) else {
            crate::kerror!("(Sched) Task corrente sem corpo executável");
            self.core.exit_current(-1);
            return;
        };

        let step = {
            let mut ctx = TaskContext {
                core: &mut self.core,
                disk: &mut self.disk,
                me,
            };
            body.step(&mut ctx)
        };

        if let Some(task) = self.core.tasks.get_mut(me) {
            task.body = Some(body);
        }

        self.cpu_tick();

        let suspended = self
            .core
            .tasks
            .get(me)
            .is_some_and(|t| t.state == TaskState::Suspended);

        match step {
            Step::Exit(code) => {
                if let Some(disk) = self.disk.as_mut() {
                    disk.forget(me);
                }
                self.core.exit_current(code);
            }
            _ if suspended => self.core.switch_out(false),
            Step::Yield => self.core.switch_out(true),
            Step::Continue if self.core.need_resched => self.core.switch_out(true),
            Step::Continue => {}
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new(SchedConfig::default())
    }
}
