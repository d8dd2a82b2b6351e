//! Gerenciador de disco
//!
//! Tarefa de sistema dona do dispositivo. Requisitantes enfileiram pedidos
//! e se suspendem; o gerenciador, escalonado como qualquer task, repete:
//!
//! 1. drena conclusões (IRQ → dispositivo livre → acorda o requisitante)
//! 2. despacha (dispositivo livre + pendências → política escolhe → issue)
//! 3. verifica shutdown (pedido + nada pendente + ninguém esperando → sai)
//! 4. cede a CPU
//!
//! Sem trabalho possível (dispositivo ocupado ou nada pendente) o
//! gerenciador se estaciona em vez de ceder. O despachante consulta
//! `has_work()` a cada passo e o devolve ao ready set quando a IRQ
//! dispara, chega requisição ou o shutdown fica pronto. Como tarefa de
//! sistema ele não envelhece; roda com prioridade `PRIORITY_MAX`.

use super::iosched::IoPolicy;
use super::request::{DiskRequest, IoCompletion};
use super::traits::{BlockError, DiskDevice, DiskOp, Geometry};
use crate::drivers::serial::{emit_dec, emit_nl, emit_str};
use crate::sched::config::PRIORITY_MAX;
use crate::sched::core::{SchedCore, TaskContext};
use crate::sched::sync::WaitQueue;
use crate::sched::task::{Step, TaskBody, TaskFlags, TaskRef};
use crate::sync::{AtomicFlag, IrqLine};
use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

/// Pedido de encerramento gracioso do gerenciador.
///
/// Clonável e utilizável de qualquer thread: só levanta uma flag. O
/// gerenciador termina quando não houver mais trabalho pendente.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicFlag>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solicita o encerramento (não bloqueia)
    pub fn request(&self) {
        if !self.flag.test_and_set() {
            crate::kdebug!("(Disk) Shutdown solicitado");
        }
    }

    pub fn is_requested(&self) -> bool {
        self.flag.get()
    }
}

/// Estatísticas do gerenciador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskStats {
    pub policy: IoPolicy,
    /// Requisições enviadas ao dispositivo
    pub processed: u64,
    /// Leituras concluídas
    pub reads: u64,
    /// Escritas concluídas
    pub writes: u64,
    /// Soma de `|destino - cabeça|` de todas as requisições
    pub head_movement: u64,
    /// Relógio do sistema no relatório
    pub elapsed: u64,
}

impl DiskStats {
    fn new(policy: IoPolicy) -> Self {
        Self {
            policy,
            processed: 0,
            reads: 0,
            writes: 0,
            head_movement: 0,
            elapsed: 0,
        }
    }

    /// Movimentação média por requisição, em centésimos de bloco
    /// (arredondada). `None` sem requisições.
    pub fn avg_movement_centi(&self) -> Option<u64> {
        if self.processed == 0 {
            return None;
        }
        Some((self.head_movement * 100 + self.processed / 2) / self.processed)
    }

    /// Emite o relatório de desempenho.
    ///
    /// Como o relatório de tarefa, escreve direto na serial (independe
    /// do nível de log).
    pub fn emit(&self) {
        emit_nl();
        emit_str("=== RELATÓRIO DE DESEMPENHO DO DISCO ===");
        emit_nl();
        emit_str(" -- Política ativa: ");
        emit_str(self.policy.name());
        emit_nl();
        report_line(" -- Requisições processadas: ", self.processed, "");
        report_line(" -- Operações de leitura: ", self.reads, "");
        report_line(" -- Operações de escrita: ", self.writes, "");
        report_line(" -- Movimentação total da cabeça: ", self.head_movement, " blocos");
        if let Some(centi) = self.avg_movement_centi() {
            emit_str(" -- Movimentação média por requisição: ");
            emit_dec(centi / 100);
            emit_str(if centi % 100 < 10 { ".0" } else { "." });
            emit_dec(centi % 100);
            emit_str(" blocos");
            emit_nl();
        }
        report_line(" -- Tempo total de execução: ", self.elapsed, " ticks");
        emit_str("========================================");
        emit_nl();
    }
}

fn report_line(label: &str, value: u64, unit: &str) {
    emit_str(label);
    emit_dec(value);
    emit_str(unit);
    emit_nl();
}

/// Requisição no dispositivo (o buffer está com ele)
#[derive(Debug, Clone, Copy)]
struct InFlight {
    task: TaskRef,
    op: DiskOp,
    block: u64,
}

/// Estado do gerenciador de disco
pub struct DiskManager {
    device: Arc<dyn DiskDevice>,
    irq: Arc<IrqLine>,
    geometry: Geometry,
    policy: IoPolicy,
    head: u64,
    inflight: Option<InFlight>,
    pending: VecDeque<DiskRequest>,
    waiters: WaitQueue,
    stats: DiskStats,
    shutdown: ShutdownHandle,
    task: Option<TaskRef>,
    parked: bool,
    exited: bool,
}

impl DiskManager {
    fn new(
        device: Arc<dyn DiskDevice>,
        irq: Arc<IrqLine>,
        geometry: Geometry,
        policy: IoPolicy,
        shutdown: ShutdownHandle,
    ) -> Self {
        Self {
            device,
            irq,
            geometry,
            policy,
            head: 0,
            inflight: None,
            pending: VecDeque::new(),
            waiters: WaitQueue::new(),
            stats: DiskStats::new(policy),
            shutdown,
            task: None,
            parked: false,
            exited: false,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn policy(&self) -> IoPolicy {
        self.policy
    }

    /// Posição lógica da cabeça (destino da última requisição despachada)
    pub fn head(&self) -> u64 {
        self.head
    }

    /// Requisição no dispositivo e conclusão ainda não observada?
    pub fn is_busy(&self) -> bool {
        self.inflight.is_some()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Blocos pendentes em ordem de chegada
    pub fn pending_blocks(&self) -> Vec<u64> {
        self.pending.iter().map(|r| r.block).collect()
    }

    pub fn waiting_len(&self) -> usize {
        self.waiters.len()
    }

    pub fn stats(&self) -> DiskStats {
        self.stats
    }

    /// Task do gerenciador (enquanto vive)
    pub fn task(&self) -> Option<TaskRef> {
        self.task
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    pub fn is_parked(&self) -> bool {
        self.parked
    }

    pub(crate) fn device(&self) -> &Arc<dyn DiskDevice> {
        &self.device
    }

    /// Pronto para encerrar?
    pub fn shutdown_ready(&self) -> bool {
        self.shutdown.is_requested()
            && self.pending.is_empty()
            && self.waiters.is_empty()
            && self.inflight.is_none()
    }

    /// Existe algo que o loop do gerenciador consiga fazer agora?
    pub fn has_work(&self) -> bool {
        self.irq.is_pending()
            || (self.inflight.is_none() && !self.pending.is_empty())
            || self.shutdown_ready()
    }

    /// Passo 1: consome a IRQ de conclusão e acorda o requisitante
    fn drain_completions(&mut self, core: &mut SchedCore) {
        let _guard = core.gate.disable();

        if !self.irq.acknowledge() {
            return;
        }
        let Some(done) = self.inflight.take() else {
            crate::kwarn!("(Disk) IRQ sem requisição em andamento");
            return;
        };
        match self.device.collect() {
            Some(data) => self.complete(core, done, data, Ok(())),
            None => {
                crate::kerror!("(Disk) IRQ sem buffer de retorno, bloco=", done.block);
                self.complete(core, done, Vec::new(), Err(BlockError::IoError));
            }
        }
    }

    /// Entrega o resultado e devolve o requisitante ao ready set
    fn complete(
        &mut self,
        core: &mut SchedCore,
        done: InFlight,
        data: Vec<u8>,
        status: Result<(), BlockError>,
    ) {
        if status.is_ok() {
            match done.op {
                DiskOp::Read => self.stats.reads += 1,
                DiskOp::Write => self.stats.writes += 1,
            }
        }

        if !self.waiters.remove(done.task) {
            crate::kwarn!("(Disk) Requisitante já não espera, bloco=", done.block);
            return;
        }
        if let Some(task) = core.tasks.get_mut(done.task) {
            task.io = Some(IoCompletion {
                op: done.op,
                block: done.block,
                data,
                status,
            });
        }
        if core.make_ready(done.task).is_err() {
            crate::kwarn!("(Disk) Falha ao acordar requisitante, bloco=", done.block);
        }
    }

    /// Passo 2: envia a próxima requisição se o dispositivo estiver livre
    fn dispatch(&mut self, core: &mut SchedCore) {
        let _guard = core.gate.disable();

        if self.inflight.is_some() {
            return;
        }
        let Some(index) = self.policy.select_next(&self.pending, self.head) else {
            return;
        };
        let Some(req) = self.pending.remove(index) else {
            return;
        };

        let movement = req.block.abs_diff(self.head);
        self.stats.head_movement += movement;
        self.head = req.block;
        self.stats.processed += 1;

        crate::ktrace!("(Disk) Despachando bloco ", req.block);

        let done = InFlight {
            task: req.task,
            op: req.op,
            block: req.block,
        };
        match self.device.issue(req.op, req.block, req.buffer) {
            Ok(()) => self.inflight = Some(done),
            Err(err) => {
                // Sem retry: o requisitante recebe o erro
                crate::kerror!("(Disk) Dispositivo recusou requisição, bloco=", req.block);
                self.complete(core, done, Vec::new(), Err(err));
            }
        }
    }

    /// Passo 3: emite o relatório e marca o gerenciador como encerrado
    fn finish(&mut self, now: u64) {
        self.stats.elapsed = now;
        self.exited = true;
        self.task = None;
        self.stats.emit();
        crate::kok!("(Disk) Gerenciador de disco encerrado");
    }

    /// Estaciona a task do gerenciador até haver trabalho
    fn park(&mut self, core: &mut SchedCore, me: TaskRef) {
        if core.mark_suspended(me).is_ok() {
            self.parked = true;
        }
    }

    /// Devolve o gerenciador estacionado ao ready set se houver trabalho.
    /// Chamado pelo despachante uma vez por passo.
    pub(crate) fn poll_wakeup(&mut self, core: &mut SchedCore) {
        if !self.parked || !self.has_work() {
            return;
        }
        let Some(task) = self.task else {
            return;
        };
        if core.make_ready(task).is_ok() {
            self.parked = false;
            crate::ktrace!("(Disk) Gerenciador acordado, pendentes=", self.pending.len());
        }
    }

    /// Descarta rastros de uma task que terminou enquanto esperava
    pub(crate) fn forget(&mut self, task: TaskRef) {
        self.waiters.remove(task);
        self.pending.retain(|r| r.task != task);
    }

    /// Protocolo do requisitante: valida, enfileira e suspende `me`.
    fn submit(
        &mut self,
        core: &mut SchedCore,
        me: TaskRef,
        op: DiskOp,
        block: u64,
        buffer: Vec<u8>,
    ) -> Result<(), BlockError> {
        let _guard = core.gate.disable();

        if block >= self.geometry.num_blocks {
            crate::kdebug!("(Disk) Bloco fora do disco: ", block);
            return Err(BlockError::InvalidBlock);
        }
        if buffer.is_empty() || buffer.len() != self.geometry.block_size {
            crate::kdebug!("(Disk) Buffer inválido, tamanho=", buffer.len());
            return Err(BlockError::InvalidBuffer);
        }
        core.mark_suspended(me).map_err(|_| BlockError::NotFound)?;

        self.pending.push_back(DiskRequest::new(me, op, block, buffer));
        self.waiters.push(me);
        crate::ktrace!("(Disk) Requisição enfileirada, bloco=", block);
        Ok(())
    }
}

/// Corpo da task gerenciadora
struct DiskManagerBody;

impl TaskBody for DiskManagerBody {
    fn step(&mut self, ctx: &mut TaskContext<'_>) -> Step {
        let me = ctx.me;
        let Some(disk) = ctx.disk.as_mut() else {
            crate::kerror!("(Disk) Gerenciador sem disco");
            return Step::Exit(-1);
        };
        let core = &mut *ctx.core;

        disk.drain_completions(core);
        disk.dispatch(core);

        if disk.shutdown_ready() {
            disk.finish(core.clock.now());
            return Step::Exit(0);
        }

        if !disk.has_work() {
            disk.park(core, me);
        }
        Step::Yield
    }
}

/// Inicializa o disco e cria a task gerenciadora.
pub(crate) fn disk_init(
    core: &mut SchedCore,
    slot: &mut Option<DiskManager>,
    device: Arc<dyn DiskDevice>,
    policy: IoPolicy,
) -> Result<Geometry, BlockError> {
    if slot.as_ref().is_some_and(|d| !d.exited) {
        crate::kwarn!("(Disk) disk_init chamado com gerenciador ativo");
        return Err(BlockError::Busy);
    }

    device.init()?;
    let geometry = Geometry {
        num_blocks: device.total_blocks(),
        block_size: device.block_size(),
    };
    if geometry.num_blocks == 0 || geometry.block_size == 0 {
        crate::kerror!("(Disk) Geometria inválida reportada pelo dispositivo");
        return Err(BlockError::HardwareError);
    }

    let irq = Arc::new(IrqLine::new());
    device.attach_irq(Arc::clone(&irq));

    let mut manager = DiskManager::new(device, irq, geometry, policy, core.shutdown.clone());
    let task = core.insert_task(
        "disk-manager",
        TaskFlags::SYSTEM | TaskFlags::DISK_MANAGER,
        Box::new(DiskManagerBody),
    );
    // Acordado, o gerenciador passa na frente de qualquer task de usuário
    if let Some(t) = core.tasks.get_mut(task) {
        t.set_priority(PRIORITY_MAX);
    }
    manager.task = Some(task);
    *slot = Some(manager);

    crate::kinfo!("(Disk) Gerenciador iniciado, blocos=", geometry.num_blocks);
    crate::kinfo!("(Disk) Tamanho do bloco=", geometry.block_size);
    Ok(geometry)
}

/// `disk_block_read` / `disk_block_write` do lado do requisitante.
pub(crate) fn request(
    core: &mut SchedCore,
    slot: &mut Option<DiskManager>,
    me: TaskRef,
    op: DiskOp,
    block: u64,
    data: Option<Vec<u8>>,
) -> Result<(), BlockError> {
    let Some(disk) = slot.as_mut().filter(|d| !d.exited) else {
        return Err(BlockError::NotFound);
    };
    let buffer = match (op, data) {
        (DiskOp::Write, Some(data)) => data,
        (DiskOp::Write, None) => return Err(BlockError::InvalidBuffer),
        (DiskOp::Read, _) => vec![0; disk.geometry.block_size],
    };
    disk.submit(core, me, op, block, buffer)
}
