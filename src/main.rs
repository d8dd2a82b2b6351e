//! Anvil — Binário de demonstração.
//!
//! Responsabilidade:
//! 1. Instalar o sink serial (stdout).
//! 2. Criar o núcleo e a tarefa principal.
//! 3. A tarefa principal inicializa o disco virtual e cria as tarefas de
//!    trabalho (CPU e disco), espera todas terminarem e sai.
//! 4. O término da principal pede o shutdown do disco; o gerenciador sai
//!    depois de drenar tudo e imprime o relatório.

use anvil::drivers::block::{DiskDevice, IoPolicy, VirtualDisk, VirtualDiskConfig};
use anvil::drivers::serial;
use anvil::sched::config::PRIORITY_MIN;
use anvil::sched::task::{Compute, TaskRef, TaskState};
use anvil::{Kernel, RunOutcome, SchedConfig, Step, TaskContext};
use std::io::Write;
use std::sync::Arc;

fn stdout_sink(s: &str) {
    let mut out = std::io::stdout().lock();
    let _ = out.write_all(s.as_bytes());
}

/// Tarefa que lê uma lista de blocos, um por vez.
struct BlockReader {
    blocks: Vec<u64>,
    next: usize,
    waiting: bool,
}

impl BlockReader {
    fn new(blocks: &[u64]) -> Self {
        Self {
            blocks: blocks.to_vec(),
            next: 0,
            waiting: false,
        }
    }
}

impl anvil::sched::TaskBody for BlockReader {
    fn step(&mut self, ctx: &mut TaskContext<'_>) -> Step {
        if self.waiting {
            match ctx.take_io() {
                Some(done) if done.is_ok() => self.waiting = false,
                Some(_) => return Step::Exit(1),
                None => return Step::Yield,
            }
        }
        let Some(&block) = self.blocks.get(self.next) else {
            return Step::Exit(0);
        };
        self.next += 1;
        match ctx.disk_block_read(block) {
            Ok(()) => {
                self.waiting = true;
                Step::Yield
            }
            Err(_) => Step::Exit(1),
        }
    }
}

/// Fases da tarefa principal
enum Boot {
    Init,
    Waiting(Vec<TaskRef>),
}

impl anvil::sched::TaskBody for Boot {
    fn step(&mut self, ctx: &mut TaskContext<'_>) -> Step {
        match self {
            Boot::Init => {
                let device: Arc<dyn DiskDevice> =
                    Arc::new(VirtualDisk::new(VirtualDiskConfig::new(200, 64)));
                if let Err(err) = ctx.disk_init(device, IoPolicy::DEFAULT) {
                    eprintln!("disk_init falhou: {}", err);
                    return Step::Exit(1);
                }

                let mut workers = Vec::new();
                for (name, prio, ticks) in [("cpu-a", 0, 60), ("cpu-b", 0, 60), ("cpu-c", 5, 40)] {
                    let r = ctx.spawn(name, Compute::new(ticks));
                    let _ = ctx.set_priority(Some(r), prio);
                    workers.push(r);
                }
                workers.push(ctx.spawn("io-a", BlockReader::new(&[98, 183, 37, 122])));
                workers.push(ctx.spawn("io-b", BlockReader::new(&[14, 124, 65, 67])));

                // A principal só volta à CPU quando ninguém mais quer
                let _ = ctx.set_priority(None, PRIORITY_MIN);
                *self = Boot::Waiting(workers);
                Step::Yield
            }
            Boot::Waiting(workers) => {
                workers.retain(|&r| {
                    ctx.task_state(r)
                        .is_some_and(|s| s != TaskState::Terminated)
                });
                if workers.is_empty() {
                    Step::Exit(0)
                } else {
                    Step::Yield
                }
            }
        }
    }
}

fn main() {
    serial::set_sink(stdout_sink);

    let mut kernel = Kernel::new(SchedConfig::default());
    if let Err(err) = kernel.spawn_main(Boot::Init) {
        eprintln!("spawn_main falhou: {}", err);
        std::process::exit(1);
    }

    let summary = kernel.run();
    println!(
        "\nfim: {:?} em {} ticks ({} passos, {} ociosos)",
        summary.outcome, summary.ticks, summary.steps, summary.idle_ticks
    );
    if summary.outcome != RunOutcome::Finished {
        std::process::exit(2);
    }
}
