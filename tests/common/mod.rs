//! Tarefas auxiliares dos testes de integração
#![allow(dead_code)]

use anvil::sched::task::{TaskRef, TaskState};
use anvil::sched::TaskBody;
use anvil::{Step, TaskContext};
use std::cell::RefCell;
use std::rc::Rc;

/// Lê uma lista de blocos, um por vez, anotando cada conclusão.
pub struct Reader {
    blocks: Vec<u64>,
    next: usize,
    waiting: bool,
    log: Rc<RefCell<Vec<u64>>>,
}

impl Reader {
    pub fn new(blocks: &[u64], log: &Rc<RefCell<Vec<u64>>>) -> Self {
        Self {
            blocks: blocks.to_vec(),
            next: 0,
            waiting: false,
            log: Rc::clone(log),
        }
    }
}

impl TaskBody for Reader {
    fn step(&mut self, ctx: &mut TaskContext<'_>) -> Step {
        if self.waiting {
            match ctx.take_io() {
                Some(done) if done.is_ok() => {
                    self.log.borrow_mut().push(done.block);
                    self.waiting = false;
                }
                Some(_) => return Step::Exit(2),
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

/// Tarefa principal que só espera as outras terminarem.
pub struct Supervisor {
    workers: Vec<TaskRef>,
}

impl Supervisor {
    pub fn new(workers: Vec<TaskRef>) -> Self {
        Self { workers }
    }
}

impl TaskBody for Supervisor {
    fn step(&mut self, ctx: &mut TaskContext<'_>) -> Step {
        self.workers
            .retain(|&r| ctx.task_state(r).is_some_and(|s| s != TaskState::Terminated));
        if self.workers.is_empty() {
            Step::Exit(0)
        } else {
            Step::Yield
        }
    }
}
