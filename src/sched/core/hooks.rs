//! Hooks de troca de contexto (contabilização de CPU)
//!
//! Chamados pelo despachante com o portão de preempção fechado.
//! Só tarefas de usuário são contabilizadas.

use crate::sched::task::{Task, TaskReport};

/// Hand-off-out: fecha a fatia de quem sai da CPU
pub(crate) fn before_switch(task: &mut Task, now: u64) {
    if task.is_user() {
        let slice = task.accounting.end_exec(now);
        crate::ktrace!("(Sched) Fatia encerrada, ticks=", slice);
    }
}

/// Hand-off-in: nova ativação com quantum cheio
pub(crate) fn after_switch(task: &mut Task, now: u64, quantum: i32) {
    if task.is_user() {
        task.accounting.start_exec(now, quantum);
    }
}

/// Término: contabiliza a fatia final e monta o relatório
pub(crate) fn task_exit(task: &mut Task, now: u64, code: i32) -> TaskReport {
    before_switch(task, now);
    task.exit_code = Some(code);

    TaskReport {
        tid: task.tid,
        lifetime: task.accounting.lifetime(now),
        cpu_time: task.accounting.cpu_time,
        activations: task.accounting.activations,
        exit_code: code,
    }
}
