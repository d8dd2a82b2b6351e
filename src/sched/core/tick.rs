//! Handler do tick do timer
//!
//! Relógio avança sempre. Tarefa de sistema: nada mais. Tarefa de usuário:
//! consome um tick do quantum e, esgotado o quantum com o portão aberto,
//! pede a troca (`need_resched`). Com o portão fechado o quantum pode
//! ficar negativo; a troca acontece no primeiro tick depois que ele abre.

use super::SchedCore;

pub(crate) fn timer_interrupt(core: &mut SchedCore) {
    core.clock.advance();

    let Some(current) = core.current else {
        return;
    };
    let preempt_enabled = core.gate.is_enabled();
    let Some(task) = core.tasks.get_mut(current) else {
        return;
    };
    if task.is_system() {
        return;
    }

    let left = task.accounting.charge_tick();
    if left <= 0 && preempt_enabled && !core.need_resched {
        crate::ktrace!("(Sched) Quantum esgotado, T", task.tid.as_u32());
        core.need_resched = true;
    }
}
