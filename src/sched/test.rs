//! Testes do escalonador, do timer e da contabilização

use super::config::{SchedConfig, PRIORITY_MAX, PRIORITY_MIN};
use super::core::{Kernel, RunOutcome, TaskContext};
use super::scheduler::Scheduler;
use super::task::{Compute, Step, Task, TaskFlags, TaskRef, TaskReport, TaskState, TaskTable};
use crate::sync::PreemptGuard;
use crate::sys::{Errno, Tid};
use alloc::boxed::Box;
use alloc::vec::Vec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// =============================================================================
// Auxiliares
// =============================================================================

fn user(table: &mut TaskTable, prio: i32) -> TaskRef {
    let tid = table.alloc_tid();
    let mut task = Task::new(tid, "t", TaskFlags::empty(), Box::new(Compute::new(0)), 0, 20);
    task.set_priority(prio);
    table.insert(task)
}

fn system(table: &mut TaskTable, tid: Tid, prio: i32) -> TaskRef {
    let mut task = Task::new(tid, "sys", TaskFlags::empty(), Box::new(Compute::new(0)), 0, 20);
    task.set_priority(prio);
    table.insert(task)
}

fn dyn_prio(table: &TaskTable, r: TaskRef) -> i32 {
    table.get(r).map(|t| t.dynamic_prio).unwrap()
}

// =============================================================================
// Seleção e aging
// =============================================================================

#[test]
fn tie_broken_by_lowest_id_then_aging_rotates() {
    let mut table = TaskTable::new();
    let mut sched = Scheduler::new(&SchedConfig::default());
    let a = user(&mut table, 0);
    let b = user(&mut table, 0);
    let c = user(&mut table, 5);
    for r in [a, b, c] {
        sched.enqueue(r);
    }
    assert_eq!(table.get(a).unwrap().tid, Tid::new(2));

    assert_eq!(sched.select_next(&mut table), Some(a));
    assert_eq!(dyn_prio(&table, a), 0);
    assert_eq!(dyn_prio(&table, b), -1);
    assert_eq!(dyn_prio(&table, c), 4);

    assert_eq!(sched.select_next(&mut table), Some(b));
    assert_eq!(dyn_prio(&table, a), -1);
    assert_eq!(dyn_prio(&table, b), 0);
    assert_eq!(dyn_prio(&table, c), 3);
}

#[test]
fn selection_is_minimal_and_aging_matches_formula() {
    let mut table = TaskTable::new();
    let mut sched = Scheduler::new(&SchedConfig::default());
    let refs: Vec<TaskRef> = [7, -3, 12, -3, 20, -19]
        .iter()
        .map(|&p| user(&mut table, p))
        .collect();
    for &r in &refs {
        sched.enqueue(r);
    }

    for _ in 0..60 {
        let before: Vec<i32> = refs.iter().map(|&r| dyn_prio(&table, r)).collect();
        let chosen = sched.select_next(&mut table).unwrap();
        let idx = refs.iter().position(|&r| r == chosen).unwrap();

        assert!(before.iter().all(|&p| before[idx] <= p));
        for (i, &r) in refs.iter().enumerate() {
            let after = dyn_prio(&table, r);
            if i == idx {
                assert_eq!(after, table.get(r).unwrap().static_prio);
            } else {
                assert_eq!(after, (before[i] - 1).max(PRIORITY_MAX));
            }
        }
    }
}

#[test]
fn starved_task_reaches_ceiling_and_wins() {
    let mut table = TaskTable::new();
    let mut sched = Scheduler::new(&SchedConfig::default());
    let low = user(&mut table, PRIORITY_MIN);
    let high = user(&mut table, PRIORITY_MAX);
    sched.enqueue(low);
    sched.enqueue(high);

    let bound = (PRIORITY_MIN - PRIORITY_MAX) as usize;
    for _ in 0..bound {
        assert_eq!(sched.select_next(&mut table), Some(high));
    }
    assert_eq!(dyn_prio(&table, low), PRIORITY_MAX);
    // Empate no teto: menor ID vence
    assert_eq!(sched.select_next(&mut table), Some(low));
    assert_eq!(dyn_prio(&table, low), PRIORITY_MIN);
}

#[test]
fn system_tasks_never_age_nor_cause_aging() {
    let mut table = TaskTable::new();
    let mut sched = Scheduler::new(&SchedConfig::default());
    let main = system(&mut table, Tid::MAIN, 3);
    let u1 = user(&mut table, 0);
    let u2 = user(&mut table, 10);
    for r in [main, u1, u2] {
        sched.enqueue(r);
    }
    assert!(table.get(main).unwrap().is_system());

    for _ in 0..50 {
        sched.select_next(&mut table);
        assert_eq!(dyn_prio(&table, main), 3);
    }

    // Sistema escolhido: ninguém envelhece
    let boss = system(&mut table, Tid::DISPATCHER, PRIORITY_MAX);
    sched.enqueue(boss);
    let before: Vec<i32> = [u1, u2].iter().map(|&r| dyn_prio(&table, r)).collect();
    assert_eq!(sched.select_next(&mut table), Some(boss));
    let after: Vec<i32> = [u1, u2].iter().map(|&r| dyn_prio(&table, r)).collect();
    assert_eq!(before, after);
}

#[test]
fn pick_next_removes_from_ready_set() {
    let mut table = TaskTable::new();
    let mut sched = Scheduler::new(&SchedConfig::default());
    let a = user(&mut table, 0);
    sched.enqueue(a);
    sched.enqueue(a);
    assert_eq!(sched.len(), 1);
    assert_eq!(sched.pick_next(&mut table), Some(a));
    assert!(sched.is_empty());
    assert_eq!(sched.pick_next(&mut table), None);
}

#[test]
fn stale_handle_is_rejected_after_slot_reuse() {
    let mut table = TaskTable::new();
    let a = user(&mut table, 0);
    let tid_a = table.get(a).unwrap().tid;
    assert!(table.remove(a).is_some());
    let b = user(&mut table, 0);

    assert_eq!(a.index(), b.index());
    assert!(table.get(a).is_none());
    assert!(table.get(b).unwrap().tid > tid_a);
    assert_eq!(table.len(), 1);
}

// =============================================================================
// Despacho, quantum e contabilização
// =============================================================================

#[test]
fn quantum_rotates_equal_priority_tasks() {
    let mut kernel = Kernel::default();
    let a = kernel.spawn("a", Compute::new(50));
    let b = kernel.spawn("b", Compute::new(50));
    let tid_a = kernel.task(a).unwrap().tid;
    let tid_b = kernel.task(b).unwrap().tid;

    let summary = kernel.run();
    assert_eq!(summary.outcome, RunOutcome::Finished);
    assert_eq!(summary.ticks, 102);

    let ra = *kernel.report_for(tid_a).unwrap();
    let rb = *kernel.report_for(tid_b).unwrap();
    assert_eq!((ra.cpu_time, ra.activations, ra.lifetime), (51, 3, 91));
    assert_eq!((rb.cpu_time, rb.activations, rb.lifetime), (51, 3, 102));
    assert_eq!(kernel.reports()[0].tid, tid_a);
}

#[test]
fn quantum_is_full_on_hand_in_and_drops_one_per_tick() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let mut steps = 0;

    let mut kernel = Kernel::default();
    let r = kernel.spawn("q", move |ctx: &mut TaskContext<'_>| {
        log.borrow_mut().push(ctx.quantum());
        steps += 1;
        if steps == 45 {
            Step::Exit(0)
        } else {
            Step::Continue
        }
    });
    let tid = kernel.task(r).unwrap().tid;
    kernel.run();

    let mut expected: Vec<i32> = (1..=20).rev().collect();
    expected.extend((1..=20).rev());
    expected.extend((16..=20).rev());
    assert_eq!(*seen.borrow(), expected);

    let report = kernel.report_for(tid).unwrap();
    assert_eq!(report.activations, 3);
    assert_eq!(report.cpu_time, 45);
    assert!(report.cpu_time <= report.lifetime);
}

#[test]
fn closed_gate_defers_preemption() {
    let quantum_at_release = Rc::new(Cell::new(0));
    let other_started = Rc::new(Cell::new(u64::MAX));

    let mut kernel = Kernel::default();
    let q = Rc::clone(&quantum_at_release);
    let mut guard: Option<PreemptGuard> = None;
    let mut n = 0;
    kernel.spawn("holder", move |ctx: &mut TaskContext<'_>| {
        n += 1;
        if n == 1 {
            guard = Some(ctx.preempt_disable());
        }
        if n == 30 {
            q.set(ctx.quantum());
            guard = None;
        }
        if n == 60 {
            Step::Exit(0)
        } else {
            Step::Continue
        }
    });
    let started = Rc::clone(&other_started);
    kernel.spawn("other", move |ctx: &mut TaskContext<'_>| {
        if started.get() == u64::MAX {
            started.set(ctx.now());
        }
        Step::Exit(0)
    });

    assert_eq!(kernel.run().outcome, RunOutcome::Finished);
    assert_eq!(quantum_at_release.get(), -9);
    assert_eq!(other_started.get(), 30);
    assert!(kernel.preempt_gate().is_enabled());
}

#[test]
fn system_task_is_not_quantum_preempted() {
    let mut kernel = Kernel::default();
    let main = kernel.spawn_main(Compute::new(50)).unwrap();
    let u = kernel.spawn("u", Compute::new(3));
    assert!(kernel.task(main).unwrap().is_system());
    let tid_u = kernel.task(u).unwrap().tid;

    kernel.run();

    let main_report = kernel.report_for(Tid::MAIN).unwrap();
    assert_eq!(main_report.lifetime, 51);
    assert_eq!((main_report.cpu_time, main_report.activations), (0, 0));

    let ru = kernel.report_for(tid_u).unwrap();
    assert_eq!(ru.lifetime, 55);
    assert_eq!((ru.cpu_time, ru.activations), (4, 1));
}

#[test]
fn main_exit_requests_disk_shutdown() {
    let mut kernel = Kernel::default();
    let handle = kernel.shutdown_handle();
    kernel.spawn_main(|_: &mut TaskContext<'_>| Step::Exit(0)).unwrap();
    assert_eq!(kernel.spawn_main(Compute::new(1)), Err(Errno::EBUSY));
    assert!(!handle.is_requested());

    kernel.run();
    assert!(handle.is_requested());
    assert_eq!(kernel.spawn_main(Compute::new(1)), Err(Errno::EBUSY));
}

#[test]
fn priorities_are_clamped_and_dead_refs_rejected() {
    let mut kernel = Kernel::default();
    let r = kernel.spawn("p", Compute::new(0));
    kernel.set_priority(r, -100).unwrap();
    assert_eq!(kernel.priority(r), Ok(PRIORITY_MAX));
    kernel.set_priority(r, 100).unwrap();
    assert_eq!(kernel.priority(r), Ok(PRIORITY_MIN));
    assert_eq!(kernel.task(r).unwrap().dynamic_prio, PRIORITY_MIN);

    kernel.run();
    assert_eq!(kernel.set_priority(r, 0), Err(Errno::ESRCH));
    assert_eq!(kernel.priority(r), Err(Errno::ESRCH));
}

#[test]
fn own_priority_through_context() {
    let seen = Rc::new(Cell::new(0));
    let s = Rc::clone(&seen);
    let mut kernel = Kernel::default();
    kernel.spawn("self", move |ctx: &mut TaskContext<'_>| {
        ctx.set_priority(None, 7).unwrap();
        s.set(ctx.priority(None).unwrap());
        Step::Exit(0)
    });
    kernel.run();
    assert_eq!(seen.get(), 7);
}

// =============================================================================
// Wait queues
// =============================================================================

#[test]
fn suspended_task_resumes_from_wait_queue() {
    let woke_at = Rc::new(Cell::new(0));
    let mut kernel = Kernel::default();
    let queue = kernel.create_wait_queue();

    let w = Rc::clone(&woke_at);
    let mut first = true;
    let waiter = kernel.spawn("waiter", move |ctx: &mut TaskContext<'_>| {
        if first {
            first = false;
            ctx.suspend(queue).unwrap();
            return Step::Continue;
        }
        w.set(ctx.now());
        Step::Exit(0)
    });
    let waiter_tid = kernel.task(waiter).unwrap().tid;

    let resumed = Rc::new(Cell::new(None));
    let r = Rc::clone(&resumed);
    let mut n = 0;
    kernel.spawn("waker", move |ctx: &mut TaskContext<'_>| {
        n += 1;
        if n < 5 {
            return Step::Continue;
        }
        r.set(ctx.resume_one(queue).unwrap());
        Step::Exit(0)
    });

    let summary = kernel.run();
    assert_eq!(summary.outcome, RunOutcome::Finished);
    assert_eq!(resumed.get(), Some(waiter_tid));
    assert_eq!(woke_at.get(), 6);
}

#[test]
fn self_wake_in_same_step_keeps_the_cpu() {
    let mut kernel = Kernel::default();
    let queue = kernel.create_wait_queue();

    let seen = Rc::new(Cell::new(None));
    let s = Rc::clone(&seen);
    let mut first = true;
    let r = kernel.spawn("echo", move |ctx: &mut TaskContext<'_>| {
        if !first {
            return Step::Exit(0);
        }
        first = false;
        ctx.suspend(queue).unwrap();
        let woke = ctx.resume_one(queue).unwrap();
        assert_eq!(woke, Some(ctx.id()));
        s.set(ctx.task_state(ctx.task_ref()));
        Step::Continue
    });

    kernel.run_for(1);
    assert_eq!(seen.get(), Some(TaskState::Running));
    assert_eq!(kernel.current(), Some(r));
    assert_eq!(kernel.ready_len(), 0);
    assert_eq!(kernel.task(r).unwrap().state, TaskState::Running);

    assert_eq!(kernel.run().outcome, RunOutcome::Finished);
}

#[test]
fn unwoken_waiter_stalls_the_run() {
    let mut kernel = Kernel::default();
    let queue = kernel.create_wait_queue();
    let r = kernel.spawn("lost", move |ctx: &mut TaskContext<'_>| {
        let _ = ctx.suspend(queue);
        Step::Yield
    });

    let summary = kernel.run();
    assert_eq!(summary.outcome, RunOutcome::Stalled);
    assert_eq!(kernel.task(r).unwrap().state, TaskState::Suspended);

    let tid = kernel.task(r).map(|t| t.tid);
    assert_eq!(kernel.resume_one(queue), Ok(tid));
    assert_eq!(kernel.resume_one(queue), Ok(None));
    assert_eq!(kernel.run().outcome, RunOutcome::Stalled);
}

#[test]
fn run_for_stops_at_budget() {
    let mut kernel = Kernel::default();
    kernel.spawn("long", Compute::new(1000));
    let summary = kernel.run_for(25);
    assert_eq!(summary.outcome, RunOutcome::BudgetExhausted);
    assert_eq!(summary.ticks, 25);
    assert_eq!(kernel.now(), 25);
}

#[test]
#[should_panic]
fn invalid_timer_interval_is_fatal() {
    let config = SchedConfig {
        timer_interval_us: 0,
        ..SchedConfig::default()
    };
    let _ = Kernel::new(config);
}

// =============================================================================
// Nome e relatório
// =============================================================================

#[test]
fn long_name_is_cut_on_char_boundary() {
    // 30 bytes + 'é' (2 bytes): o corte em 31 cairia no meio do caractere
    let name = "a".repeat(30) + "é";
    let task = Task::new(Tid::new(9), &name, TaskFlags::empty(), Box::new(Compute::new(0)), 0, 20);
    assert_eq!(task.name(), "a".repeat(30));

    let task = Task::new(Tid::new(9), "ação", TaskFlags::empty(), Box::new(Compute::new(0)), 0, 20);
    assert_eq!(task.name(), "ação");
}

#[test]
fn task_report_reaches_serial() {
    let report = TaskReport {
        tid: Tid::new(7),
        lifetime: 30,
        cpu_time: 12,
        activations: 2,
        exit_code: 0,
    };
    let out = crate::drivers::serial::capture(|| report.emit());
    assert_eq!(
        out,
        "(Task) Tarefa 7 encerrada: tempo de execução 30 ticks, \
         tempo de processador 12 ticks, 2 ativações\n"
    );
}
