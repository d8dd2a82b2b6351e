//! Testes de ponta a ponta do escalonador de CPU

mod common;

use anvil::sched::config::{PRIORITY_MAX, PRIORITY_MIN};
use anvil::sched::task::Compute;
use anvil::sys::Tid;
use anvil::{Kernel, RunOutcome, SchedConfig, Step, TaskContext};
use common::Supervisor;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn cpu_time_never_exceeds_lifetime() {
    let mut kernel = Kernel::new(SchedConfig::default().with_quantum(7));
    let mut workers = Vec::new();
    for (i, ticks) in [35u64, 12, 80, 3, 41].into_iter().enumerate() {
        workers.push(kernel.spawn_with_priority("w", i as i32 * 3 - 6, Compute::new(ticks)));
    }
    let main = kernel.spawn_main(Supervisor::new(workers)).unwrap();
    kernel.set_priority(main, PRIORITY_MIN).unwrap();

    let summary = kernel.run();
    assert_eq!(summary.outcome, RunOutcome::Finished);
    assert_eq!(kernel.reports().len(), 6);

    for report in kernel.reports() {
        assert!(report.cpu_time <= report.lifetime);
        assert_eq!(report.exit_code, 0);
    }
    let user_cpu: u64 = kernel
        .reports()
        .iter()
        .filter(|r| r.tid != Tid::MAIN)
        .map(|r| r.cpu_time)
        .sum();
    // Compute(n) ocupa n + 1 ticks
    assert_eq!(user_cpu, 35 + 12 + 80 + 3 + 41 + 5);
}

#[test]
fn low_priority_task_still_progresses() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut kernel = Kernel::default();

    let log = Rc::clone(&order);
    kernel.spawn_with_priority("meek", PRIORITY_MIN, move |_: &mut TaskContext<'_>| {
        log.borrow_mut().push('m');
        Step::Exit(0)
    });
    let log = Rc::clone(&order);
    kernel.spawn_with_priority("hog", PRIORITY_MAX, move |_: &mut TaskContext<'_>| {
        log.borrow_mut().push('h');
        if log.borrow().len() > 500 {
            Step::Exit(0)
        } else {
            Step::Yield
        }
    });

    assert_eq!(kernel.run().outcome, RunOutcome::Finished);
    let first_meek = order.borrow().iter().position(|&c| c == 'm').unwrap();
    // 40 passos de aging até o teto, depois vence pelo desempate de ID
    assert_eq!(first_meek, 40);
}

#[test]
fn exit_codes_are_reported() {
    let mut kernel = Kernel::default();
    let r = kernel.spawn("fail", |_: &mut TaskContext<'_>| Step::Exit(-3));
    let tid = kernel.task(r).unwrap().tid;
    kernel.run();
    assert_eq!(kernel.report_for(tid).unwrap().exit_code, -3);
    assert!(kernel.task(r).is_none());
    assert!(kernel.find(tid).is_none());
}

#[test]
fn tasks_spawned_at_runtime_get_fresh_ids() {
    let ids = Rc::new(RefCell::new(Vec::new()));
    let mut kernel = Kernel::default();
    let seen = Rc::clone(&ids);
    let mut spawned = 0;
    kernel.spawn("parent", move |ctx: &mut TaskContext<'_>| {
        seen.borrow_mut().push(ctx.id());
        if spawned < 3 {
            spawned += 1;
            let child = Rc::clone(&seen);
            ctx.spawn("child", move |ctx: &mut TaskContext<'_>| {
                child.borrow_mut().push(ctx.id());
                Step::Exit(0)
            });
            Step::Yield
        } else {
            Step::Exit(0)
        }
    });

    assert_eq!(kernel.run().outcome, RunOutcome::Finished);
    let mut unique: Vec<Tid> = ids.borrow().clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique, vec![Tid::new(2), Tid::new(3), Tid::new(4), Tid::new(5)]);
    assert_eq!(kernel.reports().len(), 4);
}
