use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::headless::{ManualScheduler, MemoryDom};

type Log = Rc<RefCell<Vec<&'static str>>>;

fn recorder() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

// =============================================================
// Task
// =============================================================

#[test]
fn guarded_effect_runs_while_node_is_attached() {
    let mut dom = MemoryDom::new();
    let el = dom.insert(dom.body(), "div", &[]);
    let log = recorder();
    let seen = Rc::clone(&log);

    Task::guarded(el, move |_: &mut MemoryDom| seen.borrow_mut().push("effect")).run(&mut dom);

    assert_eq!(*log.borrow(), vec!["effect"]);
}

#[test]
fn guarded_effect_is_skipped_once_node_is_removed() {
    let mut dom = MemoryDom::new();
    let el = dom.insert(dom.body(), "div", &[]);
    let log = recorder();
    let seen = Rc::clone(&log);
    let task = Task::guarded(el, move |_: &mut MemoryDom| seen.borrow_mut().push("effect"));

    dom.remove(&el);
    task.run(&mut dom);

    assert!(log.borrow().is_empty());
}

#[test]
fn cleanup_runs_even_when_guard_is_detached() {
    let mut dom = MemoryDom::new();
    let el = dom.insert(dom.body(), "div", &[]);
    let log = recorder();
    let effect_log = Rc::clone(&log);
    let cleanup_log = Rc::clone(&log);
    let task = Task::guarded(el, move |_: &mut MemoryDom| effect_log.borrow_mut().push("effect"))
        .and_cleanup(move |_: &mut MemoryDom| cleanup_log.borrow_mut().push("cleanup"));

    dom.remove(&el);
    task.run(&mut dom);

    assert_eq!(*log.borrow(), vec!["cleanup"]);
}

#[test]
fn effect_runs_before_cleanup() {
    let mut dom = MemoryDom::new();
    let el = dom.insert(dom.body(), "div", &[]);
    let log = recorder();
    let effect_log = Rc::clone(&log);
    let cleanup_log = Rc::clone(&log);

    Task::guarded(el, move |_: &mut MemoryDom| effect_log.borrow_mut().push("effect"))
        .and_cleanup(move |_: &mut MemoryDom| cleanup_log.borrow_mut().push("cleanup"))
        .run(&mut dom);

    assert_eq!(*log.borrow(), vec!["effect", "cleanup"]);
}

#[test]
fn cleanup_only_task_removes_node_and_tolerates_repeat() {
    let mut dom = MemoryDom::new();
    let overlay = dom.insert(dom.body(), "div", &["overlay"]);

    Task::cleanup(move |dom: &mut MemoryDom| dom.remove(&overlay)).run(&mut dom);
    Task::cleanup(move |dom: &mut MemoryDom| dom.remove(&overlay)).run(&mut dom);

    assert!(!dom.is_connected(&overlay));
    assert_eq!(dom.count_class("overlay"), 0);
}

// =============================================================
// Scheduler
// =============================================================

#[test]
fn manual_scheduler_runs_tasks_in_deadline_order() {
    let mut dom = MemoryDom::new();
    let mut timers = ManualScheduler::<MemoryDom>::new();
    let log = recorder();
    let (late, early, frame) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));

    timers.after(100, Task::cleanup(move |_: &mut MemoryDom| late.borrow_mut().push("late")));
    timers.after(50, Task::cleanup(move |_: &mut MemoryDom| early.borrow_mut().push("early")));
    timers.next_frame(Task::cleanup(move |_: &mut MemoryDom| frame.borrow_mut().push("frame")));

    assert_eq!(timers.advance(60, &mut dom), 2);
    assert_eq!(*log.borrow(), vec!["frame", "early"]);
    assert_eq!(timers.pending(), 1);

    assert_eq!(timers.advance(40, &mut dom), 1);
    assert_eq!(*log.borrow(), vec!["frame", "early", "late"]);
    assert_eq!(timers.now_ms(), 100);
}

// =============================================================
// Generation
// =============================================================

#[test]
fn generation_invalidates_older_tokens() {
    let generation = Generation::new();
    let first = generation.advance();
    assert!(generation.is_current(first));

    let second = generation.advance();
    assert!(!generation.is_current(first));
    assert!(generation.is_current(second));
}

#[test]
fn generation_clones_share_state() {
    let generation = Generation::new();
    let shared = generation.clone();
    let token = generation.advance();
    assert!(shared.is_current(token));
    shared.advance();
    assert!(!generation.is_current(token));
}
