//! Behavior tests for the to-do list.

use spacedock_core::{Task, ToDoList, TodoError};

fn list_with(descriptions: &[&str]) -> ToDoList {
    let mut list = ToDoList::new();
    for description in descriptions {
        list.add(Task::new(*description));
    }
    list
}

#[test]
fn tasks_start_incomplete_in_insertion_order() {
    let list = list_with(&["read chapter", "write summary", "submit"]);
    assert_eq!(list.len(), 3);
    assert!(list.tasks().iter().all(|task| !task.is_complete()));
    assert_eq!(
        list.task_descriptions(),
        vec!["read chapter", "write summary", "submit"]
    );
}

#[test]
fn remove_by_index_returns_the_task_and_preserves_order() {
    let mut list = list_with(&["a", "b", "c"]);
    let removed = list.remove_task(1).expect("index 1 exists");
    assert_eq!(removed.description(), "b");
    assert_eq!(list.task_descriptions(), vec!["a", "c"]);
}

#[test]
fn out_of_range_index_fails_without_mutation() {
    let mut list = list_with(&["a", "b"]);

    let err = list.remove_task(2).expect_err("index 2 is out of range");
    assert_eq!(err, TodoError::IndexOutOfRange { index: 2, len: 2 });
    assert_eq!(list.len(), 2);

    let err = list.complete_task(5).expect_err("index 5 is out of range");
    assert_eq!(err, TodoError::IndexOutOfRange { index: 5, len: 2 });
    assert!(list.tasks().iter().all(|task| !task.is_complete()));
}

#[test]
fn remove_matching_removes_every_exact_match() {
    let mut list = list_with(&["buy milk", "buy milk", "buy bread"]);
    assert_eq!(list.remove_tasks_matching("buy milk"), 2);
    assert_eq!(list.task_descriptions(), vec!["buy bread"]);
    assert_eq!(list.remove_tasks_matching("buy milk"), 0);
}

#[test]
fn complete_by_index_and_uncomplete_round_trip() {
    let mut list = list_with(&["a", "b"]);
    list.complete_task(0).expect("index 0 exists");
    assert!(list.tasks()[0].is_complete());
    assert!(!list.tasks()[1].is_complete());

    list.uncomplete_task(0).expect("index 0 exists");
    assert!(!list.tasks()[0].is_complete());
}

#[test]
fn complete_matching_affects_every_match_and_tolerates_none() {
    let mut list = list_with(&["review", "review", "merge"]);
    assert_eq!(list.complete_tasks_matching("review"), 2);
    assert!(list.tasks()[0].is_complete());
    assert!(list.tasks()[1].is_complete());
    assert!(!list.tasks()[2].is_complete());

    assert_eq!(list.complete_tasks_matching("deploy"), 0);
    assert_eq!(list.len(), 3);
}

#[test]
fn delete_completed_keeps_incomplete_order() {
    let mut list = list_with(&["a", "b", "c", "d"]);
    list.complete_task(1).expect("index 1 exists");
    list.complete_task(3).expect("index 3 exists");

    assert_eq!(list.delete_completed_tasks(), 2);
    assert_eq!(list.task_descriptions(), vec!["a", "c"]);
    assert_eq!(list.delete_completed_tasks(), 0);
}

#[test]
fn completed_prefix_is_invisible_by_default() {
    let mut list = list_with(&["done thing", "open thing"]);
    list.complete_task(0).expect("index 0 exists");
    assert_eq!(list.task_descriptions(), vec!["done thing", "open thing"]);
}

#[test]
fn completed_prefix_marks_only_completed_tasks() {
    let mut list = list_with(&["done thing", "open thing"]);
    list.complete_task(0).expect("index 0 exists");
    list.set_completed_prefix("[x] ");
    assert_eq!(list.completed_prefix(), "[x] ");
    assert_eq!(
        list.task_descriptions(),
        vec!["[x] done thing", "open thing"]
    );
}
