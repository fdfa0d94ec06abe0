//! Pure helpers the list view applies to its local copy of the task
//! list. Every mutation keys on the task id, never on object identity,
//! so a server entity that came back with different field values still
//! lands on the right element.

use todo_shared::Task;

pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// A freshly created task goes to the head of the list, matching the
/// newest-first order without a re-fetch.
pub fn prepend(tasks: &mut Vec<Task>, task: Task) {
    tasks.insert(0, task);
}

/// Replaces the element whose id matches `updated`. Returns false when
/// nothing matched; the list is left unchanged in that case.
pub fn merge_by_id(tasks: &mut [Task], updated: Task) -> bool {
    match tasks.iter_mut().find(|t| t.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Removes the element with the given id, if present.
pub fn remove_by_id(tasks: &mut Vec<Task>, id: i64) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    tasks.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: i64, minutes: i64) -> Task {
        let stamp = Utc.timestamp_opt(1_700_000_000 + minutes * 60, 0).unwrap();
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            completed: false,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn sort_puts_newest_first() {
        let mut tasks = vec![task(1, 0), task(2, 10)];
        sort_newest_first(&mut tasks);
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn prepend_puts_task_at_head() {
        let mut tasks = vec![task(1, 0)];
        prepend(&mut tasks, task(2, 10));
        assert_eq!(tasks[0].id, 2);
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn merge_replaces_only_the_matching_element() {
        let mut tasks = vec![task(1, 0), task(2, 10), task(3, 20)];
        let mut toggled = task(2, 10);
        toggled.completed = true;

        assert!(merge_by_id(&mut tasks, toggled));
        assert!(tasks[1].completed);
        assert_eq!(tasks[1].title, "task 2");
        assert!(!tasks[0].completed);
        assert!(!tasks[2].completed);
    }

    #[test]
    fn merge_with_unknown_id_changes_nothing() {
        let mut tasks = vec![task(1, 0)];
        let snapshot = tasks.clone();
        assert!(!merge_by_id(&mut tasks, task(99, 5)));
        assert_eq!(tasks, snapshot);
    }

    #[test]
    fn remove_drops_exactly_the_matching_element() {
        let mut tasks = vec![task(1, 0), task(2, 10), task(3, 20)];
        assert!(remove_by_id(&mut tasks, 2));
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(!remove_by_id(&mut tasks, 2));
        assert_eq!(tasks.len(), 2);
    }
}
