//! Tasks service
//!
//! Daily planner tasks, scoped to a calendar date. The viewed date is
//! an explicit parameter on every query rather than shared state.

use crate::config::collections;
use crate::error::Result;
use crate::models::{NewTask, Task};
use crate::store::Store;
use chrono::NaiveDate;
use serde::Serialize;

/// Per-date rollup shown at the top of the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

#[derive(Clone)]
pub struct TasksService {
    store: Store,
}

impl TasksService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a new task.
    pub async fn add_task(&self, new: NewTask) -> Result<Task> {
        new.validate()?;

        let id = self.store.next_id(collections::TASKS).await?;
        let task = Task {
            id,
            title: new.title,
            time: new.time,
            priority: new.priority,
            description: new.description,
            completed: false,
            date: new.date,
        };

        let stored = task.clone();
        self.store
            .mutate::<Task, _, _>(collections::TASKS, move |tasks| tasks.push(stored))
            .await?;

        tracing::info!("Created task {}: {}", task.id, task.title);
        Ok(task)
    }

    /// Replace a task's content, keyed by id. The completion flag
    /// survives the edit. Unknown ids are a silent no-op.
    pub async fn update_task(&self, id: u64, new: NewTask) -> Result<Option<Task>> {
        new.validate()?;

        let updated = self
            .store
            .mutate::<Task, _, _>(collections::TASKS, move |tasks| {
                let task = tasks.iter_mut().find(|t| t.id == id)?;
                *task = Task {
                    id,
                    title: new.title,
                    time: new.time,
                    priority: new.priority,
                    description: new.description,
                    completed: task.completed,
                    date: new.date,
                };
                Some(task.clone())
            })
            .await?;

        match &updated {
            Some(task) => tracing::debug!("Updated task {}", task.id),
            None => tracing::debug!("Update of unknown task {} ignored", id),
        }
        Ok(updated)
    }

    /// Flip a task's completion flag. Unknown ids are a silent no-op.
    pub async fn toggle_complete(&self, id: u64) -> Result<Option<Task>> {
        self.store
            .mutate::<Task, _, _>(collections::TASKS, move |tasks| {
                let task = tasks.iter_mut().find(|t| t.id == id)?;
                task.completed = !task.completed;
                Some(task.clone())
            })
            .await
    }

    /// Delete a task by id.
    pub async fn delete_task(&self, id: u64) -> Result<()> {
        self.store
            .mutate::<Task, _, _>(collections::TASKS, move |tasks| {
                tasks.retain(|t| t.id != id);
            })
            .await?;

        tracing::info!("Deleted task {}", id);
        Ok(())
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.store.load_or_default(collections::TASKS).await
    }

    /// Tasks scheduled on one calendar date, in insertion order.
    pub async fn tasks_for_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let tasks = self.list_tasks().await?;
        Ok(tasks.into_iter().filter(|t| t.date == date).collect())
    }

    /// Tasks in one time slot of a date, completed tasks last.
    pub async fn tasks_for_slot(&self, date: NaiveDate, time: &str) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks_for_date(date)
            .await?
            .into_iter()
            .filter(|t| t.time == time)
            .collect();
        tasks.sort_by_key(|t| t.completed);
        Ok(tasks)
    }

    /// Total/completed/remaining counts for a date.
    pub async fn summary(&self, date: NaiveDate) -> Result<TaskSummary> {
        let tasks = self.tasks_for_date(date).await?;
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Ok(TaskSummary {
            total,
            completed,
            remaining: total - completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::store::create_test_pool;

    async fn create_test_service() -> TasksService {
        TasksService::new(Store::new(create_test_pool().await))
    }

    fn new_task(title: &str, time: &str, date: (i32, u32, u32)) -> NewTask {
        NewTask {
            title: title.to_string(),
            time: time.to_string(),
            priority: Priority::Medium,
            description: String::new(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_task() {
        let service = create_test_service().await;

        let task = service
            .add_task(new_task("Stand-up", "09:30", (2024, 3, 15)))
            .await
            .unwrap();
        assert!(!task.completed);

        let tasks = service.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0], task);
    }

    #[tokio::test]
    async fn test_add_rejects_missing_title() {
        let service = create_test_service().await;

        let result = service.add_task(new_task("", "09:30", (2024, 3, 15))).await;
        assert!(result.unwrap_err().is_validation());

        // Nothing was written
        assert!(service.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_but_keeps_completed() {
        let service = create_test_service().await;

        let task = service
            .add_task(new_task("Draft", "10:00", (2024, 3, 15)))
            .await
            .unwrap();
        service.toggle_complete(task.id).await.unwrap();

        let updated = service
            .update_task(task.id, new_task("Final", "11:00", (2024, 3, 16)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.time, "11:00");
        assert!(updated.completed, "completion flag survives an edit");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let service = create_test_service().await;

        let result = service
            .update_task(999, new_task("Ghost", "10:00", (2024, 3, 15)))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_tasks_for_slot_sorts_completed_last() {
        let service = create_test_service().await;

        let a = service
            .add_task(new_task("First", "08:00", (2024, 3, 15)))
            .await
            .unwrap();
        let b = service
            .add_task(new_task("Second", "08:00", (2024, 3, 15)))
            .await
            .unwrap();
        service
            .add_task(new_task("Other slot", "09:00", (2024, 3, 15)))
            .await
            .unwrap();

        service.toggle_complete(a.id).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let slot = service.tasks_for_slot(date, "08:00").await.unwrap();
        assert_eq!(slot.len(), 2);
        assert_eq!(slot[0].id, b.id);
        assert_eq!(slot[1].id, a.id);
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let service = create_test_service().await;
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        for title in ["a", "b", "c"] {
            service
                .add_task(new_task(title, "08:00", (2024, 3, 15)))
                .await
                .unwrap();
        }
        // A task on another date does not count
        service
            .add_task(new_task("elsewhere", "08:00", (2024, 3, 16)))
            .await
            .unwrap();

        let tasks = service.tasks_for_date(date).await.unwrap();
        service.toggle_complete(tasks[0].id).await.unwrap();

        let summary = service.summary(date).await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.remaining, 2);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let service = create_test_service().await;

        let task = service
            .add_task(new_task("Gone", "08:00", (2024, 3, 15)))
            .await
            .unwrap();
        service.delete_task(task.id).await.unwrap();

        assert!(service.list_tasks().await.unwrap().is_empty());

        // Deleting again is a no-op
        service.delete_task(task.id).await.unwrap();
    }
}
