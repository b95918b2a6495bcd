pub mod dialog;
pub mod error;

pub use dialog::DialogState;
pub use error::{Result, StoreError};

use crate::domain::Task;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Period of the repeating timer tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Timer state: either nothing is running, or exactly one task is
/// accumulating time.
#[derive(Debug, Clone, Copy)]
enum TimerState {
    Idle,
    Running { task_id: Uuid, last_fire: Instant },
}

impl TimerState {
    fn active_task_id(&self) -> Option<Uuid> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { task_id, .. } => Some(*task_id),
        }
    }
}

/// Borrowed snapshot of the store state, published to subscribers after
/// every successful mutation.
pub struct StoreView<'a> {
    pub tasks: &'a [Task],
    pub active_task_id: Option<Uuid>,
    pub dialog: Option<&'a DialogState>,
}

/// Handle returned by [`TaskStore::subscribe`]; pass it back to
/// [`TaskStore::unsubscribe`] to stop receiving updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type SubscriberFn = Box<dyn FnMut(&StoreView<'_>)>;

/// The single source of truth for the task tree, the active timer and the
/// dialog state. All mutations funnel through its methods; every successful
/// mutation leaves the tree satisfying the invariants (unique ids, acyclic
/// parent relation, no dangling parents, at most one running timer) and is
/// published to subscribers before the method returns.
///
/// The tree is stored flat: a `Vec<Task>` where each task carries an
/// optional parent id. Roots and children are derived by filtering, which
/// is linear per call and fine at the human scale this runs at.
pub struct TaskStore {
    tasks: Vec<Task>,
    timer: TimerState,
    dialog: Option<DialogState>,
    subscribers: Vec<(SubscriptionId, SubscriberFn)>,
    next_subscriber: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            timer: TimerState::Idle,
            dialog: None,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    // --- Queries ---------------------------------------------------------

    /// All tasks in display order (most recently created first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The task currently accumulating time, if any.
    pub fn active_task_id(&self) -> Option<Uuid> {
        self.timer.active_task_id()
    }

    /// Point lookup by id.
    pub fn get_task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Ids of all root tasks, most recently created first.
    pub fn root_task_ids(&self) -> Vec<Uuid> {
        self.tasks
            .iter()
            .filter(|t| t.is_root())
            .map(|t| t.id)
            .collect()
    }

    /// Ids of the direct children of `id`, most recently created first.
    pub fn children_ids(&self, id: Uuid) -> Vec<Uuid> {
        self.tasks
            .iter()
            .filter(|t| t.parent_id == Some(id))
            .map(|t| t.id)
            .collect()
    }

    // --- Mutations -------------------------------------------------------

    /// Create a task and return its id.
    ///
    /// The title is trimmed and must not be empty. A given parent must
    /// exist. New tasks go to the front of the set, so siblings display
    /// most recently created first.
    pub fn create_task(&mut self, title: &str, parent_id: Option<Uuid>) -> Result<Uuid> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        if let Some(pid) = parent_id {
            if self.get_task(pid).is_none() {
                return Err(StoreError::NotFound(pid));
            }
        }
        let task = Task::new(title.to_string(), parent_id);
        let id = task.id;
        self.tasks.insert(0, task);
        self.notify();
        Ok(id)
    }

    /// Set the title of `id`. Missing ids are a silent no-op; empty titles
    /// are rejected without mutating anything.
    pub fn rename_task(&mut self, id: Uuid, new_title: &str) -> Result<()> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.title = new_title.to_string();
            self.notify();
        }
        Ok(())
    }

    /// Zero the elapsed time of `id` only; descendants keep theirs.
    /// Missing ids are a silent no-op.
    pub fn reset_duration(&mut self, id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.elapsed_secs = 0;
            self.notify();
        }
    }

    /// Flip the expansion flag of `id`. Missing ids are a silent no-op.
    pub fn toggle_open(&mut self, id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.open = !task.open;
            self.notify();
        }
    }

    /// Start the timer on `id`, stopping whatever was running first.
    /// Starting the already-active task is a no-op.
    pub fn start_task(&mut self, id: Uuid) -> Result<()> {
        if self.get_task(id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        if self.active_task_id() == Some(id) {
            return Ok(());
        }
        self.stop_active_task();
        self.timer = TimerState::Running {
            task_id: id,
            last_fire: Instant::now(),
        };
        self.notify();
        Ok(())
    }

    /// Stop the running timer, if any. Idempotent.
    pub fn stop_active_task(&mut self) {
        if matches!(self.timer, TimerState::Running { .. }) {
            self.timer = TimerState::Idle;
            self.notify();
        }
    }

    /// Pump the timer against the wall clock. Called from the event loop;
    /// the poll rate only bounds latency, the increment rate is fixed by
    /// [`TICK_PERIOD`].
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the timer to `now`, firing once per whole elapsed period.
    /// Every firing re-reads the active task id, so a stop or switch
    /// between ticks is respected and the wrong task is never incremented.
    pub fn tick_at(&mut self, now: Instant) {
        let mut fired = false;
        while let TimerState::Running { task_id, last_fire } = self.timer {
            if now.saturating_duration_since(last_fire) < TICK_PERIOD {
                break;
            }
            self.timer = TimerState::Running {
                task_id,
                last_fire: last_fire + TICK_PERIOD,
            };
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                task.elapsed_secs += 1;
                fired = true;
            }
        }
        if fired {
            self.notify();
        }
    }

    /// Remove `id` and its entire descendant subtree. Stops the timer when
    /// the active task is anywhere inside the removed subtree, so no
    /// dangling active id can remain.
    pub fn finish_task(&mut self, id: Uuid) -> Result<()> {
        if self.get_task(id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        let doomed = self.subtree_ids(id);
        if let Some(active) = self.active_task_id() {
            if doomed.contains(&active) {
                self.timer = TimerState::Idle;
            }
        }
        self.tasks.retain(|t| !doomed.contains(&t.id));
        self.notify();
        Ok(())
    }

    /// Stop the timer and empty the whole task set.
    pub fn clear_tasks(&mut self) {
        self.timer = TimerState::Idle;
        self.tasks.clear();
        self.notify();
    }

    /// Replace the task set wholesale, e.g. when hydrating from a
    /// persisted snapshot. The incoming set is validated first and nothing
    /// is applied on failure. A running timer whose task id is absent from
    /// the incoming set is stopped.
    pub fn load_tasks(&mut self, tasks: Vec<Task>) -> Result<()> {
        validate_task_set(&tasks)?;
        if let Some(active) = self.active_task_id() {
            if !tasks.iter().any(|t| t.id == active) {
                self.timer = TimerState::Idle;
            }
        }
        self.tasks = tasks;
        self.notify();
        Ok(())
    }

    // --- Subscriptions ---------------------------------------------------

    /// Register a callback invoked synchronously after every successful
    /// mutation, including timer ticks and dialog changes.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreView<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    fn notify(&mut self) {
        let view = StoreView {
            tasks: &self.tasks,
            active_task_id: self.timer.active_task_id(),
            dialog: self.dialog.as_ref(),
        };
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&view);
        }
    }

    /// `root` plus all its transitive descendants. With parent pointers
    /// only, grow the set until a pass adds nothing.
    fn subtree_ids(&self, root: Uuid) -> HashSet<Uuid> {
        let mut ids = HashSet::new();
        ids.insert(root);
        loop {
            let before = ids.len();
            for task in &self.tasks {
                if let Some(pid) = task.parent_id {
                    if ids.contains(&pid) {
                        ids.insert(task.id);
                    }
                }
            }
            if ids.len() == before {
                return ids;
            }
        }
    }
}

/// Check the §3-style invariants of a candidate task set: unique ids,
/// parents that exist, and an acyclic parent relation.
fn validate_task_set(tasks: &[Task]) -> Result<()> {
    let mut ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !ids.insert(task.id) {
            return Err(StoreError::InvariantViolation(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }
    for task in tasks {
        if let Some(pid) = task.parent_id {
            if !ids.contains(&pid) {
                return Err(StoreError::InvariantViolation(format!(
                    "task {} references missing parent {}",
                    task.id, pid
                )));
            }
        }
    }
    for task in tasks {
        let mut hops = 0;
        let mut current = task.parent_id;
        while let Some(pid) = current {
            hops += 1;
            if hops > tasks.len() {
                return Err(StoreError::InvariantViolation(format!(
                    "cycle in parent chain of task {}",
                    task.id
                )));
            }
            current = tasks
                .iter()
                .find(|t| t.id == pid)
                .and_then(|t| t.parent_id);
        }
    }
    Ok(())
}
