use crate::domain::Task;
use crate::store::{DialogState, TaskStore};
use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

/// A flattened row of the visible task tree, for rendering and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow {
    pub id: Uuid,
    /// Depth in the tree (0 = root)
    pub depth: usize,
    /// Whether this is the last sibling at its depth
    pub is_last: bool,
}

/// Presentation-side state: the store plus the cursor over its visible rows.
/// Every task mutation goes through a store command; the app only keeps
/// what the terminal needs (selection, dirty flag for autosave).
pub struct App {
    pub store: TaskStore,
    pub selected_index: usize,
    dirty: Rc<Cell<bool>>,
}

impl App {
    /// Build the app around a hydrated store. The dirty flag is wired as a
    /// store subscriber, so any mutation (including ticks) schedules a save.
    pub fn new(initial_tasks: Vec<Task>) -> Result<Self> {
        let mut store = TaskStore::new();
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        store.subscribe(move |_| flag.set(true));
        store.load_tasks(initial_tasks)?;
        // Hydration itself is not a change worth re-persisting
        dirty.set(false);
        Ok(Self {
            store,
            selected_index: 0,
            dirty,
        })
    }

    /// Consume the dirty flag; true means the task set changed since the
    /// last save.
    pub fn take_dirty(&mut self) -> bool {
        self.dirty.replace(false)
    }

    // --- Tree view -------------------------------------------------------

    /// Flatten the tree into displayable rows, honoring each task's `open`
    /// flag. Closed subtrees contribute only their root row.
    pub fn visible_rows(&self) -> Vec<FlatRow> {
        let mut rows = Vec::new();
        let roots = self.store.root_task_ids();
        let count = roots.len();
        for (i, id) in roots.into_iter().enumerate() {
            self.push_subtree(id, 0, i + 1 == count, &mut rows);
        }
        rows
    }

    fn push_subtree(&self, id: Uuid, depth: usize, is_last: bool, rows: &mut Vec<FlatRow>) {
        rows.push(FlatRow { id, depth, is_last });
        let open = self.store.get_task(id).map(|t| t.open).unwrap_or(false);
        if open {
            let children = self.store.children_ids(id);
            let count = children.len();
            for (i, child) in children.into_iter().enumerate() {
                self.push_subtree(child, depth + 1, i + 1 == count, rows);
            }
        }
    }

    pub fn selected_task_id(&self) -> Option<Uuid> {
        self.visible_rows()
            .get(self.selected_index)
            .map(|row| row.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_rows().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    // --- Commands --------------------------------------------------------

    /// Enter on a row: stop the timer if this task is running, otherwise
    /// start it (stopping whatever else was running).
    pub fn toggle_start_stop(&mut self) -> Result<()> {
        if let Some(id) = self.selected_task_id() {
            if self.store.active_task_id() == Some(id) {
                self.store.stop_active_task();
            } else {
                self.store.start_task(id)?;
            }
        }
        Ok(())
    }

    pub fn toggle_open_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.toggle_open(id);
            self.clamp_selection();
        }
    }

    /// Finish the selected task, removing its whole subtree.
    pub fn finish_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_task_id() {
            self.store.finish_task(id)?;
            self.clamp_selection();
        }
        Ok(())
    }

    pub fn reset_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.reset_duration(id);
        }
    }

    // --- Dialog intent ---------------------------------------------------

    pub fn open_add_task_dialog(&mut self) {
        self.store.open_create_task_dialog();
    }

    pub fn open_add_subtask_dialog(&mut self) -> Result<()> {
        if let Some(id) = self.selected_task_id() {
            self.store.open_create_subtask_dialog(id)?;
        }
        Ok(())
    }

    pub fn open_rename_dialog(&mut self) -> Result<()> {
        if let Some(id) = self.selected_task_id() {
            self.store.open_edit_task_dialog(id)?;
        }
        Ok(())
    }

    pub fn dialog_push_char(&mut self, c: char) -> Result<()> {
        if let Some(dialog) = self.store.dialog() {
            let mut text = dialog.input().to_string();
            text.push(c);
            self.store.set_dialog_input(text)?;
        }
        Ok(())
    }

    pub fn dialog_backspace(&mut self) -> Result<()> {
        if let Some(dialog) = self.store.dialog() {
            let mut text = dialog.input().to_string();
            text.pop();
            self.store.set_dialog_input(text)?;
        }
        Ok(())
    }

    /// Confirm the open dialog: create or rename with the typed title, then
    /// close. A whitespace-only title leaves the dialog open and the store
    /// untouched, mirroring a disabled confirm button.
    pub fn commit_dialog(&mut self) -> Result<()> {
        let dialog = match self.store.dialog() {
            Some(d) => d.clone(),
            None => return Ok(()),
        };
        let title = dialog.input().trim().to_string();
        if title.is_empty() {
            return Ok(());
        }
        match dialog {
            DialogState::CreateTask { .. } => {
                self.store.create_task(&title, None)?;
            }
            DialogState::CreateSubtask { parent_id, .. } => {
                self.store.create_task(&title, Some(parent_id))?;
            }
            DialogState::EditTask { task_id, .. } => {
                self.store.rename_task(task_id, &title)?;
            }
        }
        self.store.close_dialog();
        Ok(())
    }

    pub fn cancel_dialog(&mut self) {
        self.store.close_dialog();
    }
}
