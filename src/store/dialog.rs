use super::error::{Result, StoreError};
use super::TaskStore;
use uuid::Uuid;

/// Which task creation/edit interaction is currently open, with its
/// live-edited text.
///
/// Each variant owns its own input buffer, so switching dialog kinds can
/// never leak stale text from a previous dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    /// Creating a new root task
    CreateTask { input: String },
    /// Creating a child of `parent_id`
    CreateSubtask { parent_id: Uuid, input: String },
    /// Editing the title of `task_id`
    EditTask { task_id: Uuid, input: String },
}

impl DialogState {
    /// The live-edited candidate title.
    pub fn input(&self) -> &str {
        match self {
            DialogState::CreateTask { input } => input,
            DialogState::CreateSubtask { input, .. } => input,
            DialogState::EditTask { input, .. } => input,
        }
    }

    fn input_mut(&mut self) -> &mut String {
        match self {
            DialogState::CreateTask { input } => input,
            DialogState::CreateSubtask { input, .. } => input,
            DialogState::EditTask { input, .. } => input,
        }
    }

    /// Modal title for rendering.
    pub fn heading(&self) -> &'static str {
        match self {
            DialogState::CreateTask { .. } => " New Task ",
            DialogState::CreateSubtask { .. } => " New Subtask ",
            DialogState::EditTask { .. } => " Rename Task ",
        }
    }
}

impl TaskStore {
    /// Open the root-task creation dialog with an empty input.
    pub fn open_create_task_dialog(&mut self) {
        self.dialog = Some(DialogState::CreateTask {
            input: String::new(),
        });
        self.notify();
    }

    /// Open the subtask creation dialog for `parent_id`.
    pub fn open_create_subtask_dialog(&mut self, parent_id: Uuid) -> Result<()> {
        if self.get_task(parent_id).is_none() {
            return Err(StoreError::NotFound(parent_id));
        }
        self.dialog = Some(DialogState::CreateSubtask {
            parent_id,
            input: String::new(),
        });
        self.notify();
        Ok(())
    }

    /// Open the title-edit dialog for `task_id`, pre-seeded with its
    /// current title.
    pub fn open_edit_task_dialog(&mut self, task_id: Uuid) -> Result<()> {
        let title = self
            .get_task(task_id)
            .ok_or(StoreError::NotFound(task_id))?
            .title
            .clone();
        self.dialog = Some(DialogState::EditTask {
            task_id,
            input: title,
        });
        self.notify();
        Ok(())
    }

    /// Replace the live input text of the open dialog.
    ///
    /// Live typing accepts any text, including empty; the commit step is
    /// where empty titles are rejected.
    pub fn set_dialog_input(&mut self, text: String) -> Result<()> {
        match self.dialog.as_mut() {
            Some(dialog) => {
                *dialog.input_mut() = text;
                self.notify();
                Ok(())
            }
            None => Err(StoreError::NoDialogOpen),
        }
    }

    /// Close any open dialog. Safe to call when none is open.
    pub fn close_dialog(&mut self) {
        if self.dialog.is_some() {
            self.dialog = None;
            self.notify();
        }
    }

    /// The currently open dialog, if any.
    pub fn dialog(&self) -> Option<&DialogState> {
        self.dialog.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dialog_initially() {
        let store = TaskStore::new();
        assert!(store.dialog().is_none());
    }

    #[test]
    fn test_open_create_task_dialog() {
        let mut store = TaskStore::new();
        store.open_create_task_dialog();
        assert_eq!(
            store.dialog(),
            Some(&DialogState::CreateTask {
                input: String::new()
            })
        );
    }

    #[test]
    fn test_set_dialog_input() {
        let mut store = TaskStore::new();
        store.open_create_task_dialog();
        store.set_dialog_input("Physics".to_string()).unwrap();
        assert_eq!(store.dialog().unwrap().input(), "Physics");
    }

    #[test]
    fn test_set_dialog_input_without_dialog_fails() {
        let mut store = TaskStore::new();
        assert_eq!(
            store.set_dialog_input("nope".to_string()),
            Err(StoreError::NoDialogOpen)
        );
    }

    #[test]
    fn test_open_subtask_dialog_requires_parent() {
        let mut store = TaskStore::new();
        let ghost = Uuid::new_v4();
        assert_eq!(
            store.open_create_subtask_dialog(ghost),
            Err(StoreError::NotFound(ghost))
        );
        assert!(store.dialog().is_none());

        let parent = store.create_task("School", None).unwrap();
        store.open_create_subtask_dialog(parent).unwrap();
        match store.dialog().unwrap() {
            DialogState::CreateSubtask { parent_id, input } => {
                assert_eq!(*parent_id, parent);
                assert!(input.is_empty());
            }
            other => panic!("unexpected dialog: {:?}", other),
        }
    }

    #[test]
    fn test_edit_dialog_preseeds_current_title() {
        let mut store = TaskStore::new();
        let id = store.create_task("Physics", None).unwrap();
        store.open_edit_task_dialog(id).unwrap();
        assert_eq!(store.dialog().unwrap().input(), "Physics");
    }

    #[test]
    fn test_edit_dialog_missing_task_fails() {
        let mut store = TaskStore::new();
        let ghost = Uuid::new_v4();
        assert_eq!(
            store.open_edit_task_dialog(ghost),
            Err(StoreError::NotFound(ghost))
        );
    }

    #[test]
    fn test_close_dialog_is_idempotent() {
        let mut store = TaskStore::new();
        store.close_dialog();
        assert!(store.dialog().is_none());

        store.open_create_task_dialog();
        store.close_dialog();
        store.close_dialog();
        assert!(store.dialog().is_none());
    }

    #[test]
    fn test_switching_dialogs_resets_input_buffer() {
        let mut store = TaskStore::new();
        let parent = store.create_task("School", None).unwrap();

        store.open_create_task_dialog();
        store.set_dialog_input("half-typed".to_string()).unwrap();

        // Opening a different dialog must not carry the old buffer over
        store.open_create_subtask_dialog(parent).unwrap();
        assert_eq!(store.dialog().unwrap().input(), "");
    }
}
