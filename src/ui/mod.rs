pub mod dialog_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::App;
use dialog_form::render_dialog_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &App) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);

    // Dialog draws over the list when open
    if app.store.dialog().is_some() {
        render_dialog_form(f, app, size);
    }
}
