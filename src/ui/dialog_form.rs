use crate::app::App;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the create/rename dialog over the list
pub fn render_dialog_form(f: &mut Frame, app: &App, area: Rect) {
    if let Some(dialog) = app.store.dialog() {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let confirm_enabled = !dialog.input().trim().is_empty();

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Title:"));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(dialog.input().to_string(), modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]));
        lines.push(Line::raw(""));

        let confirm_hint = if confirm_enabled {
            "Enter to confirm  ·  Esc to cancel"
        } else {
            "Type a title to confirm  ·  Esc to cancel"
        };
        lines.push(Line::from(Span::styled(confirm_hint, hint_style())));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(dialog.heading(), modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
