use crate::ui::styles::hint_style;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("Enter start/stop   "),
        Span::raw("Space fold   "),
        Span::raw("a add   "),
        Span::raw("A subtask   "),
        Span::raw("r rename   "),
        Span::raw("d done   "),
        Span::raw("x reset   "),
        Span::raw("s stop   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
