use crate::app::{App, FlatRow};
use crate::domain::{format_duration, Task};
use crate::ui::styles::{
    active_style, border_style, default_style, duration_style, selected_style, title_style,
    tree_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.visible_rows();

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            // Rows come straight from the store's projections
            let task = app
                .store
                .get_task(row.id)
                .expect("visible row references a live task");
            let has_children = !app.store.children_ids(row.id).is_empty();
            let is_active = app.store.active_task_id() == Some(row.id);

            let line = task_line(task, row, has_children, is_active);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(pane_title(app), title_style())),
    );

    f.render_widget(list, area);
}

/// Pane title: the date, plus the running task and its elapsed time when a
/// timer is live.
fn pane_title(app: &App) -> String {
    let date = Local::now().format("%a %b %d");
    match app
        .store
        .active_task_id()
        .and_then(|id| app.store.get_task(id))
    {
        Some(task) => {
            let elapsed = format_duration(task.elapsed_secs);
            if elapsed.is_empty() {
                format!(" Stint ({}) — ⏱ {} ", date, task.title)
            } else {
                format!(" Stint ({}) — ⏱ {} {} ", date, elapsed, task.title)
            }
        }
        None => format!(" Stint ({}) ", date),
    }
}

/// Build a single row line.
/// Format: `  ├─ ▾ Physics  3m13s  ⏱ ACTIVE`
fn task_line(task: &Task, row: &FlatRow, has_children: bool, is_active: bool) -> Line<'static> {
    let mut spans = Vec::new();

    if row.depth > 0 {
        spans.push(Span::styled(
            "   ".repeat(row.depth - 1),
            tree_style(),
        ));
        spans.push(Span::styled(
            tree_connector(row.is_last).to_string(),
            tree_style(),
        ));
        spans.push(Span::raw(" "));
    }

    // Expansion marker for parents, aligned blank for leaves
    let marker = if has_children {
        if task.open {
            "▾ "
        } else {
            "▸ "
        }
    } else {
        "  "
    };
    spans.push(Span::raw(marker));

    spans.push(Span::raw(task.title.clone()));

    let elapsed = format_duration(task.elapsed_secs);
    if !elapsed.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(elapsed, duration_style()));
    }

    if is_active {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("⏱ ACTIVE", active_style()));
    }

    Line::from(spans)
}

/// Get tree connector for nested rows
fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}
