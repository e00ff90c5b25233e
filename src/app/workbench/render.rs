use super::{EditorViewport, Workbench};
use crate::kernel::{Action as KernelAction, AppState, FocusTarget};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

const FOCUS_BORDER: Color = Color::Cyan;
const INACTIVE_BORDER: Color = Color::DarkGray;
const GUTTER_FG: Color = Color::DarkGray;
const ECHO_FG: Color = Color::Yellow;

pub(super) fn render(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(console_height(area.height)),
            Constraint::Length(super::STATUS_HEIGHT),
            Constraint::Length(super::FILE_INFO_HEIGHT),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(sidebar_width(rows[0].width)),
            Constraint::Min(0),
        ])
        .split(rows[0]);

    sync_explorer_height(workbench, columns[0]);

    let state = workbench.store.state();
    render_explorer(state, frame, columns[0]);
    let viewport = render_editor(state, workbench.editor_viewport, frame, columns[1]);
    render_console(state, frame, rows[1]);
    render_status(state, frame, rows[2]);
    frame.render_widget(Paragraph::new(state.session.file_info_line()), rows[3]);
    workbench.editor_viewport = viewport;
}

fn console_height(total: u16) -> u16 {
    let max = total.saturating_sub(super::STATUS_HEIGHT + super::FILE_INFO_HEIGHT + 3);
    (total / 3).max(super::CONSOLE_MIN_HEIGHT).min(max)
}

fn sidebar_width(available: u16) -> u16 {
    if available == 0 {
        return 0;
    }
    let desired = available
        .saturating_mul(super::SIDEBAR_WIDTH_PERCENT)
        .saturating_div(100);
    desired
        .max(super::SIDEBAR_MIN_WIDTH.min(available))
        .min(available.saturating_sub(10).max(1))
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused { FOCUS_BORDER } else { INACTIVE_BORDER };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

fn sync_explorer_height(workbench: &mut Workbench, area: Rect) {
    let height = area.height.saturating_sub(2).max(1);
    if workbench.last_explorer_view_height != Some(height) {
        workbench.last_explorer_view_height = Some(height);
        let _ = workbench.dispatch_kernel(KernelAction::ExplorerSetViewHeight {
            height: height as usize,
        });
    }
}

fn render_explorer(state: &AppState, frame: &mut Frame, area: Rect) {
    let focused = state.ui.focus == FocusTarget::Explorer;
    let explorer = &state.explorer;
    let title = format!(" {} ", explorer.tree().root_name());
    let block = pane_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = explorer
        .rows()
        .iter()
        .enumerate()
        .skip(explorer.scroll_offset())
        .take(inner.height as usize)
        .map(|(index, row)| {
            let marker = match (row.is_dir, row.is_expanded) {
                (true, true) => "▾ ",
                (true, false) => "▸ ",
                (false, _) => "  ",
            };
            let text = format!("{}{}{}", "  ".repeat(usize::from(row.depth)), marker, row.name);
            let mut style = Style::default();
            if row.is_dir {
                style = style.add_modifier(Modifier::BOLD);
            }
            if index == explorer.selected_row() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(text, style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_editor(
    state: &AppState,
    mut viewport: EditorViewport,
    frame: &mut Frame,
    area: Rect,
) -> EditorViewport {
    let focused = state.ui.focus == FocusTarget::Editor;
    let session = &state.session;
    let title = match session.file_name() {
        Some(name) if session.is_saved() => format!(" {name} "),
        Some(name) => format!(" {name} ● "),
        None => " Untitled ".to_string(),
    };
    let block = pane_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return viewport;
    }

    let buffer = session.buffer();
    let (cursor_row, cursor_col) = buffer.cursor();
    let gutter = if state.editor_settings.show_line_numbers {
        buffer.len_lines().to_string().len() as u16 + 1
    } else {
        0
    };
    let text_width = inner.width.saturating_sub(gutter).max(1) as usize;
    let height = inner.height as usize;

    if cursor_row < viewport.row {
        viewport.row = cursor_row;
    } else if cursor_row >= viewport.row + height {
        viewport.row = cursor_row + 1 - height;
    }
    if cursor_col < viewport.col {
        viewport.col = cursor_col;
    } else if cursor_col >= viewport.col + text_width {
        viewport.col = cursor_col + 1 - text_width;
    }

    let mut lines = Vec::with_capacity(height);
    let mut cursor_x = None;
    for row in viewport.row..(viewport.row + height).min(buffer.len_lines()) {
        let text = buffer.line(row).unwrap_or_default();
        let mut spans = Vec::with_capacity(2);
        if gutter > 0 {
            spans.push(Span::styled(
                format!("{:>width$} ", row + 1, width = gutter as usize - 1),
                Style::default().fg(GUTTER_FG),
            ));
        }
        let visible: String = text
            .chars()
            .skip(viewport.col)
            .map(|c| if c == '\t' { ' ' } else { c })
            .collect();
        if row == cursor_row {
            let x: usize = visible
                .chars()
                .take(cursor_col - viewport.col)
                .map(|c| c.width().unwrap_or(0))
                .sum();
            cursor_x = Some(x);
        }
        spans.push(Span::raw(visible));
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), inner);

    if focused {
        if let Some(x) = cursor_x {
            let x = (x as u16).saturating_add(gutter).min(inner.width.saturating_sub(1));
            let y = (cursor_row - viewport.row) as u16;
            frame.set_cursor_position(Position::new(inner.x + x, inner.y + y));
        }
    }
    viewport
}

fn render_console(state: &AppState, frame: &mut Frame, area: Rect) {
    let focused = state.ui.focus == FocusTarget::Console;
    let console = &state.console;
    let title = match (console.running(), console.queued()) {
        (Some(request), 0) => format!(" Console: running {} ", request.line),
        (Some(request), queued) => format!(" Console: running {} ({queued} queued) ", request.line),
        (None, _) => " Console ".to_string(),
    };
    let block = pane_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let transcript = console.transcript();
    let available = inner.height.saturating_sub(1) as usize;
    let skip = transcript.len().saturating_sub(available);
    let mut lines: Vec<Line> = transcript
        .iter()
        .skip(skip)
        .map(|line| {
            if line.starts_with(crate::kernel::console::ECHO_MARKER) {
                Line::from(Span::styled(line.to_string(), Style::default().fg(ECHO_FG)))
            } else {
                Line::from(line.to_string())
            }
        })
        .collect();
    let prompt = console.prompt().display();
    let prompt_width: usize = prompt.chars().map(|c| c.width().unwrap_or(0)).sum();
    lines.push(Line::from(prompt));
    let prompt_y = inner.y + (lines.len() as u16 - 1).min(inner.height - 1);
    frame.render_widget(Paragraph::new(lines), inner);

    if focused {
        let x = (prompt_width as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(inner.x + x, prompt_y));
    }
}

fn render_status(state: &AppState, frame: &mut Frame, area: Rect) {
    if let Some(prompt) = state.ui.path_prompt.as_ref() {
        let text = prompt.input().display();
        let width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            area,
        );
        let x = (width as u16).min(area.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(area.x + x, area.y));
        return;
    }

    let mut spans = vec![Span::raw(state.session.status_line())];
    if let Some(notice) = state.ui.notice.as_deref() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            notice.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
