//! 端口列表页面视图

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use spam_core::editable::{EditState, EditableField};

use crate::model::state::{PortListState, PortSection};
use crate::view::components::port_table;
use crate::view::theme::{colors, Styles};

#[allow(clippy::cast_possible_truncation)]
pub fn render(state: &PortListState, focused: bool, frame: &mut Frame, area: Rect) {
    if state.modules.is_empty() {
        port_table::render(&state.view, state.cursor, focused, frame, area);
        return;
    }

    let modules_height = (state.modules.len() as u16).saturating_add(2).min(area.height / 2);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(modules_height), Constraint::Min(1)])
        .split(area);

    render_modules(state, focused, frame, layout[0]);
    port_table::render(
        &state.view,
        state.cursor,
        focused && state.section == PortSection::Ports,
        frame,
        layout[1],
    );
}

/// 模块接线位置
fn render_modules(state: &PortListState, focused: bool, frame: &mut Frame, area: Rect) {
    let active = focused && state.section == PortSection::Modules;
    let block = Block::default()
        .title(" Modules ")
        .borders(Borders::ALL)
        .border_style(Styles::border(active));

    let lines: Vec<Line> = state
        .modules
        .iter()
        .enumerate()
        .map(|(i, module)| {
            let selected = active && i == state.module_cursor.index();
            let label = format!(
                "  {}/{} {:<14}",
                module.wire.m,
                module.wire.n,
                module.wire.model.as_deref().unwrap_or("")
            );
            let label_style = if selected {
                Styles::selected()
            } else {
                Styles::muted()
            };
            let mut spans = vec![Span::styled(label, label_style), Span::raw(" ")];
            spans.extend(editable_spans(&module.field));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// 点击编辑字段的显示
fn editable_spans(field: &EditableField) -> Vec<Span<'static>> {
    let c = colors();
    let options = field.options();
    match field.state() {
        EditState::Static => {
            let (text, placeholder) = field.display();
            let style = if placeholder {
                Styles::muted()
            } else {
                Styles::text()
            };
            vec![Span::styled(text.to_string(), style)]
        }
        EditState::Editing { input, cursor } => {
            let width = options.size_hint.unwrap_or(20);
            let split = input
                .char_indices()
                .nth(*cursor)
                .map_or(input.len(), |(i, _)| i);
            let (before, after) = input.split_at(split);
            let fill = width.saturating_sub(input.chars().count() + 1);
            let style = Style::default().fg(c.selected_fg).bg(c.selected_bg);
            vec![
                Span::styled(format!("[{before}"), style),
                Span::styled("▏", style.fg(c.warning)),
                Span::styled(format!("{after}{}]", " ".repeat(fill)), style),
            ]
        }
        EditState::Saving { text, .. } => vec![
            Span::styled(text.clone(), Styles::text()),
            Span::styled(
                "  saving...",
                option_style(options.spin_style.as_deref(), Styles::muted()),
            ),
        ],
        EditState::Failed { message } => vec![
            Span::styled(field.value().to_string(), Styles::text()),
            Span::styled(
                format!("  {message}"),
                option_style(options.error_style.as_deref(), Styles::error()),
            ),
        ],
    }
}

/// 挂载时指定的样式名，未指定或未知时用默认样式
fn option_style(name: Option<&str>, fallback: Style) -> Style {
    name.and_then(Styles::named).unwrap_or(fallback)
}
