//! 搜索页面视图

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use spam_core::search_tool::SearchField;

use crate::model::state::{SearchSection, SearchState};
use crate::view::components::port_table;
use crate::view::theme::Styles;

#[allow(clippy::cast_possible_truncation)]
pub fn render(state: &SearchState, focused: bool, frame: &mut Frame, area: Rect) {
    let form_height = SearchField::ALL.len() as u16 + 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(1)])
        .split(area);

    render_form(state, focused && state.section == SearchSection::Form, frame, layout[0]);

    match state.tool.results() {
        Some(results) => port_table::render(
            results,
            state.cursor,
            focused && state.section == SearchSection::Results,
            frame,
            layout[1],
        ),
        None => frame.render_widget(
            Paragraph::new(Line::styled(
                "  Fill in any field and press Enter to search",
                Styles::muted(),
            )),
            layout[1],
        ),
    }
}

fn render_form(state: &SearchState, active: bool, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Styles::border(active));

    let current = state.current_field();
    let lines: Vec<Line> = SearchField::ALL
        .into_iter()
        .map(|field| {
            let selected = active && field == current;
            let value = state.tool.form().get(field);
            let shown = if field == SearchField::Site {
                site_label(state, value)
            } else if selected {
                format!("{value}▏")
            } else {
                value.to_string()
            };
            let label_style = if selected {
                Styles::selected()
            } else {
                Styles::muted()
            };
            Line::from(vec![
                Span::styled(format!("  {:<14}", field.label()), label_style),
                Span::raw(" "),
                Span::styled(shown, Styles::text()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// 站点字段：`◀ 代码 / 描述 ▶`
fn site_label(state: &SearchState, value: &str) -> String {
    let label = state
        .sites
        .iter()
        .find(|s| s.code == value)
        .map_or_else(|| value.to_string(), spam_core::types::Site::label);
    format!("◀ {label} ▶")
}
