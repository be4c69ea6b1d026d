//! 交换机列表页面视图

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::model::state::SwitchesState;
use crate::view::theme::{colors, Styles};

pub fn render(state: &SwitchesState, focused: bool, frame: &mut Frame, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_tabs(state, frame, layout[0]);

    let list = &state.list;
    if list.is_loading() {
        frame.render_widget(
            Paragraph::new(Line::styled("  Loading switches...", Styles::muted())),
            layout[1],
        );
        return;
    }
    if let Some(message) = list.message() {
        frame.render_widget(
            Paragraph::new(Line::styled(format!("  {message}"), Styles::error())),
            layout[1],
        );
        return;
    }

    let c = colors();
    let visible = list.visible();
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = focused && i == state.cursor.index();
            let style = if is_selected {
                Styles::selected()
            } else {
                Styles::text()
            };
            let mut spans = vec![
                Span::styled(format!("  {:<20}", entry.host), style),
                Span::styled(
                    format!("{:<12}", entry.group.as_deref().unwrap_or("")),
                    Style::default().fg(c.muted),
                ),
                Span::styled(
                    entry.location.clone().unwrap_or_default(),
                    Style::default().fg(c.muted),
                ),
            ];
            if entry.stale {
                spans.push(Span::styled("  (stale)", Style::default().fg(c.warning)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    if focused && !visible.is_empty() {
        list_state.select(Some(state.cursor.index()));
    }
    frame.render_stateful_widget(List::new(items), layout[1], &mut list_state);
}

/// 分组标签
fn render_tabs(state: &SwitchesState, frame: &mut Frame, area: Rect) {
    let tabs = state.list.tabs();
    let active = tabs.iter().position(|t| *t == state.list.active());
    let widget = Tabs::new(tabs.into_iter().map(str::to_string).collect::<Vec<_>>())
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Styles::border(false)),
        )
        .style(Styles::muted())
        .highlight_style(Styles::selected())
        .select(active.unwrap_or(0));
    frame.render_widget(widget, area);
}
