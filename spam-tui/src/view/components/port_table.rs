//! 结果表格组件
//!
//! 渲染一个 `ListView`：表头、各行，以及占据被摘下行位置的详情面板。

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use spam_core::detail_panel::{
    DeleteControl, DetailPanel, OpenPanel, PanelContent, PanelState, DELETE_CONFIRM,
};
use spam_core::list_view::ListView;
use spam_core::port_table::{PortTable, TableSlot};
use spam_core::utils::lenient;
use unicode_width::UnicodeWidthStr;

use crate::model::state::Cursor;
use crate::view::theme::{colors, Styles};

/// 单列最大显示宽度
const MAX_COLUMN_WIDTH: usize = 28;

/// 渲染结果表格
pub fn render(view: &ListView, cursor: Cursor, focused: bool, frame: &mut Frame, area: Rect) {
    let table = view.table();
    if table.is_empty() {
        let text = if view.is_loading() {
            "  Loading..."
        } else {
            view.message().unwrap_or("")
        };
        frame.render_widget(Paragraph::new(Line::styled(text, Styles::muted())), area);
        return;
    }

    let widths = column_widths(table);
    let header = Line::styled(
        format!("  {}", pad_row(table.fields(), &widths)),
        Styles::title().add_modifier(Modifier::UNDERLINED),
    );
    frame.render_widget(Paragraph::new(header), Rect { height: 1, ..area });

    let body = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };

    let items: Vec<ListItem> = table
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let selected = focused && i == cursor.index();
            let cells = table
                .row(slot.handle())
                .map(|row| pad_row(row.cells(), &widths))
                .unwrap_or_default();
            match slot {
                TableSlot::Row(_) => {
                    let style = if selected {
                        Styles::selected()
                    } else {
                        Styles::text()
                    };
                    ListItem::new(Line::styled(format!("  {cells}"), style))
                }
                TableSlot::Detail(_) => {
                    let mut lines = vec![Line::styled(
                        format!("▼ {cells}"),
                        if selected {
                            Styles::selected()
                        } else {
                            Styles::title()
                        },
                    )];
                    if let Some(panel) = view.panel() {
                        lines.extend(panel_lines(panel));
                    }
                    ListItem::new(Text::from(lines))
                }
            }
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(cursor.index()));
    }
    frame.render_stateful_widget(List::new(items), body, &mut state);
}

/// 各列宽度：表头与单元格的最大显示宽度
fn column_widths(table: &PortTable) -> Vec<usize> {
    table
        .fields()
        .iter()
        .enumerate()
        .map(|(col, field)| {
            table
                .slots()
                .iter()
                .filter_map(|slot| table.row(slot.handle()))
                .map(|row| row.cell(col).width())
                .chain(std::iter::once(field.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// 按显示宽度补齐或截断
fn pad(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

/// 详情面板的内容行
fn panel_lines(panel: &DetailPanel) -> Vec<Line<'static>> {
    let c = colors();
    let panel_style = Style::default().bg(c.panel_bg);

    match panel.state() {
        PanelState::Opening { .. } => {
            vec![Line::styled("    Loading port details...", Styles::muted())]
        }
        PanelState::Open(open) => {
            let mut lines = match open.content() {
                PanelContent::Detail(detail) => {
                    let mut lines = vec![
                        field_line("Switch", &detail.host),
                        field_line("Port", &detail.portname),
                        field_line("Cross-connect", detail.cp.as_deref().unwrap_or("-")),
                    ];
                    if let Some(outlet) = &detail.outlet {
                        lines.push(field_line("Outlet", outlet));
                    }
                    lines.extend(
                        detail
                            .extra
                            .iter()
                            .map(|(key, value)| field_line(key, &lenient::cell_text(value))),
                    );
                    lines
                }
                PanelContent::Error(message) => {
                    vec![Line::styled(format!("    {message}"), Styles::error())]
                }
            };
            lines.extend(action_lines(open));
            lines
                .into_iter()
                .map(|line| line.patch_style(panel_style))
                .collect()
        }
        PanelState::Closed | PanelState::Closing { .. } => Vec::new(),
    }
}

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {label:<16}"), Styles::muted()),
        Span::styled(value.to_string(), Styles::text()),
    ])
}

/// 面板底部的行动区
fn action_lines(open: &OpenPanel) -> Vec<Line<'static>> {
    let c = colors();
    let mut actions = Vec::new();
    match open.delete_control() {
        DeleteControl::Hidden => {}
        DeleteControl::Ready => actions.push(Span::styled(
            "[Alt+d] Delete patch",
            Style::default().fg(c.warning),
        )),
        DeleteControl::Confirming => actions.push(Span::styled(
            format!("Are you sure to {DELETE_CONFIRM}? [y] Yes  [n] No"),
            Style::default().fg(c.warning).add_modifier(Modifier::BOLD),
        )),
        DeleteControl::InFlight(_) => {
            actions.push(Span::styled("Deleting patch...", Styles::muted()));
        }
        DeleteControl::Failed(message) => actions.push(Span::styled(
            format!("{message} [Enter] Dismiss"),
            Styles::error(),
        )),
    }
    if open.can_create() {
        if !actions.is_empty() {
            actions.push(Span::raw("   "));
        }
        actions.push(Span::styled(
            "[Alt+c] Create patch",
            Style::default().fg(c.success),
        ));
    }
    if open.refresh_on_close() {
        actions.push(Span::styled("   (list reloads on close)", Styles::muted()));
    }

    if actions.is_empty() {
        return Vec::new();
    }
    let mut spans = vec![Span::raw("    ")];
    spans.extend(actions);
    vec![Line::from(spans)]
}
