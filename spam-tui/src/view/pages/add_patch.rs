//! 添加跳线页面视图

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use spam_core::row_table::{Banner, RowTable};
use spam_core::types::ColumnMode;

use crate::model::state::{AddPatchSection, AddPatchState, PatchCursor};
use crate::view::components::port_table;
use crate::view::theme::{colors, Styles};

/// 单元格宽度
const CELL_WIDTH: usize = 18;

pub fn render(state: &AddPatchState, focused: bool, frame: &mut Frame, area: Rect) {
    let Some(summary) = &state.summary else {
        render_form(state, focused, frame, area);
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    render_form(
        state,
        focused && state.section == AddPatchSection::Form,
        frame,
        layout[0],
    );

    let active = focused && state.section == AddPatchSection::Summary;
    let block = Block::default()
        .title(" Affected ports ")
        .borders(Borders::ALL)
        .border_style(Styles::border(active));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);
    port_table::render(summary, state.summary_cursor, active, frame, inner);
}

fn render_form(state: &AddPatchState, active: bool, frame: &mut Frame, area: Rect) {
    let c = colors();
    let table = &state.table;
    let mut lines = vec![site_line(state, active)];

    match table.banner() {
        Some(Banner::Success) => lines.push(Line::styled(
            "  Patches were created",
            Style::default().fg(c.success).add_modifier(Modifier::BOLD),
        )),
        Some(Banner::Error(message)) => lines.push(Line::styled(
            format!("  {message}"),
            Style::default().fg(c.error).add_modifier(Modifier::BOLD),
        )),
        None => {}
    }
    if table.is_pending() {
        lines.push(Line::styled("  Submitting...", Styles::muted()));
    }
    lines.push(Line::from(""));

    let fields = state.visible_fields();
    let mut header = vec![Span::raw("      ")];
    header.extend(fields.iter().map(|f| {
        Span::styled(
            format!("{:<width$}", f.label(), width = CELL_WIDTH),
            Styles::title(),
        )
    }));
    lines.push(Line::from(header));

    for (index, row) in table.rows().iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!("  {:<4}", RowTable::row_label(index)),
            Styles::muted(),
        )];
        for field in &fields {
            let selected = active
                && state.cursor
                    == PatchCursor::Cell {
                        row: index,
                        field: *field,
                    };
            let invalid = row.is_invalid(*field);
            let mut text = row.value(*field).to_string();
            if selected {
                text.push('▏');
            }
            if invalid {
                text.push_str(" !");
            }
            let style = match (selected, invalid) {
                (true, _) => Styles::selected(),
                (false, true) => Style::default().fg(c.error),
                (false, false) => Styles::text(),
            };
            spans.push(Span::styled(
                format!("{text:<width$}", width = CELL_WIDTH),
                style,
            ));
        }
        lines.push(Line::from(spans));

        for message in row.messages() {
            lines.push(Line::styled(format!("        {message}"), Styles::error()));
        }
    }

    let block = Block::default()
        .title(" Patches ")
        .borders(Borders::ALL)
        .border_style(Styles::border(active));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// 站点选择行与当前列模式
fn site_line(state: &AddPatchState, active: bool) -> Line<'static> {
    let selected = active && state.cursor == PatchCursor::Site;
    let site = match (state.site_index(), state.table.site()) {
        (Some(index), _) => state.sites[index].label(),
        (None, Some(code)) => code.to_string(),
        (None, None) => "(choose a site)".to_string(),
    };
    let mode = match state.table.mode() {
        ColumnMode::Outlet => "switch → cross-connect → outlet",
        ColumnMode::CrossConnectOnly => "switch → cross-connect",
    };
    let label_style = if selected {
        Styles::selected()
    } else {
        Styles::muted()
    };
    Line::from(vec![
        Span::styled("  Site  ", label_style),
        Span::styled(format!("◀ {site} ▶"), Styles::text()),
        Span::styled(format!("   {mode}"), Styles::muted()),
    ])
}
