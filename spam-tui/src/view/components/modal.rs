//! 弹窗组件

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::state::Modal;
use crate::model::App;

/// 渲染弹窗（如果有活动弹窗）
pub fn render(app: &App, frame: &mut Frame) {
    let Some(modal) = &app.modal.active else {
        return;
    };

    match modal {
        Modal::Error { title, message } => render_error(frame, title, message),
        Modal::Help => render_help(frame),
    }
}

/// 计算居中弹窗区域
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_error(frame: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(56, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let lines = vec![
        Line::from(""),
        Line::styled(message, Style::default().fg(Color::White)),
        Line::from(""),
        Line::styled(
            "Press Esc or Enter to close",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(58, 22, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let section = |text: &'static str| {
        Line::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };
    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), Style::default().fg(Color::Yellow)),
            Span::styled(desc, Style::default().fg(Color::White)),
        ])
    };

    let lines = vec![
        section("Global shortcuts"),
        entry("Tab", "Switch panel"),
        entry("Alt+←/→", "History back / forward"),
        entry("Alt+r", "Reload current view"),
        entry("Alt+h, ?", "This help"),
        entry("Alt+q", "Quit"),
        Line::from(""),
        section("Lists"),
        entry("↑↓ Home End", "Move"),
        entry("Enter", "Open / close port details"),
        entry("Esc", "Close port details"),
        entry("Alt+d", "Delete patch (y/n to confirm)"),
        entry("Alt+c", "Create patch for this port"),
        Line::from(""),
        section("Forms"),
        entry("←→", "Change site / column"),
        entry("Alt+a", "Add row"),
        entry("Alt+d", "Remove row"),
        entry("Alt+s", "Form / results"),
        entry("Alt+x", "Clear form"),
        Line::from(""),
        Line::styled("Press Esc to close the help", Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
