//! 关于页面视图

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::App;
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let history = app.dispatcher.history();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  SPAM - Switch Ports Activity Monitor",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::styled(
            "  Terminal client for browsing switch ports and managing patches",
            Styles::muted(),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Version        ", Styles::muted()),
            Span::styled(env!("CARGO_PKG_VERSION"), Styles::text()),
        ]),
        Line::from(vec![
            Span::styled("  Base path      ", Styles::muted()),
            Span::styled(app.dispatcher.base().to_string(), Styles::text()),
        ]),
        Line::from(vec![
            Span::styled("  History        ", Styles::muted()),
            Span::styled(format!("{} entries", history.len()), Styles::text()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
