//! 底部状态栏组件

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::state::{AddPatchSection, PortSection, SearchSection};
use crate::model::{App, FocusPanel, Page};
use crate::view::theme::Styles;

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = get_hints(app);

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// 根据焦点和页面生成快捷键提示
fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("Tab", "Switch Panels")];

    match app.focus {
        FocusPanel::Navigation => {
            hints.push(("↑↓", "Navigation"));
            hints.push(("Enter", "Open"));
        }
        FocusPanel::Content => match &app.page {
            Page::Switches(_) => {
                hints.push(("←→", "Group"));
                hints.push(("Enter", "Ports"));
            }
            Page::PortList(state) => match state.section {
                PortSection::Ports => {
                    hints.push(("Enter", "Details"));
                    hints.push(("Alt+d", "Delete"));
                    hints.push(("Alt+c", "Create"));
                    hints.push(("Alt+s", "Modules"));
                }
                PortSection::Modules => {
                    hints.push(("Enter", "Edit/Save"));
                    hints.push(("Esc", "Cancel"));
                }
            },
            Page::Search(state) => match state.section {
                SearchSection::Form => {
                    hints.push(("↑↓", "Field"));
                    hints.push(("Enter", "Search"));
                    hints.push(("Alt+x", "Clear"));
                }
                SearchSection::Results => {
                    hints.push(("Enter", "Details"));
                    hints.push(("Alt+s", "Form"));
                }
            },
            Page::AddPatch(state) => match state.section {
                AddPatchSection::Form => {
                    hints.push(("Alt+a", "Add Row"));
                    hints.push(("Alt+d", "Remove Row"));
                    hints.push(("Enter", "Submit"));
                }
                AddPatchSection::Summary => {
                    hints.push(("Enter", "Details"));
                    hints.push(("Alt+s", "Form"));
                }
            },
            Page::About => {}
        },
    }

    hints.push(("Alt+←→", "History"));
    hints.push(("Alt+q", "Quit"));
    hints
}
