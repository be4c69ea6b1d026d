//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ContentMessage, ModalMessage, NavigationMessage};
use crate::model::App;

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // 终端窗口大小改变时下一轮自动重绘
        _ => AppMessage::Noop,
    }
}

fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press，忽略 Release 和 Repeat（Windows 终端会重复上报）
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if app.modal.is_open() {
        return handle_modal_keys(key);
    }

    // 全局快捷键
    if DefaultKeymap::FORCE_QUIT.matches(&key) || DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::HELP.matches(&key) {
        return AppMessage::ShowHelp;
    }
    if DefaultKeymap::REFRESH.matches(&key) {
        return AppMessage::Refresh;
    }
    if DefaultKeymap::HISTORY_BACK.matches(&key) {
        return AppMessage::HistoryBack;
    }
    if DefaultKeymap::HISTORY_FORWARD.matches(&key) {
        return AppMessage::HistoryForward;
    }

    // Tab: 切换焦点面板
    if key.modifiers.is_empty() && key.code == KeyCode::Tab {
        return AppMessage::ToggleFocus;
    }

    if app.focus.is_navigation() {
        handle_navigation_keys(key)
    } else {
        handle_content_keys(key)
    }
}

/// 导航面板的按键
fn handle_navigation_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Navigation(NavigationMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Navigation(NavigationMessage::SelectNext),
        KeyCode::Home => AppMessage::Navigation(NavigationMessage::SelectFirst),
        KeyCode::End => AppMessage::Navigation(NavigationMessage::SelectLast),
        KeyCode::Enter => AppMessage::Navigation(NavigationMessage::Confirm),
        KeyCode::Char('?') => AppMessage::ShowHelp,
        KeyCode::Esc => AppMessage::ClearStatus,
        _ => AppMessage::Noop,
    }
}

/// 内容面板的按键：可打印字符都作为输入交给页面解释
fn handle_content_keys(key: KeyEvent) -> AppMessage {
    let action = [
        (&DefaultKeymap::ACTION_ADD, ContentMessage::AddRow),
        (&DefaultKeymap::ACTION_DELETE, ContentMessage::Delete),
        (&DefaultKeymap::ACTION_CREATE, ContentMessage::CreatePatch),
        (&DefaultKeymap::SECTION, ContentMessage::SwitchSection),
        (&DefaultKeymap::RESET, ContentMessage::Reset),
    ]
    .into_iter()
    .find(|(binding, _)| binding.matches(&key));
    if let Some((_, msg)) = action {
        return AppMessage::Content(msg);
    }

    let msg = match key.code {
        KeyCode::Up => ContentMessage::SelectPrevious,
        KeyCode::Down => ContentMessage::SelectNext,
        KeyCode::Home => ContentMessage::SelectFirst,
        KeyCode::End => ContentMessage::SelectLast,
        KeyCode::Left => ContentMessage::Left,
        KeyCode::Right => ContentMessage::Right,
        KeyCode::Enter => ContentMessage::Confirm,
        KeyCode::Esc => ContentMessage::Cancel,
        KeyCode::Backspace => ContentMessage::Backspace,
        KeyCode::Char(c)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            ContentMessage::Input(c)
        }
        _ => return AppMessage::Noop,
    };
    AppMessage::Content(msg)
}

/// 弹窗中的按键
fn handle_modal_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Modal(ModalMessage::Close);
    }
    match key.code {
        KeyCode::Esc => AppMessage::Modal(ModalMessage::Close),
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),
        _ => AppMessage::Noop,
    }
}
