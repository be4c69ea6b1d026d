//! 应用主状态

use spam_core::dispatcher::Dispatcher;

use super::page::Page;
use super::state::ModalState;
use super::{FocusPanel, NavigationMenu};
use crate::backend::Bridge;

/// 应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 当前焦点面板
    pub focus: FocusPanel,
    /// 左侧导航菜单
    pub navigation: NavigationMenu,
    /// 导航调度器（历史、路径）
    pub dispatcher: Dispatcher,
    /// 当前挂载的视图
    pub page: Page,
    /// 弹窗状态
    pub modal: ModalState,
    /// 状态栏消息
    pub status_message: Option<String>,
    /// 到后端的桥
    pub bridge: Bridge,
}

impl App {
    /// 创建应用；调用 `update::start` 之前内容区为空白的关于页
    pub fn new(bridge: Bridge, base_path: &str) -> Self {
        Self {
            should_quit: false,
            focus: FocusPanel::default(),
            navigation: NavigationMenu::new(),
            dispatcher: Dispatcher::new(base_path),
            page: Page::About,
            modal: ModalState::new(),
            status_message: None,
            bridge,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
