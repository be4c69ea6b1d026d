//! 应用级消息

use super::{BackendEvent, ContentMessage, ModalMessage, NavigationMessage};

/// 顶层应用消息
#[derive(Debug)]
pub enum AppMessage {
    /// 退出应用
    Quit,
    /// 切换焦点面板
    ToggleFocus,
    /// 导航面板消息
    Navigation(NavigationMessage),
    /// 内容面板消息
    Content(ContentMessage),
    /// 弹窗消息
    Modal(ModalMessage),
    /// 异步请求完成
    Backend(BackendEvent),
    /// 历史后退
    HistoryBack,
    /// 历史前进
    HistoryForward,
    /// 重新加载当前视图
    Refresh,
    /// 显示帮助
    ShowHelp,
    /// 清除状态消息
    ClearStatus,
    /// 无操作
    Noop,
}
