//! 导航面板消息

/// 左侧导航菜单的消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMessage {
    SelectPrevious,
    SelectNext,
    SelectFirst,
    SelectLast,
    /// 打开选中的视图
    Confirm,
}
