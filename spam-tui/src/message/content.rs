//! 内容面板消息
//!
//! 同一条消息在不同页面上含义不同，由 `update::content` 按当前页面解释。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMessage {
    SelectPrevious,
    SelectNext,
    SelectFirst,
    SelectLast,
    /// ← ：左移光标 / 上一个标签 / 上一个站点
    Left,
    /// → ：右移光标 / 下一个标签 / 下一个站点
    Right,
    /// Enter
    Confirm,
    /// Esc：取消编辑、关闭面板或横幅
    Cancel,
    /// 字符输入
    Input(char),
    Backspace,
    /// 在光标行下方插入一行
    AddRow,
    /// 删除光标行 / 删除面板上的跳线
    Delete,
    /// 以面板上的端口创建跳线
    CreatePatch,
    /// 切换页面内的区域（表单/结果、端口/模块）
    SwitchSection,
    /// 清空表单
    Reset,
}
