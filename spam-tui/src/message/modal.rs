//! 弹窗消息

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMessage {
    /// 关闭弹窗
    Close,
    /// 确认（错误弹窗上等同于关闭）
    Confirm,
}
