//！┌─────────────────────────────────────────────────────────────────────────┐
//！│                           主循环 (app.rs)                                │
//！│                                                                         │
//！│    ┌─────────┐     ┌─────────┐     ┌──────────┐     ┌─────────┐         │
//！│    │ 用户按键 │ ─▶ │  Event  │ ─▶ │ Message  │ ──▶ │ Update  │         │
//！│    └─────────┘     │  层     │     │   层     │     │   层    │         │
//！│                    └─────────┘     └──────────┘     └─────────┘         │
//！└─────────────────────────────────────────────────────────────────────────┘

//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘输入转换为 Message，不读取也不修改页面状态。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // poll_event / handle_event
//!         pub mod keymap;     // KeyBinding 与 DefaultKeymap
//!
//!
//! 按键分发顺序：
//!     1. 弹窗打开时：只认 Esc / Enter / Ctrl+C
//!     2. 全局快捷键：Alt+q 退出、Alt+h 帮助、Alt+r 刷新、Alt+←/→ 历史
//!     3. Tab 切换焦点
//!     4. 按焦点分发：
//!         · 导航面板：↑↓ jk Home End Enter
//!         · 内容面板：Alt 组合键是操作，其余可打印字符都是输入
//!
//! 内容面板中 `y`/`n` 等字符由页面自行解释（例如删除确认）。
//!

mod handler;
pub mod keymap;

pub use handler::{handle_event, poll_event};
