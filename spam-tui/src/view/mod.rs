//!
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! View 层只读取 Model，不修改任何状态。
//! 每次主循环都会整屏重绘，由 ratatui 计算差异后输出。
//!
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         mod layout;         // 主布局：标题栏 + 导航/内容 + 状态栏 + 弹窗
//!         mod components;     // 跨页面组件（导航、状态栏、弹窗、端口表）
//!         mod pages;          // 各页面内容
//!         pub mod theme;      // 颜色与样式
//!
//!
//!     ┌──────────────────────────────────────────────────────┐
//!     │ SPAM Patch Client                                    │  标题栏
//!     ├────────────┬─────────────────────────────────────────┤
//!     │ ▶ Switches │                                         │
//!     │   Search   │            pages::* 渲染区              │
//!     │   ...      │                                         │
//!     ├────────────┴─────────────────────────────────────────┤
//!     │ ↑↓ Select │ Enter Open │ ... │ /spam/sw/            │  状态栏
//!     └──────────────────────────────────────────────────────┘
//!

mod components;
mod layout;
mod pages;
pub mod theme;

pub use layout::render;
