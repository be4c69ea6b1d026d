//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│   ┌─────────┐    翻译    ┌───────────┐    消费    ┌──────────┐             │
//！│   │  Event  │ ────────▶ │  Message  │ ────────▶ │  Update  │             │
//！│   │   层    │           │    层     │           │    层    │             │
//！│   └─────────┘           │ AppMessage│           └────┬─────┘             │
//！│                         │ NavMsg    │                │ 发起请求          │
//！│                         │ ContentMsg│                ▼                   │
//！│                         │ ModalMsg  │           ┌──────────┐             │
//！│                         │ Backend   │ ◀──────── │ Backend  │             │
//！│                         └───────────┘  完成事件  │  Bridge  │             │
//！│                                                 └──────────┘             │
//！└─────────────────────────────────────────────────────────────────────────────┘

//!
//! src/message/mod.rs
//! Message 层：消息定义
//!
//! 消息有两个来源：
//!     · Event 层把按键翻译成 AppMessage
//!     · Backend Bridge 把异步请求的结果包装成 BackendEvent，
//!       主循环从通道取出后以 AppMessage::Backend 交给 Update 层
//!
//! 有模块结构：
//!     src/message/mod.rs
//!         mod app;            // 顶层消息
//!         mod backend;        // 后端完成事件
//!         mod content;        // 内容面板消息
//!         mod modal;          // 弹窗消息
//!         mod navigation;     // 导航面板消息
//!
//! BackendEvent 里的每个结果都带着发起请求时取得的令牌，
//! Update 层据此丢弃过期的响应。

mod app;
mod backend;
mod content;
mod modal;
mod navigation;

pub use app::AppMessage;
pub use backend::{BackendEvent, ListSlot};
pub use content::ContentMessage;
pub use modal::ModalMessage;
pub use navigation::NavigationMessage;
