//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│   ┌─────────┐      ┌───────────┐      ┌──────────┐      ┌──────────┐       │
//！│   │  Event  │ ───▶ │  Message  │ ───▶ │  Update  │ ───▶ │  Model   │       │
//！│   └─────────┘      └───────────┘      └──────────┘      └────┬─────┘       │
//！│                                                              │ 读取        │
//！│                                                              ▼             │
//！│                                                         ┌──────────┐       │
//！│                                                         │   View   │       │
//！│                                                         └──────────┘       │
//！└─────────────────────────────────────────────────────────────────────────────┘

//!
//! src/model/mod.rs
//! Model 层：应用状态
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // App 主状态
//!         mod focus;          // 焦点面板
//!         mod navigation;     // 左侧导航菜单
//!         mod page;           // 当前挂载的视图
//!         pub mod state;      // 各页面的界面状态、弹窗
//!
//!
//!     App 持有：
//!         · dispatcher    spam-core 的导航调度器，负责历史记录与路径
//!         · page          调度结果挂载出的视图
//!         · modal         阻塞式弹窗（错误、帮助）
//!         · bridge        把请求交给 tokio 运行时的桥
//!
//!     业务状态（表格行、面板状态、令牌）全部在 spam-core 的状态机里，
//!     Model 层只补充光标、焦点区域等界面状态。
//!
//! Model 只由 Update 层修改，View 层只读取。
//!

mod app;
mod focus;
mod navigation;
mod page;
pub mod state;

pub use app::App;
pub use focus::FocusPanel;
pub use navigation::NavigationMenu;
pub use page::Page;
