//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│      ┌──────────┐   spawn    ┌──────────────┐   HTTP    ┌──────────┐       │
//！│      │  Update  │ ─────────▶ │ tokio 运行时 │ ───────▶ │  SPAM    │       │
//！│      │    层    │            │  (Bridge)    │ ◀─────── │  后端    │       │
//！│      └──────────┘            └──────┬───────┘          └──────────┘       │
//！│           ▲                         │ BackendEvent                        │
//！│           │                         ▼                                     │
//！│           │                  ┌──────────────┐                             │
//！│           └───────────────── │ mpsc 通道    │                             │
//！│              主循环取出      └──────────────┘                             │
//！└─────────────────────────────────────────────────────────────────────────────┘
//!
//!
//! src/backend/mod.rs
//! Backend 层：运行时桥接、配置与本地存储
//!
//! Backend 层与 UI 解耦。所有网络请求都经由 spam-core 的 SharedServices 发出，
//! 在 tokio 运行时上执行，结果以 BackendEvent 的形式回到主循环。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod bridge;             // 运行时桥接（spawn + 通道）
//!         mod config_service;     // 配置文件与环境变量
//!         mod storage;            // 键值存储（JSON 文件）
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、运行时桥接（Bridge）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/backend/bridge.rs 中定义：
//!
//!         主循环是同步的（轮询终端事件），网络请求是异步的。
//!         Bridge 持有运行时句柄和通道发送端：
//!             1. Update 层从 spam-core 状态机取得带令牌的请求
//!             2. Bridge 把请求 spawn 到运行时上
//!             3. 请求结束后把 (令牌, 结果) 发回通道
//!             4. 主循环取出事件，交给 update::backend 核对令牌后应用
//!
//!         Bridge 从不修改 Model。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、配置（LocalConfigService）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/backend/config_service.rs 中定义：
//!
//!         存储位置：~/.config/spam-tui/config.json
//!         环境变量覆盖：
//!             SPAM_BACKEND    后端地址
//!             SPAM_PATH       启动路径
//!             SPAM_LOG        日志过滤
//!         文件不存在时使用默认值。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 三、本地存储（JsonFileStore）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/backend/storage.rs 中定义：
//!
//!         实现 spam-core 的 KeyValueStore trait。
//!         每个后端源（scheme + host + port）一个 JSON 文件，
//!         保存上次选择的站点和交换机分组。
//!

mod bridge;
mod config_service;
mod storage;

pub use bridge::Bridge;
pub use config_service::{AppConfig, ConfigService, LocalConfigService};
pub use storage::JsonFileStore;
