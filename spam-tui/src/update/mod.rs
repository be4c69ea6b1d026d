//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│   ┌─────────┐          ┌───────────┐          ┌──────────┐                 │
//！│   │  Event  │ ───────▶ │  Message  │ ───────▶ │  Update  │ ──── 修改 ───▶ Model
//！│   └─────────┘          └───────────┘          └────┬─────┘                 │
//！│                              ▲                     │ 取得带令牌的请求      │
//！│                              │ BackendEvent        ▼                       │
//！│                              │               ┌──────────┐                  │
//！│                              └────────────── │  Bridge  │                  │
//！│                                              └──────────┘                  │
//！└─────────────────────────────────────────────────────────────────────────────┘

//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态。
//! 是唯一可以修改 Model 的地方。
//!
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod backend;        // 后端完成事件：核对令牌后写回状态机
//!         mod content;        // 内容面板消息，按当前页面分发
//!         mod list;           // 结果列表与详情面板（端口列表、搜索结果、摘要共用）
//!         mod modal;          // 弹窗消息
//!         mod navigation;     // 导航菜单、调度、历史
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 异步请求的两段式处理
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     发起：
//!         let request = view.begin_load();        // spam-core 状态机发放令牌
//!         app.bridge.load_list(slot, request);    // 交给运行时，立即返回
//!
//!     完成：
//!         BackendEvent::ListLoaded { token, .. }
//!             → backend::update
//!             → view.apply_load(token, ..)        // 令牌过期时返回 StaleResponse
//!
//!     StaleResponse 只记 debug 日志，不打扰用户。
//!

mod backend;
mod content;
mod list;
mod modal;
mod navigation;

use spam_core::types::RawNavigation;
use spam_core::CoreError;

use crate::message::AppMessage;
use crate::model::App;

pub use navigation::start;

/// 页面处理一条消息后的结果
#[derive(Debug)]
pub(crate) enum Outcome {
    None,
    /// 视图内部的直接跳转
    Navigate(RawNavigation),
    Status(String),
}

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::ToggleFocus => {
            // 如果有弹窗打开，不切换焦点
            if !app.modal.is_open() {
                app.focus = app.focus.toggle();
            }
        }

        AppMessage::Navigation(nav_msg) => navigation::update(app, nav_msg),

        AppMessage::Content(content_msg) => content::update(app, content_msg),

        AppMessage::Modal(modal_msg) => modal::update(app, modal_msg),

        AppMessage::Backend(event) => backend::update(app, event),

        AppMessage::HistoryBack => navigation::back(app),

        AppMessage::HistoryForward => navigation::forward(app),

        AppMessage::Refresh => navigation::refresh(app),

        AppMessage::ShowHelp => app.modal.show_help(),

        AppMessage::ClearStatus => app.clear_status(),

        AppMessage::Noop => {}
    }
}

/// 报告操作错误：过期响应只记日志，其余写入状态栏
fn report(app: &mut App, context: &str, error: &CoreError) {
    match error {
        CoreError::StaleResponse => {
            log::debug!("[{context}] {error}");
            return;
        }
        e if e.is_expected() => log::warn!("[{context}] {e}"),
        e => log::error!("[{context}] {e}"),
    }
    app.set_status(error.to_string());
}

#[cfg(test)]
mod tests;
