//!
//! app.rs
//! 应用主循环
//!
//!
//! 主循环大约每 100 ms 执行一次（取决于有无按键）：
//! loop {
//!
//!     terminal.draw(|f| view::render(&app , f))       // 渲染 UI
//!     if app.should_quit { break }                    // 检查是否应该退出
//!     while let Ok(event) = rx.try_recv() {           // 取出已完成的后端请求
//!         update::update(&mut app , Backend(event))       // 核对令牌后写回状态
//!     }
//!     if let Some(event) = poll_event() {             // 等待输入，最多 100ms
//!         let msg = handle_event(event , &app);           // 翻译为消息
//!         update::update(&mut app , msg)                  // 更新状态
//!     }
//! }
//!
//! 后端请求在 tokio 运行时中执行，主循环本身从不阻塞在网络上。

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::event;
use crate::message::{AppMessage, BackendEvent};
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

/// 运行应用主循环
pub fn run(
    terminal: &mut Term,
    app: &mut App,
    rx: &mut UnboundedReceiver<BackendEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| view::render(app, frame))?;

        if app.should_quit {
            break;
        }

        while let Ok(backend_event) = rx.try_recv() {
            update::update(app, AppMessage::Backend(backend_event));
        }

        if let Some(input) = event::poll_event(Duration::from_millis(100))? {
            let msg = event::handle_event(input, app);
            update::update(app, msg);
        }
    }

    Ok(())
}
