//!
//! src/util/mod.rs
//! Util 层：基础设施
//!
//! 终端的初始化与恢复。
//!
//!     init_terminal()     // 原始模式 + 备用屏幕
//!     restore_terminal()  // 无论主循环是否出错都必须调用
//!

mod terminal;

pub use terminal::{init_terminal, restore_terminal, Term};
