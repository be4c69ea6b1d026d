//! 跨页面组件

pub mod modal;
pub mod navigation;
pub mod port_table;
pub mod statusbar;
