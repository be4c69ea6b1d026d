//! 页面视图

pub mod about;
pub mod add_patch;
pub mod port_list;
pub mod search;
pub mod switches;
