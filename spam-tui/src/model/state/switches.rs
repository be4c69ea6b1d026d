//! 交换机列表页面状态

use spam_core::switch_list::SwitchList;

use super::search::step_index;
use super::Cursor;

#[derive(Debug)]
pub struct SwitchesState {
    pub list: SwitchList,
    pub cursor: Cursor,
}

impl SwitchesState {
    pub fn new(list: SwitchList) -> Self {
        Self {
            list,
            cursor: Cursor::default(),
        }
    }

    pub fn visible_len(&self) -> usize {
        self.list.visible().len()
    }

    /// 光标所在的交换机
    pub fn selected_host(&self) -> Option<String> {
        self.list
            .visible()
            .get(self.cursor.index())
            .map(|entry| entry.host.clone())
    }

    /// 相对当前标签移动 `step` 后的分组名（循环）
    pub fn neighbour_tab(&self, step: isize) -> Option<String> {
        let tabs = self.list.tabs();
        let current = tabs.iter().position(|t| *t == self.list.active()).unwrap_or(0);
        tabs.get(step_index(current, step, tabs.len()))
            .map(|t| (*t).to_string())
    }
}
