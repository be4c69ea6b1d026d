//! 搜索页面状态

use spam_core::search_tool::{SearchField, SearchTool, SITE_ANY};
use spam_core::types::Site;

use super::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSection {
    #[default]
    Form,
    Results,
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub tool: SearchTool,
    /// 表单中获得焦点的字段
    pub field: Cursor,
    pub sites: Vec<Site>,
    pub section: SearchSection,
    /// 结果列表的光标
    pub cursor: Cursor,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_field(&self) -> SearchField {
        SearchField::ALL
            .get(self.field.index())
            .copied()
            .unwrap_or(SearchField::Host)
    }

    /// 站点字段在 `any` 和各站点之间循环
    pub fn cycle_site(&mut self, step: isize) {
        let options: Vec<&str> = std::iter::once(SITE_ANY)
            .chain(self.sites.iter().map(|s| s.code.as_str()))
            .collect();
        let current = self.tool.form().get(SearchField::Site);
        let index = options.iter().position(|o| *o == current).unwrap_or(0);
        let next = step_index(index, step, options.len());
        let value = options[next].to_string();
        self.tool.form_mut().set(SearchField::Site, value);
    }

    pub fn toggle_section(&mut self) {
        self.section = match self.section {
            SearchSection::Form if self.tool.results().is_some() => SearchSection::Results,
            _ => SearchSection::Form,
        };
    }
}

/// 在长度为 `len` 的环上从 `index` 走 `step` 步
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub(crate) fn step_index(index: usize, step: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + step).rem_euclid(len as isize) as usize
}
