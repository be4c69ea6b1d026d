//! 添加跳线页面状态

use spam_core::list_view::ListView;
use spam_core::row_table::RowTable;
use spam_core::types::{PatchField, Site};

use super::search::step_index;
use super::Cursor;

/// 表单中的光标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchCursor {
    /// 站点选择行
    Site,
    Cell { row: usize, field: PatchField },
}

impl Default for PatchCursor {
    fn default() -> Self {
        Self::Cell {
            row: 0,
            field: PatchField::Switch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPatchSection {
    #[default]
    Form,
    /// 提交后的摘要列表
    Summary,
}

#[derive(Debug)]
pub struct AddPatchState {
    pub table: RowTable,
    pub cursor: PatchCursor,
    pub sites: Vec<Site>,
    pub summary: Option<ListView>,
    pub summary_cursor: Cursor,
    pub section: AddPatchSection,
}

impl AddPatchState {
    pub fn new(table: RowTable) -> Self {
        Self {
            table,
            cursor: PatchCursor::default(),
            sites: Vec::new(),
            summary: None,
            summary_cursor: Cursor::default(),
            section: AddPatchSection::default(),
        }
    }

    /// 当前列模式下可见的列
    pub fn visible_fields(&self) -> Vec<PatchField> {
        let shows_outlet = self.table.mode().shows_outlet();
        PatchField::ALL
            .into_iter()
            .filter(|f| shows_outlet || *f != PatchField::Outlet)
            .collect()
    }

    pub fn move_up(&mut self) {
        self.cursor = match self.cursor {
            PatchCursor::Cell { row: 0, .. } | PatchCursor::Site => PatchCursor::Site,
            PatchCursor::Cell { row, field } => PatchCursor::Cell {
                row: row - 1,
                field,
            },
        };
    }

    pub fn move_down(&mut self) {
        let last = self.table.len().saturating_sub(1);
        self.cursor = match self.cursor {
            PatchCursor::Site => PatchCursor::Cell {
                row: 0,
                field: PatchField::Switch,
            },
            PatchCursor::Cell { row, field } => PatchCursor::Cell {
                row: (row + 1).min(last),
                field,
            },
        };
    }

    /// 在可见列之间左右移动
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn move_horizontal(&mut self, step: isize) {
        let PatchCursor::Cell { row, field } = self.cursor else {
            return;
        };
        let fields = self.visible_fields();
        let current = fields.iter().position(|f| *f == field).unwrap_or(0);
        let next = (current as isize + step).clamp(0, fields.len() as isize - 1);
        let field = fields[next as usize];
        self.cursor = PatchCursor::Cell { row, field };
    }

    /// 列模式或行数变化后修正光标
    pub fn fix_cursor(&mut self) {
        if let PatchCursor::Cell { row, field } = self.cursor {
            let row = row.min(self.table.len().saturating_sub(1));
            let field = if self.visible_fields().contains(&field) {
                field
            } else {
                PatchField::CrossConnect
            };
            self.cursor = PatchCursor::Cell { row, field };
        }
    }

    /// 光标在站点行上时选择相邻站点，返回新站点
    pub fn step_site(&mut self, step: isize) -> Option<String> {
        if self.sites.is_empty() {
            return None;
        }
        let next = match self.site_index() {
            Some(index) => step_index(index, step, self.sites.len()),
            None if step < 0 => self.sites.len() - 1,
            None => 0,
        };
        self.sites.get(next).map(|s| s.code.clone())
    }

    /// 当前站点在下拉选项中的位置
    pub fn site_index(&self) -> Option<usize> {
        let site = self.table.site()?;
        self.sites.iter().position(|s| s.code == site)
    }

    pub fn toggle_section(&mut self) {
        self.section = match self.section {
            AddPatchSection::Form if self.summary.is_some() => AddPatchSection::Summary,
            _ => AddPatchSection::Form,
        };
    }
}
