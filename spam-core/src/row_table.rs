//! 跳线录入表格引擎
//!
//! 有序、有上限的行列表。行没有持久标识：线上字段名由（固定前缀，当前行号）推导，
//! 每次结构变更后由 [`RowTable::renumber`] 重建“字段名 → (行, 列)”索引。
//!
//! 提交分两步：[`RowTable::begin_submit`] 取出带令牌的表单，
//! [`RowTable::apply_submit_response`] 把服务端的规范化结果写回。
//! 规范化反馈与事务成败无关，总是会被应用。

use std::collections::{BTreeSet, HashMap};

use crate::error::{CoreError, CoreResult};
use crate::generation::{Generation, Token};
use crate::types::{
    AddPatchResponse, ColumnMode, PatchField, PatchFields, PatchForm, Prefill, SearchBlock,
};

/// 行数上限
pub const MAX_ROWS: usize = 100;

/// 表格中的一行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchRow {
    fields: PatchFields,
    invalid: BTreeSet<PatchField>,
    messages: Vec<String>,
}

impl PatchRow {
    pub fn fields(&self) -> &PatchFields {
        &self.fields
    }

    pub fn value(&self, field: PatchField) -> &str {
        self.fields.get(field)
    }

    /// 该字段被服务端标记为无效
    pub fn is_invalid(&self, field: PatchField) -> bool {
        self.invalid.contains(&field)
    }

    pub fn has_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }

    /// 行状态区中的错误信息
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn clear_feedback(&mut self) {
        self.invalid.clear();
        self.messages.clear();
    }
}

/// 表格上方的横幅
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success,
    Error(String),
}

/// 待发送的提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub token: Token,
    pub form: PatchForm,
}

/// 跳线录入表格
#[derive(Debug)]
pub struct RowTable {
    rows: Vec<PatchRow>,
    /// 线上字段名 → (行, 列)，只由 `renumber` 维护
    index: HashMap<String, (usize, PatchField)>,
    mode: ColumnMode,
    site: Option<String>,
    banner: Option<Banner>,
    summary: Option<SearchBlock>,
    submit: Generation,
    pending: Option<Token>,
    site_lookup: Generation,
    /// 每次可见变更加一
    revision: u64,
}

impl RowTable {
    pub fn new() -> Self {
        let mut table = Self {
            rows: vec![PatchRow::default()],
            index: HashMap::new(),
            mode: ColumnMode::default(),
            site: None,
            banner: None,
            summary: None,
            submit: Generation::new(),
            pending: None,
            site_lookup: Generation::new(),
            revision: 0,
        };
        table.renumber();
        table
    }

    /// 以“创建跳线”传来的值填充首行
    pub fn with_prefill(prefill: &Prefill) -> Self {
        let mut table = Self::new();
        table.rows[0].fields = prefill.fields.clone();
        table.site.clone_from(&prefill.site);
        table
    }

    // ========== 读取 ==========

    pub fn rows(&self) -> &[PatchRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, row: usize) -> Option<&PatchRow> {
        self.rows.get(row)
    }

    pub fn value(&self, row: usize, field: PatchField) -> Option<&str> {
        self.rows.get(row).map(|r| r.value(field))
    }

    /// 首列显示的行号
    pub fn row_label(row: usize) -> String {
        format!("{}.", row + 1)
    }

    /// 按线上字段名定位
    pub fn locate(&self, wire_name: &str) -> Option<(usize, PatchField)> {
        self.index.get(wire_name).copied()
    }

    /// 当前所有线上字段名（按行、列顺序）
    pub fn wire_names(&self) -> Vec<String> {
        (0..self.rows.len())
            .flat_map(|row| PatchField::ALL.into_iter().map(move |f| f.wire_name(row)))
            .collect()
    }

    pub fn mode(&self) -> ColumnMode {
        self.mode
    }

    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// 提交后返回的受影响端口
    pub fn summary(&self) -> Option<&SearchBlock> {
        self.summary.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ========== 结构变更 ==========

    /// 在 `after` 之后插入新行，返回新行的位置
    ///
    /// 新行沿用首行的交换机名；已达上限时不做任何修改。
    pub fn add_row(&mut self, after: usize) -> CoreResult<usize> {
        if self.rows.len() >= MAX_ROWS {
            return Err(CoreError::RowLimit(MAX_ROWS));
        }

        let mut row = PatchRow::default();
        for field in PatchField::ALL.into_iter().filter(|f| f.is_site_scoped()) {
            row.fields.set(field, self.rows[0].value(field));
        }

        let at = (after + 1).min(self.rows.len());
        self.rows.insert(at, row);
        self.renumber();
        Ok(at)
    }

    /// 删除一行；至少保留一行
    pub fn remove_row(&mut self, row: usize) -> CoreResult<()> {
        if self.rows.len() <= 1 {
            return Err(CoreError::LastRow);
        }
        if row >= self.rows.len() {
            return Err(CoreError::Validation(format!("No row {row}")));
        }
        self.rows.remove(row);
        self.renumber();
        Ok(())
    }

    /// 按当前位置重建字段名索引
    pub fn renumber(&mut self) {
        self.index.clear();
        for row in 0..self.rows.len() {
            for field in PatchField::ALL {
                self.index.insert(field.wire_name(row), (row, field));
            }
        }
        self.revision += 1;
    }

    // ========== 编辑 ==========

    pub fn set_value(&mut self, row: usize, field: PatchField, value: &str) -> CoreResult<()> {
        let target = self
            .rows
            .get_mut(row)
            .ok_or_else(|| CoreError::Validation(format!("No row {row}")))?;
        target.fields.set(field, value);
        self.revision += 1;
        Ok(())
    }

    /// 切换插座列；模式不变时不做任何修改，返回是否发生了变化
    pub fn set_column_mode(&mut self, mode: ColumnMode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::debug!("Row table column mode {:?} -> {mode:?}", self.mode);
        self.mode = mode;
        self.revision += 1;
        true
    }

    /// 选择站点，返回随后列模式查询要携带的令牌
    pub fn select_site(&mut self, site: Option<String>) -> Token {
        self.site = site.filter(|s| !s.is_empty());
        self.revision += 1;
        self.site_lookup.next()
    }

    /// 应用站点列模式查询的结果
    pub fn apply_site_mode(&mut self, token: Token, mode: ColumnMode) -> CoreResult<bool> {
        self.site_lookup.check(token)?;
        Ok(self.set_column_mode(mode))
    }

    /// 由预填的 host 查出站点后应用
    pub fn apply_site_resolution(
        &mut self,
        token: Token,
        site: Option<String>,
        mode: ColumnMode,
    ) -> CoreResult<bool> {
        self.site_lookup.check(token)?;
        if site.is_some() {
            self.site = site;
            self.revision += 1;
        }
        Ok(self.set_column_mode(mode))
    }

    /// 为“按 host 解析站点”发放令牌（不改变当前站点）
    pub fn begin_site_resolution(&mut self) -> Token {
        self.site_lookup.next()
    }

    /// 站点查询失败：令牌仍有效时把错误交回调用方，否则丢弃
    pub fn fail_site_lookup(&self, token: Token, error: CoreError) -> CoreResult<()> {
        self.site_lookup.check(token)?;
        Err(error)
    }

    // ========== 提交 ==========

    /// 收集所有字段，生成带令牌的提交请求
    pub fn begin_submit(&mut self) -> CoreResult<SubmitRequest> {
        if self.pending.is_some() {
            return Err(CoreError::Busy("a submit is already in progress".to_string()));
        }

        let fields = self
            .rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                PatchField::ALL
                    .into_iter()
                    .map(move |f| (f.wire_name(i), row.value(f).to_string()))
            })
            .collect();

        let token = self.submit.next();
        self.pending = Some(token);
        self.revision += 1;
        Ok(SubmitRequest {
            token,
            form: PatchForm {
                site: self.site.clone(),
                fields,
            },
        })
    }

    /// 应用提交结果
    ///
    /// 先清空所有行的反馈，再按字段写回规范化值、无效标记与错误信息。
    /// 整体成功且所有字段有效时表格复位为一个空行。
    pub fn apply_submit_response(
        &mut self,
        token: Token,
        response: &AddPatchResponse,
    ) -> CoreResult<()> {
        self.submit.check(token)?;
        self.pending = None;

        for row in &mut self.rows {
            row.clear_feedback();
        }

        let mut all_valid = true;
        for result in response.field_results() {
            let Some((row, field)) = self.locate(&result.name) else {
                log::warn!("Submit response names unknown field '{}'", result.name);
                continue;
            };
            let target = &mut self.rows[row];
            if let Some(value) = &result.value {
                target.fields.set(field, value.as_str());
            }
            if !result.valid {
                all_valid = false;
                target.invalid.insert(field);
            }
            if let Some(err) = &result.err {
                target.messages.push(err.clone());
            }
        }

        if response.status.is_ok() {
            if all_valid {
                self.clear_rows();
            }
            self.banner = Some(Banner::Success);
        } else {
            let message = response
                .errmsg
                .as_deref()
                .unwrap_or("unknown error")
                .to_lowercase();
            self.banner = Some(Banner::Error(message));
        }

        self.summary = response.search.clone().filter(|s| s.status.is_ok());
        self.revision += 1;
        Ok(())
    }

    /// 提交在传输层失败：保留表格内容，只显示错误横幅
    pub fn fail_submit(&mut self, token: Token, error: &CoreError) -> CoreResult<()> {
        self.submit.check(token)?;
        self.pending = None;
        self.banner = Some(Banner::Error(error.to_string().to_lowercase()));
        self.revision += 1;
        Ok(())
    }

    /// 复位：只保留一个空行，清除所有反馈、横幅和摘要，作废进行中的提交
    pub fn reset(&mut self) {
        self.clear_rows();
        self.banner = None;
        self.summary = None;
        self.submit.invalidate();
        self.pending = None;
    }

    pub fn dismiss_banner(&mut self) {
        if self.banner.take().is_some() {
            self.revision += 1;
        }
    }

    fn clear_rows(&mut self) {
        self.rows.truncate(1);
        self.rows[0] = PatchRow::default();
        self.renumber();
    }
}

impl Default for RowTable {
    fn default() -> Self {
        Self::new()
    }
}
