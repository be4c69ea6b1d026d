//! 端口列表视图
//!
//! 交换机端口列表、搜索结果和提交摘要共用的结果视图：一张 [`PortTable`]
//! 加上挂在它上面的一个 [`DetailPanel`]。

use crate::detail_panel::{DetailPanel, DismissOutcome, PortRequest};
use crate::error::{CoreError, CoreResult};
use crate::generation::{Generation, Token};
use crate::port_table::{ColumnMap, PortTable, RowHandle};
use crate::types::{ModuleWire, RawNavigation, SearchBlock, SearchQuery, SearchResponse};

/// 交换机不存在或没有匹配结果时的提示
pub const NO_RESULTS: &str = "No matching ports found";

/// 待发送的 `search` 请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: Token,
    pub query: SearchQuery,
}

/// 端口列表视图
#[derive(Debug)]
pub struct ListView {
    query: SearchQuery,
    /// 单台交换机的端口列表：结果里没有 host 列
    host: Option<String>,
    table: PortTable,
    panel: Option<DetailPanel>,
    modules: Vec<ModuleWire>,
    message: Option<String>,
    loads: Generation,
    loading: bool,
    /// 面板关闭后等待本次刷新的令牌
    closing: Option<Token>,
}

impl ListView {
    fn with_query(query: SearchQuery, host: Option<String>) -> Self {
        Self {
            query,
            host,
            table: PortTable::default(),
            panel: None,
            modules: Vec::new(),
            message: None,
            loads: Generation::new(),
            loading: false,
            closing: None,
        }
    }

    /// 某台交换机的端口列表
    pub fn port_list(host: &str) -> Self {
        Self::with_query(SearchQuery::port_list(host), Some(host.to_string()))
    }

    /// 搜索结果
    pub fn search(query: SearchQuery) -> Self {
        Self::with_query(query, None)
    }

    /// 由已有的结果块构建（添加跳线后的摘要），不可刷新
    pub fn from_block(block: &SearchBlock) -> Self {
        let mut view = Self::with_query(SearchQuery::default(), None);
        view.populate(Some(block));
        view
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn table(&self) -> &PortTable {
        &self.table
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        self.panel.as_ref()
    }

    pub fn modules(&self) -> &[ModuleWire] {
        &self.modules
    }

    /// 错误或空结果提示
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ========== 加载 ==========

    /// 发起（重新）加载；打开的面板会先被关闭
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        if self.query.is_empty() {
            return None;
        }
        if let Some(panel) = &mut self.panel {
            if let DismissOutcome::RefreshRequired(token) = panel.dismiss(&mut self.table) {
                self.closing = Some(token);
            }
        }

        let token = self.loads.next();
        self.loading = true;
        Some(LoadRequest {
            token,
            query: self.query.clone(),
        })
    }

    /// 应用 `search` 响应
    pub fn apply_load(&mut self, token: Token, response: &SearchResponse) -> CoreResult<()> {
        self.loads.check(token)?;
        self.finish_loading();

        self.modules = response
            .swinfo
            .as_ref()
            .map(|info| info.modules.clone())
            .unwrap_or_default();

        if response.status.is_ok() {
            self.populate(response.search.as_ref());
        } else {
            self.clear(
                response
                    .errmsg
                    .clone()
                    .unwrap_or_else(|| NO_RESULTS.to_string()),
            );
        }
        Ok(())
    }

    /// `search` 在传输层失败
    pub fn fail_load(&mut self, token: Token, error: &CoreError) -> CoreResult<()> {
        self.loads.check(token)?;
        self.finish_loading();
        self.clear(error.to_string());
        Ok(())
    }

    fn finish_loading(&mut self) {
        self.loading = false;
        // 刷新失败同样结束 Closing
        self.end_closing();
    }

    /// 结束面板的 Closing 状态
    fn end_closing(&mut self) {
        let (Some(token), Some(panel)) = (self.closing.take(), &mut self.panel) else {
            return;
        };
        if let Err(e) = panel.finish_refresh(token) {
            log::debug!("Panel refresh token {} not applied: {e}", token.value());
        }
    }

    fn populate(&mut self, block: Option<&SearchBlock>) {
        let Some(block) = block.filter(|b| b.has_rows()) else {
            let message = block
                .and_then(|b| b.errmsg.clone())
                .unwrap_or_else(|| NO_RESULTS.to_string());
            self.clear(message);
            return;
        };

        self.table = PortTable::from_search(block);
        self.panel =
            ColumnMap::from_fields(self.table.fields(), self.host.as_deref()).map(DetailPanel::new);
        self.message = None;
        log::debug!("List view loaded {} rows", self.table.len());
    }

    fn clear(&mut self, message: String) {
        self.table = PortTable::default();
        self.panel = None;
        self.message = Some(message);
    }

    // ========== 详情面板 ==========

    /// 在第 `index` 个显示槽打开详情面板
    pub fn show_detail(&mut self, index: usize) -> CoreResult<PortRequest> {
        let handle = self
            .table
            .handle_at(index)
            .ok_or_else(|| CoreError::Validation(format!("No row {index}")))?;
        self.show_row(handle)
    }

    pub fn show_row(&mut self, handle: RowHandle) -> CoreResult<PortRequest> {
        let panel = self
            .panel
            .as_mut()
            .ok_or_else(|| CoreError::Validation("Rows have no port details".to_string()))?;
        panel.show(&mut self.table, handle)
    }

    /// 关闭面板；删除过跳线时返回随后要发出的刷新请求
    pub fn dismiss_detail(&mut self) -> Option<LoadRequest> {
        let panel = self.panel.as_mut()?;
        match panel.dismiss(&mut self.table) {
            DismissOutcome::RefreshRequired(token) => {
                self.closing = Some(token);
                let request = self.begin_load();
                if request.is_none() {
                    // 不可刷新的视图：直接结束 Closing
                    self.end_closing();
                }
                request
            }
            DismissOutcome::Closed | DismissOutcome::Nothing => None,
        }
    }

    pub fn panel_mut(&mut self) -> Option<&mut DetailPanel> {
        self.panel.as_mut()
    }

    /// 面板的“创建跳线”
    pub fn create_patch(&self) -> CoreResult<RawNavigation> {
        let panel = self
            .panel
            .as_ref()
            .ok_or_else(|| CoreError::Validation("Detail panel is not open".to_string()))?;
        panel.create_patch(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail_panel::PanelState;
    use crate::types::StatusResponse;
    use serde_json::json;

    fn response(rows: &serde_json::Value) -> SearchResponse {
        let lines = rows.as_array().map_or(0, Vec::len);
        serde_json::from_value(json!({
            "status": "ok",
            "search": {
                "status": "ok",
                "lines": lines,
                "fields": ["portname", "cp", "outlet", "descr"],
                "result": rows
            },
            "swinfo": {"modules": [{"m": 1, "n": 0, "location": "Rack 4"}]}
        }))
        .unwrap()
    }

    fn loaded() -> ListView {
        let mut view = ListView::port_list("brrsw01");
        let request = view.begin_load().unwrap();
        assert_eq!(request.query.get("mode"), Some("portlist"));
        view.apply_load(
            request.token,
            &response(&json!([
                {"portname": "ge1/0/1", "cp": "C-01", "outlet": "A-01", "descr": "printer"},
                {"portname": "ge1/0/2", "cp": null, "outlet": null, "descr": ""}
            ])),
        )
        .unwrap();
        view
    }

    #[test]
    fn load_builds_table_with_literal_host() {
        let view = loaded();
        assert_eq!(view.table().len(), 2);
        assert_eq!(view.modules()[0].location.as_deref(), Some("Rack 4"));
        assert_eq!(view.modules()[0].m, "1");
        assert!(view.panel().is_some());
        assert_eq!(view.message(), None);
    }

    #[test]
    fn zero_lines_shows_message() {
        let mut view = ListView::port_list("nosuchsw");
        let request = view.begin_load().unwrap();
        view.apply_load(request.token, &response(&json!([]))).unwrap();
        assert_eq!(view.message(), Some(NO_RESULTS));
        assert!(view.table().is_empty());
        assert!(view.show_detail(0).is_err());
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut view = ListView::port_list("brrsw01");
        let first = view.begin_load().unwrap();
        let second = view.begin_load().unwrap();
        assert_eq!(
            view.apply_load(first.token, &response(&json!([]))),
            Err(CoreError::StaleResponse)
        );
        assert!(view.is_loading());
        view.fail_load(second.token, &CoreError::Timeout("30s".into()))
            .unwrap();
        assert!(!view.is_loading());
    }

    #[test]
    fn closing_after_delete_refreshes_list() {
        let mut view = loaded();
        let request = view.show_detail(0).unwrap();
        assert_eq!(request.host, "brrsw01");

        let panel = view.panel_mut().unwrap();
        panel
            .apply_detail(
                request.token,
                serde_json::from_value(json!({
                    "status": "ok",
                    "search": {"status": "ok", "result": {"host": "brrsw01", "portname": "ge1/0/1", "cp": "C-01"}}
                }))
                .unwrap(),
            )
            .unwrap();
        panel.request_delete().unwrap();
        let delete = panel.confirm_delete(true).unwrap().unwrap();
        panel.apply_delete(delete.token, &StatusResponse::ok()).unwrap();

        let refresh = view.dismiss_detail().unwrap();
        assert!(matches!(
            view.panel().unwrap().state(),
            PanelState::Closing { .. }
        ));
        view.apply_load(refresh.token, &response(&json!([{"portname": "ge1/0/1"}])))
            .unwrap();
        assert!(view.panel().unwrap().is_closed());
        assert_eq!(view.table().len(), 1);
    }

    #[test]
    fn failed_refresh_still_ends_closing() {
        let mut view = loaded();
        let request = view.show_detail(0).unwrap();
        let panel = view.panel_mut().unwrap();
        panel
            .apply_detail(
                request.token,
                serde_json::from_value(json!({
                    "status": "ok",
                    "search": {"status": "ok", "result": {"host": "brrsw01", "portname": "ge1/0/1", "cp": "C-01"}}
                }))
                .unwrap(),
            )
            .unwrap();
        panel.request_delete().unwrap();
        let delete = panel.confirm_delete(true).unwrap().unwrap();
        panel.apply_delete(delete.token, &StatusResponse::ok()).unwrap();

        let refresh = view.dismiss_detail().unwrap();
        view.fail_load(refresh.token, &CoreError::Timeout("30s".into()))
            .unwrap();
        assert!(view.panel().is_none());
        assert!(!view.is_loading());
        assert!(view.message().unwrap().contains("30s"));
    }

    #[test]
    fn summary_view_is_not_refreshable() {
        let block: SearchBlock = serde_json::from_value(json!({
            "status": "ok", "lines": 1, "fields": ["host", "portname"],
            "result": [{"host": "brrsw01", "portname": "ge1/0/1"}]
        }))
        .unwrap();
        let mut view = ListView::from_block(&block);
        assert_eq!(view.table().len(), 1);
        assert!(view.begin_load().is_none());
    }
}
