//! 行内详情面板
//!
//! 每张表最多一个打开的面板。面板是显式状态机：
//!
//! ```text
//!            show                 apply_detail / fail_detail
//!  Closed ─────────► Opening ─────────────────────────────► Open
//!    ▲                  │ dismiss                            │ dismiss
//!    │◄─────────────────┘                                    │
//!    │◄──────────────────────────── (无需刷新) ──────────────┤
//!    │         finish_refresh                                │ (删除过跳线)
//!    └─────────────────────── Closing ◄──────────────────────┘
//! ```
//!
//! `Open` 时再次 `show` 会先隐式关闭当前面板；`Opening`/`Closing` 时 `show` 被拒绝。
//! 每次取数和删除都携带令牌，关闭或替换面板后迟到的响应会被丢弃。

use crate::error::{CoreError, CoreResult};
use crate::generation::{Generation, Token};
use crate::port_table::{ColumnMap, PortTable, RowHandle};
use crate::types::{PatchFields, PortDetail, PortInfoResponse, Prefill, RawNavigation, StatusResponse};

/// 删除失败时显示的信息
pub const DELETE_FAILED: &str = "Patch was not removed because of an error";

/// 删除确认提示
pub const DELETE_CONFIRM: &str = "delete the patch from database";

/// 需要向后端发出的请求：`portinfo` 或 `delpatch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRequest {
    pub token: Token,
    pub host: String,
    pub portname: String,
}

/// 面板内容
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Detail(PortDetail),
    /// 取数失败
    Error(String),
}

/// “删除跳线”控件的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteControl {
    /// 没有跳线，不显示
    Hidden,
    Ready,
    /// 行动区被“确定吗？是/否”替换
    Confirming,
    InFlight(Token),
    /// 删除失败：控件保留，并显示可关闭的错误
    Failed(String),
}

/// 已打开的面板
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPanel {
    row: RowHandle,
    host: String,
    portname: String,
    content: PanelContent,
    delete: DeleteControl,
    refresh_on_close: bool,
}

impl OpenPanel {
    pub fn row(&self) -> RowHandle {
        self.row
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    pub fn delete_control(&self) -> &DeleteControl {
        &self.delete
    }

    pub fn detail(&self) -> Option<&PortDetail> {
        match &self.content {
            PanelContent::Detail(detail) => Some(detail),
            PanelContent::Error(_) => None,
        }
    }

    /// 显示“创建跳线”：当且仅当端口没有跳线
    pub fn can_create(&self) -> bool {
        self.detail().is_some_and(|d| !d.has_patch())
            && !matches!(self.delete, DeleteControl::InFlight(_))
    }

    pub fn can_delete(&self) -> bool {
        matches!(self.delete, DeleteControl::Ready | DeleteControl::Failed(_))
    }

    pub fn refresh_on_close(&self) -> bool {
        self.refresh_on_close
    }
}

/// 面板状态
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Closed,
    Opening {
        row: RowHandle,
        token: Token,
        host: String,
        portname: String,
        refresh_on_close: bool,
    },
    Open(OpenPanel),
    /// 已关闭，等待所属列表刷新完成
    Closing { token: Token },
}

/// `dismiss` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    /// 没有打开的面板
    Nothing,
    Closed,
    /// 面板存续期间删除过跳线，所属列表需要整体刷新
    RefreshRequired(Token),
}

/// 行内详情面板
#[derive(Debug)]
pub struct DetailPanel {
    columns: ColumnMap,
    state: PanelState,
    requests: Generation,
    refreshes: Generation,
}

impl DetailPanel {
    pub fn new(columns: ColumnMap) -> Self {
        Self {
            columns,
            state: PanelState::Closed,
            requests: Generation::new(),
            refreshes: Generation::new(),
        }
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, PanelState::Closed)
    }

    pub fn open_panel(&self) -> Option<&OpenPanel> {
        match &self.state {
            PanelState::Open(panel) => Some(panel),
            _ => None,
        }
    }

    /// 面板当前占用的行
    pub fn anchor(&self) -> Option<RowHandle> {
        match &self.state {
            PanelState::Opening { row, .. } => Some(*row),
            PanelState::Open(panel) => Some(panel.row),
            PanelState::Closed | PanelState::Closing { .. } => None,
        }
    }

    /// 在 `row` 处打开面板，返回要发出的 `portinfo` 请求
    pub fn show(&mut self, table: &mut PortTable, row: RowHandle) -> CoreResult<PortRequest> {
        if matches!(
            self.state,
            PanelState::Opening { .. } | PanelState::Closing { .. }
        ) {
            return Err(CoreError::Busy("detail panel is changing state".to_string()));
        }
        if !table.is_detail_capable(row, &self.columns) {
            return Err(CoreError::Validation(format!(
                "Row {} has no port details",
                row.index()
            )));
        }
        let Some((host, portname)) = table.key(row, &self.columns) else {
            return Err(CoreError::Validation(format!("No row {}", row.index())));
        };

        let mut refresh_on_close = false;
        if let PanelState::Open(open) = &self.state {
            refresh_on_close =
                open.refresh_on_close || matches!(open.delete, DeleteControl::InFlight(_));
            table.reattach(open.row);
        }

        table.detach(row);
        let token = self.requests.next();
        log::debug!("Detail panel opening for {host} {portname}");
        self.state = PanelState::Opening {
            row,
            token,
            host: host.clone(),
            portname: portname.clone(),
            refresh_on_close,
        };
        Ok(PortRequest {
            token,
            host,
            portname,
        })
    }

    /// 应用 `portinfo` 响应
    pub fn apply_detail(&mut self, token: Token, response: PortInfoResponse) -> CoreResult<()> {
        let content = match response.into_detail() {
            Ok(detail) => PanelContent::Detail(detail),
            Err(message) => PanelContent::Error(message),
        };
        self.open_with(token, content)
    }

    /// `portinfo` 在传输层失败
    pub fn fail_detail(&mut self, token: Token, error: &CoreError) -> CoreResult<()> {
        self.open_with(token, PanelContent::Error(error.to_string()))
    }

    fn open_with(&mut self, token: Token, content: PanelContent) -> CoreResult<()> {
        self.requests.check(token)?;
        let PanelState::Opening {
            row,
            host,
            portname,
            refresh_on_close,
            ..
        } = std::mem::replace(&mut self.state, PanelState::Closed)
        else {
            return Err(CoreError::StaleResponse);
        };

        let delete = match &content {
            PanelContent::Detail(detail) if detail.has_patch() => DeleteControl::Ready,
            _ => DeleteControl::Hidden,
        };
        self.state = PanelState::Open(OpenPanel {
            row,
            host,
            portname,
            content,
            delete,
            refresh_on_close,
        });
        Ok(())
    }

    /// 关闭面板并把行放回原位；没有打开的面板时什么也不做
    pub fn dismiss(&mut self, table: &mut PortTable) -> DismissOutcome {
        let (row, refresh) = match &self.state {
            PanelState::Closed | PanelState::Closing { .. } => return DismissOutcome::Nothing,
            PanelState::Opening {
                row,
                refresh_on_close,
                ..
            } => (*row, *refresh_on_close),
            PanelState::Open(open) => (
                open.row,
                open.refresh_on_close || matches!(open.delete, DeleteControl::InFlight(_)),
            ),
        };

        table.reattach(row);
        self.requests.invalidate();

        if refresh {
            let token = self.refreshes.next();
            log::debug!("Detail panel closed, list refresh required");
            self.state = PanelState::Closing { token };
            DismissOutcome::RefreshRequired(token)
        } else {
            self.state = PanelState::Closed;
            DismissOutcome::Closed
        }
    }

    /// 所属列表刷新完成（成功或失败）
    pub fn finish_refresh(&mut self, token: Token) -> CoreResult<()> {
        match self.state {
            PanelState::Closing { token: waiting } if waiting == token => {
                self.state = PanelState::Closed;
                Ok(())
            }
            _ => Err(CoreError::StaleResponse),
        }
    }

    // ========== 删除跳线 ==========

    /// 点击“删除”：进入确认子步骤
    pub fn request_delete(&mut self) -> CoreResult<()> {
        let open = self.open_mut()?;
        if !open.can_delete() {
            return Err(CoreError::Validation("Port has no patch to delete".to_string()));
        }
        open.delete = DeleteControl::Confirming;
        Ok(())
    }

    /// 回答确认提示；“是”时返回要发出的 `delpatch` 请求
    pub fn confirm_delete(&mut self, yes: bool) -> CoreResult<Option<PortRequest>> {
        let PanelState::Open(open) = &mut self.state else {
            return Err(CoreError::Validation("Detail panel is not open".to_string()));
        };
        if open.delete != DeleteControl::Confirming {
            return Err(CoreError::Validation("No delete awaiting confirmation".to_string()));
        }
        if !yes {
            open.delete = DeleteControl::Ready;
            return Ok(None);
        }

        let token = self.requests.next();
        open.delete = DeleteControl::InFlight(token);
        log::debug!("Deleting patch on {} {}", open.host, open.portname);
        Ok(Some(PortRequest {
            token,
            host: open.host.clone(),
            portname: open.portname.clone(),
        }))
    }

    /// 应用 `delpatch` 响应
    pub fn apply_delete(&mut self, token: Token, response: &StatusResponse) -> CoreResult<()> {
        let open = self.in_flight(token)?;
        if response.status.is_ok() {
            open.delete = DeleteControl::Hidden;
            open.refresh_on_close = true;
            if let PanelContent::Detail(detail) = &mut open.content {
                detail.cp = None;
                detail.outlet = None;
            }
        } else {
            log::warn!(
                "Patch delete rejected: {}",
                response.errmsg.as_deref().unwrap_or("no message")
            );
            open.delete = DeleteControl::Failed(DELETE_FAILED.to_string());
        }
        Ok(())
    }

    /// `delpatch` 在传输层失败
    pub fn fail_delete(&mut self, token: Token, error: &CoreError) -> CoreResult<()> {
        let open = self.in_flight(token)?;
        log::warn!("Patch delete failed: {error}");
        open.delete = DeleteControl::Failed(DELETE_FAILED.to_string());
        Ok(())
    }

    /// 关闭删除失败的提示，恢复行动区
    pub fn acknowledge_error(&mut self) {
        if let PanelState::Open(open) = &mut self.state {
            if matches!(open.delete, DeleteControl::Failed(_)) {
                open.delete = DeleteControl::Ready;
            }
        }
    }

    // ========== 创建跳线 ==========

    /// 生成跳到添加跳线表单的导航，预填值取自被摘下的原始行
    pub fn create_patch(&self, table: &PortTable) -> CoreResult<RawNavigation> {
        let open = self
            .open_panel()
            .ok_or_else(|| CoreError::Validation("Detail panel is not open".to_string()))?;
        if !open.can_create() {
            return Err(CoreError::Validation("Port already has a patch".to_string()));
        }
        let row = table
            .row(open.row)
            .ok_or_else(|| CoreError::Validation("Detail row is gone".to_string()))?;

        let host = table.host(open.row, &self.columns).unwrap_or_default().to_string();
        let optional = |col: Option<usize>| {
            col.map(|c| row.cell(c).to_string())
                .filter(|v| !v.is_empty())
        };
        let fields = PatchFields {
            portname: row.cell(self.columns.portname).to_string(),
            cross_connect: optional(self.columns.cross_connect),
            outlet: optional(self.columns.outlet),
            host: host.clone(),
        };
        let site: String = host.chars().take(3).collect();

        Ok(RawNavigation::new("addpatch").with_prefill(Prefill {
            fields,
            site: Some(site).filter(|s| !s.is_empty()),
        }))
    }

    fn open_mut(&mut self) -> CoreResult<&mut OpenPanel> {
        match &mut self.state {
            PanelState::Open(open) => Ok(open),
            _ => Err(CoreError::Validation("Detail panel is not open".to_string())),
        }
    }

    fn in_flight(&mut self, token: Token) -> CoreResult<&mut OpenPanel> {
        self.requests.check(token)?;
        match &mut self.state {
            PanelState::Open(open) if open.delete == DeleteControl::InFlight(token) => Ok(open),
            _ => Err(CoreError::StaleResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> PortTable {
        PortTable::new(
            ["host", "portname", "cp", "outlet"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            vec![
                vec!["brrsw01".into(), "ge1/0/1".into(), "C-01".into(), "A-01".into()],
                vec!["brrsw01".into(), "ge1/0/2".into(), String::new(), String::new()],
            ],
        )
    }

    fn panel(table: &PortTable) -> DetailPanel {
        DetailPanel::new(ColumnMap::from_fields(table.fields(), None).unwrap())
    }

    fn detail(cp: Option<&str>) -> PortInfoResponse {
        let mut result = json!({"host": "brrsw01", "portname": "ge1/0/1", "outlet": "A-01"});
        if let Some(cp) = cp {
            result["cp"] = json!(cp);
        }
        serde_json::from_value(json!({"status": "ok", "search": {"status": "ok", "result": result}}))
            .unwrap()
    }

    fn open_at(panel: &mut DetailPanel, table: &mut PortTable, index: usize, cp: Option<&str>) {
        let handle = table.handle_at(index).unwrap();
        let request = panel.show(table, handle).unwrap();
        panel.apply_detail(request.token, detail(cp)).unwrap();
    }

    #[test]
    fn dismiss_when_closed_is_noop() {
        let mut table = table();
        let mut panel = panel(&table);
        assert_eq!(panel.dismiss(&mut table), DismissOutcome::Nothing);
        assert!(panel.is_closed());
    }

    #[test]
    fn show_detaches_row_and_requests_detail() {
        let mut table = table();
        let mut panel = panel(&table);
        let handle = table.handle_at(0).unwrap();

        let request = panel.show(&mut table, handle).unwrap();
        assert_eq!(request.host, "brrsw01");
        assert_eq!(request.portname, "ge1/0/1");
        assert!(table.is_detached(handle));
        assert_eq!(panel.anchor(), Some(handle));

        let other = table.handle_at(1).unwrap();
        assert!(matches!(panel.show(&mut table, other), Err(CoreError::Busy(_))));
    }

    #[test]
    fn second_show_replaces_open_panel() {
        let mut table = table();
        let pristine = table.clone();
        let mut panel = panel(&table);
        open_at(&mut panel, &mut table, 0, Some("C-01"));

        let second = table.handle_at(1).unwrap();
        panel.show(&mut table, second).unwrap();

        assert!(!table.is_detached(table.handle_at(0).unwrap()));
        assert!(table.is_detached(second));
        assert_eq!(panel.dismiss(&mut table), DismissOutcome::Closed);
        assert_eq!(table, pristine);
    }

    #[test]
    fn stale_detail_is_discarded() {
        let mut table = table();
        let mut panel = panel(&table);
        let handle = table.handle_at(0).unwrap();
        let request = panel.show(&mut table, handle).unwrap();
        panel.dismiss(&mut table);

        assert_eq!(
            panel.apply_detail(request.token, detail(None)),
            Err(CoreError::StaleResponse)
        );
        assert!(panel.is_closed());
    }

    #[test]
    fn delete_confirmation_no_restores_controls() {
        let mut table = table();
        let mut panel = panel(&table);
        open_at(&mut panel, &mut table, 0, Some("C-01"));

        panel.request_delete().unwrap();
        assert_eq!(
            panel.open_panel().unwrap().delete_control(),
            &DeleteControl::Confirming
        );
        assert_eq!(panel.confirm_delete(false).unwrap(), None);
        assert_eq!(
            panel.open_panel().unwrap().delete_control(),
            &DeleteControl::Ready
        );
    }

    #[test]
    fn delete_failure_keeps_control_with_error() {
        let mut table = table();
        let mut panel = panel(&table);
        open_at(&mut panel, &mut table, 0, Some("C-01"));

        panel.request_delete().unwrap();
        let request = panel.confirm_delete(true).unwrap().unwrap();
        panel
            .apply_delete(request.token, &StatusResponse::error("locked"))
            .unwrap();

        let open = panel.open_panel().unwrap();
        assert_eq!(
            open.delete_control(),
            &DeleteControl::Failed(DELETE_FAILED.to_string())
        );
        assert!(open.can_delete());
        assert!(!open.refresh_on_close());

        panel.acknowledge_error();
        assert_eq!(
            panel.open_panel().unwrap().delete_control(),
            &DeleteControl::Ready
        );
    }

    #[test]
    fn delete_success_defers_refresh_to_close() {
        let mut table = table();
        let mut panel = panel(&table);
        open_at(&mut panel, &mut table, 0, Some("C-01"));

        panel.request_delete().unwrap();
        let request = panel.confirm_delete(true).unwrap().unwrap();
        assert_eq!(request.portname, "ge1/0/1");
        panel
            .apply_delete(request.token, &StatusResponse::ok())
            .unwrap();

        let open = panel.open_panel().unwrap();
        assert_eq!(open.delete_control(), &DeleteControl::Hidden);
        assert!(open.refresh_on_close());
        assert!(open.can_create());
        assert_eq!(open.detail().unwrap().outlet, None);

        let DismissOutcome::RefreshRequired(token) = panel.dismiss(&mut table) else {
            panic!("expected a refresh request");
        };
        let other = table.handle_at(1).unwrap();
        assert!(panel.show(&mut table, other).is_err());
        panel.finish_refresh(token).unwrap();
        assert!(panel.is_closed());
    }

    #[test]
    fn refresh_flag_survives_implicit_dismiss() {
        let mut table = table();
        let mut panel = panel(&table);
        open_at(&mut panel, &mut table, 0, Some("C-01"));
        panel.request_delete().unwrap();
        let request = panel.confirm_delete(true).unwrap().unwrap();
        panel.apply_delete(request.token, &StatusResponse::ok()).unwrap();

        open_at(&mut panel, &mut table, 1, None);
        assert!(panel.open_panel().unwrap().refresh_on_close());
    }

    #[test]
    fn create_patch_uses_detached_row_cells() {
        let mut table = table();
        let mut panel = panel(&table);
        open_at(&mut panel, &mut table, 1, None);

        let open = panel.open_panel().unwrap();
        assert!(open.can_create());
        assert!(!open.can_delete());

        let nav = panel.create_patch(&table).unwrap();
        assert_eq!(nav.sel, "addpatch");
        let prefill = nav.values.unwrap();
        assert_eq!(prefill.fields.host, "brrsw01");
        assert_eq!(prefill.fields.portname, "ge1/0/2");
        assert_eq!(prefill.fields.cross_connect, None);
        assert_eq!(prefill.site.as_deref(), Some("brr"));
    }

    #[test]
    fn detail_error_shows_message_without_actions() {
        let mut table = table();
        let mut panel = panel(&table);
        let handle = table.handle_at(0).unwrap();
        let request = panel.show(&mut table, handle).unwrap();
        panel
            .fail_detail(request.token, &CoreError::Timeout("30s".into()))
            .unwrap();

        let open = panel.open_panel().unwrap();
        assert!(matches!(open.content(), PanelContent::Error(_)));
        assert!(!open.can_create());
        assert!(!open.can_delete());
    }
}
