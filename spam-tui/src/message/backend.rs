//! 后端完成事件
//!
//! 由 `backend::Bridge` 在 tokio 任务结束时发送，经主循环送入 Update 层。

use spam_core::services::SiteResolution;
use spam_core::types::{
    AddPatchResponse, ColumnMode, PortInfoResponse, SearchResponse, Site, StatusResponse,
    SwitchListResponse,
};
use spam_core::{CoreResult, Token};

/// 结果列表所在的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSlot {
    /// 交换机端口列表
    PortList,
    /// 搜索结果
    Search,
    /// 添加跳线后的摘要
    Summary,
}

#[derive(Debug)]
pub enum BackendEvent {
    Switches {
        token: Token,
        result: CoreResult<SwitchListResponse>,
    },
    ListLoaded {
        slot: ListSlot,
        token: Token,
        result: CoreResult<SearchResponse>,
    },
    PortInfo {
        slot: ListSlot,
        token: Token,
        result: CoreResult<PortInfoResponse>,
    },
    PatchDeleted {
        slot: ListSlot,
        token: Token,
        result: CoreResult<StatusResponse>,
    },
    Submitted {
        token: Token,
        result: CoreResult<AddPatchResponse>,
    },
    SiteMode {
        token: Token,
        result: CoreResult<ColumnMode>,
    },
    SiteResolved {
        token: Token,
        result: CoreResult<SiteResolution>,
    },
    Sites(CoreResult<Vec<Site>>),
    /// 模块接线位置保存完成
    FieldSaved {
        module: usize,
        token: Token,
        result: Result<(), String>,
    },
}

impl BackendEvent {
    /// 日志用的简短名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Switches { .. } => "swlist",
            Self::ListLoaded { .. } => "search",
            Self::PortInfo { .. } => "portinfo",
            Self::PatchDeleted { .. } => "delpatch",
            Self::Submitted { .. } => "addpatch",
            Self::SiteMode { .. } | Self::SiteResolved { .. } => "usecp",
            Self::Sites(_) => "aux",
            Self::FieldSaved { .. } => "modwire",
        }
    }
}
