//! 类型定义模块

mod navigation;
mod patch;
mod request;
mod response;

pub use navigation::{NavigationState, Prefill, RawNavigation, Selector};
pub use patch::{ColumnMode, FieldResult, PatchField, PatchFields};
pub use request::{FormPairs, ModuleWireUpdate, PatchForm, RequestKind, SearchQuery, SiteLookup};
pub use response::{
    AddPatchResponse, AuxResponse, ModuleWire, PortDetail, PortInfoBlock, PortInfoResponse,
    SearchBlock, SearchParams, SearchResponse, Site, SitesBlock, Status, StatusResponse,
    SwitchEntry, SwitchInfo, SwitchListResponse, UseCpResponse,
};
