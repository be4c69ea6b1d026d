//! 后端响应类型定义
//!
//! 所有响应都形如 `{status: "ok"|"error", errmsg?, result|search|sites: ...}`。
//! `status: error` 不会被转换为 `Err`：表单提交即使失败也要回显字段校验结果，
//! 因此由调用方决定如何处理。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::FieldResult;
use crate::utils::lenient;

/// 响应状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    #[default]
    Error,
}

impl Status {
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// 只有状态和错误信息的响应（`delpatch`、`modwire`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            errmsg: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            errmsg: Some(message.into()),
        }
    }
}

// ========== aux ==========

/// 站点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Site {
    pub code: String,
    pub description: String,
}

impl Site {
    /// 下拉框中的显示文本
    pub fn label(&self) -> String {
        format!("{} / {}", self.code, self.description)
    }
}

impl From<(String, String)> for Site {
    fn from((code, description): (String, String)) -> Self {
        Self { code, description }
    }
}

impl From<Site> for (String, String) {
    fn from(site: Site) -> Self {
        (site.code, site.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitesBlock {
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub result: Vec<Site>,
}

/// `aux` 响应：辅助数据（站点列表）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxResponse {
    #[serde(default)]
    pub sites: SitesBlock,
}

// ========== swlist ==========

/// 交换机列表中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchEntry {
    pub host: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub group: Option<String>,
    /// 长时间未轮询到的交换机
    #[serde(default, deserialize_with = "lenient::flag")]
    pub stale: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchListResponse {
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
    #[serde(default)]
    pub result: Vec<SwitchEntry>,
}

// ========== search ==========

/// 搜索参数回显：原始值与规范化值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub raw: BTreeMap<String, String>,
    #[serde(default)]
    pub normalized: BTreeMap<String, String>,
}

/// 搜索结果块
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchBlock {
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
    #[serde(default)]
    pub lines: usize,
    /// 结果列（按显示顺序）
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub result: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<SearchParams>,
}

impl SearchBlock {
    pub fn has_rows(&self) -> bool {
        self.status.is_ok() && self.lines > 0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// 按 `fields` 顺序取出各行的显示文本
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.result
            .iter()
            .map(|row| {
                self.fields
                    .iter()
                    .map(|f| row.get(f).map(lenient::cell_text).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// 交换机模块的接线位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleWire {
    /// 模块号
    #[serde(deserialize_with = "lenient_text")]
    pub m: String,
    /// 模块内序号
    #[serde(deserialize_with = "lenient_text")]
    pub n: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub location: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::cell_text(&Value::deserialize(deserializer)?))
}

/// 端口列表附带的交换机信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchInfo {
    #[serde(default)]
    pub modules: Vec<ModuleWire>,
}

/// `search` 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swinfo: Option<SwitchInfo>,
}

// ========== portinfo ==========

/// 端口详情
///
/// 存在 `cp` 键即表示该端口当前有跳线。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortDetail {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub portname: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_text")]
    pub cp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_text")]
    pub outlet: Option<String>,
    /// 其余显示字段（描述、状态、最后活动时间等）
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PortDetail {
    pub fn has_patch(&self) -> bool {
        self.cp.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortInfoBlock {
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub result: PortDetail,
}

/// `portinfo` 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortInfoResponse {
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<PortInfoBlock>,
}

impl PortInfoResponse {
    /// 成功时返回端口详情，否则返回错误信息
    pub fn into_detail(self) -> Result<PortDetail, String> {
        match self.search {
            Some(block) if self.status.is_ok() && block.status.is_ok() => Ok(block.result),
            _ => Err(self
                .errmsg
                .unwrap_or_else(|| "Port information not available".to_string())),
        }
    }
}

// ========== addpatch ==========

/// `addpatch` 响应
///
/// `result` 中每一项对应表单的一行，键是列名，值是该字段的校验结果。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddPatchResponse {
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
    #[serde(default)]
    pub result: Vec<BTreeMap<String, FieldResult>>,
    /// 受影响端口的当前状态（更新摘要）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchBlock>,
}

impl AddPatchResponse {
    pub fn field_results(&self) -> impl Iterator<Item = &FieldResult> {
        self.result.iter().flat_map(BTreeMap::values)
    }
}

// ========== usecp ==========

/// `usecp` 响应：站点是否使用插座层级；按 host 查询时还会给出站点代码
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCpResponse {
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub result: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub site: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aux_sites_parse_from_pairs() {
        let aux: AuxResponse = serde_json::from_value(json!({
            "sites": {"status": "ok", "result": [["brr", "Bratislava"], ["koc", "Kosice"]]}
        }))
        .unwrap();
        assert!(aux.sites.status.is_ok());
        assert_eq!(aux.sites.result[1].code, "koc");
        assert_eq!(aux.sites.result[0].label(), "brr / Bratislava");
    }

    #[test]
    fn search_rows_follow_field_order() {
        let block: SearchBlock = serde_json::from_value(json!({
            "status": "ok",
            "lines": 1,
            "fields": ["portname", "host", "cp"],
            "result": [{"host": "brrsw01", "portname": "ge1/0/3", "cp": null, "descr": "x"}]
        }))
        .unwrap();
        assert_eq!(block.rows(), vec![vec!["ge1/0/3", "brrsw01", ""]]);
        assert!(block.has_field("cp"));
        assert!(!block.has_field("descr"));
    }

    #[test]
    fn port_detail_without_cp_has_no_patch() {
        let resp: PortInfoResponse = serde_json::from_value(json!({
            "status": "ok",
            "search": {"status": "ok", "result": {"host": "brrsw01", "portname": "ge1/0/3", "descr": "printer"}}
        }))
        .unwrap();
        let detail = resp.into_detail().unwrap();
        assert!(!detail.has_patch());
        assert_eq!(detail.extra["descr"], "printer");
    }

    #[test]
    fn port_info_error_yields_message() {
        let resp: PortInfoResponse =
            serde_json::from_value(json!({"status": "error", "errmsg": "No such port"})).unwrap();
        assert_eq!(resp.into_detail(), Err("No such port".to_string()));
    }

    #[test]
    fn missing_status_is_error() {
        let resp: StatusResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.status, Status::Error);
    }
}
