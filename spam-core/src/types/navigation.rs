//! 导航状态定义

use serde::{Deserialize, Serialize};

use super::PatchFields;
use crate::error::{CoreError, CoreResult};

/// 顶层视图选择器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// 交换机列表（带 host 时直接进入端口列表）
    #[serde(rename = "swlist")]
    SwitchList,
    /// 搜索工具
    #[serde(rename = "srctool")]
    Search,
    /// 添加跳线表单
    #[serde(rename = "addpatch")]
    AddPatch,
    /// 关于
    #[serde(rename = "about")]
    About,
}

impl Selector {
    /// 侧边栏中的顺序
    pub const ALL: [Self; 4] = [Self::SwitchList, Self::Search, Self::AddPatch, Self::About];

    /// 完整标识符（菜单元素 ID）
    pub fn id(self) -> &'static str {
        match self {
            Self::SwitchList => "swlist",
            Self::Search => "srctool",
            Self::AddPatch => "addpatch",
            Self::About => "about",
        }
    }

    /// 两字母短码（用于路径）
    pub fn code(self) -> &'static str {
        match self {
            Self::SwitchList => "sw",
            Self::Search => "sr",
            Self::AddPatch => "ap",
            Self::About => "ab",
        }
    }

    /// 显示标题
    pub fn title(self) -> &'static str {
        match self {
            Self::SwitchList => "Switches",
            Self::Search => "Search",
            Self::AddPatch => "Add Patches",
            Self::About => "About",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// 解析完整标识符或两字母短码，未知值是致命的输入错误
    pub fn resolve(sel: &str) -> CoreResult<Self> {
        let found = if sel.len() == 2 {
            Self::from_code(sel)
        } else {
            Self::from_id(sel)
        };
        found.ok_or_else(|| CoreError::InvalidSelector(sel.to_string()))
    }
}

/// 跳线表单的预填值（来自端口详情面板的“创建跳线”）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    #[serde(flatten)]
    pub fields: PatchFields,
    /// 由 host 推导出的站点代码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// 未经校验的导航请求
///
/// 选择器仍是原始字符串，由调度器解析；来源是点击、路径或视图内部的直接跳转。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNavigation {
    pub sel: String,
    #[serde(default)]
    pub arg: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Prefill>,
}

impl RawNavigation {
    pub fn new(sel: impl Into<String>) -> Self {
        Self {
            sel: sel.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_prefill(mut self, values: Prefill) -> Self {
        self.values = Some(values);
        self
    }
}

/// 已校验的导航状态
///
/// 由调度器持有，压入历史栈，并在后退/前进时原样恢复。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub selector: Selector,
    #[serde(default)]
    pub path_args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefill: Option<Prefill>,
}

impl NavigationState {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            path_args: Vec::new(),
            host: None,
            prefill: None,
        }
    }

    /// 目标交换机：显式的 host 优先，其次是第一个路径参数
    pub fn target_host(&self) -> Option<&str> {
        self.host
            .as_deref()
            .or_else(|| self.path_args.first().map(String::as_str))
            .filter(|h| !h.is_empty())
    }
}

impl TryFrom<RawNavigation> for NavigationState {
    type Error = CoreError;

    fn try_from(raw: RawNavigation) -> CoreResult<Self> {
        let selector = Selector::resolve(&raw.sel)?;
        Ok(Self {
            selector,
            path_args: raw.arg,
            host: raw.host.filter(|h| !h.is_empty()),
            prefill: raw.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_ids_and_codes() {
        assert_eq!(Selector::resolve("swlist"), Ok(Selector::SwitchList));
        assert_eq!(Selector::resolve("ap"), Ok(Selector::AddPatch));
        assert_eq!(Selector::resolve("ab"), Ok(Selector::About));
        assert_eq!(Selector::resolve("srctool"), Ok(Selector::Search));
    }

    #[test]
    fn resolve_rejects_unknown() {
        assert_eq!(
            Selector::resolve("zz"),
            Err(CoreError::InvalidSelector("zz".to_string()))
        );
        assert!(Selector::resolve("portmap").is_err());
    }

    #[test]
    fn target_host_prefers_explicit_host() {
        let mut state = NavigationState::new(Selector::SwitchList);
        assert_eq!(state.target_host(), None);

        state.path_args = vec!["sw-a".to_string()];
        assert_eq!(state.target_host(), Some("sw-a"));

        state.host = Some("sw-b".to_string());
        assert_eq!(state.target_host(), Some("sw-b"));
    }

    #[test]
    fn selector_serializes_as_id() {
        let json = serde_json::to_string(&Selector::AddPatch).unwrap();
        assert_eq!(json, "\"addpatch\"");
    }
}
