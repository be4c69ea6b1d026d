//! 后端请求类型
//!
//! 所有请求都是表单编码的 POST，以判别字段 `r` 区分操作。

use serde::{Deserialize, Serialize};

/// 请求判别值（表单字段 `r`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Aux,
    Swlist,
    Search,
    Portinfo,
    Addpatch,
    Delpatch,
    Usecp,
    Modwire,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aux => "aux",
            Self::Swlist => "swlist",
            Self::Search => "search",
            Self::Portinfo => "portinfo",
            Self::Addpatch => "addpatch",
            Self::Delpatch => "delpatch",
            Self::Usecp => "usecp",
            Self::Modwire => "modwire",
        }
    }

    /// 只读请求可以安全重试，写请求不重试
    pub fn is_idempotent(self) -> bool {
        !matches!(self, Self::Addpatch | Self::Delpatch | Self::Modwire)
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表单字段列表（保持提交顺序）
pub type FormPairs = Vec<(String, String)>;

/// 搜索请求
///
/// 端口列表是 `mode=portlist` 的搜索；搜索工具则直接提交表单字段。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub params: FormPairs,
}

impl SearchQuery {
    /// 某台交换机的端口列表
    pub fn port_list(host: &str) -> Self {
        Self {
            params: vec![
                ("host".to_string(), host.to_string()),
                ("mode".to_string(), "portlist".to_string()),
            ],
        }
    }

    /// 由搜索工具表单构造；空值不提交
    pub fn from_form<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// 添加跳线表单：所选站点加上各行的 `addp_*NN` 字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchForm {
    pub site: Option<String>,
    pub fields: FormPairs,
}

impl PatchForm {
    pub fn to_pairs(&self) -> FormPairs {
        let mut pairs = Vec::with_capacity(self.fields.len() + 1);
        if let Some(site) = &self.site {
            pairs.push(("site".to_string(), site.clone()));
        }
        pairs.extend(self.fields.iter().cloned());
        pairs
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// `usecp` 查询的键
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteLookup {
    /// 按站点代码
    Site(String),
    /// 按交换机主机名（同时返回站点代码）
    Host(String),
}

impl SiteLookup {
    pub fn to_pairs(&self) -> FormPairs {
        match self {
            Self::Site(site) => vec![("site".to_string(), site.clone())],
            Self::Host(host) => vec![("host".to_string(), host.clone())],
        }
    }
}

/// 模块接线位置修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleWireUpdate {
    pub host: String,
    pub m: String,
    pub n: String,
    pub location: String,
}

impl ModuleWireUpdate {
    pub fn to_pairs(&self) -> FormPairs {
        vec![
            ("location".to_string(), self.location.clone()),
            ("m".to_string(), self.m.clone()),
            ("n".to_string(), self.n.clone()),
            ("host".to_string(), self.host.clone()),
        ]
    }
}
