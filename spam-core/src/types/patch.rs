//! 跳线表单相关类型

use serde::{Deserialize, Serialize};

/// 跳线表单的一列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatchField {
    /// 交换机主机名
    Switch,
    /// 端口名
    Port,
    /// 配线架端口（cross-connect）
    CrossConnect,
    /// 墙面插座
    Outlet,
}

impl PatchField {
    /// 表单中的列顺序
    pub const ALL: [Self; 4] = [Self::Switch, Self::Port, Self::CrossConnect, Self::Outlet];

    /// 线上字段名前缀，后跟两位行号
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Switch => "addp_sw",
            Self::Port => "addp_pt",
            Self::CrossConnect => "addp_cp",
            Self::Outlet => "addp_ou",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Switch => "Switch",
            Self::Port => "Port",
            Self::CrossConnect => "Cross-connect",
            Self::Outlet => "Outlet",
        }
    }

    /// 行号 `row`（从 0 开始）对应的线上字段名，如 `addp_sw03`
    pub fn wire_name(self, row: usize) -> String {
        format!("{}{:02}", self.prefix(), row)
    }

    /// 解析线上字段名，返回列与行号
    pub fn parse_wire_name(name: &str) -> Option<(Self, usize)> {
        Self::ALL.into_iter().find_map(|field| {
            let suffix = name.strip_prefix(field.prefix())?;
            if suffix.len() == 2 && suffix.bytes().all(|b| b.is_ascii_digit()) {
                suffix.parse().ok().map(|row| (field, row))
            } else {
                None
            }
        })
    }

    /// 新增行时是否沿用首行的值（站点范围内的字段）
    pub fn is_site_scoped(self) -> bool {
        matches!(self, Self::Switch)
    }
}

/// 一行的可编辑内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchFields {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub portname: String,
    #[serde(rename = "cp", default, skip_serializing_if = "Option::is_none")]
    pub cross_connect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlet: Option<String>,
}

impl PatchFields {
    pub fn get(&self, field: PatchField) -> &str {
        match field {
            PatchField::Switch => &self.host,
            PatchField::Port => &self.portname,
            PatchField::CrossConnect => self.cross_connect.as_deref().unwrap_or(""),
            PatchField::Outlet => self.outlet.as_deref().unwrap_or(""),
        }
    }

    /// 设置字段值；可选字段为空时清除
    pub fn set(&mut self, field: PatchField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PatchField::Switch => self.host = value,
            PatchField::Port => self.portname = value,
            PatchField::CrossConnect => self.cross_connect = Some(value).filter(|v| !v.is_empty()),
            PatchField::Outlet => self.outlet = Some(value).filter(|v| !v.is_empty()),
        }
    }

    pub fn is_blank(&self) -> bool {
        PatchField::ALL.into_iter().all(|f| self.get(f).is_empty())
    }
}

/// 站点的跳线层级模式，决定插座列是否显示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColumnMode {
    /// 交换机 → 配线架 → 插座
    #[default]
    #[serde(rename = "outlet")]
    Outlet,
    /// 只有配线架，没有插座层级
    #[serde(rename = "cponly")]
    CrossConnectOnly,
}

impl ColumnMode {
    /// `usecp` 查询的结果：真值表示站点使用插座
    pub fn from_outlet_flag(outlet: bool) -> Self {
        if outlet {
            Self::Outlet
        } else {
            Self::CrossConnectOnly
        }
    }

    pub fn shows_outlet(self) -> bool {
        matches!(self, Self::Outlet)
    }
}

/// 服务端对单个字段的校验/规范化结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldResult {
    /// 线上字段名（如 `addp_pt01`）
    pub name: String,
    /// 规范化后的值
    #[serde(default, deserialize_with = "crate::utils::lenient::opt_text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient::flag")]
    pub valid: bool,
    #[serde(default, deserialize_with = "crate::utils::lenient::opt_text")]
    pub err: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_zero_padded() {
        assert_eq!(PatchField::Switch.wire_name(0), "addp_sw00");
        assert_eq!(PatchField::Outlet.wire_name(7), "addp_ou07");
        assert_eq!(PatchField::Port.wire_name(42), "addp_pt42");
    }

    #[test]
    fn parse_wire_name_round_trips() {
        assert_eq!(
            PatchField::parse_wire_name("addp_cp13"),
            Some((PatchField::CrossConnect, 13))
        );
        assert_eq!(PatchField::parse_wire_name("addp_cp1"), None);
        assert_eq!(PatchField::parse_wire_name("addp_xx01"), None);
        assert_eq!(PatchField::parse_wire_name("site"), None);
    }

    #[test]
    fn optional_fields_clear_on_empty() {
        let mut fields = PatchFields::default();
        fields.set(PatchField::Outlet, "A-12");
        assert_eq!(fields.outlet.as_deref(), Some("A-12"));
        fields.set(PatchField::Outlet, "");
        assert_eq!(fields.outlet, None);
        assert!(fields.is_blank());
    }

    #[test]
    fn field_result_tolerates_weak_types() {
        let r: FieldResult = serde_json::from_str(
            r#"{"name":"addp_ou00","value":1042,"valid":0,"err":"No such outlet"}"#,
        )
        .unwrap();
        assert_eq!(r.value.as_deref(), Some("1042"));
        assert!(!r.valid);
        assert_eq!(r.err.as_deref(), Some("No such outlet"));
    }
}
