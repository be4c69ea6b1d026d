//! 交换机列表
//!
//! 顶部分组标签：`all`（全部）、`stl`（长时间未轮询）以及各个分组。

use std::collections::BTreeSet;

use crate::error::{CoreError, CoreResult};
use crate::generation::{Generation, Token};
use crate::types::{RawNavigation, SwitchEntry, SwitchListResponse};

pub const GROUP_ALL: &str = "all";
pub const GROUP_STALE: &str = "stl";

/// 交换机列表视图状态
#[derive(Debug)]
pub struct SwitchList {
    switches: Vec<SwitchEntry>,
    groups: Vec<String>,
    active: String,
    message: Option<String>,
    loads: Generation,
    loading: bool,
}

impl SwitchList {
    /// `stored_group` 是上次保存的分组
    pub fn new(stored_group: Option<String>) -> Self {
        Self {
            switches: Vec::new(),
            groups: Vec::new(),
            active: stored_group
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| GROUP_ALL.to_string()),
            message: None,
            loads: Generation::new(),
            loading: false,
        }
    }

    pub fn begin_load(&mut self) -> Token {
        self.loading = true;
        self.loads.next()
    }

    pub fn apply_load(&mut self, token: Token, response: SwitchListResponse) -> CoreResult<()> {
        self.loads.check(token)?;
        self.loading = false;

        if !response.status.is_ok() {
            self.message = Some(
                response
                    .errmsg
                    .unwrap_or_else(|| "Switch list not available".to_string()),
            );
            return Ok(());
        }

        self.groups = response
            .result
            .iter()
            .filter_map(|s| s.group.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        self.switches = response.result;
        self.message = None;

        if !self.tabs().contains(&self.active.as_str()) {
            log::debug!("Stored switch group '{}' no longer exists", self.active);
            self.active = GROUP_ALL.to_string();
        }
        Ok(())
    }

    pub fn fail_load(&mut self, token: Token, error: &CoreError) -> CoreResult<()> {
        self.loads.check(token)?;
        self.loading = false;
        self.message = Some(error.to_string());
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// 标签顺序：全部、未轮询、各分组
    pub fn tabs(&self) -> Vec<&str> {
        [GROUP_ALL, GROUP_STALE]
            .into_iter()
            .chain(self.groups.iter().map(String::as_str))
            .collect()
    }

    /// 切换分组，返回需要持久化的值（`stl` 不保存）
    pub fn select_group(&mut self, group: &str) -> Option<String> {
        self.active = group.to_string();
        (group != GROUP_STALE).then(|| group.to_string())
    }

    /// 当前分组下可见的交换机
    pub fn visible(&self) -> Vec<&SwitchEntry> {
        self.switches
            .iter()
            .filter(|s| match self.active.as_str() {
                GROUP_ALL => true,
                GROUP_STALE => s.stale,
                group => s.group.as_deref() == Some(group),
            })
            .collect()
    }

    /// 打开交换机的端口列表：以 host 重新调度 `swlist`，让历史记录下端口列表
    pub fn open(host: &str) -> RawNavigation {
        RawNavigation::new("swlist").with_host(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded(stored: Option<&str>) -> SwitchList {
        let mut list = SwitchList::new(stored.map(str::to_string));
        let token = list.begin_load();
        let response = serde_json::from_value(json!({
            "status": "ok",
            "result": [
                {"host": "brrsw01", "group": "access", "stale": 0},
                {"host": "brrcore", "group": "core", "stale": 0},
                {"host": "kocsw09", "group": "access", "stale": 1}
            ]
        }))
        .unwrap();
        list.apply_load(token, response).unwrap();
        list
    }

    #[test]
    fn tabs_list_distinct_groups() {
        let list = loaded(None);
        assert_eq!(list.tabs(), ["all", "stl", "access", "core"]);
        assert_eq!(list.visible().len(), 3);
    }

    #[test]
    fn stale_tab_is_not_persisted() {
        let mut list = loaded(Some("core"));
        assert_eq!(list.visible().len(), 1);

        assert_eq!(list.select_group(GROUP_STALE), None);
        assert_eq!(list.visible()[0].host, "kocsw09");
        assert_eq!(list.select_group("access"), Some("access".to_string()));
        assert_eq!(list.visible().len(), 2);
    }

    #[test]
    fn unknown_stored_group_falls_back_to_all() {
        let list = loaded(Some("gone"));
        assert_eq!(list.active(), GROUP_ALL);
    }

    #[test]
    fn open_dispatches_switch_list_with_host() {
        let nav = SwitchList::open("brrsw01");
        assert_eq!(nav.sel, "swlist");
        assert_eq!(nav.host.as_deref(), Some("brrsw01"));
    }
}
