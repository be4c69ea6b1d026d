//! 搜索工具
//!
//! 提交成功后，后端返回的规范化值会写回表单；以 `'` 开头的原始值不做规范化。

use crate::error::{CoreError, CoreResult};
use crate::generation::Token;
use crate::list_view::{ListView, LoadRequest};
use crate::types::{SearchParams, SearchQuery, SearchResponse};

/// 站点下拉框中“任意站点”的值，不提交
pub const SITE_ANY: &str = "any";

/// 搜索表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Host,
    Portname,
    CrossConnect,
    Outlet,
    Site,
    /// 不活动时长
    Inactivity,
    /// 任意文本
    Text,
}

impl SearchField {
    pub const ALL: [Self; 7] = [
        Self::Host,
        Self::Portname,
        Self::CrossConnect,
        Self::Outlet,
        Self::Site,
        Self::Inactivity,
        Self::Text,
    ];

    /// 表单字段名
    pub fn name(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Portname => "portname",
            Self::CrossConnect => "cp",
            Self::Outlet => "outlet",
            Self::Site => "site",
            Self::Inactivity => "inact",
            Self::Text => "text",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Host => "Switch",
            Self::Portname => "Port",
            Self::CrossConnect => "Cross-connect",
            Self::Outlet => "Outlet",
            Self::Site => "Site",
            Self::Inactivity => "Inactive for",
            Self::Text => "Text",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// 搜索表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    values: [String; 7],
}

impl Default for SearchForm {
    fn default() -> Self {
        let mut form = Self {
            values: Default::default(),
        };
        form.set(SearchField::Site, SITE_ANY);
        form
    }
}

impl SearchForm {
    pub fn get(&self, field: SearchField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: SearchField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// 要提交的查询：空字段与 `site=any` 不提交
    pub fn query(&self) -> SearchQuery {
        SearchQuery::from_form(
            SearchField::ALL
                .into_iter()
                .filter(|f| !(*f == SearchField::Site && self.get(*f) == SITE_ANY))
                .map(|f| (f.name(), self.get(f).to_string())),
        )
    }

    /// 用规范化值覆盖表单；原始值以 `'` 开头的字段保持不变
    pub fn apply_normalized(&mut self, params: &SearchParams) {
        for (name, normalized) in &params.normalized {
            let Some(field) = SearchField::from_name(name) else {
                continue;
            };
            let raw = params.raw.get(name).map_or("", String::as_str);
            if !raw.starts_with('\'') {
                self.set(field, normalized.clone());
            }
        }
    }
}

/// 搜索工具视图状态
#[derive(Debug, Default)]
pub struct SearchTool {
    form: SearchForm,
    results: Option<ListView>,
}

impl SearchTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    pub fn results(&self) -> Option<&ListView> {
        self.results.as_ref()
    }

    pub fn results_mut(&mut self) -> Option<&mut ListView> {
        self.results.as_mut()
    }

    pub fn is_pending(&self) -> bool {
        self.results.as_ref().is_some_and(ListView::is_loading)
    }

    /// 提交搜索；替换之前的结果
    pub fn submit(&mut self) -> CoreResult<LoadRequest> {
        let query = self.form.query();
        if query.is_empty() {
            return Err(CoreError::Validation("Enter at least one search term".to_string()));
        }
        let results = self.results.insert(ListView::search(query));
        results
            .begin_load()
            .ok_or_else(|| CoreError::Validation("Empty search".to_string()))
    }

    /// 应用搜索结果，并把规范化值写回表单
    pub fn apply_response(&mut self, token: Token, response: &SearchResponse) -> CoreResult<()> {
        let results = self.results.as_mut().ok_or(CoreError::StaleResponse)?;
        results.apply_load(token, response)?;

        if response.status.is_ok() {
            if let Some(params) = response.search.as_ref().and_then(|s| s.params.as_ref()) {
                self.form.apply_normalized(params);
            }
        }
        Ok(())
    }

    pub fn fail_response(&mut self, token: Token, error: &CoreError) -> CoreResult<()> {
        let results = self.results.as_mut().ok_or(CoreError::StaleResponse)?;
        results.fail_load(token, error)
    }

    /// 清空表单与结果
    pub fn reset(&mut self) {
        self.form = SearchForm::default();
        self.results = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_skips_empty_and_any_site() {
        let mut form = SearchForm::default();
        form.set(SearchField::Host, "brrsw01");
        assert_eq!(
            form.query().params,
            vec![("host".to_string(), "brrsw01".to_string())]
        );

        form.set(SearchField::Site, "brr");
        assert_eq!(form.query().get("site"), Some("brr"));
    }

    #[test]
    fn normalization_respects_quote_prefix() {
        let mut tool = SearchTool::new();
        tool.form_mut().set(SearchField::Portname, "gi1/0/1");
        tool.form_mut().set(SearchField::Outlet, "'a-12");
        let request = tool.submit().unwrap();
        assert!(tool.is_pending());

        let response: SearchResponse = serde_json::from_value(json!({
            "status": "ok",
            "search": {
                "status": "ok", "lines": 1, "fields": ["host", "portname"],
                "result": [{"host": "brrsw01", "portname": "Gi1/0/1"}],
                "params": {
                    "raw": {"portname": "gi1/0/1", "outlet": "'a-12"},
                    "normalized": {"portname": "Gi1/0/1", "outlet": "A-12"}
                }
            }
        }))
        .unwrap();
        tool.apply_response(request.token, &response).unwrap();

        assert_eq!(tool.form().get(SearchField::Portname), "Gi1/0/1");
        assert_eq!(tool.form().get(SearchField::Outlet), "'a-12");
        assert_eq!(tool.results().unwrap().table().len(), 1);
    }

    #[test]
    fn resubmit_discards_previous_response() {
        let mut tool = SearchTool::new();
        tool.form_mut().set(SearchField::Host, "brrsw01");
        let first = tool.submit().unwrap();
        let _second = tool.submit().unwrap();

        let response = SearchResponse::default();
        assert_eq!(
            tool.apply_response(first.token, &response),
            Err(CoreError::StaleResponse)
        );
    }

    #[test]
    fn empty_form_is_rejected() {
        let mut tool = SearchTool::new();
        assert!(matches!(tool.submit(), Err(CoreError::Validation(_))));
        tool.form_mut().set(SearchField::Text, "printer");
        tool.submit().unwrap();
        tool.reset();
        assert!(tool.results().is_none());
        assert_eq!(tool.form().get(SearchField::Site), SITE_ANY);
    }
}
