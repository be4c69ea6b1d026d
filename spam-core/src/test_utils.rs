//! 测试辅助模块
//!
//! 提供脚本化的 mock 后端和便捷的测试工厂方法。

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::services::SharedServices;
use crate::traits::{Backend, InMemoryStore};
use crate::types::{
    AddPatchResponse, AuxResponse, FormPairs, ModuleWireUpdate, PatchForm, PortInfoResponse,
    RequestKind, SearchQuery, SearchResponse, SiteLookup, StatusResponse, SwitchListResponse,
    UseCpResponse,
};

// ===== MockBackend =====

#[derive(Default)]
struct MockState {
    /// 每种请求的应答队列；只剩一条时重复使用
    responses: HashMap<RequestKind, VecDeque<CoreResult<Value>>>,
    /// 已收到的请求
    requests: Vec<(RequestKind, FormPairs)>,
}

/// 按请求类型返回预设 JSON 的后端
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条应答
    pub fn respond(&self, kind: RequestKind, body: Value) {
        self.push(kind, Ok(body));
    }

    /// 追加一条传输层错误
    pub fn fail(&self, kind: RequestKind, error: CoreError) {
        self.push(kind, Err(error));
    }

    fn push(&self, kind: RequestKind, reply: CoreResult<Value>) {
        self.state
            .lock()
            .unwrap()
            .responses
            .entry(kind)
            .or_default()
            .push_back(reply);
    }

    pub fn count(&self, kind: RequestKind) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn last_form(&self, kind: RequestKind) -> Option<FormPairs> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .map(|(_, form)| form.clone())
    }

    fn call<T: DeserializeOwned>(&self, kind: RequestKind, form: FormPairs) -> CoreResult<T> {
        let mut state = self.state.lock().unwrap();
        state.requests.push((kind, form));

        let queue = state
            .responses
            .get_mut(&kind)
            .ok_or_else(|| CoreError::Network(format!("no scripted response for r={kind}")))?;
        let reply = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };
        serde_json::from_value(reply?).map_err(|e| CoreError::Parse(e.to_string()))
    }
}

fn host_port(host: &str, portname: &str) -> FormPairs {
    vec![
        ("host".to_string(), host.to_string()),
        ("portname".to_string(), portname.to_string()),
    ]
}

#[async_trait]
impl Backend for MockBackend {
    async fn aux(&self) -> CoreResult<AuxResponse> {
        self.call(RequestKind::Aux, Vec::new())
    }

    async fn switch_list(&self) -> CoreResult<SwitchListResponse> {
        self.call(RequestKind::Swlist, Vec::new())
    }

    async fn search(&self, query: &SearchQuery) -> CoreResult<SearchResponse> {
        self.call(RequestKind::Search, query.params.clone())
    }

    async fn port_info(&self, host: &str, portname: &str) -> CoreResult<PortInfoResponse> {
        self.call(RequestKind::Portinfo, host_port(host, portname))
    }

    async fn add_patch(&self, form: &PatchForm) -> CoreResult<AddPatchResponse> {
        self.call(RequestKind::Addpatch, form.to_pairs())
    }

    async fn delete_patch(&self, host: &str, portname: &str) -> CoreResult<StatusResponse> {
        self.call(RequestKind::Delpatch, host_port(host, portname))
    }

    async fn use_cp(&self, lookup: &SiteLookup) -> CoreResult<UseCpResponse> {
        self.call(RequestKind::Usecp, lookup.to_pairs())
    }

    async fn module_wire(&self, update: &ModuleWireUpdate) -> CoreResult<StatusResponse> {
        self.call(RequestKind::Modwire, update.to_pairs())
    }
}

// ===== 工厂方法 =====

/// 以 mock 后端和内存存储构建共享服务
pub fn services_with(backend: &MockBackend) -> SharedServices {
    SharedServices::new(
        Arc::new(backend.clone()),
        Arc::new(InMemoryStore::new()),
        Duration::from_secs(600),
    )
}
