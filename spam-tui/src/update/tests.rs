//! Update 层测试：真实的 Bridge + tokio 运行时 + 脚本化后端

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use spam_core::detail_panel::{DeleteControl, PanelState};
use spam_core::services::{STORAGE_ADDPATCH_SITE, STORAGE_SWLIST_GROUP};
use spam_core::traits::{Backend, InMemoryStore, KeyValueStore};
use spam_core::types::{
    AddPatchResponse, AuxResponse, ColumnMode, ModuleWireUpdate, PatchField, PatchForm,
    PortInfoResponse, RequestKind, SearchQuery, SearchResponse, Selector, SiteLookup,
    StatusResponse, SwitchListResponse, UseCpResponse,
};
use spam_core::{CoreError, CoreResult, SharedServices};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::update;
use crate::backend::Bridge;
use crate::message::{AppMessage, BackendEvent, ContentMessage, NavigationMessage};
use crate::model::state::PortSection;
use crate::model::{App, Page};

#[derive(Default)]
struct StubBackend {
    responses: Mutex<HashMap<RequestKind, Value>>,
    calls: Mutex<Vec<RequestKind>>,
    lookups: Mutex<Vec<SiteLookup>>,
}

impl StubBackend {
    fn respond(&self, kind: RequestKind, value: Value) {
        self.responses.lock().unwrap().insert(kind, value);
    }

    fn count(&self, kind: RequestKind) -> usize {
        self.calls.lock().unwrap().iter().filter(|k| **k == kind).count()
    }

    fn lookups(&self) -> Vec<SiteLookup> {
        self.lookups.lock().unwrap().clone()
    }

    fn reply<T: DeserializeOwned>(&self, kind: RequestKind) -> CoreResult<T> {
        self.calls.lock().unwrap().push(kind);
        let value = self
            .responses
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .ok_or_else(|| CoreError::Network(format!("no stub for {kind}")))?;
        serde_json::from_value(value).map_err(|e| CoreError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn aux(&self) -> CoreResult<AuxResponse> {
        self.reply(RequestKind::Aux)
    }

    async fn switch_list(&self) -> CoreResult<SwitchListResponse> {
        self.reply(RequestKind::Swlist)
    }

    async fn search(&self, _query: &SearchQuery) -> CoreResult<SearchResponse> {
        self.reply(RequestKind::Search)
    }

    async fn port_info(&self, _host: &str, _portname: &str) -> CoreResult<PortInfoResponse> {
        self.reply(RequestKind::Portinfo)
    }

    async fn add_patch(&self, _form: &PatchForm) -> CoreResult<AddPatchResponse> {
        self.reply(RequestKind::Addpatch)
    }

    async fn delete_patch(&self, _host: &str, _portname: &str) -> CoreResult<StatusResponse> {
        self.reply(RequestKind::Delpatch)
    }

    async fn use_cp(&self, lookup: &SiteLookup) -> CoreResult<UseCpResponse> {
        self.lookups.lock().unwrap().push(lookup.clone());
        self.reply(RequestKind::Usecp)
    }

    async fn module_wire(&self, _update: &ModuleWireUpdate) -> CoreResult<StatusResponse> {
        self.reply(RequestKind::Modwire)
    }
}

struct Harness {
    app: App,
    rx: UnboundedReceiver<BackendEvent>,
    backend: Arc<StubBackend>,
    storage: Arc<InMemoryStore>,
    _runtime: Runtime,
}

impl Harness {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let backend = Arc::new(StubBackend::default());
        backend.respond(RequestKind::Swlist, switch_list());
        backend.respond(RequestKind::Search, port_list());
        backend.respond(RequestKind::Portinfo, port_info());
        backend.respond(RequestKind::Delpatch, json!({"status": "ok"}));
        backend.respond(RequestKind::Modwire, json!({"status": "ok"}));
        backend.respond(
            RequestKind::Usecp,
            json!({"status": "ok", "result": false, "site": "brr"}),
        );
        backend.respond(
            RequestKind::Aux,
            json!({"sites": {"status": "ok", "result": [["brr", "Brno"], ["vin", "Vinohrady"]]}}),
        );

        let storage = Arc::new(InMemoryStore::new());
        let services = Arc::new(SharedServices::new(
            Arc::clone(&backend) as Arc<dyn Backend>,
            Arc::clone(&storage) as Arc<dyn KeyValueStore>,
            Duration::from_secs(600),
        ));
        let (tx, rx) = mpsc::unbounded_channel();
        let bridge = Bridge::new(runtime.handle().clone(), services, tx);

        Self {
            app: App::new(bridge, "/spam/"),
            rx,
            backend,
            storage,
            _runtime: runtime,
        }
    }

    fn send(&mut self, msg: ContentMessage) {
        update(&mut self.app, AppMessage::Content(msg));
    }

    /// 等待并应用 `n` 个后端事件
    fn settle(&mut self, n: usize) {
        for _ in 0..n {
            let event = self.rx.blocking_recv().expect("backend event");
            update(&mut self.app, AppMessage::Backend(event));
        }
    }

    fn port_list(&self) -> &crate::model::state::PortListState {
        match &self.app.page {
            Page::PortList(state) => state,
            other => panic!("expected port list, got {other:?}"),
        }
    }
}

fn switch_list() -> Value {
    json!({
        "status": "ok",
        "result": [
            {"host": "brrsw01", "group": "core"},
            {"host": "brrsw02", "group": "access", "stale": 1}
        ]
    })
}

fn port_list() -> Value {
    json!({
        "status": "ok",
        "search": {
            "status": "ok",
            "lines": 2,
            "fields": ["portname", "cp", "outlet", "descr"],
            "result": [
                {"portname": "ge1/0/1", "cp": "A-01", "outlet": "101", "descr": "uplink"},
                {"portname": "ge1/0/2", "descr": "spare"}
            ]
        },
        "swinfo": {"modules": [{"m": 1, "n": 0, "location": "Rack 4"}]}
    })
}

fn port_info() -> Value {
    json!({
        "status": "ok",
        "search": {
            "status": "ok",
            "result": {"host": "brrsw01", "portname": "ge1/0/1", "cp": "A-01", "outlet": "101"}
        }
    })
}

#[test]
fn start_path_mounts_port_list() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/sw/brrsw01/");
    h.settle(1);

    let state = h.port_list();
    assert_eq!(state.host(), "brrsw01");
    assert_eq!(state.view.table().len(), 2);
    assert_eq!(state.modules.len(), 1);
    assert_eq!(state.modules[0].field.value(), "Rack 4");
    assert_eq!(h.app.navigation.current(), Some(Selector::SwitchList));
}

#[test]
fn unknown_start_path_shows_error_and_opens_switch_list() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/zz/");
    h.settle(1);

    assert!(h.app.modal.is_open());
    assert!(matches!(h.app.page, Page::Switches(_)));
    update(&mut h.app, AppMessage::Modal(crate::message::ModalMessage::Close));
    assert!(!h.app.modal.is_open());
}

#[test]
fn switch_group_choice_is_persisted() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/");
    h.settle(1);

    // all -> stl (not stored) -> access
    h.send(ContentMessage::Right);
    assert_eq!(h.storage.get(STORAGE_SWLIST_GROUP).unwrap(), None);
    h.send(ContentMessage::Right);
    assert_eq!(
        h.storage.get(STORAGE_SWLIST_GROUP).unwrap().as_deref(),
        Some("access")
    );
}

#[test]
fn opening_a_switch_records_history() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/");
    h.settle(1);

    h.send(ContentMessage::Confirm);
    h.settle(1);
    assert_eq!(h.port_list().host(), "brrsw01");

    update(&mut h.app, AppMessage::HistoryBack);
    assert!(matches!(h.app.page, Page::Switches(_)));
    h.settle(1);

    update(&mut h.app, AppMessage::HistoryForward);
    h.settle(1);
    assert_eq!(h.port_list().host(), "brrsw01");
}

#[test]
fn delete_flow_refreshes_list_after_close() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/sw/brrsw01/");
    h.settle(1);

    h.send(ContentMessage::Confirm);
    h.settle(1);
    h.send(ContentMessage::Delete);
    {
        let panel = h.port_list().view.panel().unwrap();
        let open = panel.open_panel().unwrap();
        assert_eq!(open.delete_control(), &DeleteControl::Confirming);
    }

    h.send(ContentMessage::Input('y'));
    h.settle(1);
    assert_eq!(h.backend.count(RequestKind::Delpatch), 1);
    assert!(h.port_list().view.panel().unwrap().open_panel().unwrap().refresh_on_close());

    let searches = h.backend.count(RequestKind::Search);
    h.send(ContentMessage::Cancel);
    assert!(matches!(
        h.port_list().view.panel().unwrap().state(),
        PanelState::Closing { .. }
    ));
    h.settle(1);
    assert_eq!(h.backend.count(RequestKind::Search), searches + 1);
    assert!(h.port_list().view.panel().unwrap().is_closed());
}

#[test]
fn late_response_for_replaced_view_is_ignored() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/sw/brrsw01/");

    update(
        &mut h.app,
        AppMessage::Navigation(NavigationMessage::SelectLast),
    );
    update(&mut h.app, AppMessage::Navigation(NavigationMessage::Confirm));
    assert!(matches!(h.app.page, Page::About));

    h.settle(1);
    assert!(matches!(h.app.page, Page::About));
    assert_eq!(h.app.status_message.as_deref(), Some("/spam/ab/"));
}

#[test]
fn create_patch_prefills_form_and_resolves_site() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/sw/brrsw01/");
    h.settle(1);

    // ge1/0/2 has no patch
    h.backend.respond(
        RequestKind::Portinfo,
        json!({"status": "ok", "search": {"status": "ok", "result": {"host": "brrsw01", "portname": "ge1/0/2"}}}),
    );
    // the switch lives at a site whose code differs from its name prefix
    h.backend.respond(
        RequestKind::Usecp,
        json!({"status": "ok", "result": false, "site": "vin"}),
    );
    h.send(ContentMessage::SelectNext);
    h.send(ContentMessage::Confirm);
    h.settle(1);
    h.send(ContentMessage::CreatePatch);

    // aux + usecp
    h.settle(2);
    assert_eq!(
        h.backend.lookups(),
        vec![SiteLookup::Host("brrsw01".to_string())]
    );
    let Page::AddPatch(state) = &h.app.page else {
        panic!("expected add patch form");
    };
    assert_eq!(state.table.value(0, PatchField::Switch), Some("brrsw01"));
    assert_eq!(state.table.value(0, PatchField::Port), Some("ge1/0/2"));
    assert_eq!(state.table.site(), Some("vin"));
    assert_eq!(state.table.mode(), ColumnMode::CrossConnectOnly);
    assert_eq!(state.sites.len(), 2);
}

#[test]
fn add_patch_site_choice_is_persisted() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/ap/");
    h.settle(1);

    h.send(ContentMessage::SelectPrevious);
    h.send(ContentMessage::Right);
    h.settle(1);

    assert_eq!(
        h.storage.get(STORAGE_ADDPATCH_SITE).unwrap().as_deref(),
        Some("brr")
    );
    let Page::AddPatch(state) = &h.app.page else {
        panic!("expected add patch form");
    };
    assert_eq!(state.table.mode(), ColumnMode::CrossConnectOnly);
}

#[test]
fn module_location_edit_saves_through_backend() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/sw/brrsw01/");
    h.settle(1);

    h.send(ContentMessage::SwitchSection);
    assert_eq!(h.port_list().section, PortSection::Modules);
    h.send(ContentMessage::Confirm);
    h.send(ContentMessage::Input('b'));
    h.send(ContentMessage::Confirm);
    h.settle(1);

    assert_eq!(h.backend.count(RequestKind::Modwire), 1);
    assert_eq!(h.port_list().modules[0].field.value(), "Rack 4b");
}

#[test]
fn row_limit_error_lands_in_status_bar() {
    let mut h = Harness::new();
    super::start(&mut h.app, "/spam/ap/");
    h.settle(1);

    h.send(ContentMessage::Delete);
    assert_eq!(
        h.app.status_message.as_deref(),
        Some(CoreError::LastRow.to_string().as_str())
    );
}
