//! Dispatcher, list view, detail panel and patch form working together

use serde_json::json;

use spam_core::detail_panel::DeleteControl;
use spam_core::dispatcher::{Dispatcher, Mount, Trigger};
use spam_core::list_view::ListView;
use spam_core::row_table::RowTable;
use spam_core::types::{
    PatchField, PortInfoResponse, RawNavigation, SearchResponse, Selector, StatusResponse,
};
use spam_core::CoreError;

fn port_list_response() -> SearchResponse {
    serde_json::from_value(json!({
        "status": "ok",
        "search": {
            "status": "ok",
            "lines": 2,
            "fields": ["portname", "status", "cp", "outlet"],
            "result": [
                {"portname": "ge1/0/1", "status": "up", "cp": "C-01", "outlet": "A-01"},
                {"portname": "ge1/0/2", "status": "down", "cp": "", "outlet": ""}
            ]
        }
    }))
    .unwrap()
}

fn port_info(portname: &str, cp: Option<&str>) -> PortInfoResponse {
    let mut result = json!({"host": "brrsw01", "portname": portname});
    if let Some(cp) = cp {
        result["cp"] = json!(cp);
        result["outlet"] = json!("A-01");
    }
    serde_json::from_value(json!({"status": "ok", "search": {"status": "ok", "result": result}}))
        .unwrap()
}

fn mounted_port_list(dispatcher: &mut Dispatcher) -> ListView {
    let route = dispatcher
        .dispatch(Trigger::Direct(
            RawNavigation::new("swlist").with_host("brrsw01"),
        ))
        .unwrap();
    let Mount::PortList { host } = route.mount else {
        panic!("expected port list, got {:?}", route.mount);
    };

    let mut view = ListView::port_list(&host);
    let load = view.begin_load().unwrap();
    view.apply_load(load.token, &port_list_response()).unwrap();
    view
}

#[test]
fn create_patch_from_unpatched_port_prefills_form() {
    let mut dispatcher = Dispatcher::default();
    dispatcher.dispatch(Trigger::Click("sw".into())).unwrap();
    let mut view = mounted_port_list(&mut dispatcher);

    let request = view.show_detail(1).unwrap();
    view.panel_mut()
        .unwrap()
        .apply_detail(request.token, port_info("ge1/0/2", None))
        .unwrap();

    let open = view.panel().unwrap().open_panel().unwrap();
    assert!(open.can_create());
    assert_eq!(open.delete_control(), &DeleteControl::Hidden);

    let nav = view.create_patch().unwrap();
    let route = dispatcher.dispatch(Trigger::Direct(nav)).unwrap();
    assert_eq!(route.state.selector, Selector::AddPatch);
    assert_eq!(route.path, "/spam/ap/");

    let Mount::AddPatch {
        prefill: Some(prefill),
    } = route.mount
    else {
        panic!("expected prefilled patch form");
    };
    let table = RowTable::with_prefill(&prefill);
    assert_eq!(table.value(0, PatchField::Switch), Some("brrsw01"));
    assert_eq!(table.value(0, PatchField::Port), Some("ge1/0/2"));
    assert_eq!(table.value(0, PatchField::CrossConnect), Some(""));
    assert_eq!(table.site(), Some("brr"));

    // 后退回到端口列表
    let back = dispatcher.back().unwrap();
    assert_eq!(
        back.mount,
        Mount::PortList {
            host: "brrsw01".into()
        }
    );
}

#[test]
fn delete_flow_with_confirmation() {
    let mut dispatcher = Dispatcher::default();
    let mut view = mounted_port_list(&mut dispatcher);

    let request = view.show_detail(0).unwrap();
    let panel = view.panel_mut().unwrap();
    panel
        .apply_detail(request.token, port_info("ge1/0/1", Some("C-01")))
        .unwrap();
    assert!(!panel.open_panel().unwrap().can_create());

    panel.request_delete().unwrap();
    assert_eq!(panel.confirm_delete(false).unwrap(), None);
    assert_eq!(
        panel.open_panel().unwrap().delete_control(),
        &DeleteControl::Ready
    );

    panel.request_delete().unwrap();
    let delete = panel.confirm_delete(true).unwrap().unwrap();
    assert_eq!((delete.host.as_str(), delete.portname.as_str()), ("brrsw01", "ge1/0/1"));
    panel
        .apply_delete(delete.token, &StatusResponse::ok())
        .unwrap();

    let open = panel.open_panel().unwrap();
    assert_eq!(open.delete_control(), &DeleteControl::Hidden);
    assert!(open.refresh_on_close());
    assert!(open.can_create());

    // 迟到的重复响应被丢弃
    assert_eq!(
        panel.apply_delete(delete.token, &StatusResponse::ok()),
        Err(CoreError::StaleResponse)
    );

    let refresh = view.dismiss_detail().expect("refresh after delete");
    view.apply_load(refresh.token, &port_list_response()).unwrap();
    assert!(view.panel().unwrap().is_closed());
}

#[test]
fn second_activation_keeps_single_panel_and_restores_row() {
    let mut dispatcher = Dispatcher::default();
    let mut view = mounted_port_list(&mut dispatcher);
    let pristine = view.table().clone();

    let first = view.show_detail(0).unwrap();
    view.panel_mut()
        .unwrap()
        .apply_detail(first.token, port_info("ge1/0/1", Some("C-01")))
        .unwrap();

    let second = view.show_detail(1).unwrap();
    let detached: Vec<_> = view
        .table()
        .slots()
        .iter()
        .filter(|s| view.table().is_detached(s.handle()))
        .collect();
    assert_eq!(detached.len(), 1);

    // 第一个面板的迟到响应不会影响第二个面板
    assert_eq!(
        view.panel_mut()
            .unwrap()
            .apply_detail(first.token, port_info("ge1/0/1", Some("C-01"))),
        Err(CoreError::StaleResponse)
    );
    view.panel_mut()
        .unwrap()
        .apply_detail(second.token, port_info("ge1/0/2", None))
        .unwrap();

    assert!(view.dismiss_detail().is_none());
    assert_eq!(view.table(), &pristine);
}

#[test]
fn unknown_selector_leaves_view_and_history() {
    let mut dispatcher = Dispatcher::default();
    dispatcher.dispatch(Trigger::Click("sr".into())).unwrap();
    let before = dispatcher.current().cloned();

    let err = dispatcher
        .dispatch(Trigger::Direct(RawNavigation::new("ppmap")))
        .unwrap_err();

    assert_eq!(err, CoreError::InvalidSelector("ppmap".into()));
    assert_eq!(dispatcher.current().cloned(), before);
    assert_eq!(dispatcher.history().len(), 1);
}
