//! 导航更新逻辑
//!
//! 菜单点击、历史前进后退和视图内跳转都经过调度器，
//! 再由 `mount` 按调度结果重建内容区。

use spam_core::dispatcher::{is_routing_error, Mount, Route, Trigger};
use spam_core::list_view::ListView;
use spam_core::row_table::RowTable;
use spam_core::services::{STORAGE_ADDPATCH_SITE, STORAGE_SWLIST_GROUP};
use spam_core::switch_list::SwitchList;
use spam_core::types::{Prefill, RawNavigation, Selector};

use super::report;
use crate::backend::Bridge;
use crate::message::{ListSlot, NavigationMessage};
use crate::model::state::{AddPatchState, PortListState, SearchState, SwitchesState};
use crate::model::{App, Page};

/// 处理导航消息
pub fn update(app: &mut App, msg: NavigationMessage) {
    match msg {
        NavigationMessage::SelectPrevious => app.navigation.select_previous(),
        NavigationMessage::SelectNext => app.navigation.select_next(),
        NavigationMessage::SelectFirst => app.navigation.select_first(),
        NavigationMessage::SelectLast => app.navigation.select_last(),
        NavigationMessage::Confirm => {
            if let Some(selector) = app.navigation.current() {
                dispatch(app, Trigger::Click(selector.id().to_string()));
                app.focus = app.focus.toggle();
            }
        }
    }
}

/// 启动时按起始路径导航；路径无法识别时提示并打开交换机列表
pub fn start(app: &mut App, path: &str) {
    match app.dispatcher.initial(path) {
        Ok(route) => mount(app, route),
        Err(e) => {
            app.modal.show_error("Unknown view", &e.to_string());
            dispatch(app, Trigger::Click(Selector::SwitchList.id().to_string()));
        }
    }
}

/// 执行一次调度；无法识别的选择器只影响这次跳转
pub(super) fn dispatch(app: &mut App, trigger: Trigger) {
    match app.dispatcher.dispatch(trigger) {
        Ok(route) => mount(app, route),
        Err(e) if is_routing_error(&e) => {
            log::warn!("[dispatch] {e}");
            app.modal.show_error("Unknown view", &e.to_string());
        }
        Err(e) => report(app, "dispatch", &e),
    }
}

/// 视图内部的直接跳转（打开端口列表、创建跳线）
pub(super) fn direct(app: &mut App, raw: RawNavigation) {
    dispatch(app, Trigger::Direct(raw));
}

pub(super) fn back(app: &mut App) {
    match app.dispatcher.back() {
        Some(route) => mount(app, route),
        None => app.set_status("Already at the oldest view"),
    }
}

pub(super) fn forward(app: &mut App) {
    match app.dispatcher.forward() {
        Some(route) => mount(app, route),
        None => app.set_status("Already at the newest view"),
    }
}

/// 重新加载当前视图的数据，不清空表单
pub(super) fn refresh(app: &mut App) {
    let bridge = &app.bridge;
    match &mut app.page {
        Page::Switches(state) => bridge.load_switches(state.list.begin_load()),
        Page::PortList(state) => {
            if let Some(request) = state.view.begin_load() {
                bridge.load_list(ListSlot::PortList, request);
            }
        }
        Page::Search(state) => {
            if let Some(request) = state.tool.results_mut().and_then(ListView::begin_load) {
                bridge.load_list(ListSlot::Search, request);
            }
        }
        Page::AddPatch(_) => bridge.load_sites(),
        Page::About => {}
    }
    app.set_status("Refreshing...");
}

/// 按调度结果挂载视图
fn mount(app: &mut App, route: Route) {
    log::info!("[dispatch] {}", route.path);
    app.navigation.sync(route.state.selector);
    app.set_status(route.path);

    let bridge = &app.bridge;
    let services = bridge.services();
    app.page = match route.mount {
        Mount::SwitchList => {
            let mut list = SwitchList::new(services.stored_value(STORAGE_SWLIST_GROUP));
            bridge.load_switches(list.begin_load());
            Page::Switches(SwitchesState::new(list))
        }
        Mount::PortList { host } => {
            let mut view = ListView::port_list(&host);
            if let Some(request) = view.begin_load() {
                bridge.load_list(ListSlot::PortList, request);
            }
            Page::PortList(PortListState::new(view))
        }
        Mount::Search => {
            bridge.load_sites();
            Page::Search(SearchState::new())
        }
        Mount::AddPatch { prefill } => Page::AddPatch(mount_add_patch(bridge, prefill)),
        Mount::About => Page::About,
    };
}

/// 添加跳线表单
///
/// 预填了 host 时由后端按 host 查出站点（推导出的站点代码只是占位，
/// 查询结果到达后被替换）；没有预填时恢复上次选择的站点。
fn mount_add_patch(bridge: &Bridge, prefill: Option<Prefill>) -> AddPatchState {
    bridge.load_sites();
    let mut table = prefill
        .as_ref()
        .map_or_else(RowTable::new, RowTable::with_prefill);

    match prefill {
        Some(prefill) => {
            if prefill.fields.host.is_empty() {
                if let Some(site) = prefill.site.filter(|s| !s.is_empty()) {
                    let token = table.select_site(Some(site.clone()));
                    bridge.site_mode(token, site);
                }
            } else {
                let token = table.begin_site_resolution();
                bridge.resolve_site(token, prefill.fields.host);
            }
        }
        None => {
            if let Some(site) = bridge
                .services()
                .stored_value(STORAGE_ADDPATCH_SITE)
                .filter(|s| !s.is_empty())
            {
                let token = table.select_site(Some(site.clone()));
                bridge.site_mode(token, site);
            }
        }
    }
    AddPatchState::new(table)
}
