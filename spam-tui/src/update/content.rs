//! 内容面板更新逻辑
//!
//! 同一条 ContentMessage 按当前页面解释。

use spam_core::editable::EditState;
use spam_core::search_tool::SearchField;
use spam_core::services::{STORAGE_ADDPATCH_SITE, STORAGE_SWLIST_GROUP};
use spam_core::switch_list::SwitchList;
use spam_core::types::PatchField;
use spam_core::{CoreError, CoreResult};

use super::{list, navigation, report, Outcome};
use crate::backend::Bridge;
use crate::message::{ContentMessage, ListSlot};
use crate::model::state::{
    AddPatchSection, AddPatchState, PatchCursor, PortListState, PortSection, SearchSection,
    SearchState, SwitchesState,
};
use crate::model::{App, Page};

/// 处理内容面板消息
pub fn update(app: &mut App, msg: ContentMessage) {
    let bridge = &app.bridge;
    let outcome = match &mut app.page {
        Page::Switches(state) => update_switches(bridge, state, msg),
        Page::PortList(state) => update_port_list(bridge, state, msg),
        Page::Search(state) => update_search(bridge, state, msg),
        Page::AddPatch(state) => update_add_patch(bridge, state, msg),
        Page::About => Ok(Outcome::None),
    };

    match outcome {
        Ok(Outcome::None) => {}
        Ok(Outcome::Navigate(raw)) => navigation::direct(app, raw),
        Ok(Outcome::Status(text)) => app.set_status(text),
        Err(e) => report(app, "content", &e),
    }
}

// ========== 交换机列表 ==========

fn update_switches(
    bridge: &Bridge,
    state: &mut SwitchesState,
    msg: ContentMessage,
) -> CoreResult<Outcome> {
    let len = state.visible_len();
    match msg {
        ContentMessage::SelectPrevious => state.cursor.previous(),
        ContentMessage::SelectNext => state.cursor.next(len),
        ContentMessage::SelectFirst => state.cursor.first(),
        ContentMessage::SelectLast => state.cursor.last(len),
        ContentMessage::Left | ContentMessage::Right => {
            let step = if msg == ContentMessage::Left { -1 } else { 1 };
            if let Some(group) = state.neighbour_tab(step) {
                if let Some(stored) = state.list.select_group(&group) {
                    bridge.services().store_value(STORAGE_SWLIST_GROUP, &stored);
                }
                state.cursor.first();
            }
        }
        ContentMessage::Confirm => {
            if let Some(host) = state.selected_host() {
                return Ok(Outcome::Navigate(SwitchList::open(&host)));
            }
        }
        _ => {}
    }
    Ok(Outcome::None)
}

// ========== 端口列表 ==========

fn update_port_list(
    bridge: &Bridge,
    state: &mut PortListState,
    msg: ContentMessage,
) -> CoreResult<Outcome> {
    if msg == ContentMessage::SwitchSection {
        state.toggle_section();
        return Ok(Outcome::None);
    }
    match state.section {
        PortSection::Ports => list::update(
            bridge,
            ListSlot::PortList,
            &mut state.view,
            &mut state.cursor,
            msg,
        ),
        PortSection::Modules => update_module(bridge, state, msg),
    }
}

/// 模块接线位置：点击编辑字段
fn update_module(
    bridge: &Bridge,
    state: &mut PortListState,
    msg: ContentMessage,
) -> CoreResult<Outcome> {
    let len = state.modules.len();
    let Some((index, field)) = state.current_module_mut() else {
        return Ok(Outcome::None);
    };

    match (field.state().clone(), msg) {
        (EditState::Editing { .. }, ContentMessage::Input(c)) => field.insert_char(c),
        (EditState::Editing { .. }, ContentMessage::Backspace) => field.backspace(),
        (EditState::Editing { .. }, ContentMessage::Left) => field.move_cursor(-1),
        (EditState::Editing { .. }, ContentMessage::Right) => field.move_cursor(1),
        (EditState::Editing { .. }, ContentMessage::Cancel) => field.cancel(),
        (EditState::Editing { .. }, ContentMessage::Confirm) => {
            if let Some(pending) = field.commit() {
                bridge.save_field(index, pending);
                return Ok(Outcome::Status("Saving...".to_string()));
            }
        }
        (EditState::Failed { .. }, ContentMessage::Confirm | ContentMessage::Cancel) => {
            field.dismiss_error();
        }
        (EditState::Static, ContentMessage::Confirm) => {
            field.activate();
        }
        (EditState::Static, ContentMessage::SelectPrevious) => state.module_cursor.previous(),
        (EditState::Static, ContentMessage::SelectNext) => state.module_cursor.next(len),
        (EditState::Static, ContentMessage::Cancel) => state.section = PortSection::Ports,
        _ => {}
    }
    Ok(Outcome::None)
}

// ========== 搜索 ==========

fn update_search(
    bridge: &Bridge,
    state: &mut SearchState,
    msg: ContentMessage,
) -> CoreResult<Outcome> {
    match msg {
        ContentMessage::SwitchSection => {
            state.toggle_section();
            return Ok(Outcome::None);
        }
        ContentMessage::Reset => {
            state.tool.reset();
            state.section = SearchSection::Form;
            state.cursor.first();
            return Ok(Outcome::Status("Search cleared".to_string()));
        }
        _ => {}
    }

    if state.section == SearchSection::Results {
        let Some(results) = state.tool.results_mut() else {
            state.section = SearchSection::Form;
            return Ok(Outcome::None);
        };
        return list::update(bridge, ListSlot::Search, results, &mut state.cursor, msg);
    }

    let field = state.current_field();
    match msg {
        ContentMessage::SelectPrevious => state.field.previous(),
        ContentMessage::SelectNext => state.field.next(SearchField::ALL.len()),
        ContentMessage::SelectFirst => state.field.first(),
        ContentMessage::SelectLast => state.field.last(SearchField::ALL.len()),
        ContentMessage::Left if field == SearchField::Site => state.cycle_site(-1),
        ContentMessage::Right if field == SearchField::Site => state.cycle_site(1),
        ContentMessage::Input(c) if field != SearchField::Site => {
            let mut value = state.tool.form().get(field).to_string();
            value.push(c);
            state.tool.form_mut().set(field, value);
        }
        ContentMessage::Backspace if field != SearchField::Site => {
            let mut value = state.tool.form().get(field).to_string();
            value.pop();
            state.tool.form_mut().set(field, value);
        }
        ContentMessage::Confirm => {
            let request = state.tool.submit()?;
            bridge.load_list(ListSlot::Search, request);
            state.cursor.first();
            state.section = SearchSection::Results;
            return Ok(Outcome::Status("Searching...".to_string()));
        }
        _ => {}
    }
    Ok(Outcome::None)
}

// ========== 添加跳线 ==========

fn update_add_patch(
    bridge: &Bridge,
    state: &mut AddPatchState,
    msg: ContentMessage,
) -> CoreResult<Outcome> {
    match msg {
        ContentMessage::SwitchSection => {
            state.toggle_section();
            return Ok(Outcome::None);
        }
        ContentMessage::Reset => {
            state.table.reset();
            state.summary = None;
            state.section = AddPatchSection::Form;
            state.cursor = PatchCursor::default();
            return Ok(Outcome::Status("Form cleared".to_string()));
        }
        _ => {}
    }

    if state.section == AddPatchSection::Summary {
        let Some(summary) = state.summary.as_mut() else {
            state.section = AddPatchSection::Form;
            return Ok(Outcome::None);
        };
        return list::update(
            bridge,
            ListSlot::Summary,
            summary,
            &mut state.summary_cursor,
            msg,
        );
    }

    match (state.cursor, msg) {
        (_, ContentMessage::SelectPrevious) => state.move_up(),
        (_, ContentMessage::SelectNext) => state.move_down(),
        (_, ContentMessage::SelectFirst) => state.cursor = PatchCursor::Site,
        (PatchCursor::Cell { field, .. }, ContentMessage::SelectLast) => {
            state.cursor = PatchCursor::Cell {
                row: state.table.len().saturating_sub(1),
                field,
            };
        }
        (PatchCursor::Site, ContentMessage::Left | ContentMessage::Right) => {
            let step = if msg == ContentMessage::Left { -1 } else { 1 };
            if let Some(site) = state.step_site(step) {
                let token = state.table.select_site(Some(site.clone()));
                bridge.services().store_value(STORAGE_ADDPATCH_SITE, &site);
                bridge.site_mode(token, site);
            }
        }
        (PatchCursor::Cell { .. }, ContentMessage::Left) => state.move_horizontal(-1),
        (PatchCursor::Cell { .. }, ContentMessage::Right) => state.move_horizontal(1),
        (PatchCursor::Cell { row, field }, ContentMessage::Input(c)) => {
            let mut value = cell_value(state, row, field)?;
            value.push(c);
            state.table.set_value(row, field, &value)?;
        }
        (PatchCursor::Cell { row, field }, ContentMessage::Backspace) => {
            let mut value = cell_value(state, row, field)?;
            value.pop();
            state.table.set_value(row, field, &value)?;
        }
        (PatchCursor::Cell { row, field }, ContentMessage::AddRow) => {
            let added = state.table.add_row(row)?;
            state.cursor = PatchCursor::Cell { row: added, field };
        }
        (PatchCursor::Cell { row, .. }, ContentMessage::Delete) => {
            state.table.remove_row(row)?;
            state.fix_cursor();
        }
        (_, ContentMessage::Confirm) => {
            let request = state.table.begin_submit()?;
            bridge.submit(request);
            return Ok(Outcome::Status("Submitting patches...".to_string()));
        }
        (_, ContentMessage::Cancel) => state.table.dismiss_banner(),
        _ => {}
    }
    Ok(Outcome::None)
}

fn cell_value(state: &AddPatchState, row: usize, field: PatchField) -> CoreResult<String> {
    state
        .table
        .value(row, field)
        .map(str::to_string)
        .ok_or_else(|| CoreError::Validation(format!("No row {row}")))
}
