//! 后端完成事件的更新逻辑
//!
//! 事件找不到所属视图（页面已被替换）或令牌过期时，
//! 状态机返回 `StaleResponse`，这里只记日志。

use std::sync::Arc;

use spam_core::list_view::ListView;
use spam_core::{CoreError, CoreResult};

use super::report;
use crate::message::{BackendEvent, ListSlot};
use crate::model::state::AddPatchState;
use crate::model::{App, Page};

pub fn update(app: &mut App, event: BackendEvent) {
    let name = event.name();
    if let Err(e) = apply(app, event) {
        report(app, name, &e);
    }
}

fn apply(app: &mut App, event: BackendEvent) -> CoreResult<()> {
    match event {
        BackendEvent::Switches { token, result } => {
            let Page::Switches(state) = &mut app.page else {
                return Err(CoreError::StaleResponse);
            };
            match result {
                Ok(response) => state.list.apply_load(token, response)?,
                Err(e) => state.list.fail_load(token, &e)?,
            }
            state.cursor.clamp(state.visible_len());
        }

        BackendEvent::ListLoaded {
            slot: ListSlot::Search,
            token,
            result,
        } => {
            let Page::Search(state) = &mut app.page else {
                return Err(CoreError::StaleResponse);
            };
            match result {
                Ok(response) => state.tool.apply_response(token, &response)?,
                Err(e) => state.tool.fail_response(token, &e)?,
            }
            let len = state.tool.results().map_or(0, |r| r.table().slots().len());
            state.cursor.clamp(len);
        }

        BackendEvent::ListLoaded {
            slot,
            token,
            result,
        } => {
            let backend = Arc::clone(&app.bridge.services().backend);
            let view = list_view_mut(&mut app.page, slot).ok_or(CoreError::StaleResponse)?;
            match result {
                Ok(response) => view.apply_load(token, &response)?,
                Err(e) => view.fail_load(token, &e)?,
            }
            if let Page::PortList(state) = &mut app.page {
                state.rebuild_modules(&backend);
                state.cursor.clamp(state.view.table().slots().len());
            }
        }

        BackendEvent::PortInfo {
            slot,
            token,
            result,
        } => {
            let panel = list_view_mut(&mut app.page, slot)
                .and_then(ListView::panel_mut)
                .ok_or(CoreError::StaleResponse)?;
            match result {
                Ok(response) => panel.apply_detail(token, response)?,
                Err(e) => panel.fail_detail(token, &e)?,
            }
        }

        BackendEvent::PatchDeleted {
            slot,
            token,
            result,
        } => {
            let panel = list_view_mut(&mut app.page, slot)
                .and_then(ListView::panel_mut)
                .ok_or(CoreError::StaleResponse)?;
            match result {
                Ok(response) => panel.apply_delete(token, &response)?,
                Err(e) => panel.fail_delete(token, &e)?,
            }
            app.clear_status();
        }

        BackendEvent::Submitted { token, result } => {
            let state = add_patch_mut(&mut app.page)?;
            match result {
                Ok(response) => {
                    state.table.apply_submit_response(token, &response)?;
                    state.summary = state.table.summary().map(ListView::from_block);
                    state.summary_cursor.first();
                    state.fix_cursor();
                }
                Err(e) => state.table.fail_submit(token, &e)?,
            }
            app.clear_status();
        }

        BackendEvent::SiteMode { token, result } => {
            let state = add_patch_mut(&mut app.page)?;
            match result {
                Ok(mode) => state.table.apply_site_mode(token, mode)?,
                Err(e) => return state.table.fail_site_lookup(token, e),
            };
            state.fix_cursor();
        }

        BackendEvent::SiteResolved { token, result } => {
            let state = add_patch_mut(&mut app.page)?;
            match result {
                Ok(resolution) => {
                    state
                        .table
                        .apply_site_resolution(token, resolution.site, resolution.mode)?
                }
                Err(e) => return state.table.fail_site_lookup(token, e),
            };
            state.fix_cursor();
        }

        BackendEvent::Sites(result) => {
            let sites = result?;
            match &mut app.page {
                Page::Search(state) => state.sites = sites,
                Page::AddPatch(state) => state.sites = sites,
                _ => return Err(CoreError::StaleResponse),
            }
        }

        BackendEvent::FieldSaved {
            module,
            token,
            result,
        } => {
            let Page::PortList(state) = &mut app.page else {
                return Err(CoreError::StaleResponse);
            };
            let slot = state.modules.get_mut(module).ok_or(CoreError::StaleResponse)?;
            slot.field.apply_save(token, result)?;
            app.clear_status();
        }
    }
    Ok(())
}

/// 结果列表所在的视图；页面已被替换时返回 None
fn list_view_mut(page: &mut Page, slot: ListSlot) -> Option<&mut ListView> {
    match (page, slot) {
        (Page::PortList(state), ListSlot::PortList) => Some(&mut state.view),
        (Page::Search(state), ListSlot::Search) => state.tool.results_mut(),
        (Page::AddPatch(state), ListSlot::Summary) => state.summary.as_mut(),
        _ => None,
    }
}

fn add_patch_mut(page: &mut Page) -> CoreResult<&mut AddPatchState> {
    match page {
        Page::AddPatch(state) => Ok(state),
        _ => Err(CoreError::StaleResponse),
    }
}
