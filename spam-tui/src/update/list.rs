//! 结果列表与详情面板
//!
//! 端口列表、搜索结果和添加跳线后的摘要都是 `ListView`，共用这里的按键处理。

use spam_core::detail_panel::{DeleteControl, DetailPanel};
use spam_core::list_view::ListView;
use spam_core::port_table::TableSlot;
use spam_core::{CoreError, CoreResult};

use super::Outcome;
use crate::backend::Bridge;
use crate::message::{ContentMessage, ListSlot};
use crate::model::state::Cursor;

pub(super) fn update(
    bridge: &Bridge,
    slot: ListSlot,
    view: &mut ListView,
    cursor: &mut Cursor,
    msg: ContentMessage,
) -> CoreResult<Outcome> {
    let control = view
        .panel()
        .and_then(|p| p.open_panel())
        .map(|open| open.delete_control().clone());

    // 删除确认子步骤优先
    match (control, msg) {
        (Some(DeleteControl::Confirming), ContentMessage::Input('y' | 'Y') | ContentMessage::Confirm) => {
            if let Some(request) = panel(view)?.confirm_delete(true)? {
                bridge.delete_patch(slot, request);
            }
            return Ok(Outcome::Status("Deleting patch...".to_string()));
        }
        (Some(DeleteControl::Confirming), ContentMessage::Input('n' | 'N') | ContentMessage::Cancel) => {
            panel(view)?.confirm_delete(false)?;
            return Ok(Outcome::None);
        }
        (Some(DeleteControl::Confirming), _) => return Ok(Outcome::None),
        (Some(DeleteControl::Failed(_)), ContentMessage::Confirm | ContentMessage::Cancel) => {
            panel(view)?.acknowledge_error();
            return Ok(Outcome::None);
        }
        _ => {}
    }

    let len = view.table().slots().len();
    match msg {
        ContentMessage::SelectPrevious => cursor.previous(),
        ContentMessage::SelectNext => cursor.next(len),
        ContentMessage::SelectFirst => cursor.first(),
        ContentMessage::SelectLast => cursor.last(len),
        ContentMessage::Confirm => toggle_detail(bridge, slot, view, *cursor)?,
        ContentMessage::Cancel => close_detail(bridge, slot, view),
        ContentMessage::Delete => panel(view)?.request_delete()?,
        ContentMessage::CreatePatch => return view.create_patch().map(Outcome::Navigate),
        _ => {}
    }
    Ok(Outcome::None)
}

fn panel(view: &mut ListView) -> CoreResult<&mut DetailPanel> {
    view.panel_mut()
        .ok_or_else(|| CoreError::Validation("Rows have no port details".to_string()))
}

/// Enter：在光标行打开面板；光标在已打开的面板上时关闭它
fn toggle_detail(
    bridge: &Bridge,
    slot: ListSlot,
    view: &mut ListView,
    cursor: Cursor,
) -> CoreResult<()> {
    match view.table().slots().get(cursor.index()).copied() {
        Some(TableSlot::Detail(_)) => close_detail(bridge, slot, view),
        Some(TableSlot::Row(handle)) => {
            let request = view.show_row(handle)?;
            bridge.port_info(slot, request);
        }
        None => {}
    }
    Ok(())
}

/// 关闭面板；删除过跳线时随即刷新列表
fn close_detail(bridge: &Bridge, slot: ListSlot, view: &mut ListView) {
    if let Some(request) = view.dismiss_detail() {
        bridge.load_list(slot, request);
    }
}
