//! 弹窗更新逻辑

use crate::message::ModalMessage;
use crate::model::App;

pub fn update(app: &mut App, msg: ModalMessage) {
    match msg {
        ModalMessage::Close | ModalMessage::Confirm => app.modal.close(),
    }
}
