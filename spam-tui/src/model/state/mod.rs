//! 页面状态
//!
//! spam-core 的状态机之外，这里只保存纯界面的东西：光标、焦点区域、下拉选项。

mod add_patch;
mod cursor;
mod modal;
mod port_list;
mod search;
mod switches;

pub use add_patch::{AddPatchSection, AddPatchState, PatchCursor};
pub use cursor::Cursor;
pub use modal::{Modal, ModalState};
pub use port_list::{PortListState, PortSection};
pub use search::{SearchSection, SearchState};
pub use switches::SwitchesState;
