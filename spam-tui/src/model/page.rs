//! 当前挂载的视图

use spam_core::types::Selector;

use super::state::{AddPatchState, PortListState, SearchState, SwitchesState};

/// 内容区的视图，由调度器的 `Mount` 决定
#[derive(Debug)]
pub enum Page {
    Switches(SwitchesState),
    PortList(PortListState),
    Search(SearchState),
    AddPatch(AddPatchState),
    About,
}

impl Page {
    /// 页面标题
    pub fn title(&self) -> String {
        match self {
            Self::Switches(_) => Selector::SwitchList.title().to_string(),
            Self::PortList(state) => format!("Ports of {}", state.host()),
            Self::Search(_) => Selector::Search.title().to_string(),
            Self::AddPatch(_) => Selector::AddPatch.title().to_string(),
            Self::About => Selector::About.title().to_string(),
        }
    }
}
