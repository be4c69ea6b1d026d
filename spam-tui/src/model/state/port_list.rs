//! 端口列表页面状态

use std::sync::Arc;

use spam_core::editable::{module_location_saver, EditableField, EditableOptions};
use spam_core::list_view::ListView;
use spam_core::traits::Backend;
use spam_core::types::ModuleWire;

use super::Cursor;

/// 页面内的焦点区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortSection {
    #[default]
    Ports,
    /// 模块接线位置（可编辑）
    Modules,
}

/// 一个模块的接线位置字段
#[derive(Debug)]
pub struct ModuleField {
    pub wire: ModuleWire,
    pub field: EditableField,
}

#[derive(Debug)]
pub struct PortListState {
    pub view: ListView,
    pub cursor: Cursor,
    pub modules: Vec<ModuleField>,
    pub module_cursor: Cursor,
    pub section: PortSection,
}

impl PortListState {
    pub fn new(view: ListView) -> Self {
        Self {
            view,
            cursor: Cursor::default(),
            modules: Vec::new(),
            module_cursor: Cursor::default(),
            section: PortSection::default(),
        }
    }

    pub fn host(&self) -> &str {
        self.view.host().unwrap_or_default()
    }

    /// 列表加载后按 `swinfo.modules` 重建接线位置字段
    pub fn rebuild_modules(&mut self, backend: &Arc<dyn Backend>) {
        let host = self.host().to_string();
        self.modules = self
            .view
            .modules()
            .iter()
            .map(|wire| {
                let save = module_location_saver(Arc::clone(backend), &host, &wire.m, &wire.n);
                ModuleField {
                    field: EditableField::mount(
                        wire.location.clone().unwrap_or_default(),
                        EditableOptions::new(save)
                            .with_size_hint(24)
                            .with_spin_style("warning")
                            .with_error_style("error"),
                    ),
                    wire: wire.clone(),
                }
            })
            .collect();
        self.module_cursor.clamp(self.modules.len());
        if self.modules.is_empty() {
            self.section = PortSection::Ports;
        }
    }

    pub fn toggle_section(&mut self) {
        self.section = match self.section {
            PortSection::Ports if !self.modules.is_empty() => PortSection::Modules,
            _ => PortSection::Ports,
        };
    }

    /// 光标所在的模块字段
    pub fn current_module_mut(&mut self) -> Option<(usize, &mut EditableField)> {
        let index = self.module_cursor.index();
        self.modules.get_mut(index).map(|m| (index, &mut m.field))
    }
}
