//! 点击编辑字段
//!
//! 静态文本 → 输入框 → 保存中 → 静态文本 / 错误提示。
//! 保存通过调用方提供的 [`SaveFn`] 完成；本模块只管理状态，不执行异步任务。

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::{CoreError, CoreResult};
use crate::generation::{Generation, Token};
use crate::traits::Backend;
use crate::types::ModuleWireUpdate;

/// 值为空时显示的占位文本
pub const NOT_AVAILABLE: &str = "N/A";

/// 后端不可达时的错误信息
pub const SERVER_FAILURE: &str = "Server failure";

/// 保存回调：成功返回 `Ok(())`，失败返回要显示的错误信息
pub type SaveFn = Arc<dyn Fn(String) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// 挂载参数
#[derive(Clone)]
pub struct EditableOptions {
    pub save: SaveFn,
    /// 输入框宽度（字符）
    pub size_hint: Option<usize>,
    /// 保存中使用的样式名
    pub spin_style: Option<String>,
    /// 错误提示使用的样式名
    pub error_style: Option<String>,
}

impl EditableOptions {
    pub fn new(save: SaveFn) -> Self {
        Self {
            save,
            size_hint: None,
            spin_style: None,
            error_style: None,
        }
    }

    #[must_use]
    pub fn with_size_hint(mut self, size: usize) -> Self {
        self.size_hint = Some(size);
        self
    }

    #[must_use]
    pub fn with_spin_style(mut self, style: impl Into<String>) -> Self {
        self.spin_style = Some(style.into());
        self
    }

    #[must_use]
    pub fn with_error_style(mut self, style: impl Into<String>) -> Self {
        self.error_style = Some(style.into());
        self
    }
}

impl std::fmt::Debug for EditableOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditableOptions")
            .field("size_hint", &self.size_hint)
            .field("spin_style", &self.spin_style)
            .field("error_style", &self.error_style)
            .finish_non_exhaustive()
    }
}

/// 字段状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Static,
    /// `cursor` 是字符下标
    Editing { input: String, cursor: usize },
    Saving { text: String, token: Token },
    Failed { message: String },
}

/// 一次待执行的保存
pub struct PendingSave {
    pub token: Token,
    pub text: String,
    save: SaveFn,
}

impl PendingSave {
    /// 执行保存回调
    pub fn run(self) -> BoxFuture<'static, Result<(), String>> {
        (self.save)(self.text)
    }
}

/// 点击编辑字段
#[derive(Debug)]
pub struct EditableField {
    value: String,
    options: EditableOptions,
    state: EditState,
    saves: Generation,
}

impl EditableField {
    pub fn mount(value: impl Into<String>, options: EditableOptions) -> Self {
        Self {
            value: value.into(),
            options,
            state: EditState::Static,
            saves: Generation::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn options(&self) -> &EditableOptions {
        &self.options
    }

    /// 静态显示文本；空值显示 `N/A`，第二项表示是否为占位
    pub fn display(&self) -> (&str, bool) {
        if self.value.is_empty() {
            (NOT_AVAILABLE, true)
        } else {
            (&self.value, false)
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// 进入编辑：输入框以当前值为初值，光标在末尾
    pub fn activate(&mut self) -> bool {
        if !matches!(self.state, EditState::Static) {
            return false;
        }
        self.state = EditState::Editing {
            input: self.value.clone(),
            cursor: self.value.chars().count(),
        };
        true
    }

    pub fn insert_char(&mut self, c: char) {
        if let EditState::Editing { input, cursor } = &mut self.state {
            let at = byte_offset(input, *cursor);
            input.insert(at, c);
            *cursor += 1;
        }
    }

    pub fn backspace(&mut self) {
        if let EditState::Editing { input, cursor } = &mut self.state {
            if *cursor > 0 {
                *cursor -= 1;
                let at = byte_offset(input, *cursor);
                input.remove(at);
            }
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if let EditState::Editing { input, cursor } = &mut self.state {
            let len = input.chars().count();
            *cursor = cursor.saturating_add_signed(delta).min(len);
        }
    }

    /// Enter：开始保存，返回要执行的保存任务
    pub fn commit(&mut self) -> Option<PendingSave> {
        let EditState::Editing { input, .. } = &self.state else {
            return None;
        };
        let text = input.clone();
        let token = self.saves.next();
        self.state = EditState::Saving {
            text: text.clone(),
            token,
        };
        Some(PendingSave {
            token,
            text,
            save: Arc::clone(&self.options.save),
        })
    }

    /// Escape 或失去焦点：放弃编辑，不发请求
    pub fn cancel(&mut self) {
        if self.is_editing() {
            self.state = EditState::Static;
        }
    }

    /// 应用保存结果
    pub fn apply_save(&mut self, token: Token, result: Result<(), String>) -> CoreResult<()> {
        self.saves.check(token)?;
        let EditState::Saving { text, .. } = &self.state else {
            return Err(CoreError::StaleResponse);
        };
        let text = text.clone();
        self.state = match result {
            Ok(()) => {
                self.value = text;
                EditState::Static
            }
            Err(message) => EditState::Failed { message },
        };
        Ok(())
    }

    /// 关闭错误提示，恢复原值
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, EditState::Failed { .. }) {
            self.state = EditState::Static;
        }
    }
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

/// 交换机模块接线位置的保存回调（`modwire`）
pub fn module_location_saver(backend: Arc<dyn Backend>, host: &str, m: &str, n: &str) -> SaveFn {
    let host = host.to_string();
    let m = m.to_string();
    let n = n.to_string();
    Arc::new(move |location: String| -> BoxFuture<'static, Result<(), String>> {
        let backend = Arc::clone(&backend);
        let update = ModuleWireUpdate {
            host: host.clone(),
            m: m.clone(),
            n: n.clone(),
            location,
        };
        Box::pin(async move {
            match backend.module_wire(&update).await {
                Ok(resp) if resp.status.is_ok() => Ok(()),
                Ok(resp) => Err(resp.errmsg.unwrap_or_else(|| SERVER_FAILURE.to_string())),
                Err(e) => {
                    log::warn!("Module wiring save failed: {e}");
                    Err(SERVER_FAILURE.to_string())
                }
            }
        })
    })
}
