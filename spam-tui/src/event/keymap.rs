//! 快捷键配置
//!
//! 内容区需要输入文字，所以操作快捷键都带 Alt 修饰。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 快捷键绑定
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn alt(code: KeyCode) -> Self {
        Self::new(KeyModifiers::ALT, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// 检查按键事件是否匹配此快捷键绑定
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }
}

/// 默认快捷键配置
pub struct DefaultKeymap;

impl DefaultKeymap {
    // 全局
    pub const QUIT: KeyBinding = KeyBinding::alt(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const HELP: KeyBinding = KeyBinding::alt(KeyCode::Char('h'));
    pub const REFRESH: KeyBinding = KeyBinding::alt(KeyCode::Char('r'));

    // 历史
    pub const HISTORY_BACK: KeyBinding = KeyBinding::alt(KeyCode::Left);
    pub const HISTORY_FORWARD: KeyBinding = KeyBinding::alt(KeyCode::Right);

    // 操作
    pub const ACTION_ADD: KeyBinding = KeyBinding::alt(KeyCode::Char('a'));
    pub const ACTION_DELETE: KeyBinding = KeyBinding::alt(KeyCode::Char('d'));
    pub const ACTION_CREATE: KeyBinding = KeyBinding::alt(KeyCode::Char('c'));
    pub const SECTION: KeyBinding = KeyBinding::alt(KeyCode::Char('s'));
    pub const RESET: KeyBinding = KeyBinding::alt(KeyCode::Char('x'));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_binding_ignores_plain_key() {
        let plain = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        let alt = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::ALT);
        assert!(!DefaultKeymap::ACTION_DELETE.matches(&plain));
        assert!(DefaultKeymap::ACTION_DELETE.matches(&alt));
    }
}
