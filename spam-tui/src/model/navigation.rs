//! 导航菜单状态
//!
//! 菜单项就是调度器认识的四个选择器。

use spam_core::types::Selector;

#[derive(Debug, Clone)]
pub struct NavItem {
    pub selector: Selector,
    pub icon: &'static str,
}

/// 左侧导航菜单
#[derive(Debug)]
pub struct NavigationMenu {
    pub items: Vec<NavItem>,
    /// 光标所在项
    pub selected: usize,
}

impl NavigationMenu {
    pub fn new() -> Self {
        let items = Selector::ALL
            .into_iter()
            .map(|selector| NavItem {
                selector,
                icon: match selector {
                    Selector::SwitchList => "≡",
                    Selector::Search => "?",
                    Selector::AddPatch => "+",
                    Selector::About => "i",
                },
            })
            .collect();
        Self { items, selected: 0 }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn current(&self) -> Option<Selector> {
        self.items.get(self.selected).map(|item| item.selector)
    }

    /// 让光标跟随调度器当前的选择
    pub fn sync(&mut self, selector: Selector) {
        if let Some(index) = self.items.iter().position(|i| i.selector == selector) {
            self.selected = index;
        }
    }
}

impl Default for NavigationMenu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut menu = NavigationMenu::new();
        menu.select_previous();
        assert_eq!(menu.current(), Some(Selector::SwitchList));

        menu.select_last();
        menu.select_next();
        assert_eq!(menu.current(), Some(Selector::About));
    }

    #[test]
    fn sync_follows_dispatched_selector() {
        let mut menu = NavigationMenu::new();
        menu.sync(Selector::AddPatch);
        assert_eq!(menu.current(), Some(Selector::AddPatch));
    }
}
