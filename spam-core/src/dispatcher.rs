//! 导航调度器
//!
//! 把“选择器 + 参数”映射为要挂载的视图，并维护与之同步的历史栈。
//!
//! ```text
//!   Trigger::Click(id)        ──┐
//!   Trigger::Direct(raw)      ──┼──► resolve ──► Route { state, mount, path }
//!   Trigger::History(state)   ──┘        │                 │
//!                                        │ (非 History)    └──► 前端：丢弃旧视图，按 Mount 构建新视图
//!                                        ▼
//!                                  History::push
//! ```
//!
//! 未知选择器对本次跳转是致命的：返回 [`CoreError::InvalidSelector`]，
//! 当前视图与历史栈都保持不变。

use crate::error::{CoreError, CoreResult};
use crate::types::{NavigationState, Prefill, RawNavigation, Selector};

/// 默认的路径前缀
pub const DEFAULT_BASE_PATH: &str = "/spam/";

/// 导航触发方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// 点击侧边栏：元素标识符或两字母短码
    Click(String),
    /// 后退/前进：历史条目中的状态原样恢复，不压栈
    History(NavigationState),
    /// 视图内部的直接跳转（深链接）
    Direct(RawNavigation),
}

/// 要挂载的视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mount {
    SwitchList,
    /// `swlist` 带 host 时跳过交换机列表，直接进入端口列表
    PortList { host: String },
    Search,
    AddPatch { prefill: Option<Prefill> },
    About,
}

impl Mount {
    fn for_state(state: &NavigationState) -> Self {
        match state.selector {
            Selector::SwitchList => match state.target_host() {
                Some(host) => Self::PortList {
                    host: host.to_string(),
                },
                None => Self::SwitchList,
            },
            Selector::Search => Self::Search,
            Selector::AddPatch => Self::AddPatch {
                prefill: state.prefill.clone(),
            },
            Selector::About => Self::About,
        }
    }
}

/// 一次成功调度的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub state: NavigationState,
    pub mount: Mount,
    pub path: String,
}

/// 浏览器式历史栈
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<(String, NavigationState)>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 压入新条目，丢弃当前位置之后的所有条目
    pub fn push(&mut self, path: String, state: NavigationState) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push((path, state));
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn back(&mut self) -> Option<&NavigationState> {
        let cursor = self.cursor.filter(|c| *c > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor).map(|(_, state)| state)
    }

    pub fn forward(&mut self) -> Option<&NavigationState> {
        let cursor = self.cursor? + 1;
        if cursor >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor);
        self.entries.get(cursor).map(|(_, state)| state)
    }

    pub fn current(&self) -> Option<&(String, NavigationState)> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }
}

/// 导航调度器
#[derive(Debug)]
pub struct Dispatcher {
    base: String,
    history: History,
    current: Option<Route>,
}

impl Dispatcher {
    /// `base` 是路径前缀，如 `/spam/`
    pub fn new(base: &str) -> Self {
        let trimmed = base.trim_matches('/');
        let base = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        };
        Self {
            base,
            history: History::new(),
            current: None,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// 侧边栏中被选中的项
    pub fn selected(&self) -> Option<Selector> {
        self.current.as_ref().map(|r| r.state.selector)
    }

    /// 执行一次导航
    pub fn dispatch(&mut self, trigger: Trigger) -> CoreResult<Route> {
        let (state, push) = match trigger {
            Trigger::Click(id) => (NavigationState::new(Selector::resolve(&id)?), true),
            Trigger::History(state) => (state, false),
            Trigger::Direct(raw) => (NavigationState::try_from(raw)?, true),
        };
        Ok(self.navigate(state, push))
    }

    fn navigate(&mut self, state: NavigationState, push: bool) -> Route {
        let mount = Mount::for_state(&state);
        let path = self.to_path(&state);
        log::debug!("Dispatch {:?} -> {path} (push: {push})", state.selector);

        if push {
            self.history.push(path.clone(), state.clone());
        }
        let route = Route { state, mount, path };
        self.current = Some(route.clone());
        route
    }

    /// 后退；已在最早的条目时不做任何事
    pub fn back(&mut self) -> Option<Route> {
        let state = self.history.back()?.clone();
        Some(self.navigate(state, false))
    }

    /// 前进；已在最新的条目时不做任何事
    pub fn forward(&mut self) -> Option<Route> {
        let state = self.history.forward()?.clone();
        Some(self.navigate(state, false))
    }

    /// 状态 → 路径：`<base><code>/[host/]`
    pub fn to_path(&self, state: &NavigationState) -> String {
        let mut path = format!("{}{}/", self.base, state.selector.code());
        if state.selector == Selector::SwitchList {
            if let Some(host) = state.target_host() {
                path.push_str(host);
                path.push('/');
            }
        }
        path
    }

    /// 路径 → 状态
    ///
    /// 去掉前缀（不匹配时去掉第一段），第一段是选择器（缺省为 `swlist`），其余为路径参数。
    pub fn from_path(&self, path: &str) -> CoreResult<NavigationState> {
        let rest = match path.strip_prefix(self.base.as_str()) {
            Some(rest) => rest,
            None => path
                .trim_start_matches('/')
                .split_once('/')
                .map_or("", |(_, rest)| rest),
        };

        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        let selector = match segments.next() {
            Some(sel) => Selector::resolve(sel)?,
            None => Selector::SwitchList,
        };
        Ok(NavigationState {
            selector,
            path_args: segments.map(str::to_string).collect(),
            host: None,
            prefill: None,
        })
    }

    /// 启动时按起始路径导航
    pub fn initial(&mut self, path: &str) -> CoreResult<Route> {
        let state = self.from_path(path).inspect_err(|e| {
            log::warn!("Unusable start path '{path}': {e}");
        })?;
        Ok(self.navigate(state, true))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PATH)
    }
}

/// 方便调用方判断错误是否只影响本次跳转
pub fn is_routing_error(error: &CoreError) -> bool {
    matches!(error, CoreError::InvalidSelector(_))
}
