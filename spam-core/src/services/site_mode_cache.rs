//! 站点列模式缓存
//!
//! 记录每个站点是否使用插座层级（`usecp` 的结果）。条目在 TTL 内有效，
//! 也可以通过 [`SiteModeCache::invalidate`] 显式失效。

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::types::ColumnMode;

/// 默认有效期：10 分钟
pub const DEFAULT_SITE_MODE_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy)]
struct Entry {
    mode: ColumnMode,
    stored_at: Instant,
}

/// 站点 → 列模式缓存（后写覆盖先写）
#[derive(Debug)]
pub struct SiteModeCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl SiteModeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 读取未过期的条目
    pub fn get(&self, site: &str) -> Option<ColumnMode> {
        self.get_at(site, Instant::now())
    }

    fn get_at(&self, site: &str, now: Instant) -> Option<ColumnMode> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(site)?;
        (now.saturating_duration_since(entry.stored_at) < self.ttl).then_some(entry.mode)
    }

    pub fn insert(&self, site: &str, mode: ColumnMode) {
        self.insert_at(site, mode, Instant::now());
    }

    fn insert_at(&self, site: &str, mode: ColumnMode, stored_at: Instant) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(site.to_string(), Entry { mode, stored_at });
        }
    }

    /// 使单个站点的条目失效
    pub fn invalidate(&self, site: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(site);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl Default for SiteModeCache {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_MODE_TTL)
    }
}
