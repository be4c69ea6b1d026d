//! 共享服务层
//!
//! 所有视图共用同一组服务：后端端点、站点列模式缓存、站点列表和持久化键值存储。

mod site_mode_cache;
mod sites;

pub use site_mode_cache::{SiteModeCache, DEFAULT_SITE_MODE_TTL};
pub use sites::SitesCache;

use std::sync::Arc;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::traits::{Backend, KeyValueStore};
use crate::types::{ColumnMode, RequestKind, Site, SiteLookup};

/// 添加跳线表单上次选择的站点
pub const STORAGE_ADDPATCH_SITE: &str = "addpatchsite";

/// 交换机列表上次选择的分组
pub const STORAGE_SWLIST_GROUP: &str = "swlistgrp";

/// 按 host 查询站点的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteResolution {
    pub site: Option<String>,
    pub mode: ColumnMode,
}

/// 服务上下文 - 持有所有依赖
///
/// 前端创建此上下文并注入平台相关的后端与存储实现。
pub struct SharedServices {
    /// 后端端点
    pub backend: Arc<dyn Backend>,
    /// 站点 → 列模式
    pub site_modes: SiteModeCache,
    /// 站点列表
    pub sites: SitesCache,
    /// 持久化键值存储
    pub storage: Arc<dyn KeyValueStore>,
}

impl SharedServices {
    #[must_use]
    pub fn new(
        backend: Arc<dyn Backend>,
        storage: Arc<dyn KeyValueStore>,
        site_mode_ttl: Duration,
    ) -> Self {
        Self {
            backend,
            site_modes: SiteModeCache::new(site_mode_ttl),
            sites: SitesCache::new(),
            storage,
        }
    }

    /// 站点下拉框的数据，首次调用时向后端获取
    pub async fn populate_sites(&self) -> CoreResult<Vec<Site>> {
        if let Some(sites) = self.sites.get().await {
            return Ok(sites);
        }

        let aux = self.backend.aux().await?;
        if !aux.sites.status.is_ok() {
            return Err(backend_error(RequestKind::Aux, None));
        }
        log::debug!("Loaded {} sites", aux.sites.result.len());
        self.sites.set(aux.sites.result.clone()).await;
        Ok(aux.sites.result)
    }

    /// 站点的列模式，缓存未命中时查询后端
    pub async fn resolve_column_mode(&self, site: &str) -> CoreResult<ColumnMode> {
        if let Some(mode) = self.site_modes.get(site) {
            return Ok(mode);
        }

        let resp = self
            .backend
            .use_cp(&SiteLookup::Site(site.to_string()))
            .await?;
        if !resp.status.is_ok() {
            return Err(backend_error(RequestKind::Usecp, resp.errmsg));
        }

        let mode = ColumnMode::from_outlet_flag(resp.result);
        self.site_modes.insert(site, mode);
        log::debug!("Site '{site}' column mode: {mode:?}");
        Ok(mode)
    }

    /// 按交换机主机名查出站点与列模式
    pub async fn site_for_host(&self, host: &str) -> CoreResult<SiteResolution> {
        let resp = self
            .backend
            .use_cp(&SiteLookup::Host(host.to_string()))
            .await?;
        if !resp.status.is_ok() {
            return Err(backend_error(RequestKind::Usecp, resp.errmsg));
        }

        let mode = ColumnMode::from_outlet_flag(resp.result);
        if let Some(site) = &resp.site {
            self.site_modes.insert(site, mode);
        }
        Ok(SiteResolution {
            site: resp.site,
            mode,
        })
    }

    /// 读取持久化值；读取失败只记录日志
    pub fn stored_value(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read '{key}' from storage: {e}");
                None
            }
        }
    }

    /// 写入持久化值；写入失败只记录日志
    pub fn store_value(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            log::warn!("Failed to write '{key}' to storage: {e}");
        }
    }
}

/// `status: error` 响应转换为错误
pub fn backend_error(kind: RequestKind, errmsg: Option<String>) -> CoreError {
    CoreError::Backend {
        request: kind.to_string(),
        message: errmsg.unwrap_or_else(|| "Unknown error".to_string()),
    }
}
