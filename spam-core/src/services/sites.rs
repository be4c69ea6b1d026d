//! 站点列表缓存

use tokio::sync::RwLock;

use crate::types::Site;

/// `aux` 返回的站点列表，首次获取后复用
#[derive(Debug, Default)]
pub struct SitesCache {
    sites: RwLock<Option<Vec<Site>>>,
}

impl SitesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<Vec<Site>> {
        self.sites.read().await.clone()
    }

    pub async fn set(&self, sites: Vec<Site>) {
        *self.sites.write().await = Some(sites);
    }

    pub async fn clear(&self) {
        *self.sites.write().await = None;
    }
}
