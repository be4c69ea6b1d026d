//! 键值存储
//!
//! 使用 JSON 文件保存跨会话的界面选择（上次的站点、交换机分组）。
//! 实现 spam-core 的 KeyValueStore trait。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use spam_core::traits::KeyValueStore;
use spam_core::{CoreError, CoreResult};
use url::Url;

use super::config_service::config_dir;

/// 基于 JSON 文件的键值存储
pub struct JsonFileStore {
    path: PathBuf,
    /// 内存缓存，首次访问时从文件加载
    cache: Mutex<Option<BTreeMap<String, String>>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// 每个后端源一个文件：`storage-<host>[-<port>].json`
    pub fn for_origin(endpoint: &Url) -> Self {
        Self::new(config_dir().join(Self::file_name(endpoint)))
    }

    fn file_name(endpoint: &Url) -> String {
        let host: String = endpoint
            .host_str()
            .unwrap_or("local")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
            .collect();
        match endpoint.port() {
            Some(port) => format!("storage-{host}-{port}.json"),
            None => format!("storage-{host}.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_file(&self) -> CoreResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| CoreError::Storage(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    fn save_to_file(&self, values: &BTreeMap<String, String>) -> CoreResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| CoreError::Storage(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(values)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| CoreError::Storage(e.to_string()))
    }

    /// 在已加载的缓存上执行操作
    fn with_values<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> CoreResult<T>,
    ) -> CoreResult<T> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| CoreError::Storage("storage lock poisoned".to_string()))?;
        if cache.is_none() {
            *cache = Some(self.load_from_file()?);
        }
        match cache.as_mut() {
            Some(values) => f(values),
            None => Err(CoreError::Storage("storage cache unavailable".to_string())),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        self.with_values(|values| Ok(values.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.with_values(|values| {
            if values.get(key).map(String::as_str) == Some(value) {
                return Ok(());
            }
            values.insert(key.to_string(), value.to_string());
            self.save_to_file(values)
        })
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.with_values(|values| {
            if values.remove(key).is_some() {
                self.save_to_file(values)?;
            }
            Ok(())
        })
    }
}
