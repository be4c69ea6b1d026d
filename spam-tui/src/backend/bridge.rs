//! 运行时桥接
//!
//! 把 spam-core 状态机产生的请求 spawn 到 tokio 运行时，
//! 完成后通过无界通道把结果送回主循环。

use std::future::Future;
use std::sync::Arc;

use spam_core::detail_panel::PortRequest;
use spam_core::editable::PendingSave;
use spam_core::list_view::LoadRequest;
use spam_core::row_table::SubmitRequest;
use spam_core::{SharedServices, Token};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::message::{BackendEvent, ListSlot};

/// UI 与后端之间的桥
#[derive(Clone)]
pub struct Bridge {
    handle: Handle,
    services: Arc<SharedServices>,
    tx: UnboundedSender<BackendEvent>,
}

impl Bridge {
    pub fn new(
        handle: Handle,
        services: Arc<SharedServices>,
        tx: UnboundedSender<BackendEvent>,
    ) -> Self {
        Self {
            handle,
            services,
            tx,
        }
    }

    pub fn services(&self) -> &Arc<SharedServices> {
        &self.services
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = BackendEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let event = task.await;
            let name = event.name();
            if tx.send(event).is_err() {
                log::debug!("[bridge] UI loop is gone, dropping {name} result");
            }
        });
    }

    // ========== 列表 ==========

    pub fn load_switches(&self, token: Token) {
        let services = Arc::clone(&self.services);
        self.spawn(async move {
            let result = services.backend.switch_list().await;
            BackendEvent::Switches { token, result }
        });
    }

    pub fn load_list(&self, slot: ListSlot, request: LoadRequest) {
        let services = Arc::clone(&self.services);
        self.spawn(async move {
            let LoadRequest { token, query } = request;
            let result = services.backend.search(&query).await;
            BackendEvent::ListLoaded {
                slot,
                token,
                result,
            }
        });
    }

    // ========== 详情面板 ==========

    pub fn port_info(&self, slot: ListSlot, request: PortRequest) {
        let services = Arc::clone(&self.services);
        self.spawn(async move {
            let result = services
                .backend
                .port_info(&request.host, &request.portname)
                .await;
            BackendEvent::PortInfo {
                slot,
                token: request.token,
                result,
            }
        });
    }

    pub fn delete_patch(&self, slot: ListSlot, request: PortRequest) {
        let services = Arc::clone(&self.services);
        self.spawn(async move {
            let result = services
                .backend
                .delete_patch(&request.host, &request.portname)
                .await;
            BackendEvent::PatchDeleted {
                slot,
                token: request.token,
                result,
            }
        });
    }

    // ========== 添加跳线 ==========

    pub fn submit(&self, request: SubmitRequest) {
        let services = Arc::clone(&self.services);
        self.spawn(async move {
            let result = services.backend.add_patch(&request.form).await;
            BackendEvent::Submitted {
                token: request.token,
                result,
            }
        });
    }

    pub fn site_mode(&self, token: Token, site: String) {
        let services = Arc::clone(&self.services);
        self.spawn(async move {
            let result = services.resolve_column_mode(&site).await;
            BackendEvent::SiteMode { token, result }
        });
    }

    pub fn resolve_site(&self, token: Token, host: String) {
        let services = Arc::clone(&self.services);
        self.spawn(async move {
            let result = services.site_for_host(&host).await;
            BackendEvent::SiteResolved { token, result }
        });
    }

    pub fn load_sites(&self) {
        let services = Arc::clone(&self.services);
        self.spawn(async move { BackendEvent::Sites(services.populate_sites().await) });
    }

    // ========== 可编辑字段 ==========

    pub fn save_field(&self, module: usize, pending: PendingSave) {
        let token = pending.token;
        self.spawn(async move {
            let result = pending.run().await;
            BackendEvent::FieldSaved {
                module,
                token,
                result,
            }
        });
    }
}
