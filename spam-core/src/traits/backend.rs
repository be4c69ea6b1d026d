//! Backend endpoint abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{
    AddPatchResponse, AuxResponse, ModuleWireUpdate, PatchForm, PortInfoResponse, SearchQuery,
    SearchResponse, SiteLookup, StatusResponse, SwitchListResponse, UseCpResponse,
};

/// Backend endpoint Trait
///
/// One method per request discriminator. `Err` is reserved for transport and
/// parse failures; a response with `status: error` is returned as `Ok` so the
/// caller can still apply per-field feedback.
///
/// Platform implementation:
/// - `HttpBackend`: form-encoded POST over `reqwest`
/// - tests: scripted mock
#[async_trait]
pub trait Backend: Send + Sync {
    /// Auxiliary data (sites list)
    async fn aux(&self) -> CoreResult<AuxResponse>;

    /// All known switches
    async fn switch_list(&self) -> CoreResult<SwitchListResponse>;

    /// Port search, also used for a switch's port list
    ///
    /// # Arguments
    /// * `query` - form fields to submit
    async fn search(&self, query: &SearchQuery) -> CoreResult<SearchResponse>;

    /// Detail of a single port
    ///
    /// # Arguments
    /// * `host` - switch host name
    /// * `portname` - port name on that switch
    async fn port_info(&self, host: &str, portname: &str) -> CoreResult<PortInfoResponse>;

    /// Create patches
    ///
    /// # Arguments
    /// * `form` - selected site plus `addp_*NN` fields
    async fn add_patch(&self, form: &PatchForm) -> CoreResult<AddPatchResponse>;

    /// Remove the patch on a port
    async fn delete_patch(&self, host: &str, portname: &str) -> CoreResult<StatusResponse>;

    /// Whether a site uses outlets (and which site a host belongs to)
    async fn use_cp(&self, lookup: &SiteLookup) -> CoreResult<UseCpResponse>;

    /// Update the wiring location of a switch module
    async fn module_wire(&self, update: &ModuleWireUpdate) -> CoreResult<StatusResponse>;
}
