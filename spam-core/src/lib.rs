//! SPAM Client Core Library
//!
//! Provides the platform-independent client logic of the switch-port patch
//! manager, including:
//! - Navigation dispatcher with history and path mapping
//! - Row table engine behind the patch-entry form
//! - Inline detail panel for port information
//! - Click-to-edit field widget
//! - Result list view, switch list and search tool
//! - Shared services (backend, site mode cache, sites list, key-value storage)
//!
//! Every component is a plain state machine. Asynchronous backend calls are
//! split into "issue a request carrying a generation token" and "apply the
//! response carrying that token", so the front end decides how requests are
//! executed and late responses can be discarded.

pub mod detail_panel;
pub mod dispatcher;
pub mod editable;
pub mod error;
pub mod generation;
pub mod http_client;
pub mod list_view;
pub mod port_table;
pub mod row_table;
pub mod search_tool;
pub mod services;
pub mod switch_list;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use generation::{Generation, Token};
pub use services::SharedServices;
pub use traits::{Backend, KeyValueStore};
