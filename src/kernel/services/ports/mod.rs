//! Service ports: traits + data contracts.

pub mod settings;
pub mod storage;
pub mod view;

pub use settings::Settings;
pub use storage::{Result as StorageResult, Storage, StorageError, StorageFuture};
pub use view::{view_channel, HostMessage, RefreshKind, ViewHandle, ViewMessage, ViewReceiver};
