//! 内存存储
//!
//! memory:// 资源保存在进程内，可按资源注入读写失败。
//! 每次读写都会先让出一次执行权，模拟真实 IO 的挂起点。

use crate::kernel::services::ports::storage::{Storage, StorageError, StorageFuture};
use crate::models::Resource;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct MemoryInner {
    files: RefCell<FxHashMap<String, Vec<u8>>>,
    failing_reads: RefCell<FxHashSet<String>>,
    failing_writes: RefCell<FxHashSet<String>>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

/// 克隆共享同一份数据
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<MemoryInner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, resource: &Resource, content: impl Into<Vec<u8>>) {
        self.inner
            .files
            .borrow_mut()
            .insert(resource.as_str().to_string(), content.into());
    }

    pub fn get(&self, resource: &Resource) -> Option<Vec<u8>> {
        self.inner.files.borrow().get(resource.as_str()).cloned()
    }

    pub fn get_string(&self, resource: &Resource) -> Option<String> {
        self.get(resource)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn fail_reads(&self, resource: &Resource, fail: bool) {
        set_flag(&self.inner.failing_reads, resource, fail);
    }

    pub fn fail_writes(&self, resource: &Resource, fail: bool) {
        set_flag(&self.inner.failing_writes, resource, fail);
    }

    /// 读取次数（包括失败的读取）
    pub fn read_count(&self) -> usize {
        self.inner.reads.get()
    }

    /// 写入次数（包括失败的写入）
    pub fn write_count(&self) -> usize {
        self.inner.writes.get()
    }
}

fn set_flag(set: &RefCell<FxHashSet<String>>, resource: &Resource, fail: bool) {
    let key = resource.as_str().to_string();
    if fail {
        set.borrow_mut().insert(key);
    } else {
        set.borrow_mut().remove(&key);
    }
}

impl Storage for MemoryStorage {
    fn scheme(&self) -> &'static str {
        "memory"
    }

    fn read_file<'a>(&'a self, resource: &'a Resource) -> StorageFuture<'a, Vec<u8>> {
        Box::pin(async move {
            self.inner.reads.set(self.inner.reads.get() + 1);
            tokio::task::yield_now().await;

            if self.inner.failing_reads.borrow().contains(resource.as_str()) {
                return Err(StorageError::Unavailable(resource.clone()));
            }
            self.get(resource)
                .ok_or_else(|| StorageError::NotFound(resource.clone()))
        })
    }

    fn write_file<'a>(
        &'a self,
        resource: &'a Resource,
        content: &'a [u8],
    ) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.inner.writes.set(self.inner.writes.get() + 1);
            tokio::task::yield_now().await;

            if self.inner.failing_writes.borrow().contains(resource.as_str()) {
                return Err(StorageError::Unavailable(resource.clone()));
            }
            self.insert(resource, content);
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/storage/memory.rs"]
mod tests;
