//! 编辑记录
//!
//! 每个 Edit 保存整份文档内容的快照，而不是差异。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 版本号：同一个 EditLog 内严格递增，0 表示“没有任何编辑”
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub const ZERO: Version = Version(0);
    pub const MAX: Version = Version(u64::MAX);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// 下一个版本号，已到 u64::MAX 时为 None
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// 不可变的编辑记录 (value, version)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    value: String,
    version: Version,
}

impl Edit {
    pub fn new(value: impl Into<String>, version: u64) -> Self {
        Self::with_version(value, Version::new(version))
    }

    pub fn with_version(value: impl Into<String>, version: Version) -> Self {
        Self {
            value: value.into(),
            version,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn version(&self) -> Version {
        self.version
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/edit.rs"]
mod tests;
