//! 资源标识
//!
//! 文档以规范化的 URI 字符串作为身份，本地路径统一转换为 file:// URI。

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("invalid resource `{input}`: {source}")]
    Invalid {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("cannot convert path to resource: {}", .0.display())]
    InvalidPath(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Resource {
    url: Url,
}

impl Resource {
    pub fn from_url(url: Url) -> Self {
        Self { url }
    }

    /// 相对路径基于当前工作目录解析
    pub fn from_path(path: &Path) -> Result<Self, ResourceError> {
        let abs = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|_| ResourceError::InvalidPath(path.to_path_buf()))?
                .join(path)
        };
        Url::from_file_path(&abs)
            .map(Self::from_url)
            .map_err(|_| ResourceError::InvalidPath(abs))
    }

    /// 解析 URI；不带 scheme 的输入按本地路径处理
    pub fn parse(input: &str) -> Result<Self, ResourceError> {
        if Path::new(input).is_absolute() {
            return Self::from_path(Path::new(input));
        }
        match Url::parse(input) {
            Ok(url) => Ok(Self::from_url(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => Self::from_path(Path::new(input)),
            Err(source) => Err(ResourceError::Invalid {
                input: input.to_string(),
                source,
            }),
        }
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// 规范化的 URI 字符串，作为注册表的键
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.scheme() != "file" {
            return None;
        }
        self.url.to_file_path().ok()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/resource.rs"]
mod tests;
