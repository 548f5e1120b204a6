//! 属性名校验与原生字符串句柄
//!
//! [`XattrName`] 持有一个已校验的 `CString`，在整个操作期间借出 `&CStr`
//! 给底层原语，作用域结束时自动释放。

use alloc::ffi::CString;
use core::ffi::CStr;
use core::fmt;

use crate::consts::XATTR_MAXNAMELEN;
use crate::error::{Error, ErrorKind, Result};

/// 已校验的属性名
///
/// 保证：长度在 `1..=XATTR_MAXNAMELEN` 之间，且不含 NUL。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct XattrName {
    raw: CString,
}

impl XattrName {
    /// 校验并创建属性名
    ///
    /// # 错误
    ///
    /// - 名称为空、超过 [`XATTR_MAXNAMELEN`] 字节或含 NUL 时返回 `InvalidArgument`
    pub fn new(name: &str) -> Result<Self> {
        Self::from_bytes(name.as_bytes())
    }

    /// 从原始字节创建属性名
    pub fn from_bytes(name: &[u8]) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::new(ErrorKind::InvalidArgument, "empty xattr name"));
        }
        if name.len() > XATTR_MAXNAMELEN {
            return Err(Error::new(ErrorKind::InvalidArgument, "xattr name too long"));
        }
        let raw = CString::new(name)
            .map_err(|_| Error::new(ErrorKind::InvalidArgument, "xattr name contains NUL"))?;
        Ok(Self { raw })
    }

    /// 借出原生字符串
    pub fn as_c_str(&self) -> &CStr {
        self.raw.as_c_str()
    }

    /// 名称字节（不含结尾 NUL）
    pub fn as_bytes(&self) -> &[u8] {
        self.raw.as_bytes()
    }

    /// 名称长度
    pub fn len(&self) -> usize {
        self.raw.as_bytes().len()
    }

    /// 总是返回 false（名称不可能为空）
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Debug for XattrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XattrName({:?})", self.raw)
    }
}

impl fmt::Display for XattrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw.to_string_lossy())
    }
}

impl TryFrom<&str> for XattrName {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}
