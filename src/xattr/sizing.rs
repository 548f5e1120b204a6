//! 两阶段缓冲区协商
//!
//! 属性值和名称列表都没有固定上限，读取分两步：
//!
//! 1. 用空缓冲区调用原语，得到当前长度 `n`
//! 2. 分配恰好 `n` 字节，再调用一次原语读取数据
//!
//! 两次调用之间属性可能被其他写者修改：
//!
//! - 变短：原语返回实际写入的字节数，结果截断到该长度
//! - 变长：原语返回 `ERANGE`，作为 [`ErrorKind::SizeChanged`] 报告给调用者
//!
//! 每次调用只读取一次，不会在内部循环重试。
//! 需要一致快照的调用者可以使用 [`retry_on_size_change`]。

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Errno, Error, ErrorKind, Result};

/// 执行 "查询长度 → 分配 → 读取"
///
/// `call` 以空切片调用时必须只返回所需长度；以非空切片调用时返回写入的字节数。
/// 查询得到长度 0 时直接返回空结果，不再调用第二次。
///
/// # 参数
///
/// * `what` - 用于错误消息的操作描述（如 "getxattr failed"）
/// * `call` - 底层原语调用
pub fn fetch_sized<F>(what: &'static str, mut call: F) -> Result<Vec<u8>>
where
    F: FnMut(&mut [u8]) -> core::result::Result<usize, Errno>,
{
    // 1. 查询长度
    let size = call(&mut []).map_err(|errno| Error::from_errno(errno, what))?;
    log::trace!("[XATTR] size query: {} bytes", size);

    if size == 0 {
        return Ok(Vec::new());
    }

    // 2. 读取
    let mut buf = vec![0u8; size];
    let written = match call(&mut buf) {
        Ok(written) => written,
        Err(errno) => {
            let err = Error::from_errno(errno, what);
            if err.is_retryable() {
                log::debug!("[XATTR] value grew after size query ({} bytes queried)", size);
            }
            return Err(err);
        }
    };

    if written > buf.len() {
        return Err(Error::new(
            ErrorKind::SizeChanged,
            "primitive reported more bytes than the buffer holds",
        ));
    }
    if written < size {
        log::debug!("[XATTR] value shrank after size query: {} -> {} bytes", size, written);
    }

    // 3. 截断到实际写入的长度
    buf.truncate(written);
    Ok(buf)
}

/// 在 `SizeChanged` 时重新执行整个两阶段操作
///
/// 最多执行 `attempts` 次（至少一次）。其他错误立即返回。
///
/// # 示例
///
/// ```rust,ignore
/// let value = retry_on_size_change(3, || xattr_core::get(path, "user.a", XattrOptions::empty()))?;
/// ```
pub fn retry_on_size_change<T, F>(attempts: usize, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let attempts = attempts.max(1);
    let mut tries = 0;
    loop {
        tries += 1;
        match op() {
            Err(err) if err.is_retryable() && tries < attempts => {
                log::debug!("[XATTR] size changed, retrying ({}/{})", tries, attempts);
            }
            result => return result,
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_fetch_exact() {
        let data = b"hello";
        let value = fetch_sized("getxattr failed", |buf| {
            if buf.is_empty() {
                return Ok(data.len());
            }
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        })
        .unwrap();
        assert_eq!(value, data);
    }

    #[test]
    fn test_zero_size_skips_fetch() {
        let calls = Cell::new(0);
        let value = fetch_sized("getxattr failed", |buf| {
            calls.set(calls.get() + 1);
            assert!(buf.is_empty());
            Ok(0)
        })
        .unwrap();
        assert!(value.is_empty());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_shrink_truncates_to_written() {
        // 查询时 10 字节，读取前缩短为 4 字节
        let value = fetch_sized("getxattr failed", |buf| {
            if buf.is_empty() {
                return Ok(10);
            }
            assert_eq!(buf.len(), 10);
            buf[..4].copy_from_slice(b"abcd");
            Ok(4)
        })
        .unwrap();
        assert_eq!(value, b"abcd");
        assert_eq!(value.len(), 4);
    }

    #[test]
    fn test_grow_is_size_changed() {
        let err = fetch_sized("getxattr failed", |buf| {
            if buf.is_empty() {
                return Ok(4);
            }
            Err(Errno(libc::ERANGE))
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeChanged);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_fetch_runs_once() {
        let calls = Cell::new(0);
        let _ = fetch_sized("getxattr failed", |buf| {
            calls.set(calls.get() + 1);
            if buf.is_empty() {
                return Ok(4);
            }
            Err(Errno(libc::ERANGE))
        });
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_query_error_propagates() {
        let err = fetch_sized("getxattr failed", |_| Err(Errno(libc::EACCES))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert_eq!(err.raw_os_error(), Some(libc::EACCES));
    }

    #[test]
    fn test_overreport_rejected() {
        let err = fetch_sized("getxattr failed", |buf| {
            if buf.is_empty() {
                return Ok(2);
            }
            Ok(3)
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeChanged);
    }

    #[test]
    fn test_retry_until_success() {
        let calls = Cell::new(0);
        let value = retry_on_size_change(3, || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(Error::from_errno(Errno(libc::ERANGE), "getxattr failed"))
            } else {
                Ok(7)
            }
        })
        .unwrap();
        assert_eq!(value, 7);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_retry_gives_up() {
        let calls = Cell::new(0);
        let err = retry_on_size_change(2, || -> Result<()> {
            calls.set(calls.get() + 1);
            Err(Error::from_errno(Errno(libc::ERANGE), "getxattr failed"))
        })
        .unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_retry_does_not_repeat_other_errors() {
        let calls = Cell::new(0);
        let err = retry_on_size_change(5, || -> Result<()> {
            calls.set(calls.get() + 1);
            Err(Error::new(ErrorKind::NotFound, "xattr not found"))
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(calls.get(), 1);
    }
}
