//! 错误类型定义
//!
//! 提供扩展属性操作的错误类型，以及 OS 错误码到错误类别的映射表。

use core::fmt;

/// OS 原生错误码（errno）
///
/// 由 [`XattrPrimitives`](crate::primitives::XattrPrimitives) 的实现返回，
/// 再通过 [`Error::from_errno`] 统一翻译。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(pub i32);

impl Errno {
    /// 获取原始错误码
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "os error {}", self.0)
    }
}

/// 扩展属性操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
    errno: Option<i32>,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 属性或目标对象不存在
    NotFound,
    /// 以 create-only 方式设置时属性已存在
    AlreadyExists,
    /// 权限或安全策略拒绝
    AccessDenied,
    /// 名称/值超出限制、选项非法或名称含 NUL
    InvalidArgument,
    /// 文件系统或对象类型不支持扩展属性
    NotSupported,
    /// 查询长度与读取之间属性发生了变化，可重试
    SizeChanged,
    /// 其他 OS 错误（保留原生错误码）
    Unknown,
}

/// errno 映射表
///
/// 所有操作共用这一张表，未列出的错误码一律归为 [`ErrorKind::Unknown`]。
/// 错误码取自 libc，只在 unix 目标上存在。
#[cfg(unix)]
static ERRNO_TABLE: &[(i32, ErrorKind)] = &[
    (ENOATTR, ErrorKind::NotFound),
    (libc::ENOENT, ErrorKind::NotFound),
    (libc::ENOTDIR, ErrorKind::NotFound),
    (libc::EEXIST, ErrorKind::AlreadyExists),
    (libc::EACCES, ErrorKind::AccessDenied),
    (libc::EPERM, ErrorKind::AccessDenied),
    (libc::EINVAL, ErrorKind::InvalidArgument),
    (libc::ENAMETOOLONG, ErrorKind::InvalidArgument),
    (libc::E2BIG, ErrorKind::InvalidArgument),
    (libc::ENOTSUP, ErrorKind::NotSupported),
    (libc::EOPNOTSUPP, ErrorKind::NotSupported),
    (libc::ERANGE, ErrorKind::SizeChanged),
];

/// "属性不存在" 的错误码
///
/// Darwin 使用 `ENOATTR`，Linux 使用 `ENODATA`。
#[cfg(all(unix, any(target_os = "macos", target_os = "ios")))]
pub const ENOATTR: i32 = libc::ENOATTR;

/// "属性不存在" 的错误码
///
/// Darwin 使用 `ENOATTR`，Linux 使用 `ENODATA`。
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios"))))]
pub const ENOATTR: i32 = libc::ENODATA;

/// 将 errno 翻译为错误类别
#[cfg(unix)]
pub fn kind_from_errno(errno: Errno) -> ErrorKind {
    ERRNO_TABLE
        .iter()
        .find(|(code, _)| *code == errno.0)
        .map(|(_, kind)| *kind)
        .unwrap_or(ErrorKind::Unknown)
}

/// 将 errno 翻译为错误类别
///
/// 非 unix 目标没有 errno 约定，所有错误码都归为 [`ErrorKind::Unknown`]，
/// 原生错误码仍保留在 [`Error::raw_os_error`] 中。
#[cfg(not(unix))]
pub fn kind_from_errno(_errno: Errno) -> ErrorKind {
    ErrorKind::Unknown
}

impl Error {
    /// 创建新错误
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self {
            kind,
            message,
            errno: None,
        }
    }

    /// 从 OS 错误码创建错误
    ///
    /// 类别由 errno 映射表决定，原生错误码保留用于诊断。
    pub fn from_errno(errno: Errno, message: &'static str) -> Self {
        Self {
            kind: kind_from_errno(errno),
            message,
            errno: Some(errno.0),
        }
    }

    /// 获取错误类型
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误消息
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// 获取原生错误码（如果错误来自 OS）
    pub const fn raw_os_error(&self) -> Option<i32> {
        self.errno
    }

    /// 是否为查询/读取竞争导致的可重试错误
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::SizeChanged)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errno {
            Some(code) => write!(f, "{:?}: {} (os error {})", self.kind, self.message, code),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind as IoKind;

        if let Some(code) = err.errno {
            return std::io::Error::from_raw_os_error(code);
        }
        let kind = match err.kind {
            ErrorKind::NotFound => IoKind::NotFound,
            ErrorKind::AlreadyExists => IoKind::AlreadyExists,
            ErrorKind::AccessDenied => IoKind::PermissionDenied,
            ErrorKind::InvalidArgument => IoKind::InvalidInput,
            ErrorKind::NotSupported => IoKind::Unsupported,
            ErrorKind::SizeChanged | ErrorKind::Unknown => IoKind::Other,
        };
        std::io::Error::new(kind, err.message)
    }
}

/// Result 类型别名
pub type Result<T> = core::result::Result<T, Error>;
