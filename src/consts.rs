//! 扩展属性常量定义
//!
//! 对应 `<sys/xattr.h>` 中的限制与保留属性名。
//! 保留属性名只是不透明的标识符，本库不解释它们的内容。

//=============================================================================
// 限制
//=============================================================================

/// 属性名最大长度（字节，不含结尾 NUL）
///
/// Linux 为 `XATTR_NAME_MAX`（255）。超长名称在 Linux 上会得到 `ERANGE`，
/// 因此必须在调用原语之前检查。
#[cfg(any(target_os = "linux", target_os = "android"))]
pub const XATTR_MAXNAMELEN: usize = 255;

/// 属性名最大长度（字节，不含结尾 NUL）
///
/// Darwin 及其他平台为 127。
#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub const XATTR_MAXNAMELEN: usize = 127;

/// 属性值最大长度（64 MiB）
pub const XATTR_MAXSIZE: usize = 64 * 1024 * 1024;

//=============================================================================
// 保留属性名
//=============================================================================

/// Finder 信息属性名
pub const XATTR_FINDERINFO_NAME: &str = "com.apple.FinderInfo";

/// 资源分支属性名
pub const XATTR_RESOURCEFORK_NAME: &str = "com.apple.ResourceFork";

//=============================================================================
// 名称列表
//=============================================================================

/// 名称列表中的分隔符
pub const XATTR_NAME_SEPARATOR: u8 = 0;
