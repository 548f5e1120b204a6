//! xattr_core: 扩展属性访问库
//!
//! 这是一个访问文件系统扩展属性（xattr）的库，旨在提供：
//! - **两阶段缓冲区协商**：调用者无需预先知道值或名称列表的长度
//! - **稳定的错误分类**：OS 错误码统一映射为 [`ErrorKind`]
//! - **可替换的底层原语**：通过 [`XattrPrimitives`] trait 接入 OS 或测试实现
//!
//! # 示例
//!
//! ```rust,ignore
//! use xattr_core::{XattrOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let path = "/tmp/file.txt";
//!
//!     xattr_core::set(path, "user.comment", b"hello", XattrOptions::empty())?;
//!     let value = xattr_core::get(path, "user.comment", XattrOptions::empty())?;
//!     let names = xattr_core::list(path, XattrOptions::empty())?;
//!     xattr_core::remove(path, "user.comment", XattrOptions::empty())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义与 errno 映射表
//! - [`consts`] - 常量定义
//! - [`options`] - 选项标志
//! - [`primitives`] - 底层原语抽象
//! - [`xattr`] - 读取协议、名称列表解码与修改操作
//! - [`os`] - OS 后端（需要 `std` 特性）
//!
//! # 目标平台
//!
//! 核心协议不依赖 `std`。errno 映射表和 `MemoryStore` 使用 libc 错误码，
//! 只在 unix 目标上编译；其他目标上所有错误码都归为 [`ErrorKind::Unknown`]。

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// ===== 核心模块 =====

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 选项标志
pub mod options;

/// 底层原语抽象
pub mod primitives;

/// Extended Attributes (xattr)
pub mod xattr;

// ===== OS 后端（可选）=====

/// OS 后端
///
/// 通过 libc 调用 Linux / Darwin 的 xattr 系统调用。
#[cfg(all(
    feature = "std",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios"
    )
))]
pub mod os;

// ===== 公共导出 =====

// 错误处理
pub use error::{Errno, Error, ErrorKind, Result};

// 常量
pub use consts::{XATTR_FINDERINFO_NAME, XATTR_MAXNAMELEN, XATTR_MAXSIZE, XATTR_RESOURCEFORK_NAME};

// 选项
pub use options::XattrOptions;

// 原语
pub use primitives::XattrPrimitives;
#[cfg(unix)]
pub use primitives::MemoryStore;

// Xattr
pub use xattr::{decode_names, retry_on_size_change, XattrName};

// OS 便捷函数（当启用时）
#[cfg(all(
    feature = "std",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios"
    )
))]
pub use os::{fget, flist, fremove, fset, get, list, remove, set, FilePrimitives, PathPrimitives};
