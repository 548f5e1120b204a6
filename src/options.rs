//! 扩展属性选项标志
//!
//! 对应 `<sys/xattr.h>` 的 `XATTR_*` 选项位。这些位原样传递给底层原语，
//! 本模块只检查互相矛盾的组合。

use bitflags::bitflags;

use crate::error::{Error, ErrorKind, Result};

bitflags! {
    /// xattr 选项标志
    ///
    /// 位值取自 Darwin 的 `<sys/xattr.h>`。未知位会被保留并原样传递。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct XattrOptions: u32 {
        /// 不跟随符号链接
        const NOFOLLOW        = 0x0001;
        /// 仅创建：属性已存在时失败
        const CREATE          = 0x0002;
        /// 仅替换：属性不存在时失败
        const REPLACE         = 0x0004;
        /// 绕过授权检查
        const NOSECURITY      = 0x0008;
        /// 绕过默认扩展属性文件（dot-underscore 文件）
        const NODEFAULT       = 0x0010;
        /// 暴露 HFS 压缩相关的扩展属性
        const SHOWCOMPRESSION = 0x0020;
    }
}

impl XattrOptions {
    /// 从原始位创建（保留未知位）
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// 检查选项组合是否合法
    ///
    /// `CREATE` 与 `REPLACE` 互斥。
    pub fn check(self) -> Result<()> {
        if self.contains(Self::CREATE | Self::REPLACE) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "XATTR_CREATE and XATTR_REPLACE are mutually exclusive",
            ));
        }
        Ok(())
    }

    /// 是否跟随符号链接
    pub const fn follows_symlinks(self) -> bool {
        !self.contains(Self::NOFOLLOW)
    }
}
