//! 扩展属性原语接口

use core::ffi::CStr;

use crate::error::Errno;
use crate::options::XattrOptions;

/// 扩展属性原语接口
///
/// 实现此 trait 以提供底层 xattr 访问。
///
/// # 缓冲区约定
///
/// - `buf` 为空：只查询所需长度，不写入任何数据
/// - `buf` 非空：执行实际读取，返回写入的字节数（≤ `buf.len()`）
/// - 缓冲区不足以容纳当前数据：返回 `ERANGE`
///
/// 每个原语都是单次调用，"查询 + 读取" 的组合不是原子的。
///
/// # 示例
///
/// ```rust,ignore
/// use core::ffi::CStr;
/// use xattr_core::{Errno, XattrOptions, XattrPrimitives};
///
/// struct MyBackend;
///
/// impl XattrPrimitives for MyBackend {
///     type Target = str;
///
///     fn get_value(&self, target: &str, name: &CStr, buf: &mut [u8], options: XattrOptions)
///         -> Result<usize, Errno> {
///         // 空 buf 时返回值的长度，否则复制数据
///         Ok(0)
///     }
///
///     // list_names / set_value / remove_value ...
/// }
/// ```
pub trait XattrPrimitives {
    /// 目标对象类型（路径、文件句柄等）
    type Target: ?Sized;

    /// 查询或读取属性值
    ///
    /// # 返回
    ///
    /// `buf` 为空时返回值的长度，否则返回实际写入的字节数
    fn get_value(
        &self,
        target: &Self::Target,
        name: &CStr,
        buf: &mut [u8],
        options: XattrOptions,
    ) -> Result<usize, Errno>;

    /// 查询或读取名称列表
    ///
    /// 名称以 NUL 结尾依次排列，例如 `"user.a\0user.b\0"`。
    ///
    /// # 返回
    ///
    /// `buf` 为空时返回列表的长度，否则返回实际写入的字节数
    fn list_names(
        &self,
        target: &Self::Target,
        buf: &mut [u8],
        options: XattrOptions,
    ) -> Result<usize, Errno>;

    /// 设置属性值
    fn set_value(
        &self,
        target: &Self::Target,
        name: &CStr,
        value: &[u8],
        options: XattrOptions,
    ) -> Result<(), Errno>;

    /// 删除属性
    fn remove_value(
        &self,
        target: &Self::Target,
        name: &CStr,
        options: XattrOptions,
    ) -> Result<(), Errno>;
}
