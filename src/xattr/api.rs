//! xattr 公共 API
//!
//! 提供用户级别的扩展属性操作接口，对任意 [`XattrPrimitives`] 实现通用：
//!
//! - 读取路径：[`get`]、[`list`] 走两阶段缓冲区协商（见 [`sizing`](crate::xattr::sizing)）
//! - 修改路径：[`set`]、[`remove`] 单次调用，不需要协商长度
//!
//! 所有 OS 错误码都经同一张映射表翻译，立即返回给调用者。

use alloc::string::String;
use alloc::vec::Vec;

use crate::consts::XATTR_MAXSIZE;
use crate::error::{Error, ErrorKind, Result};
use crate::options::XattrOptions;
use crate::primitives::XattrPrimitives;

use super::name::XattrName;
use super::names::decode_names;
use super::sizing::fetch_sized;

/// 获取扩展属性值
///
/// # 参数
///
/// * `primitives` - 底层原语
/// * `target` - 目标对象
/// * `name` - 属性名
/// * `options` - 选项标志（原样传递）
///
/// # 返回
///
/// 成功返回实际读取到的字节。值为空时返回空 `Vec`（与属性不存在不同）。
///
/// # 错误
///
/// - 属性不存在：`NotFound`
/// - 查询与读取之间值变长：`SizeChanged`
///
/// # 示例
///
/// ```ignore
/// let store = MemoryStore::new();
/// store.create_object("doc");
/// xattr::set(&store, "doc", "user.comment", b"hi", XattrOptions::empty())?;
/// let value = xattr::get(&store, "doc", "user.comment", XattrOptions::empty())?;
/// assert_eq!(value, b"hi");
/// ```
pub fn get<P>(
    primitives: &P,
    target: &P::Target,
    name: &str,
    options: XattrOptions,
) -> Result<Vec<u8>>
where
    P: XattrPrimitives + ?Sized,
{
    let name = XattrName::new(name)?;
    log::trace!("[XATTR] get name={} options={:#x}", name, options.bits());

    fetch_sized("getxattr failed", |buf| {
        primitives.get_value(target, name.as_c_str(), buf, options)
    })
}

/// 查询扩展属性值的长度
///
/// 只执行长度查询，不读取数据。返回值在下一次调用前可能已经过时。
pub fn value_len<P>(
    primitives: &P,
    target: &P::Target,
    name: &str,
    options: XattrOptions,
) -> Result<usize>
where
    P: XattrPrimitives + ?Sized,
{
    let name = XattrName::new(name)?;
    primitives
        .get_value(target, name.as_c_str(), &mut [], options)
        .map_err(|errno| Error::from_errno(errno, "getxattr failed"))
}

/// 列出所有扩展属性名
///
/// 顺序与 OS 报告的顺序一致。没有属性时返回空列表。
pub fn list<P>(primitives: &P, target: &P::Target, options: XattrOptions) -> Result<Vec<String>>
where
    P: XattrPrimitives + ?Sized,
{
    log::trace!("[XATTR] list options={:#x}", options.bits());

    let raw = fetch_sized("listxattr failed", |buf| {
        primitives.list_names(target, buf, options)
    })?;
    Ok(decode_names(&raw))
}

/// 设置扩展属性值
///
/// 空的 `value` 是合法的值（不同于属性不存在）。
///
/// # 错误
///
/// - `CREATE` 且属性已存在：`AlreadyExists`
/// - `REPLACE` 且属性不存在：`NotFound`
/// - 名称过长、值过大或 `CREATE | REPLACE` 同时出现：`InvalidArgument`
pub fn set<P>(
    primitives: &P,
    target: &P::Target,
    name: &str,
    value: &[u8],
    options: XattrOptions,
) -> Result<()>
where
    P: XattrPrimitives + ?Sized,
{
    let name = XattrName::new(name)?;
    options.check()?;
    if value.len() > XATTR_MAXSIZE {
        return Err(Error::new(ErrorKind::InvalidArgument, "xattr value too large"));
    }
    log::trace!(
        "[XATTR] set name={} len={} options={:#x}",
        name,
        value.len(),
        options.bits()
    );

    primitives
        .set_value(target, name.as_c_str(), value, options)
        .map_err(|errno| Error::from_errno(errno, "setxattr failed"))
}

/// 删除扩展属性
///
/// 属性不存在时返回 `NotFound`，由调用者决定是否忽略。
pub fn remove<P>(
    primitives: &P,
    target: &P::Target,
    name: &str,
    options: XattrOptions,
) -> Result<()>
where
    P: XattrPrimitives + ?Sized,
{
    let name = XattrName::new(name)?;
    log::trace!("[XATTR] remove name={} options={:#x}", name, options.bits());

    primitives
        .remove_value(target, name.as_c_str(), options)
        .map_err(|errno| Error::from_errno(errno, "removexattr failed"))
}
