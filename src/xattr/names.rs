//! 名称列表解码
//!
//! OS 返回的名称列表是一段以 NUL 分隔的字节，例如 `"user.a\0user.b\0"`。
//! 按 NUL 切分后，最后一个分隔符之后会产生一个空段，空段一律丢弃。
//! 输出保持 OS 报告的顺序（即存储顺序，不排序）。

use alloc::string::String;
use alloc::vec::Vec;

use crate::consts::XATTR_NAME_SEPARATOR;

/// 遍历原始名称（字节形式）
///
/// # 示例
///
/// ```ignore
/// let names: Vec<&[u8]> = split_names(b"a\0b\0").collect();
/// assert_eq!(names, [b"a".as_slice(), b"b".as_slice()]);
/// ```
pub fn split_names(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    buf.split(|byte| *byte == XATTR_NAME_SEPARATOR)
        .filter(|segment| !segment.is_empty())
}

/// 解码名称列表
///
/// 非 UTF-8 的名称按有损方式转换。
pub fn decode_names(buf: &[u8]) -> Vec<String> {
    split_names(buf)
        .map(|segment| String::from_utf8_lossy(segment).into_owned())
        .collect()
}
