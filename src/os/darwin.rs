//! Darwin (macOS / iOS) xattr 系统调用
//!
//! 选项位原样传递给 `options` 参数。`position` 参数固定为 0：
//! 调用者可以直接对返回的值切片。

use core::ffi::{c_char, c_int, CStr};
use std::os::fd::RawFd;

use crate::error::Errno;
use crate::options::XattrOptions;

use super::{buf_parts, check_len, check_unit};

fn raw(options: XattrOptions) -> c_int {
    options.bits() as c_int
}

pub(super) fn getxattr(
    path: &CStr,
    name: &CStr,
    buf: &mut [u8],
    options: XattrOptions,
) -> Result<usize, Errno> {
    let (ptr, len) = buf_parts(buf);
    // SAFETY: path/name 是有效的 NUL 结尾字符串，ptr/len 为空指针+0 或一个有效的可写缓冲区
    let ret = unsafe { libc::getxattr(path.as_ptr(), name.as_ptr(), ptr, len, 0, raw(options)) };
    check_len(ret)
}

pub(super) fn fgetxattr(
    fd: RawFd,
    name: &CStr,
    buf: &mut [u8],
    options: XattrOptions,
) -> Result<usize, Errno> {
    let (ptr, len) = buf_parts(buf);
    // SAFETY: 同 getxattr
    let ret = unsafe { libc::fgetxattr(fd, name.as_ptr(), ptr, len, 0, raw(options)) };
    check_len(ret)
}

pub(super) fn listxattr(path: &CStr, buf: &mut [u8], options: XattrOptions) -> Result<usize, Errno> {
    let (ptr, len) = buf_parts(buf);
    // SAFETY: 同 getxattr
    let ret = unsafe { libc::listxattr(path.as_ptr(), ptr.cast::<c_char>(), len, raw(options)) };
    check_len(ret)
}

pub(super) fn flistxattr(fd: RawFd, buf: &mut [u8], options: XattrOptions) -> Result<usize, Errno> {
    let (ptr, len) = buf_parts(buf);
    // SAFETY: 同 getxattr
    let ret = unsafe { libc::flistxattr(fd, ptr.cast::<c_char>(), len, raw(options)) };
    check_len(ret)
}

pub(super) fn setxattr(
    path: &CStr,
    name: &CStr,
    value: &[u8],
    options: XattrOptions,
) -> Result<(), Errno> {
    // SAFETY: value 是有效的只读切片，长度为 0 时内核不会读取
    let ret = unsafe {
        libc::setxattr(
            path.as_ptr(),
            name.as_ptr(),
            value.as_ptr().cast(),
            value.len(),
            0,
            raw(options),
        )
    };
    check_unit(ret)
}

pub(super) fn fsetxattr(
    fd: RawFd,
    name: &CStr,
    value: &[u8],
    options: XattrOptions,
) -> Result<(), Errno> {
    // SAFETY: 同 setxattr
    let ret = unsafe {
        libc::fsetxattr(fd, name.as_ptr(), value.as_ptr().cast(), value.len(), 0, raw(options))
    };
    check_unit(ret)
}

pub(super) fn removexattr(path: &CStr, name: &CStr, options: XattrOptions) -> Result<(), Errno> {
    // SAFETY: path/name 是有效的 NUL 结尾字符串
    let ret = unsafe { libc::removexattr(path.as_ptr(), name.as_ptr(), raw(options)) };
    check_unit(ret)
}

pub(super) fn fremovexattr(fd: RawFd, name: &CStr, options: XattrOptions) -> Result<(), Errno> {
    // SAFETY: name 是有效的 NUL 结尾字符串
    let ret = unsafe { libc::fremovexattr(fd, name.as_ptr(), raw(options)) };
    check_unit(ret)
}
