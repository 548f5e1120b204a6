//! Linux / Android xattr 系统调用
//!
//! `NOFOLLOW` 对应 `l*xattr` 系列调用，`CREATE`/`REPLACE` 对应
//! `XATTR_CREATE`/`XATTR_REPLACE`。Darwin 专有的选项位在 Linux 上没有对应物，
//! 会被忽略并记录 debug 日志。

use core::ffi::{c_char, c_int, CStr};
use std::os::fd::RawFd;

use crate::error::Errno;
use crate::options::XattrOptions;

use super::{buf_parts, check_len, check_unit};

/// Linux 上无法表达的选项位
const UNSUPPORTED: XattrOptions = XattrOptions::NOSECURITY
    .union(XattrOptions::NODEFAULT)
    .union(XattrOptions::SHOWCOMPRESSION);

fn set_flags(options: XattrOptions) -> c_int {
    let ignored = options & UNSUPPORTED;
    if !ignored.is_empty() {
        log::debug!("[XATTR-OS] ignoring options {:#x} on linux", ignored.bits());
    }

    let mut flags = 0;
    if options.contains(XattrOptions::CREATE) {
        flags |= libc::XATTR_CREATE;
    }
    if options.contains(XattrOptions::REPLACE) {
        flags |= libc::XATTR_REPLACE;
    }
    flags
}

pub(super) fn getxattr(
    path: &CStr,
    name: &CStr,
    buf: &mut [u8],
    options: XattrOptions,
) -> Result<usize, Errno> {
    let (ptr, len) = buf_parts(buf);
    // SAFETY: path/name 是有效的 NUL 结尾字符串，ptr/len 为空指针+0 或一个有效的可写缓冲区
    let ret = unsafe {
        if options.follows_symlinks() {
            libc::getxattr(path.as_ptr(), name.as_ptr(), ptr, len)
        } else {
            libc::lgetxattr(path.as_ptr(), name.as_ptr(), ptr, len)
        }
    };
    check_len(ret)
}

pub(super) fn fgetxattr(
    fd: RawFd,
    name: &CStr,
    buf: &mut [u8],
    _options: XattrOptions,
) -> Result<usize, Errno> {
    let (ptr, len) = buf_parts(buf);
    // SAFETY: 同 getxattr
    let ret = unsafe { libc::fgetxattr(fd, name.as_ptr(), ptr, len) };
    check_len(ret)
}

pub(super) fn listxattr(path: &CStr, buf: &mut [u8], options: XattrOptions) -> Result<usize, Errno> {
    let (ptr, len) = buf_parts(buf);
    let ptr = ptr.cast::<c_char>();
    // SAFETY: 同 getxattr
    let ret = unsafe {
        if options.follows_symlinks() {
            libc::listxattr(path.as_ptr(), ptr, len)
        } else {
            libc::llistxattr(path.as_ptr(), ptr, len)
        }
    };
    check_len(ret)
}

pub(super) fn flistxattr(fd: RawFd, buf: &mut [u8], _options: XattrOptions) -> Result<usize, Errno> {
    let (ptr, len) = buf_parts(buf);
    // SAFETY: 同 getxattr
    let ret = unsafe { libc::flistxattr(fd, ptr.cast::<c_char>(), len) };
    check_len(ret)
}

pub(super) fn setxattr(
    path: &CStr,
    name: &CStr,
    value: &[u8],
    options: XattrOptions,
) -> Result<(), Errno> {
    let flags = set_flags(options);
    // SAFETY: value 是有效的只读切片，长度为 0 时内核不会读取
    let ret = unsafe {
        if options.follows_symlinks() {
            libc::setxattr(path.as_ptr(), name.as_ptr(), value.as_ptr().cast(), value.len(), flags)
        } else {
            libc::lsetxattr(path.as_ptr(), name.as_ptr(), value.as_ptr().cast(), value.len(), flags)
        }
    };
    check_unit(ret)
}

pub(super) fn fsetxattr(
    fd: RawFd,
    name: &CStr,
    value: &[u8],
    options: XattrOptions,
) -> Result<(), Errno> {
    let flags = set_flags(options);
    // SAFETY: 同 setxattr
    let ret = unsafe { libc::fsetxattr(fd, name.as_ptr(), value.as_ptr().cast(), value.len(), flags) };
    check_unit(ret)
}

pub(super) fn removexattr(path: &CStr, name: &CStr, options: XattrOptions) -> Result<(), Errno> {
    // SAFETY: path/name 是有效的 NUL 结尾字符串
    let ret = unsafe {
        if options.follows_symlinks() {
            libc::removexattr(path.as_ptr(), name.as_ptr())
        } else {
            libc::lremovexattr(path.as_ptr(), name.as_ptr())
        }
    };
    check_unit(ret)
}

pub(super) fn fremovexattr(fd: RawFd, name: &CStr, _options: XattrOptions) -> Result<(), Errno> {
    // SAFETY: name 是有效的 NUL 结尾字符串
    let ret = unsafe { libc::fremovexattr(fd, name.as_ptr()) };
    check_unit(ret)
}
