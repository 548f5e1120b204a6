//! OS xattr 后端
//!
//! 通过 libc 调用系统的 xattr 接口，实现 [`XattrPrimitives`]：
//!
//! - [`PathPrimitives`]：以路径为目标（`getxattr` / `lgetxattr` ...）
//! - [`FilePrimitives`]：以已打开的文件为目标（`fgetxattr` ...）
//!
//! 路径在每次调用内部转换为 `CString`，调用结束时自动释放。
//! 空缓冲区在 FFI 边界转换为空指针 + 长度 0，即纯长度查询。

use std::ffi::{c_void, CStr, CString};
use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::string::String;
use std::vec::Vec;

use crate::error::{Errno, Result};
use crate::options::XattrOptions;
use crate::primitives::XattrPrimitives;
use crate::xattr;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
#[cfg(any(target_os = "linux", target_os = "android"))]
use linux as sys;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod darwin;
#[cfg(any(target_os = "macos", target_os = "ios"))]
use darwin as sys;

/// 将缓冲区拆分为 FFI 参数
///
/// 空缓冲区返回空指针，避免把悬垂指针当作长度为 1 的缓冲区传给内核。
fn buf_parts(buf: &mut [u8]) -> (*mut c_void, usize) {
    if buf.is_empty() {
        (std::ptr::null_mut(), 0)
    } else {
        (buf.as_mut_ptr().cast(), buf.len())
    }
}

fn last_errno() -> Errno {
    Errno(io::Error::last_os_error().raw_os_error().unwrap_or(libc::EIO))
}

fn check_len(ret: isize) -> core::result::Result<usize, Errno> {
    if ret < 0 {
        Err(last_errno())
    } else {
        Ok(ret as usize)
    }
}

fn check_unit(ret: libc::c_int) -> core::result::Result<(), Errno> {
    if ret < 0 {
        Err(last_errno())
    } else {
        Ok(())
    }
}

fn path_to_c(path: &Path) -> core::result::Result<CString, Errno> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| Errno(libc::EINVAL))
}

/// 以路径为目标的 xattr 原语
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPrimitives;

impl XattrPrimitives for PathPrimitives {
    type Target = Path;

    fn get_value(
        &self,
        target: &Path,
        name: &CStr,
        buf: &mut [u8],
        options: XattrOptions,
    ) -> core::result::Result<usize, Errno> {
        let path = path_to_c(target)?;
        log::trace!("[XATTR-OS] getxattr {:?} {:?} len={}", target, name, buf.len());
        sys::getxattr(&path, name, buf, options)
    }

    fn list_names(
        &self,
        target: &Path,
        buf: &mut [u8],
        options: XattrOptions,
    ) -> core::result::Result<usize, Errno> {
        let path = path_to_c(target)?;
        log::trace!("[XATTR-OS] listxattr {:?} len={}", target, buf.len());
        sys::listxattr(&path, buf, options)
    }

    fn set_value(
        &self,
        target: &Path,
        name: &CStr,
        value: &[u8],
        options: XattrOptions,
    ) -> core::result::Result<(), Errno> {
        let path = path_to_c(target)?;
        log::trace!("[XATTR-OS] setxattr {:?} {:?} len={}", target, name, value.len());
        sys::setxattr(&path, name, value, options)
    }

    fn remove_value(
        &self,
        target: &Path,
        name: &CStr,
        options: XattrOptions,
    ) -> core::result::Result<(), Errno> {
        let path = path_to_c(target)?;
        log::trace!("[XATTR-OS] removexattr {:?} {:?}", target, name);
        sys::removexattr(&path, name, options)
    }
}

/// 以已打开文件为目标的 xattr 原语
#[derive(Debug, Clone, Copy, Default)]
pub struct FilePrimitives;

impl XattrPrimitives for FilePrimitives {
    type Target = File;

    fn get_value(
        &self,
        target: &File,
        name: &CStr,
        buf: &mut [u8],
        options: XattrOptions,
    ) -> core::result::Result<usize, Errno> {
        sys::fgetxattr(target.as_raw_fd(), name, buf, options)
    }

    fn list_names(
        &self,
        target: &File,
        buf: &mut [u8],
        options: XattrOptions,
    ) -> core::result::Result<usize, Errno> {
        sys::flistxattr(target.as_raw_fd(), buf, options)
    }

    fn set_value(
        &self,
        target: &File,
        name: &CStr,
        value: &[u8],
        options: XattrOptions,
    ) -> core::result::Result<(), Errno> {
        sys::fsetxattr(target.as_raw_fd(), name, value, options)
    }

    fn remove_value(
        &self,
        target: &File,
        name: &CStr,
        options: XattrOptions,
    ) -> core::result::Result<(), Errno> {
        sys::fremovexattr(target.as_raw_fd(), name, options)
    }
}

// ===== 路径便捷函数 =====

/// 获取 `path` 上名为 `name` 的属性值
pub fn get(path: impl AsRef<Path>, name: &str, options: XattrOptions) -> Result<Vec<u8>> {
    xattr::get(&PathPrimitives, path.as_ref(), name, options)
}

/// 列出 `path` 上的所有属性名
pub fn list(path: impl AsRef<Path>, options: XattrOptions) -> Result<Vec<String>> {
    xattr::list(&PathPrimitives, path.as_ref(), options)
}

/// 设置 `path` 上名为 `name` 的属性值
pub fn set(path: impl AsRef<Path>, name: &str, value: &[u8], options: XattrOptions) -> Result<()> {
    xattr::set(&PathPrimitives, path.as_ref(), name, value, options)
}

/// 删除 `path` 上名为 `name` 的属性
pub fn remove(path: impl AsRef<Path>, name: &str, options: XattrOptions) -> Result<()> {
    xattr::remove(&PathPrimitives, path.as_ref(), name, options)
}

// ===== 文件句柄便捷函数 =====

/// 获取已打开文件上名为 `name` 的属性值
pub fn fget(file: &File, name: &str, options: XattrOptions) -> Result<Vec<u8>> {
    xattr::get(&FilePrimitives, file, name, options)
}

/// 列出已打开文件上的所有属性名
pub fn flist(file: &File, options: XattrOptions) -> Result<Vec<String>> {
    xattr::list(&FilePrimitives, file, options)
}

/// 设置已打开文件上名为 `name` 的属性值
pub fn fset(file: &File, name: &str, value: &[u8], options: XattrOptions) -> Result<()> {
    xattr::set(&FilePrimitives, file, name, value, options)
}

/// 删除已打开文件上名为 `name` 的属性
pub fn fremove(file: &File, name: &str, options: XattrOptions) -> Result<()> {
    xattr::remove(&FilePrimitives, file, name, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::XATTR_MAXNAMELEN;
    use crate::error::ErrorKind;
    use std::fs;
    use std::string::ToString;
    use tempfile::tempdir;

    const NONE: XattrOptions = XattrOptions::empty();

    /// 检查当前文件系统是否支持 user xattr
    fn xattrs_supported(path: &Path) -> bool {
        match set(path, "user.xattr_core.support", b"1", NONE) {
            Ok(()) => {
                let _ = remove(path, "user.xattr_core.support", NONE);
                true
            }
            Err(_) => false,
        }
    }

    fn scratch_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let file = dir.path().join("test.txt");
        fs::write(&file, "test content").expect("write file");
        file
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().expect("create temp dir");
        let file = scratch_file(&dir);
        if !xattrs_supported(&file) {
            std::eprintln!("xattrs not supported, skipping test");
            return;
        }

        set(&file, "user.comment", b"test value 123", NONE).expect("set");
        assert_eq!(get(&file, "user.comment", NONE).expect("get"), b"test value 123");
        assert!(list(&file, NONE)
            .expect("list")
            .contains(&"user.comment".to_string()));
    }

    #[test]
    fn test_missing_attribute_not_found() {
        let dir = tempdir().expect("create temp dir");
        let file = scratch_file(&dir);
        if !xattrs_supported(&file) {
            std::eprintln!("xattrs not supported, skipping test");
            return;
        }

        let err = get(&file, "user.nonexistent", NONE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = remove(&file, "user.nonexistent", NONE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_file_not_found() {
        let dir = tempdir().expect("create temp dir");
        let err = list(dir.path().join("missing"), NONE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_empty_value() {
        let dir = tempdir().expect("create temp dir");
        let file = scratch_file(&dir);
        if !xattrs_supported(&file) {
            std::eprintln!("xattrs not supported, skipping test");
            return;
        }

        set(&file, "user.empty", b"", NONE).expect("set empty");
        assert!(get(&file, "user.empty", NONE).expect("get empty").is_empty());
    }

    #[test]
    fn test_create_and_replace() {
        let dir = tempdir().expect("create temp dir");
        let file = scratch_file(&dir);
        if !xattrs_supported(&file) {
            std::eprintln!("xattrs not supported, skipping test");
            return;
        }

        let err = set(&file, "user.a", b"v", XattrOptions::REPLACE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(get(&file, "user.a", NONE).unwrap_err().kind(), ErrorKind::NotFound);

        set(&file, "user.a", b"old", XattrOptions::CREATE).expect("create");
        let err = set(&file, "user.a", b"new", XattrOptions::CREATE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(get(&file, "user.a", NONE).expect("get"), b"old");

        set(&file, "user.a", b"new", XattrOptions::REPLACE).expect("replace");
        assert_eq!(get(&file, "user.a", NONE).expect("get"), b"new");
    }

    #[test]
    fn test_name_length_boundary() {
        let dir = tempdir().expect("create temp dir");
        let file = scratch_file(&dir);
        if !xattrs_supported(&file) {
            std::eprintln!("xattrs not supported, skipping test");
            return;
        }

        let prefix = "user.";
        let max = std::format!("{}{}", prefix, "n".repeat(XATTR_MAXNAMELEN - prefix.len()));
        set(&file, &max, b"v", NONE).expect("max length name");

        let over = std::format!("{}n", max);
        let err = set(&file, &over, b"v", NONE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn test_long_linux_name_usable_after_list() {
        let dir = tempdir().expect("create temp dir");
        let file = scratch_file(&dir);
        if !xattrs_supported(&file) {
            std::eprintln!("xattrs not supported, skipping test");
            return;
        }

        // 200 字节：超过 Darwin 的 127，但在 Linux 的 255 以内
        let long = std::format!("user.{}", "n".repeat(195));
        assert_eq!(long.len(), 200);

        set(&file, &long, b"long", NONE).expect("set long name");
        assert!(list(&file, NONE).expect("list").contains(&long));
        assert_eq!(get(&file, &long, NONE).expect("get long name"), b"long");
        remove(&file, &long, NONE).expect("remove long name");
        assert_eq!(get(&file, &long, NONE).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_nofollow_reads_the_link() {
        let dir = tempdir().expect("create temp dir");
        let file = scratch_file(&dir);
        if !xattrs_supported(&file) {
            std::eprintln!("xattrs not supported, skipping test");
            return;
        }
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&file, &link).expect("symlink");

        set(&file, "user.target", b"t", NONE).expect("set");
        assert_eq!(get(&link, "user.target", NONE).expect("follow"), b"t");

        let err = get(&link, "user.target", XattrOptions::NOFOLLOW).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_file_handle_ops() {
        let dir = tempdir().expect("create temp dir");
        let path = scratch_file(&dir);
        if !xattrs_supported(&path) {
            std::eprintln!("xattrs not supported, skipping test");
            return;
        }
        let file = File::options().read(true).write(true).open(&path).expect("open");

        fset(&file, "user.fd", b"handle", NONE).expect("fset");
        assert_eq!(fget(&file, "user.fd", NONE).expect("fget"), b"handle");
        assert!(flist(&file, NONE).expect("flist").contains(&"user.fd".to_string()));
        assert_eq!(get(&path, "user.fd", NONE).expect("get by path"), b"handle");

        fremove(&file, "user.fd", NONE).expect("fremove");
        assert_eq!(fget(&file, "user.fd", NONE).unwrap_err().kind(), ErrorKind::NotFound);
    }
}
