//! 内存 xattr 存储
//!
//! 按 OS 原语的约定模拟扩展属性：空缓冲区查询长度、缓冲区不足返回 `ERANGE`、
//! `CREATE`/`REPLACE` 语义、名称按插入顺序列出。对象以字符串作为键。
//!
//! 使用 `RefCell` 实现内部可变性，只适用于单线程。

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::ffi::CStr;

use crate::consts::{XATTR_MAXNAMELEN, XATTR_MAXSIZE};
use crate::error::{Errno, ENOATTR};
use crate::options::XattrOptions;

use super::XattrPrimitives;

/// 单个对象上的属性（按插入顺序）
type AttrList = Vec<(Vec<u8>, Vec<u8>)>;

/// 内存 xattr 存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RefCell<BTreeMap<String, AttrList>>,
}

impl MemoryStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个没有任何属性的对象（已存在时不做任何事）
    pub fn create_object(&self, key: &str) {
        self.objects
            .borrow_mut()
            .entry(key.to_string())
            .or_default();
    }

    /// 对象上的属性数量，对象不存在时返回 None
    pub fn attribute_count(&self, key: &str) -> Option<usize> {
        self.objects.borrow().get(key).map(|attrs| attrs.len())
    }

    fn check_name(name: &CStr) -> Result<(), Errno> {
        if name.to_bytes().len() > XATTR_MAXNAMELEN {
            return Err(Errno(libc::ENAMETOOLONG));
        }
        Ok(())
    }
}

impl XattrPrimitives for MemoryStore {
    type Target = str;

    fn get_value(
        &self,
        target: &str,
        name: &CStr,
        buf: &mut [u8],
        _options: XattrOptions,
    ) -> Result<usize, Errno> {
        Self::check_name(name)?;
        let objects = self.objects.borrow();
        let attrs = objects.get(target).ok_or(Errno(libc::ENOENT))?;
        let value = attrs
            .iter()
            .find(|(n, _)| n.as_slice() == name.to_bytes())
            .map(|(_, v)| v)
            .ok_or(Errno(ENOATTR))?;

        if buf.is_empty() {
            return Ok(value.len());
        }
        if buf.len() < value.len() {
            return Err(Errno(libc::ERANGE));
        }
        buf[..value.len()].copy_from_slice(value);
        Ok(value.len())
    }

    fn list_names(
        &self,
        target: &str,
        buf: &mut [u8],
        _options: XattrOptions,
    ) -> Result<usize, Errno> {
        let objects = self.objects.borrow();
        let attrs = objects.get(target).ok_or(Errno(libc::ENOENT))?;
        let total: usize = attrs.iter().map(|(n, _)| n.len() + 1).sum();

        if buf.is_empty() {
            return Ok(total);
        }
        if buf.len() < total {
            return Err(Errno(libc::ERANGE));
        }

        let mut offset = 0;
        for (name, _) in attrs {
            buf[offset..offset + name.len()].copy_from_slice(name);
            buf[offset + name.len()] = 0;
            offset += name.len() + 1;
        }
        Ok(offset)
    }

    fn set_value(
        &self,
        target: &str,
        name: &CStr,
        value: &[u8],
        options: XattrOptions,
    ) -> Result<(), Errno> {
        Self::check_name(name)?;
        if options.contains(XattrOptions::CREATE | XattrOptions::REPLACE) {
            return Err(Errno(libc::EINVAL));
        }
        if value.len() > XATTR_MAXSIZE {
            return Err(Errno(libc::E2BIG));
        }

        let mut objects = self.objects.borrow_mut();
        let attrs = objects.get_mut(target).ok_or(Errno(libc::ENOENT))?;
        let existing = attrs.iter().position(|(n, _)| n.as_slice() == name.to_bytes());

        match existing {
            Some(_) if options.contains(XattrOptions::CREATE) => Err(Errno(libc::EEXIST)),
            Some(index) => {
                attrs[index].1 = value.to_vec();
                Ok(())
            }
            None if options.contains(XattrOptions::REPLACE) => Err(Errno(ENOATTR)),
            None => {
                attrs.push((name.to_bytes().to_vec(), value.to_vec()));
                Ok(())
            }
        }
    }

    fn remove_value(
        &self,
        target: &str,
        name: &CStr,
        _options: XattrOptions,
    ) -> Result<(), Errno> {
        Self::check_name(name)?;
        let mut objects = self.objects.borrow_mut();
        let attrs = objects.get_mut(target).ok_or(Errno(libc::ENOENT))?;
        let index = attrs
            .iter()
            .position(|(n, _)| n.as_slice() == name.to_bytes())
            .ok_or(Errno(ENOATTR))?;
        attrs.remove(index);
        Ok(())
    }
}
