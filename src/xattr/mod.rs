//! 扩展属性 (Extended Attributes) 访问
//!
//! 扩展属性（xattr）是 OS 附加在文件、目录或符号链接上的 name-value 元数据。
//! 值是不透明的字节序列，本模块不解释其内容。
//!
//! # 读取协议
//!
//! 值和名称列表的长度事先未知，读取分两步：先用空缓冲区查询长度，
//! 再分配缓冲区读取（见 [`sizing`](crate::xattr::sizing)）。两步之间不是原子的：
//!
//! - 值变短：返回实际读取到的字节，不补零
//! - 值变长：返回 [`ErrorKind::SizeChanged`](crate::ErrorKind::SizeChanged)，由调用者决定是否重试
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use xattr_core::{xattr, MemoryStore, XattrOptions};
//!
//! let store = MemoryStore::new();
//! store.create_object("doc");
//!
//! // 设置属性
//! xattr::set(&store, "doc", "user.author", b"Alice", XattrOptions::empty())?;
//!
//! // 列出所有扩展属性
//! let names = xattr::list(&store, "doc", XattrOptions::empty())?;
//!
//! // 获取属性值
//! let value = xattr::get(&store, "doc", "user.author", XattrOptions::empty())?;
//!
//! // 删除属性
//! xattr::remove(&store, "doc", "user.author", XattrOptions::empty())?;
//! ```

mod api;
mod name;
mod names;
pub mod sizing;

pub use api::{get, list, remove, set, value_len};
pub use name::XattrName;
pub use names::{decode_names, split_names};
pub use sizing::{fetch_sized, retry_on_size_change};
