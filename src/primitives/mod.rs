//! 扩展属性原语抽象
//!
//! 本库不直接依赖具体的系统调用机制，而是通过 [`XattrPrimitives`] trait
//! 访问四个底层原语：读取/查询属性值、读取/查询名称列表、设置、删除。
//!
//! primitives/backend.rs 定义 trait 本身及缓冲区约定；
//! primitives/memory.rs 提供一个遵循相同约定的内存实现，便于脱离 OS 测试
//! （使用 libc 错误码，仅限 unix 目标）。

mod backend;
#[cfg(unix)]
mod memory;

pub use backend::XattrPrimitives;
#[cfg(unix)]
pub use memory::MemoryStore;
