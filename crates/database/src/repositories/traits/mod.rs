//! 存储仓库 trait 定义
//!
//! 这里定义了存储仓库的抽象接口
//!
//! ## Repository Trait 约束 🎯
//!
//! ```rust,ignore
//! pub trait XxxStoreTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send` / `Sync`：仓库实例在多个请求之间共享，请求可能在不同线程上处理
//! - `'static`：作为 [`std::sync::Arc`] 放入 axum 的共享状态中，生命周期与进程一致
//! - 使用 [`async_trait`] 保证 trait 可以作为 `dyn` 对象注入
//!
//! 方法统一返回 [`crate::DatabaseResult`]，查询不到单个实体时返回 `Option`，
//! 修改不存在的实体时返回 [`crate::DatabaseError::NotFound`]。

pub mod store;

// 重新导出
pub use store::FeedbackStoreTrait;
