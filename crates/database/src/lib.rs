//! 数据存储模块
//!
//! 这个模块提供项目与反馈的存储抽象，以及当前使用的内存实现。
//!
//! 所有上层代码只依赖 [`FeedbackStoreTrait`]，后续替换为持久化存储时不需要修改业务层。

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::initialize_store;
pub use error::DatabaseError;
pub use models::{Feedback, FeedbackCreate, LabelOutcome, Project, ProjectCreate};
pub use repositories::{memory::MemoryStore, traits::FeedbackStoreTrait};

/// 存储操作结果类型
pub type DatabaseResult<T> = Result<T, DatabaseError>;
