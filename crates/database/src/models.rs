//! 存储模型模块
//!
//! 这里定义存储层保存的实体结构体和相关操作参数

pub mod feedback;
pub mod project;

// 重新导出具体的模型
pub use feedback::{Feedback, FeedbackCreate, LabelOutcome};
pub use project::{Project, ProjectCreate};
