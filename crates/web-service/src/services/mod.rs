//! 服务层模块
//!
//! 包含业务逻辑的服务层实现，路由函数只负责解析参数和返回结果

pub mod feedback;
pub mod notify;

pub use feedback::FeedbackService;
pub use notify::{ChangeEvent, ChangeNotifier};
