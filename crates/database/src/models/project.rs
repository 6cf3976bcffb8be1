//! 项目存储模型
//!
//! 定义项目相关的存储结构体

use chrono::{DateTime, Utc};

/// 项目信息结构体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// 项目ID，创建后不会改变
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// 对外公开的项目公钥，写在嵌入脚本中，全局唯一且不会重新生成
    pub project_key: String,
}

/// 项目创建参数
///
/// 调用方需要先完成校验，存储层不再检查名称长度
#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub name: String,
}
