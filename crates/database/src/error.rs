use thiserror::Error;

/// 存储操作错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// 引用的实体不存在
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl DatabaseError {
    /// 反馈不存在
    pub fn feedback_not_found<T: ToString>(id: T) -> Self {
        Self::NotFound {
            entity: "feedback",
            id: id.to_string(),
        }
    }

    /// 项目不存在
    pub fn project_not_found<T: ToString>(id: T) -> Self {
        Self::NotFound {
            entity: "project",
            id: id.to_string(),
        }
    }
}
