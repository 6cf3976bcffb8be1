use crate::models::extract::ActionInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// 新建项目的请求体
///
/// 字段都声明为 [`Option`]，缺失的字段由校验规则给出提示，而不是直接反序列化失败。
#[derive(Deserialize, Debug, ToSchema, Validate, Default)]
pub struct ProjectCreate {
    #[schema(example = "PulseTrack App")]
    #[serde(default)]
    #[validate(
        required(message = "Project name is required."),
        length(min = 3, message = "Project name must be at least 3 characters.")
    )]
    /// 新建项目名称，至少3个字符
    pub name: Option<String>,
}

impl ProjectCreate {
    /// 校验并转换为存储层的创建参数
    pub fn validated(self) -> Result<database::ProjectCreate, ValidationErrors> {
        self.validate()?;
        Ok(database::ProjectCreate {
            name: self.name.unwrap_or_default(),
        })
    }
}

impl ActionInput for ProjectCreate {
    const INVALID_MESSAGE: &'static str = "Missing Fields. Failed to Create Project.";
    const STRING_FIELDS: &'static [&'static str] = &["name"];
}

/// 项目信息
#[derive(Deserialize, Debug, ToSchema, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[schema(example = "proj_1")]
    /// 项目ID
    pub id: String,

    #[schema(example = "PulseTrack App")]
    /// 项目名称
    pub name: String,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    #[schema(example = "pk_live_xxxxxxxxxxxx1")]
    /// 嵌入脚本中使用的项目公钥
    pub project_key: String,
}

impl From<database::Project> for ProjectInfo {
    fn from(project: database::Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            created_at: project.created_at,
            project_key: project.project_key,
        }
    }
}

/// 项目的嵌入脚本
#[derive(Deserialize, Debug, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetInfo {
    pub project_id: String,
    pub project_key: String,
    /// 可以直接粘贴到网页中的 `<script>` 标签
    pub snippet: String,
}
