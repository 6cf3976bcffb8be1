//! 挂件嵌入脚本
//!
//! 项目创建后，用户把这段脚本贴到自己的网站上即可开始收集反馈。

/// 未配置 `WIDGET_HOST` 时使用的挂件地址
pub const DEFAULT_WIDGET_HOST: &str = "https://your-domain.com";

/// 根据挂件地址和项目公钥生成嵌入脚本
///
/// `host` 末尾的 `/` 会被去掉，避免出现 `//widget.js`。
pub fn embed_snippet(host: &str, project_key: &str) -> String {
    let host = host.trim_end_matches('/');
    format!(r#"<script src="{host}/widget.js" data-project-key="{project_key}" async defer></script>"#)
}
