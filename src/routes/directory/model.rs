use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub tipo: Option<String>,
    #[serde(rename = "codGerente")]
    pub manager_code: Option<String>,
}

impl ListQuery {
    /// 非数字的经理代码视为不过滤
    pub fn manager_code(&self) -> Option<i64> {
        self.manager_code
            .as_deref()
            .and_then(|code| code.trim().parse::<i64>().ok())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateManagerRequest {
    #[serde(rename = "apelido")]
    pub display_name: String,
    #[serde(default, rename = "empresa")]
    pub company_code: Option<i64>,
}
