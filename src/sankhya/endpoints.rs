use std::time::Duration;

/// Sankhya sandbox 网关
pub const SANKHYA_BASE_URL: &str = "https://api.sandbox.sankhya.com.br";

const LOGIN_PATH: &str = "/login";
const QUERY_PATH: &str =
    "/gateway/v1/mge/service.sbr?serviceName=CRUDServiceProvider.loadRecords&outputType=json";
const SAVE_PATH: &str = "/gateway/v1/mge/service.sbr?serviceName=DatasetSP.save&outputType=json";

/// 登录超时
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

/// 数据请求超时
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// 登录、查询、保存三个接口地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login_url: String,
    pub query_url: String,
    pub save_url: String,
}

impl Endpoints {
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            login_url: format!("{}{}", base, LOGIN_PATH),
            query_url: format!("{}{}", base, QUERY_PATH),
            save_url: format!("{}{}", base, SAVE_PATH),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base_url(SANKHYA_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_point_at_sandbox() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.login_url, "https://api.sandbox.sankhya.com.br/login");
        assert!(endpoints.query_url.ends_with("CRUDServiceProvider.loadRecords&outputType=json"));
        assert!(endpoints.save_url.ends_with("DatasetSP.save&outputType=json"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let endpoints = Endpoints::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(endpoints.login_url, "http://127.0.0.1:9000/login");
    }
}
