use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;

use crate::config::ServiceCredentials;
use crate::error::{Result, SankhyaError};
use crate::sankhya::decoder::decode_response;
use crate::sankhya::endpoints::{Endpoints, LOGIN_TIMEOUT, REQUEST_TIMEOUT};
use crate::sankhya::executor::RequestExecutor;
use crate::sankhya::model::{CreatedSeller, DirectoryRecord, NewSeller, Role};
use crate::sankhya::payload::{
    Criteria, MANAGER_FIELDSET, QueryPayload, SALES_REP_FIELDSET, SaveBuilder, SavePayload,
    rejection_message,
};
use crate::sankhya::session::TokenManager;

/// APELIDO 在 Sankhya 中最多 15 个字符
pub const MAX_NAME_LEN: usize = 15;

/// 创建经理时未指定公司使用的编号
pub const DEFAULT_COMPANY: i64 = 1;

/// 写入后等待多久再回读
#[derive(Debug, Clone, Copy)]
pub struct SettleDelays {
    pub manager: Duration,
    pub seller: Duration,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            manager: Duration::from_millis(500),
            seller: Duration::from_millis(1000),
        }
    }
}

/// 目录查询，失败时返回错误
///
/// 缓存层依赖这个 trait 以区分 "没有记录" 和 "查询失败"。
#[async_trait]
pub trait DirectoryQueries: Send + Sync {
    async fn query_managers(&self) -> Result<Vec<DirectoryRecord>>;

    async fn query_sales_reps(&self, manager_code: Option<i64>) -> Result<Vec<DirectoryRecord>>;
}

pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}

pub fn manager_payload(display_name: &str, company_code: i64) -> SavePayload {
    SaveBuilder::new()
        .field("APELIDO", display_name)
        .field("TIPVEND", Role::Manager.code())
        .field("ATIVO", "S")
        .field("EMPRESA", company_code.to_string())
        .build()
}

/// 经理的 CODGER 为 0；公司只对销售代表发送；EMAIL 总是最后一个字段
pub fn seller_payload(seller: &NewSeller) -> SavePayload {
    let role = seller.role();
    let company = match role {
        Role::SalesRep => seller.company_code().map(|code| code.to_string()),
        Role::Manager => None,
    };

    SaveBuilder::new()
        .field("APELIDO", truncate_name(&seller.name))
        .field("TIPVEND", role.code())
        .field("ATIVO", "S")
        .field("CODGER", seller.manager_code().unwrap_or(0).to_string())
        .field_if("EMPRESA", company)
        .field_if("EMAIL", seller.email())
        .build()
}

/// 经理 / 销售代表目录服务
pub struct DirectoryService {
    executor: RequestExecutor,
    endpoints: Endpoints,
    settle: SettleDelays,
}

impl DirectoryService {
    pub fn new(credentials: ServiceCredentials, endpoints: Endpoints, settle: SettleDelays) -> Self {
        let http = reqwest::Client::new();
        let tokens = Arc::new(TokenManager::new(
            http.clone(),
            endpoints.login_url.clone(),
            credentials,
            LOGIN_TIMEOUT,
        ));

        Self {
            executor: RequestExecutor::new(http, tokens, REQUEST_TIMEOUT),
            endpoints,
            settle,
        }
    }

    /// 查询启用的经理，失败时记录日志并返回空列表
    pub async fn list_managers(&self) -> Vec<DirectoryRecord> {
        match self.query_managers().await {
            Ok(managers) => managers,
            Err(e) => {
                tracing::error!("Failed to list managers: {}", e);
                Vec::new()
            }
        }
    }

    /// 查询启用的销售代表，可按经理过滤；失败时返回空列表
    pub async fn list_sales_reps(&self, manager_code: Option<i64>) -> Vec<DirectoryRecord> {
        match self.query_sales_reps(manager_code).await {
            Ok(reps) => reps,
            Err(e) => {
                tracing::error!("Failed to list sales reps (manager {:?}): {}", manager_code, e);
                Vec::new()
            }
        }
    }

    /// 创建经理并回读
    ///
    /// 回读找不到时返回占位记录而不是报错。
    pub async fn create_manager(
        &self,
        display_name: &str,
        company_code: i64,
    ) -> Result<DirectoryRecord> {
        let payload = manager_payload(display_name, company_code);
        self.executor
            .execute(&self.endpoints.save_url, Method::POST, &payload)
            .await?;

        tokio::time::sleep(self.settle.manager).await;

        let created = self
            .list_managers()
            .await
            .into_iter()
            .find(|manager| manager.get("APELIDO") == Some(display_name));

        Ok(created.unwrap_or_else(|| {
            tracing::warn!("Manager {} not visible yet, returning placeholder", display_name);
            [
                ("CODVEND", chrono::Utc::now().timestamp_millis().to_string()),
                ("APELIDO", display_name.to_string()),
                ("TIPVEND", Role::Manager.code().to_string()),
            ]
            .into_iter()
            .collect()
        }))
    }

    /// 创建销售代表（有经理代码）或经理（无经理代码），返回回读到的 CODVEND
    ///
    /// 名称截断为 [`MAX_NAME_LEN`] 个字符后发送，回读也按截断后的名称匹配。
    /// 回读失败是硬错误。
    pub async fn create_sales_rep_or_manager(&self, seller: &NewSeller) -> Result<CreatedSeller> {
        let name = truncate_name(&seller.name);
        let payload = seller_payload(seller);
        tracing::debug!("Creating {:?} with fields {:?}", seller.role(), payload.fields());

        let response = self
            .executor
            .execute(&self.endpoints.save_url, Method::POST, &payload)
            .await?;

        if let Some(message) = rejection_message(&response) {
            tracing::error!("Sankhya rejected {}: {}", name, message);
            return Err(SankhyaError::Rejected(message.to_string()));
        }

        tokio::time::sleep(self.settle.seller).await;

        let listing = match seller.role() {
            Role::Manager => self.list_managers().await,
            Role::SalesRep => self.list_sales_reps(seller.manager_code()).await,
        };

        let Some(created) = listing
            .iter()
            .find(|record| record.get("APELIDO") == Some(name.as_str()))
        else {
            tracing::error!("{} not found after creation among {} records", name, listing.len());
            return Err(SankhyaError::RecordNotFound(name));
        };

        let seller_code = created
            .get("CODVEND")
            .and_then(|code| code.parse::<i64>().ok())
            .ok_or_else(|| SankhyaError::Decode(format!("invalid CODVEND for {}", name)))?;

        tracing::info!("Created {} with CODVEND {}", name, seller_code);
        Ok(CreatedSeller {
            seller_code,
            name: seller.name.clone(),
        })
    }

    async fn load(&self, fieldset: &str, criteria: Criteria) -> Result<Vec<DirectoryRecord>> {
        let payload = QueryPayload::new(fieldset, &criteria);
        tracing::debug!("Loading Vendedor where {}", criteria.expression());

        let response = self
            .executor
            .execute(&self.endpoints.query_url, Method::POST, &payload)
            .await?;

        let records = decode_response(&response)?;
        tracing::debug!("Decoded {} records", records.len());
        Ok(records)
    }
}

#[async_trait]
impl DirectoryQueries for DirectoryService {
    async fn query_managers(&self) -> Result<Vec<DirectoryRecord>> {
        self.load(MANAGER_FIELDSET, Criteria::active(Role::Manager))
            .await
    }

    async fn query_sales_reps(&self, manager_code: Option<i64>) -> Result<Vec<DirectoryRecord>> {
        let criteria = match manager_code.filter(|code| *code != 0) {
            Some(code) => Criteria::active(Role::SalesRep).with_manager(code),
            None => Criteria::active(Role::SalesRep),
        };
        self.load(SALES_REP_FIELDSET, criteria).await
    }
}
