//! Shared helpers for tests that stand a wiremock server in for Sankhya.

#![allow(dead_code)]

use std::time::Duration;

use sankhya_bridge::config::{Config, ServiceCredentials};
use sankhya_bridge::sankhya::{DirectoryService, Endpoints, SettleDelays};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};

pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/login";
pub const SERVICE_PATH: &str = "/gateway/v1/mge/service.sbr";
pub const LOAD_RECORDS: &str = "CRUDServiceProvider.loadRecords";
pub const SAVE: &str = "DatasetSP.save";

pub fn credentials() -> ServiceCredentials {
    ServiceCredentials {
        token: "service-token".to_string(),
        appkey: "app-key".to_string(),
        username: "integracao".to_string(),
        password: "secret".to_string(),
    }
}

pub fn test_config() -> Config {
    Config {
        credentials: credentials(),
        redis_url: None,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        api_base_uri: "/api".to_string(),
        cache_ttl_secs: 1800,
        settle_delay_manager_ms: 0,
        settle_delay_seller_ms: 0,
    }
}

pub fn no_settle() -> SettleDelays {
    SettleDelays {
        manager: Duration::ZERO,
        seller: Duration::ZERO,
    }
}

pub fn directory(server: &MockServer) -> DirectoryService {
    DirectoryService::new(
        credentials(),
        Endpoints::with_base_url(&server.uri()),
        no_settle(),
    )
}

/// Mounts a login endpoint that always hands out `token`.
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bearerToken": token })))
        .mount(server)
        .await;
}

pub fn load_records() -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .and(query_param("serviceName", LOAD_RECORDS))
}

pub fn save() -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .and(query_param("serviceName", SAVE))
}

pub async fn count_requests(server: &MockServer, request_path: &str, service: Option<&str>) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .filter(|request| {
            service.is_none_or(|name| {
                request
                    .url
                    .query_pairs()
                    .any(|(key, value)| key == "serviceName" && value == name)
            })
        })
        .count()
}

pub async fn login_count(server: &MockServer) -> usize {
    count_requests(server, LOGIN_PATH, None).await
}

pub async fn query_count(server: &MockServer) -> usize {
    count_requests(server, SERVICE_PATH, Some(LOAD_RECORDS)).await
}

/// Builds a loadRecords response from field names and `(CODVEND, values)` rows.
pub fn entities_response(fields: &[&str], rows: &[(&str, &[&str])]) -> Value {
    let field: Vec<Value> = fields.iter().map(|name| json!({ "name": name })).collect();
    let entity: Vec<Value> = rows
        .iter()
        .map(|(code, values)| {
            let mut entity = json!({ "$": { "CODVEND": code } });
            for (i, value) in values.iter().enumerate() {
                entity[format!("f{}", i)] = json!({ "$": value });
            }
            entity
        })
        .collect();

    json!({
        "serviceName": LOAD_RECORDS,
        "status": "1",
        "responseBody": {
            "entities": {
                "metadata": { "fields": { "field": field } },
                "entity": entity
            }
        }
    })
}
