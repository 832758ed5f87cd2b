use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::sankhya::model::Role;

pub const ROOT_ENTITY: &str = "Vendedor";
pub const SAVE_SERVICE: &str = "DatasetSP.save";

/// 保存接口成功时的 statusMessage
pub const SAVE_SUCCESS: &str = "Sucesso";

pub const MANAGER_FIELDSET: &str = "APELIDO,TIPVEND,ATIVO";
pub const SALES_REP_FIELDSET: &str = "APELIDO,TIPVEND,ATIVO,CODGER";

/// 查询条件，始终限定角色且只包含启用的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria(String);

impl Criteria {
    pub fn active(role: Role) -> Self {
        Self(format!("TIPVEND = '{}' AND ATIVO = 'S'", role.code()))
    }

    pub fn with_manager(mut self, manager_code: i64) -> Self {
        self.0.push_str(&format!(" AND CODGER = {}", manager_code));
        self
    }

    pub fn expression(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Serialize)]
pub struct QueryPayload {
    #[serde(rename = "requestBody")]
    request_body: QueryRequestBody,
}

#[derive(Debug, Serialize)]
struct QueryRequestBody {
    #[serde(rename = "dataSet")]
    data_set: DataSet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataSet {
    root_entity: &'static str,
    include_presentation_fields: &'static str,
    offset_page: &'static str,
    entity: FieldsetEntity,
    criteria: CriteriaBody,
}

#[derive(Debug, Serialize)]
struct FieldsetEntity {
    fieldset: Fieldset,
}

#[derive(Debug, Serialize)]
struct Fieldset {
    list: String,
}

#[derive(Debug, Serialize)]
struct CriteriaBody {
    expression: Expression,
}

#[derive(Debug, Serialize)]
struct Expression {
    #[serde(rename = "$")]
    value: String,
}

impl QueryPayload {
    pub fn new(fieldset: &str, criteria: &Criteria) -> Self {
        Self {
            request_body: QueryRequestBody {
                data_set: DataSet {
                    root_entity: ROOT_ENTITY,
                    include_presentation_fields: "S",
                    offset_page: "0",
                    entity: FieldsetEntity {
                        fieldset: Fieldset {
                            list: fieldset.to_string(),
                        },
                    },
                    criteria: CriteriaBody {
                        expression: Expression {
                            value: criteria.expression().to_string(),
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavePayload {
    #[serde(rename = "serviceName")]
    service_name: &'static str,
    #[serde(rename = "requestBody")]
    request_body: SaveRequestBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequestBody {
    entity_name: &'static str,
    stand_alone: bool,
    fields: Vec<String>,
    records: Vec<SaveRecord>,
}

#[derive(Debug, Serialize)]
struct SaveRecord {
    values: BTreeMap<String, String>,
}

impl SavePayload {
    pub fn fields(&self) -> &[String] {
        &self.request_body.fields
    }

    /// 按字段名取第一条记录的值
    pub fn value_of(&self, field: &str) -> Option<&str> {
        let position = self.fields().iter().position(|f| f == field)?;
        self.request_body
            .records
            .first()?
            .values
            .get(&position.to_string())
            .map(String::as_str)
    }
}

/// 逐个追加字段，值按位置编号为 "0", "1", ...
#[derive(Debug, Default)]
pub struct SaveBuilder {
    fields: Vec<String>,
    values: BTreeMap<String, String>,
}

impl SaveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(self.fields.len().to_string(), value.into());
        self.fields.push(name.to_string());
        self
    }

    pub fn field_if(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    pub fn build(self) -> SavePayload {
        SavePayload {
            service_name: SAVE_SERVICE,
            request_body: SaveRequestBody {
                entity_name: ROOT_ENTITY,
                stand_alone: false,
                fields: self.fields,
                records: vec![SaveRecord {
                    values: self.values,
                }],
            },
        }
    }
}

/// 保存响应中非成功的 statusMessage；缺失时视为成功
pub fn rejection_message(response: &Value) -> Option<&str> {
    response
        .pointer("/responseBody/statusMessage")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty() && *message != SAVE_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn criteria_always_filters_role_and_active() {
        assert_eq!(
            Criteria::active(Role::Manager).expression(),
            "TIPVEND = 'G' AND ATIVO = 'S'"
        );
        assert_eq!(
            Criteria::active(Role::SalesRep).with_manager(7).expression(),
            "TIPVEND = 'V' AND ATIVO = 'S' AND CODGER = 7"
        );
    }

    #[test]
    fn query_payload_shape() {
        let payload = QueryPayload::new(MANAGER_FIELDSET, &Criteria::active(Role::Manager));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "requestBody": {
                    "dataSet": {
                        "rootEntity": "Vendedor",
                        "includePresentationFields": "S",
                        "offsetPage": "0",
                        "entity": { "fieldset": { "list": "APELIDO,TIPVEND,ATIVO" } },
                        "criteria": { "expression": { "$": "TIPVEND = 'G' AND ATIVO = 'S'" } }
                    }
                }
            })
        );
    }

    #[test]
    fn save_payload_numbers_values_by_position() {
        let payload = SaveBuilder::new()
            .field("APELIDO", "Joao")
            .field("TIPVEND", "V")
            .field_if("EMAIL", None::<String>)
            .field_if("EMPRESA", Some("2"))
            .build();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "serviceName": "DatasetSP.save",
                "requestBody": {
                    "entityName": "Vendedor",
                    "standAlone": false,
                    "fields": ["APELIDO", "TIPVEND", "EMPRESA"],
                    "records": [{ "values": { "0": "Joao", "1": "V", "2": "2" } }]
                }
            })
        );
        assert_eq!(payload.value_of("EMPRESA"), Some("2"));
        assert_eq!(payload.value_of("EMAIL"), None);
    }

    #[test]
    fn rejection_ignores_success_and_missing_status() {
        assert_eq!(rejection_message(&json!({ "responseBody": { "statusMessage": "Sucesso" } })), None);
        assert_eq!(rejection_message(&json!({ "status": "1" })), None);
        assert_eq!(
            rejection_message(&json!({ "responseBody": { "statusMessage": "Apelido duplicado" } })),
            Some("Apelido duplicado")
        );
    }
}
