//! Sankhya 实体解码
//!
//! loadRecords 的响应把字段名放在 `metadata.fields.field` 中，每个实体只带位置槽
//! `f0, f1, ...` 和一个主键容器 `$`。解码分两步：先把 JSON 转成中间表示
//! [`EntitySet`]，再按字段位置展开成 [`DirectoryRecord`]。

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SankhyaError};
use crate::sankhya::model::DirectoryRecord;

/// 中间表示：有序字段名 + 每个实体的稀疏位置槽和主键属性
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySet {
    pub field_names: Vec<String>,
    pub entities: Vec<PositionalEntity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionalEntity {
    pub identity: Vec<(String, String)>,
    pub slots: BTreeMap<usize, String>,
}

// Sankhya 只有一个元素时不包数组
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Deserialize)]
struct RawEntities {
    #[serde(default)]
    metadata: Option<RawMetadata>,
    #[serde(default)]
    entity: Option<OneOrMany<RawEntity>>,
}

#[derive(Deserialize)]
struct RawMetadata {
    fields: RawFields,
}

#[derive(Deserialize)]
struct RawFields {
    field: OneOrMany<RawField>,
}

#[derive(Deserialize)]
struct RawField {
    name: String,
}

#[derive(Deserialize)]
struct RawEntity {
    #[serde(rename = "$", default)]
    identity: BTreeMap<String, Value>,
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

/// 第一步：原始 `entities` 片段 -> [`EntitySet`]
pub fn parse_entities(entities: &Value) -> Result<EntitySet> {
    let raw = RawEntities::deserialize(entities)
        .map_err(|e| SankhyaError::Decode(e.to_string()))?;

    let Some(entity) = raw.entity else {
        return Ok(EntitySet::default());
    };

    let metadata = raw
        .metadata
        .ok_or_else(|| SankhyaError::Decode("entities without metadata".to_string()))?;

    let field_names = metadata
        .fields
        .field
        .into_vec()
        .into_iter()
        .map(|f| f.name)
        .collect();

    let entities = entity
        .into_vec()
        .into_iter()
        .map(|raw_entity| PositionalEntity {
            identity: raw_entity
                .identity
                .iter()
                .filter_map(|(key, value)| scalar(value).map(|v| (key.clone(), v)))
                .collect(),
            slots: raw_entity
                .slots
                .iter()
                .filter_map(|(key, slot)| {
                    let position = slot_position(key)?;
                    let value = scalar(slot.get("$")?)?;
                    Some((position, value))
                })
                .collect(),
        })
        .collect();

    Ok(EntitySet {
        field_names,
        entities,
    })
}

/// 第二步：按字段位置展开，缺失的槽直接跳过
pub fn into_records(set: EntitySet) -> Vec<DirectoryRecord> {
    let EntitySet {
        field_names,
        entities,
    } = set;

    entities
        .into_iter()
        .map(|mut entity| {
            let mut record: DirectoryRecord = entity.identity.into_iter().collect();
            for (position, name) in field_names.iter().enumerate() {
                if let Some(value) = entity.slots.remove(&position) {
                    record.insert(name.as_str(), value);
                }
            }
            record
        })
        .collect()
}

/// 解码 `entities` 片段
pub fn decode_entities(entities: &Value) -> Result<Vec<DirectoryRecord>> {
    parse_entities(entities).map(into_records)
}

/// 解码完整的 loadRecords 响应，没有 `responseBody.entities` 时返回空列表
pub fn decode_response(body: &Value) -> Result<Vec<DirectoryRecord>> {
    match body.pointer("/responseBody/entities") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(entities) => decode_entities(entities),
    }
}

fn slot_position(key: &str) -> Option<usize> {
    key.strip_prefix('f')?.parse().ok()
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
