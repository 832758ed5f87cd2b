use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 一条经理或销售代表记录，字段名由响应的 metadata 决定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryRecord(BTreeMap<String, String>);

impl DirectoryRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DirectoryRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// 目录实体角色 (TIPVEND)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Manager,
    SalesRep,
}

impl Role {
    pub fn code(self) -> &'static str {
        match self {
            Role::Manager => "G",
            Role::SalesRep => "V",
        }
    }
}

/// 新建销售代表或经理的请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSeller {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "empresa")]
    pub company_code: Option<i64>,
    #[serde(default, rename = "codGerente")]
    pub manager_code: Option<i64>,
}

impl NewSeller {
    // 0 和空字符串都视为未提供
    pub fn manager_code(&self) -> Option<i64> {
        self.manager_code.filter(|code| *code != 0)
    }

    pub fn company_code(&self) -> Option<i64> {
        self.company_code.filter(|code| *code != 0)
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    pub fn role(&self) -> Role {
        if self.manager_code().is_some() {
            Role::SalesRep
        } else {
            Role::Manager
        }
    }
}

/// 创建后回读到的代码，以及调用方提供的原始名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedSeller {
    #[serde(rename = "codVendedor")]
    pub seller_code: i64,
    #[serde(rename = "nome")]
    pub name: String,
}
