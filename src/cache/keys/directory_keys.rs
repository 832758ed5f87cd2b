/// 目录缓存键前缀
const DIRECTORY_PREFIX: &str = "vendedores:";

/// 缓存查询类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingKind {
    /// 经理在前，其后是全部销售代表
    #[default]
    All,
    Managers,
    SalesReps,
}

impl ListingKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todos" => Some(ListingKind::All),
            "gerentes" => Some(ListingKind::Managers),
            "vendedores" => Some(ListingKind::SalesReps),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListingKind::All => "todos",
            ListingKind::Managers => "gerentes",
            ListingKind::SalesReps => "vendedores",
        }
    }
}

/// 生成目录缓存键，未指定经理 (或为 0) 时使用 "all"
pub fn directory_key(kind: ListingKind, manager_code: Option<i64>) -> String {
    match manager_code.filter(|code| *code != 0) {
        Some(code) => format!("{}{}:{}", DIRECTORY_PREFIX, kind.as_str(), code),
        None => format!("{}{}:all", DIRECTORY_PREFIX, kind.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_depends_on_kind_and_manager() {
        assert_eq!(directory_key(ListingKind::SalesReps, Some(7)), "vendedores:vendedores:7");
        assert_eq!(directory_key(ListingKind::Managers, None), "vendedores:gerentes:all");
        assert_eq!(directory_key(ListingKind::All, Some(0)), "vendedores:todos:all");
    }

    #[test]
    fn kind_round_trips_through_query_value() {
        for kind in [ListingKind::All, ListingKind::Managers, ListingKind::SalesReps] {
            assert_eq!(ListingKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ListingKind::parse("outros"), None);
    }
}
