use std::fmt;

/// Storage types supported by the value system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    Invalid,
    Boolean,
    Integer,
    BigInt,
    Decimal,
    Varchar,
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeId::Invalid => "INVALID",
            TypeId::Boolean => "BOOLEAN",
            TypeId::Integer => "INTEGER",
            TypeId::BigInt => "BIGINT",
            TypeId::Decimal => "DECIMAL",
            TypeId::Varchar => "VARCHAR",
        };
        write!(f, "{}", name)
    }
}
