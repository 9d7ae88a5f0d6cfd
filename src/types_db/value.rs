use crate::common::exception::ExpressionError;
use crate::types_db::type_id::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single runtime value. Numeric variants compare and hash by numeric
/// value, so `Integer(1)` and `Decimal(1.0)` are interchangeable as join and
/// group-by keys.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i32),
    BigInt(i64),
    Decimal(f64),
    Varchar(String),
}

impl Value {
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::Null => TypeId::Invalid,
            Value::Boolean(_) => TypeId::Boolean,
            Value::Integer(_) => TypeId::Integer,
            Value::BigInt(_) => TypeId::BigInt,
            Value::Decimal(_) => TypeId::Decimal,
            Value::Varchar(_) => TypeId::Varchar,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Integer(_) | Value::BigInt(_) | Value::Decimal(_)
        )
    }

    /// Boolean interpretation, used by predicate evaluation. Null is false.
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Boolean(true))
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::BigInt(v) => Some(*v as f64),
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v as i64),
            Value::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Rank used to order values of different type families.
    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::BigInt(_) | Value::Decimal(_) => 2,
            Value::Varchar(_) => 3,
        }
    }

    fn arithmetic(
        &self,
        other: &Value,
        int_op: fn(i64, i64) -> i64,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<Value, ExpressionError> {
        if let (Some(l), Some(r)) = (self.as_i64(), other.as_i64()) {
            return Ok(Value::BigInt(int_op(l, r)));
        }
        match (self.as_f64(), other.as_f64()) {
            (Some(l), Some(r)) => Ok(Value::Decimal(float_op(l, r))),
            _ => Err(ExpressionError::TypeMismatch(format!(
                "cannot apply arithmetic to {} and {}",
                self.type_id(),
                other.type_id()
            ))),
        }
    }

    pub fn add(&self, other: &Value) -> Result<Value, ExpressionError> {
        self.arithmetic(other, |l, r| l.wrapping_add(r), |l, r| l + r)
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, ExpressionError> {
        self.arithmetic(other, |l, r| l.wrapping_sub(r), |l, r| l - r)
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, ExpressionError> {
        self.arithmetic(other, |l, r| l.wrapping_mul(r), |l, r| l * r)
    }

    pub fn divide(&self, other: &Value) -> Result<Value, ExpressionError> {
        if matches!(other.as_f64(), Some(r) if r == 0.0) {
            return Err(ExpressionError::DivisionByZero);
        }
        self.arithmetic(other, |l, r| l.wrapping_div(r), |l, r| l / r)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Boolean(l), Value::Boolean(r)) => l.cmp(r),
            (Value::Varchar(l), Value::Varchar(r)) => l.cmp(r),
            (l, r) if l.is_numeric() && r.is_numeric() => {
                // Exact integer comparison when possible, f64 otherwise.
                if let (Some(l), Some(r)) = (l.as_i64(), r.as_i64()) {
                    l.cmp(&r)
                } else {
                    let l = l.as_f64().unwrap_or(f64::NAN);
                    let r = r.as_f64().unwrap_or(f64::NAN);
                    l.total_cmp(&r)
                }
            }
            (l, r) => l.type_rank().cmp(&r.type_rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_rank().hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(v) => v.hash(state),
            // Numerics hash by value so that equal keys hash equal.
            Value::Integer(_) | Value::BigInt(_) | Value::Decimal(_) => {
                if let Some(v) = self.as_i64() {
                    (v as f64).to_bits().hash(state);
                } else if let Some(v) = self.as_f64() {
                    v.to_bits().hash(state);
                }
            }
            Value::Varchar(v) => v.hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Varchar(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Varchar(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Varchar(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cross_type_equality() {
        assert_eq!(Value::Integer(1), Value::BigInt(1));
        assert_eq!(Value::Integer(1), Value::Decimal(1.0));
        assert_ne!(Value::Integer(1), Value::Decimal(1.5));
    }

    #[test]
    fn test_ordering() {
        assert!(Value::Null < Value::Boolean(false));
        assert!(Value::Integer(2) < Value::Integer(10));
        assert!(Value::Decimal(1.5) < Value::Integer(2));
        assert!(Value::Varchar("a".into()) < Value::Varchar("b".into()));
    }

    #[test]
    fn test_hash_consistency() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Value::Integer(42));
        assert!(set.contains(&Value::BigInt(42)));
        assert!(set.contains(&Value::Decimal(42.0)));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(
            Value::Integer(2).add(&Value::Integer(3)).unwrap(),
            Value::BigInt(5)
        );
        assert_eq!(
            Value::Decimal(1.5).multiply(&Value::Integer(2)).unwrap(),
            Value::Decimal(3.0)
        );
        assert_eq!(
            Value::Integer(1).divide(&Value::Integer(0)),
            Err(ExpressionError::DivisionByZero)
        );
    }
}
