// =============================================================================
// TYPESIDE — Le vocabulaire scalaire des formes
// =============================================================================
//
// Une forme (Shape) se termine toujours par des SCALAIRES : des feuilles
// opaques qu'aucune opération ne traverse. Ce module définit ce qui peut
// se trouver à une feuille :
//
//   - un TYPE de base      : `string`, `number`, `boolean`...
//   - un LITTÉRAL          : `5`, `"admin"`, `true`, `null`
//   - un SYMBOLE           : identifiant opaque, utilisable comme clé
//   - un SLOT d'argument   : `arg0`, `arg1`... dans les patterns de Create
//   - `undefined`          : l'image "forme" de l'absence (NotFound)
//
// ANALOGIE : pour un schéma `{ id: number; role: "admin" }`, `number` est un
// BaseType et `"admin"` un littéral. Le moteur ne fait jamais de différence
// de traitement entre les deux : ce sont des feuilles.
//
// =============================================================================

use std::fmt;

/// Un type de base (feuille non littérale).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    String,
    Number,
    Boolean,
    Null,
    Unknown,
    Never,
    /// Type nommé défini par l'utilisateur (`Date`, `Uuid`...)
    Custom(std::string::String),
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::String => write!(f, "string"),
            BaseType::Number => write!(f, "number"),
            BaseType::Boolean => write!(f, "boolean"),
            BaseType::Null => write!(f, "null"),
            BaseType::Unknown => write!(f, "unknown"),
            BaseType::Never => write!(f, "never"),
            BaseType::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Une valeur littérale.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(std::string::String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
        }
    }
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// Une feuille de forme.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Type(BaseType),
    Literal(Value),
    /// Symbole unique : sert de clé, mais n'est jamais adressable par un chemin
    Symbol(std::string::String),
    /// Marqueur `argN` d'un pattern de Create
    Slot(usize),
    /// Ce que voit une règle quand la valeur cherchée n'existe pas
    Undefined,
}

impl Scalar {
    /// Nom court du genre de scalaire (pour les messages d'erreur)
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Type(_) => "type",
            Scalar::Literal(Value::String(_)) => "string literal",
            Scalar::Literal(Value::Integer(_)) | Scalar::Literal(Value::Float(_)) => {
                "number literal"
            }
            Scalar::Literal(Value::Boolean(_)) => "boolean literal",
            Scalar::Literal(Value::Null) => "null",
            Scalar::Symbol(_) => "symbol",
            Scalar::Slot(_) => "argument slot",
            Scalar::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Type(t) => write!(f, "{}", t),
            Scalar::Literal(v) => write!(f, "{}", v),
            Scalar::Symbol(name) => write!(f, "symbol({})", name),
            Scalar::Slot(i) => write!(f, "arg{}", i),
            Scalar::Undefined => write!(f, "undefined"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::Integer(42).as_integer(), Some(42));
        assert_eq!(Value::Float(1.5).as_integer(), None);
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Type(BaseType::Number).to_string(), "number");
        assert_eq!(Scalar::Literal(Value::String("a".into())).to_string(), "\"a\"");
        assert_eq!(Scalar::Slot(2).to_string(), "arg2");
        assert_eq!(Scalar::Type(BaseType::Custom("Date".into())).to_string(), "Date");
    }

    #[test]
    fn test_scalar_kind() {
        assert_eq!(Scalar::Literal(Value::Integer(1)).kind(), "number literal");
        assert_eq!(Scalar::Undefined.kind(), "undefined");
    }
}
