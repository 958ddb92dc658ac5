// =============================================================================
// ERROR — Erreurs d'invocation des règles
// =============================================================================
//
// Les opérations sur les formes n'échouent JAMAIS au niveau structurel :
// une clé absente donne `Resolved::NotFound`, une mise à jour impossible
// est un no-op. Les seules erreurs sont des erreurs d'USAGE d'une règle :
// trop peu d'arguments positionnels, ou un argument du mauvais genre
// (un chemin qui n'est pas une chaîne, des entrées qui ne sont pas une
// séquence de paires...).
//
// =============================================================================

use thiserror::Error;

/// Alias de résultat pour tout ce qui invoque une règle.
pub type RuleResult<T> = Result<T, RuleError>;

/// Erreur levée par l'invocation d'une règle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// La règle a reçu moins d'arguments positionnels qu'elle n'en exige.
    #[error("rule `{rule}` expects {expected} argument(s), got {found}")]
    Arity {
        rule: String,
        expected: usize,
        found: usize,
    },

    /// Un argument positionnel n'a pas le genre attendu.
    #[error("rule `{rule}`: argument {position} must be {expected}, found {found}")]
    ExpectedKind {
        rule: String,
        position: usize,
        expected: &'static str,
        found: &'static str,
    },
}

impl RuleError {
    pub fn arity(rule: impl Into<String>, expected: usize, found: usize) -> Self {
        RuleError::Arity {
            rule: rule.into(),
            expected,
            found,
        }
    }

    pub fn expected_kind(
        rule: impl Into<String>,
        position: usize,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        RuleError::ExpectedKind {
            rule: rule.into(),
            position,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = RuleError::arity("Get", 2, 1);
        assert_eq!(e.to_string(), "rule `Get` expects 2 argument(s), got 1");

        let e = RuleError::expected_kind("Get", 0, "a path", "record");
        assert_eq!(e.to_string(), "rule `Get`: argument 0 must be a path, found record");
    }
}
