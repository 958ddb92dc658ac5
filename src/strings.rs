// =============================================================================
// STRINGS — Règles de conversion de casse
// =============================================================================
//
// Le moteur ne connaît aucune convention de nommage : le renommage de clés
// reçoit simplement une règle. Ce module fournit les trois règles de casse
// utilisées par les dérivés KebabCase / SnakeCase / CamelCase :
//
//   kebab_case : fooBar  → foo-bar
//   snake_case : fooBar  → foo_bar
//   camel_case : foo_bar → fooBar
//
// Seuls les littéraux chaîne sont convertis ; toute autre forme (clé
// numérique, symbole...) est rendue telle quelle.
//
// =============================================================================

use convert_case::{Case, Casing};

use crate::core::shape::Shape;
use crate::error::RuleResult;
use crate::rule::{arg_or_undefined, Rule};

/// Une règle de conversion de casse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseRule {
    Kebab,
    Snake,
    Camel,
}

impl CaseRule {
    pub fn convert(&self, s: &str) -> String {
        match self {
            CaseRule::Kebab => s.to_case(Case::Kebab),
            CaseRule::Snake => s.to_case(Case::Snake),
            CaseRule::Camel => s.to_case(Case::Camel),
        }
    }
}

impl Rule for CaseRule {
    fn name(&self) -> &str {
        match self {
            CaseRule::Kebab => "KebabCase",
            CaseRule::Snake => "SnakeCase",
            CaseRule::Camel => "CamelCase",
        }
    }

    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        let value = arg_or_undefined(args, 0);
        Ok(match value.as_str() {
            Some(s) => Shape::str(self.convert(s)),
            None => value.clone(),
        })
    }
}

pub fn kebab_case() -> CaseRule {
    CaseRule::Kebab
}

pub fn snake_case() -> CaseRule {
    CaseRule::Snake
}

pub fn camel_case() -> CaseRule {
    CaseRule::Camel
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::call1;

    #[test]
    fn test_conversions() {
        assert_eq!(kebab_case().convert("fooBar"), "foo-bar");
        assert_eq!(snake_case().convert("fooBar"), "foo_bar");
        assert_eq!(camel_case().convert("foo_bar"), "fooBar");
        assert_eq!(camel_case().convert("foo-bar"), "fooBar");
    }

    #[test]
    fn test_rule_on_string_literal() {
        assert_eq!(
            call1(&kebab_case(), &Shape::str("bazQux")).unwrap(),
            Shape::str("baz-qux")
        );
    }

    #[test]
    fn test_non_string_passes_through() {
        assert_eq!(call1(&snake_case(), &Shape::int(3)).unwrap(), Shape::int(3));
        assert_eq!(call1(&camel_case(), &Shape::symbol("s")).unwrap(), Shape::symbol("s"));
    }
}
