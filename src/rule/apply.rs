// =============================================================================
// APPLY — Application partielle avec slots ouverts
// =============================================================================
//
// Pour écrire des pipelines "point-free", on fixe une partie des arguments
// positionnels d'une règle et on laisse les autres OUVERTS :
//
//   Get<"a.b">            = bind(get(), [Bound("a.b")])           → attend obj
//   Update<_, 1, obj>     = bind(update, [Open, Bound(obj)])      → attend path
//
// À l'appel, les slots ouverts sont remplis de gauche à droite par les
// arguments fournis ; les arguments en trop sont ajoutés à la fin.
// Un slot ouvert jamais rempli :
//   - en queue de liste : simplement omis (la règle voit moins d'arguments)
//   - suivi d'un argument fixé : reçoit `undefined`
//
// =============================================================================

use super::Rule;
use crate::core::shape::Shape;
use crate::error::RuleResult;

/// Un argument positionnel d'une application partielle.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Bound(Shape),
    /// Le placeholder `_` : sera fourni à l'appel
    Open,
}

impl Arg {
    pub fn bound(shape: Shape) -> Self {
        Arg::Bound(shape)
    }
}

impl From<Shape> for Arg {
    fn from(shape: Shape) -> Self {
        Arg::Bound(shape)
    }
}

/// Une règle dont certains arguments sont déjà fixés.
pub struct Bind<R> {
    name: String,
    rule: R,
    args: Vec<Arg>,
}

impl<R: Rule> Bind<R> {
    pub fn new(rule: R) -> Self {
        Bind {
            name: rule.name().to_string(),
            rule,
            args: Vec::new(),
        }
    }

    /// Fixe l'argument positionnel suivant
    pub fn bound(mut self, shape: Shape) -> Self {
        self.args.push(Arg::Bound(shape));
        self
    }

    /// Laisse l'argument positionnel suivant ouvert
    pub fn open(mut self) -> Self {
        self.args.push(Arg::Open);
        self
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Combine les arguments fixés et ceux fournis à l'appel.
    fn merge(&self, supplied: &[Shape]) -> Vec<Shape> {
        let mut supplied = supplied.iter();
        let mut merged = Vec::with_capacity(self.args.len());
        let mut unfilled = 0usize;
        for arg in &self.args {
            let next = match arg {
                Arg::Bound(shape) => Some(shape),
                Arg::Open => supplied.next(),
            };
            match next {
                Some(shape) => {
                    merged.extend(std::iter::repeat(Shape::undefined()).take(unfilled));
                    unfilled = 0;
                    merged.push(shape.clone());
                }
                None => unfilled += 1,
            }
        }
        merged.extend(supplied.cloned());
        merged
    }
}

impl<R: Rule> Rule for Bind<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        self.rule.call(&self.merge(args))
    }
}

/// `PartialApply<rule, args>`
pub fn bind<R: Rule>(rule: R, args: impl IntoIterator<Item = Arg>) -> Bind<R> {
    Bind {
        name: rule.name().to_string(),
        rule,
        args: args.into_iter().collect(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{arg_or_undefined, rule_fn};

    /// Rend ses arguments tels quels, sous forme de séquence
    fn echo() -> impl Rule {
        rule_fn("Echo", |args: &[Shape]| Ok(Shape::sequence(args.iter().cloned())))
    }

    #[test]
    fn test_bound_then_supplied() {
        let b = Bind::new(echo()).bound(Shape::int(1));
        assert_eq!(
            b.call(&[Shape::int(2)]).unwrap(),
            Shape::sequence([Shape::int(1), Shape::int(2)])
        );
    }

    #[test]
    fn test_open_slot_filled_first() {
        let b = bind(echo(), [Arg::Open, Arg::bound(Shape::int(9))]);
        assert_eq!(
            b.call(&[Shape::int(1), Shape::int(2)]).unwrap(),
            Shape::sequence([Shape::int(1), Shape::int(9), Shape::int(2)])
        );
    }

    #[test]
    fn test_trailing_open_slots_are_dropped() {
        let b = Bind::new(echo()).bound(Shape::int(1)).open().open();
        assert_eq!(b.call(&[]).unwrap(), Shape::sequence([Shape::int(1)]));
    }

    #[test]
    fn test_inner_unfilled_slot_is_undefined() {
        let b = Bind::new(echo()).open().bound(Shape::int(1));
        assert_eq!(
            b.call(&[]).unwrap(),
            Shape::sequence([Shape::undefined(), Shape::int(1)])
        );
    }

    #[test]
    fn test_name_is_forwarded() {
        let r = rule_fn("First", |args: &[Shape]| Ok(arg_or_undefined(args, 0).clone()));
        assert_eq!(Bind::new(r).name(), "First");
    }
}
