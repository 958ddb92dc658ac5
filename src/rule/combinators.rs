// =============================================================================
// COMBINATORS — Composer des règles entre elles
// =============================================================================
//
//   pipe(f, g)   : g(f(args...))   ; la première règle voit tous les args,
//                                    les suivantes ne voient que le résultat
//   not(p)       : !p(args...)     ; négation d'un prédicat
//   identity()   : args[0]
//   constant(s)  : s, quels que soient les args
//
// =============================================================================

use std::sync::Arc;

use super::{arg_or_undefined, Rule, SharedRule};
use crate::core::shape::Shape;
use crate::error::RuleResult;

/// Composition séquentielle de règles.
#[derive(Clone)]
pub struct Pipe {
    name: String,
    stages: Vec<SharedRule>,
}

impl Pipe {
    pub fn new() -> Self {
        Pipe {
            name: "Pipe".to_string(),
            stages: Vec::new(),
        }
    }

    /// Ajoute une étape à la fin du pipeline
    pub fn then(mut self, rule: impl Rule + 'static) -> Self {
        self.stages.push(Arc::new(rule));
        self.name = format!(
            "Pipe<{}>",
            self.stages.iter().map(|r| r.name()).collect::<Vec<_>>().join(", ")
        );
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for Pipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Pipe {
    fn name(&self) -> &str {
        &self.name
    }

    /// Un pipeline vide se comporte comme l'identité.
    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        let mut stages = self.stages.iter();
        let mut current = match stages.next() {
            Some(first) => first.call(args)?,
            None => return Ok(arg_or_undefined(args, 0).clone()),
        };
        for stage in stages {
            current = stage.call(std::slice::from_ref(&current))?;
        }
        Ok(current)
    }
}

/// `g ∘ f`
pub fn pipe(first: impl Rule + 'static, second: impl Rule + 'static) -> Pipe {
    Pipe::new().then(first).then(second)
}

/// Négation d'un prédicat.
pub struct Not<R> {
    name: String,
    inner: R,
}

impl<R: Rule> Rule for Not<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        Ok(Shape::bool(!self.inner.call(args)?.is_true()))
    }
}

pub fn not<R: Rule>(inner: R) -> Not<R> {
    Not {
        name: format!("Not<{}>", inner.name()),
        inner,
    }
}

/// `x => x`
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Rule for Identity {
    fn name(&self) -> &str {
        "Identity"
    }

    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        Ok(arg_or_undefined(args, 0).clone())
    }
}

pub fn identity() -> Identity {
    Identity
}

/// `_ => shape`
#[derive(Debug, Clone)]
pub struct Constant(Shape);

impl Rule for Constant {
    fn name(&self) -> &str {
        "Constant"
    }

    fn call(&self, _args: &[Shape]) -> RuleResult<Shape> {
        Ok(self.0.clone())
    }
}

pub fn constant(shape: Shape) -> Constant {
    Constant(shape)
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{call1, call2, predicate, unary};

    fn inc() -> impl Rule {
        unary("Inc", |v| Shape::int(v.as_integer().unwrap_or(0) + 1))
    }

    #[test]
    fn test_pipe_composes_left_to_right() {
        let double = unary("Double", |v| Shape::int(v.as_integer().unwrap_or(0) * 2));
        let p = pipe(inc(), double);
        // (3 + 1) * 2
        assert_eq!(call1(&p, &Shape::int(3)).unwrap(), Shape::int(8));
        assert_eq!(p.name(), "Pipe<Inc, Double>");
    }

    #[test]
    fn test_pipe_first_stage_sees_all_args() {
        let key_of = crate::rule::binary("KeyOf", |_, k| k.clone());
        let p = Pipe::new().then(key_of).then(identity());
        assert_eq!(
            call2(&p, &Shape::int(1), &Shape::str("k")).unwrap(),
            Shape::str("k")
        );
    }

    #[test]
    fn test_empty_pipe_is_identity() {
        let p = Pipe::new();
        assert!(p.is_empty());
        assert_eq!(call1(&p, &Shape::int(4)).unwrap(), Shape::int(4));
    }

    #[test]
    fn test_not() {
        let is_one = predicate("IsOne", |v, _| *v == Shape::int(1));
        let n = not(is_one);
        assert_eq!(n.name(), "Not<IsOne>");
        assert!(!call1(&n, &Shape::int(1)).unwrap().is_true());
        assert!(call1(&n, &Shape::int(2)).unwrap().is_true());
    }

    #[test]
    fn test_constant() {
        let c = constant(Shape::str("x"));
        assert_eq!(call1(&c, &Shape::int(1)).unwrap(), Shape::str("x"));
    }
}
