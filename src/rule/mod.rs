// =============================================================================
// RULE — Une transformation nommée et invocable sur des formes
// =============================================================================
//
// Partout où une opération accepte un "mapper" ou un "prédicat" (renommage
// de clés, transformation de valeurs, test d'appartenance...), elle accepte
// une RÈGLE. Une règle reçoit des formes positionnelles et rend une forme :
//
//   - règle UNAIRE  : args = [valeur]
//   - règle BINAIRE : args = [valeur, clé]
//
// Une règle unaire appelée avec deux arguments ignore simplement le second :
// c'est ce qui permet de passer indifféremment `v => v > 1` ou
// `(v, k) => k.startsWith("__")` à PickBy.
//
// Architecture :
//   mod.rs       → le trait `Rule`, les règles à base de closures, l'invocation
//   combinators  → pipe, not, identity, constant
//   apply        → application partielle avec slots ouverts (`Bind`, `Arg`)
//
// =============================================================================

pub mod apply;
pub mod combinators;

use std::sync::Arc;

use crate::core::shape::Shape;
use crate::core::typeside::Scalar;
use crate::error::{RuleError, RuleResult};

pub use apply::{bind, Arg, Bind};
pub use combinators::{constant, identity, not, pipe, Pipe};

/// Une transformation invocable.
///
/// Les règles doivent être réentrantes et sans effet de bord : le moteur
/// peut les appeler autant de fois qu'il veut, dans n'importe quel ordre,
/// depuis plusieurs threads.
pub trait Rule: Send + Sync {
    /// Nom de la règle (pour les erreurs et les traces)
    fn name(&self) -> &str;

    /// Invoque la règle sur des arguments positionnels.
    fn call(&self, args: &[Shape]) -> RuleResult<Shape>;
}

/// Une règle partageable, comme la stockent `Replacement`, `Pipe`, les
/// opérations de `objects`...
pub type SharedRule = Arc<dyn Rule>;

impl<R: Rule + ?Sized> Rule for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        (**self).call(args)
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        (**self).call(args)
    }
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        (**self).call(args)
    }
}

static UNDEFINED: Shape = Shape::Scalar(Scalar::Undefined);

/// L'argument `i`, ou `undefined` s'il n'a pas été fourni.
pub fn arg_or_undefined(args: &[Shape], i: usize) -> &Shape {
    args.get(i).unwrap_or(&UNDEFINED)
}

/// Exige au moins `expected` arguments.
pub fn require_args(rule: &str, args: &[Shape], expected: usize) -> RuleResult<()> {
    if args.len() < expected {
        return Err(RuleError::arity(rule, expected, args.len()));
    }
    Ok(())
}

/// Une règle définie par une closure sur la liste brute des arguments.
pub struct FnRule<F> {
    name: String,
    f: F,
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&[Shape]) -> RuleResult<Shape> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: &[Shape]) -> RuleResult<Shape> {
        (self.f)(args)
    }
}

impl<F> std::fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish()
    }
}

/// Règle à partir d'une closure sur les arguments bruts.
pub fn rule_fn<F>(name: impl Into<String>, f: F) -> FnRule<F>
where
    F: Fn(&[Shape]) -> RuleResult<Shape> + Send + Sync,
{
    FnRule { name: name.into(), f }
}

/// Règle unaire : ne regarde que la valeur.
pub fn unary<F>(
    name: impl Into<String>,
    f: F,
) -> FnRule<impl Fn(&[Shape]) -> RuleResult<Shape> + Send + Sync>
where
    F: Fn(&Shape) -> Shape + Send + Sync,
{
    rule_fn(name, move |args: &[Shape]| Ok(f(arg_or_undefined(args, 0))))
}

/// Règle binaire : `(valeur, clé)`.
pub fn binary<F>(
    name: impl Into<String>,
    f: F,
) -> FnRule<impl Fn(&[Shape]) -> RuleResult<Shape> + Send + Sync>
where
    F: Fn(&Shape, &Shape) -> Shape + Send + Sync,
{
    rule_fn(name, move |args: &[Shape]| {
        Ok(f(arg_or_undefined(args, 0), arg_or_undefined(args, 1)))
    })
}

/// Prédicat binaire `(valeur, clé) → bool`, rendu comme littéral booléen.
pub fn predicate<F>(
    name: impl Into<String>,
    f: F,
) -> FnRule<impl Fn(&[Shape]) -> RuleResult<Shape> + Send + Sync>
where
    F: Fn(&Shape, &Shape) -> bool + Send + Sync,
{
    rule_fn(name, move |args: &[Shape]| {
        Ok(Shape::bool(f(arg_or_undefined(args, 0), arg_or_undefined(args, 1))))
    })
}

/// Invoque une règle sur un argument (`Call<fn, a>`).
pub fn call1<R: Rule + ?Sized>(rule: &R, a: &Shape) -> RuleResult<Shape> {
    rule.call(std::slice::from_ref(a))
}

/// Invoque une règle sur deux arguments (`Call2<fn, value, key>`).
pub fn call2<R: Rule + ?Sized>(rule: &R, a: &Shape, b: &Shape) -> RuleResult<Shape> {
    rule.call(&[a.clone(), b.clone()])
}
