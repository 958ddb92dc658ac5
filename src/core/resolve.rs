// =============================================================================
// RESOLVE — Lire et réécrire une forme à un chemin donné (Get / Update)
// =============================================================================
//
// GET suit les segments d'un chemin à travers une forme :
//   - Record   : recherche de la clé désignée par le segment
//   - Sequence : recherche par index numérique
//   - Scalar   : on ne peut pas descendre → NotFound
//
//   get("a.b",  { a: { b: 5 } })  = Found(5)
//   get("a.c",  { a: { b: 5 } })  = NotFound
//   get("xs.1", { xs: [1, 2] })   = Found(2)
//   get("",     s)                = Found(s)
//
// UPDATE reconstruit la forme en remplaçant la valeur au chemin. Le
// remplacement est soit une forme littérale, soit une règle appelée sur la
// valeur COURANTE (ou `undefined` si la dernière clé n'existe pas encore).
//
// RÈGLE D'OR : on ne crée jamais d'intermédiaire. Si un segment AVANT le
// dernier n'existe pas, la branche est laissée telle quelle (no-op) et la
// règle n'est pas appelée. Seul le DERNIER segment peut être absent, et
// seulement dans un record (on y insère l'entrée).
//
//   update("a.b", 1, { a: {} })   = { a: { b: 1 } }      (insertion)
//   update("x.b", 1, { a: {} })   = { a: {} }            (no-op)
//   update("xs.5", 1, { xs: [] }) = { xs: [] }           (index hors borne)
//
// =============================================================================

use std::fmt;

use tracing::trace;

use super::path::{Path, Segment};
use super::shape::{Field, Key, Resolved, Shape};
use crate::error::RuleResult;
use crate::rule::{Rule, SharedRule};

/// Ce qu'on écrit au chemin d'un Update : une forme, ou une règle appliquée
/// à la valeur courante.
#[derive(Clone)]
pub enum Replacement {
    Value(Shape),
    Rule(SharedRule),
}

impl Replacement {
    pub fn value(shape: Shape) -> Self {
        Replacement::Value(shape)
    }

    pub fn rule(rule: impl Rule + 'static) -> Self {
        Replacement::Rule(std::sync::Arc::new(rule))
    }

    /// Calcule la nouvelle valeur à partir de la valeur courante.
    fn apply(&self, current: Resolved<'_>) -> RuleResult<Shape> {
        match self {
            Replacement::Value(shape) => Ok(shape.clone()),
            Replacement::Rule(rule) => rule.call(&[current.into_shape()]),
        }
    }
}

impl From<Shape> for Replacement {
    fn from(shape: Shape) -> Self {
        Replacement::Value(shape)
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Value(shape) => f.debug_tuple("Value").field(shape).finish(),
            Replacement::Rule(rule) => f.debug_tuple("Rule").field(&rule.name()).finish(),
        }
    }
}

/// Descend d'un segment.
fn step<'a>(shape: &'a Shape, segment: &Segment) -> Option<&'a Shape> {
    match shape {
        Shape::Record(record) => record.find(segment).map(|(_, field)| &field.shape),
        Shape::Sequence(items) => segment.as_index().and_then(|i| items.get(i)),
        Shape::Scalar(_) => None,
    }
}

/// Résout `path` dans `shape`.
pub fn get<'a>(shape: &'a Shape, path: &Path) -> Resolved<'a> {
    let mut current = shape;
    for segment in path {
        match step(current, segment) {
            Some(next) => current = next,
            None => return Resolved::NotFound,
        }
    }
    Resolved::Found(current)
}

/// Remplace la valeur à `path`.
///
/// Ne retourne une erreur que si la règle de remplacement elle-même échoue.
pub fn update(shape: &Shape, path: &Path, with: &Replacement) -> RuleResult<Shape> {
    update_at(shape, path.segments(), with, 0)
}

fn update_at(
    shape: &Shape,
    segments: &[Segment],
    with: &Replacement,
    depth: usize,
) -> RuleResult<Shape> {
    let Some((segment, rest)) = segments.split_first() else {
        return with.apply(Resolved::Found(shape));
    };

    match shape {
        Shape::Record(record) => match record.find(segment) {
            Some((key, field)) => {
                let updated = update_at(&field.shape, rest, with, depth + 1)?;
                let mut out = record.clone();
                out.insert(key.clone(), field.with_shape(updated));
                Ok(Shape::Record(out))
            }
            None if rest.is_empty() => {
                let created = with.apply(Resolved::NotFound)?;
                let mut out = record.clone();
                out.insert(Key::from_segment(segment), Field::required(created));
                Ok(Shape::Record(out))
            }
            None => {
                trace!(segment = %segment, depth, "update: missing intermediate key, branch left unchanged");
                Ok(shape.clone())
            }
        },
        Shape::Sequence(items) => match segment.as_index().filter(|i| *i < items.len()) {
            Some(i) => {
                let updated = update_at(&items[i], rest, with, depth + 1)?;
                let mut out = items.clone();
                out[i] = updated;
                Ok(Shape::Sequence(out))
            }
            None => {
                trace!(segment = %segment, depth, len = items.len(), "update: no such element, branch left unchanged");
                Ok(shape.clone())
            }
        },
        Shape::Scalar(_) => {
            trace!(segment = %segment, depth, "update: cannot descend into a scalar");
            Ok(shape.clone())
        }
    }
}
