// =============================================================================
// FILTER — Sélection et regroupement d'entrées (Pick, Omit, PickBy, OmitBy,
//          GroupBy)
// =============================================================================
//
// Ces opérations parcourent les entrées du NIVEAU SUPÉRIEUR d'un record,
// dans l'ordre d'insertion, et évaluent une règle par entrée :
//
//   pick_by(v => v > 1, { a: 1, b: 2, c: 3 })   = { b: 2, c: 3 }
//   omit_by(v => v > 1, { a: 1, b: 2, c: 3 })   = { a: 1 }
//   group_by(v => v.kind, { a: x, b: y, c: z }) = { k1: [x, z], k2: [y] }
//
// DUALITÉ : pour tout prédicat total, pick_by et omit_by PARTITIONNENT les
// entrées : aucune clé dans les deux, l'union redonne toutes les clés.
// Un prédicat "passe" uniquement s'il rend le littéral `true`.
//
// Pick / Omit sont les mêmes opérations avec un ensemble littéral de clés
// au lieu d'un prédicat.
//
// Sur une forme qui n'est pas un record, le résultat est un record vide.
//
// =============================================================================

use indexmap::IndexMap;
use tracing::trace;

use super::shape::{Key, KeySet, Record, Shape};
use crate::error::RuleResult;
use crate::rule::{call2, Rule};

/// Garde les entrées dont la clé est dans `keys`.
pub fn pick(shape: &Shape, keys: &KeySet) -> Shape {
    retain(shape, |key| keys.contains(key))
}

/// Retire les entrées dont la clé est dans `keys`.
pub fn omit(shape: &Shape, keys: &KeySet) -> Shape {
    retain(shape, |key| !keys.contains(key))
}

fn retain(shape: &Shape, mut keep: impl FnMut(&Key) -> bool) -> Shape {
    let Some(record) = shape.as_record() else {
        return Shape::empty_record();
    };
    Shape::Record(
        record
            .iter()
            .filter(|(key, _)| keep(*key))
            .map(|(key, field)| (key.clone(), field.clone()))
            .collect(),
    )
}

/// Garde les entrées pour lesquelles `fn(valeur, clé)` est vrai.
pub fn pick_by<R: Rule + ?Sized>(shape: &Shape, rule: &R) -> RuleResult<Shape> {
    partition_by(shape, rule, true)
}

/// Garde les entrées pour lesquelles `fn(valeur, clé)` n'est PAS vrai.
pub fn omit_by<R: Rule + ?Sized>(shape: &Shape, rule: &R) -> RuleResult<Shape> {
    partition_by(shape, rule, false)
}

fn partition_by<R: Rule + ?Sized>(shape: &Shape, rule: &R, keep_matches: bool) -> RuleResult<Shape> {
    let Some(record) = shape.as_record() else {
        return Ok(Shape::empty_record());
    };
    let mut out = Record::new();
    for (key, field) in record {
        let matched = call2(rule, &field.shape, &key.to_shape())?.is_true();
        if matched == keep_matches {
            out.insert(key.clone(), field.clone());
        }
    }
    Ok(Shape::Record(out))
}

/// Regroupe les valeurs par l'étiquette `fn(valeur, clé)`.
///
/// Chaque étiquette distincte devient une clé dont la valeur est la séquence
/// des valeurs concernées, dans leur ordre d'origine. Les groupes
/// apparaissent dans l'ordre de leur première étiquette. Une étiquette qui
/// n'est pas une clé de propriété est ignorée.
pub fn group_by<R: Rule + ?Sized>(shape: &Shape, rule: &R) -> RuleResult<Shape> {
    let Some(record) = shape.as_record() else {
        return Ok(Shape::empty_record());
    };
    let mut groups: IndexMap<Key, Vec<Shape>> = IndexMap::new();
    for (key, field) in record {
        let label = call2(rule, &field.shape, &key.to_shape())?;
        match Key::from_shape(&label) {
            Some(group) => groups.entry(group).or_default().push(field.shape.clone()),
            None => {
                trace!(key = %key, label = %label, rule = rule.name(), "group_by: label is not a key, entry skipped");
            }
        }
    }

    let mut out = Record::new();
    for (group, values) in groups {
        out.add(group, Shape::Sequence(values));
    }
    Ok(Shape::Record(out))
}
