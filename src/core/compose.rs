// =============================================================================
// COMPOSE — Construire des formes à partir d'autres formes
// =============================================================================
//
// Les primitives de composition structurelle :
//
//   assign(s1, ..., sN)      : fusion superficielle de gauche à droite
//                              assign({a:1, b:{x:1}}, {b:{y:2}}) = {a:1, b:{y:2}}
//   create(pattern, args)    : instancie un pattern à slots
//                              create({a: arg0, b: [arg1]}, [1, 2]) = {a:1, b:[2]}
//   required / partial       : bascule le drapeau de présence des clés
//                              choisies (toutes par défaut)
//   required_by / partial_by : idem, clés choisies par un prédicat
//   record_of(keys, v)       : { k: v } pour chaque clé
//   keys / values / entries / from_entries : vues à plat d'une forme
//
// CREATE se fait en DEUX PASSES :
//   1. parcours du pattern → liste de (emplacement, n° de slot)
//   2. substitution de chaque emplacement par l'argument correspondant
// L'ordre de parcours n'a donc aucune influence sur l'attribution des
// arguments, même dans des patterns profondément imbriqués.
//
// =============================================================================

use std::convert::Infallible;

use super::shape::{Field, Key, KeySet, Record, Shape};
use super::typeside::Scalar;
use crate::error::RuleResult;
use crate::rule::{call2, Rule};

/// Fusion superficielle de gauche à droite des records.
///
/// Les arguments qui ne sont pas des records sont ignorés. Les clés des
/// formes suivantes écrasent celles des précédentes (valeur ET drapeau de
/// présence) ; les records imbriqués sont remplacés en bloc.
pub fn assign<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Shape {
    let mut out = Record::new();
    for record in shapes.into_iter().filter_map(Shape::as_record) {
        for (key, field) in record {
            out.insert(key.clone(), field.clone());
        }
    }
    Shape::Record(out)
}

/// Un pas dans la forme : champ d'un record ou élément d'une séquence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Field(Key),
    Element(usize),
}

/// Un slot trouvé dans un pattern : où il est, et quel argument il attend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSite {
    pub location: Vec<Step>,
    pub slot: usize,
}

/// Passe 1 de Create : liste tous les slots du pattern.
pub fn collect_slots(pattern: &Shape) -> Vec<SlotSite> {
    let mut sites = Vec::new();
    let mut location = Vec::new();
    walk_slots(pattern, &mut location, &mut sites);
    sites
}

fn walk_slots(shape: &Shape, location: &mut Vec<Step>, sites: &mut Vec<SlotSite>) {
    match shape {
        Shape::Scalar(Scalar::Slot(slot)) => sites.push(SlotSite {
            location: location.clone(),
            slot: *slot,
        }),
        Shape::Scalar(_) => {}
        Shape::Record(record) => {
            for (key, field) in record {
                location.push(Step::Field(key.clone()));
                walk_slots(&field.shape, location, sites);
                location.pop();
            }
        }
        Shape::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                location.push(Step::Element(i));
                walk_slots(item, location, sites);
                location.pop();
            }
        }
    }
}

fn locate_mut<'a>(shape: &'a mut Shape, location: &[Step]) -> Option<&'a mut Shape> {
    let Some((step, rest)) = location.split_first() else {
        return Some(shape);
    };
    let next = match (shape, step) {
        (Shape::Record(record), Step::Field(key)) => &mut record.get_mut(key)?.shape,
        (Shape::Sequence(items), Step::Element(i)) => items.get_mut(*i)?,
        _ => return None,
    };
    locate_mut(next, rest)
}

/// Instancie `pattern` : chaque slot `argN` est remplacé par `args[N]`
/// (`undefined` si l'argument manque). Le reste est copié tel quel.
pub fn create(pattern: &Shape, args: &[Shape]) -> Shape {
    let sites = collect_slots(pattern);
    let mut out = pattern.clone();
    for site in &sites {
        if let Some(target) = locate_mut(&mut out, &site.location) {
            *target = args.get(site.slot).cloned().unwrap_or_else(Shape::undefined);
        }
    }
    out
}

fn set_presence<E>(
    shape: &Shape,
    optional: bool,
    mut selected: impl FnMut(&Key, &Field) -> Result<bool, E>,
) -> Result<Shape, E> {
    let Some(record) = shape.as_record() else {
        return Ok(shape.clone());
    };
    let mut out = Record::new();
    for (key, field) in record {
        let mut field = field.clone();
        if selected(key, &field)? {
            field.optional = optional;
        }
        out.insert(key.clone(), field);
    }
    Ok(Shape::Record(out))
}

/// Rend obligatoires les clés choisies (toutes si `keys` vaut `None`).
pub fn required(shape: &Shape, keys: Option<&KeySet>) -> Shape {
    toggle(shape, keys, false)
}

/// Rend optionnelles les clés choisies (toutes si `keys` vaut `None`).
pub fn partial(shape: &Shape, keys: Option<&KeySet>) -> Shape {
    toggle(shape, keys, true)
}

fn toggle(shape: &Shape, keys: Option<&KeySet>, optional: bool) -> Shape {
    let selected =
        |key: &Key, _: &Field| Ok::<_, Infallible>(keys.map_or(true, |ks| ks.contains(key)));
    match set_presence(shape, optional, selected) {
        Ok(out) => out,
        Err(never) => match never {},
    }
}

/// Rend obligatoires les clés pour lesquelles `fn(valeur, clé)` est vrai.
pub fn required_by<R: Rule + ?Sized>(shape: &Shape, rule: &R) -> RuleResult<Shape> {
    set_presence(shape, false, |key, field| {
        Ok(call2(rule, &field.shape, &key.to_shape())?.is_true())
    })
}

/// Rend optionnelles les clés pour lesquelles `fn(valeur, clé)` est vrai.
pub fn partial_by<R: Rule + ?Sized>(shape: &Shape, rule: &R) -> RuleResult<Shape> {
    set_presence(shape, true, |key, field| {
        Ok(call2(rule, &field.shape, &key.to_shape())?.is_true())
    })
}

/// `Record<keys, value>` : chaque clé associée à la même forme.
pub fn record_of(keys: &KeySet, value: &Shape) -> Shape {
    Shape::Record(
        keys.iter()
            .map(|key| (key.clone(), Field::required(value.clone())))
            .collect(),
    )
}

/// Les clés d'une forme : clés d'un record, indices d'une séquence.
pub fn keys(shape: &Shape) -> Vec<Key> {
    match shape {
        Shape::Record(record) => record.keys().cloned().collect(),
        Shape::Sequence(items) => (0..items.len()).map(|i| Key::Number(i as i64)).collect(),
        Shape::Scalar(_) => Vec::new(),
    }
}

/// Les valeurs d'une forme : valeurs d'un record, éléments d'une séquence.
pub fn values(shape: &Shape) -> Vec<Shape> {
    match shape {
        Shape::Record(record) => record.iter().map(|(_, field)| field.shape.clone()).collect(),
        Shape::Sequence(items) => items.clone(),
        Shape::Scalar(_) => Vec::new(),
    }
}

/// Les paires (clé, valeur) d'une forme.
pub fn entries(shape: &Shape) -> Vec<(Key, Shape)> {
    match shape {
        Shape::Record(record) => record
            .iter()
            .map(|(key, field)| (key.clone(), field.shape.clone()))
            .collect(),
        Shape::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (Key::Number(i as i64), item.clone()))
            .collect(),
        Shape::Scalar(_) => Vec::new(),
    }
}

/// Reconstruit un record à partir de paires ; en cas de doublon, la
/// dernière paire gagne.
pub fn from_entries(pairs: impl IntoIterator<Item = (Key, Shape)>) -> Shape {
    Shape::Record(
        pairs
            .into_iter()
            .map(|(key, shape)| (key, Field::required(shape)))
            .collect(),
    )
}
