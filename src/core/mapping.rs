// =============================================================================
// MAPPING — Renommer les clés d'une forme (MapKeys, MapKeysDeep, MapValues)
// =============================================================================
//
// Un renommage de clés est un "foncteur" sur les formes : il réécrit chaque
// clé via une règle `fn` tout en PRÉSERVANT la structure.
//
//   map_keys_deep(kebab, {
//     fooBar: {                        "foo-bar": {
//       bazQux: number;       ──▶        "baz-qux": number;
//     };                                };
//     items: [{ itemId: 1 }];          items: [{ "item-id": 1 }];
//   })
//
// RÈGLES DE RÉCURSION :
//   - Sequence : chaque élément est transformé (les éléments ne sont jamais
//                renommés, seul leur CONTENU l'est) ; même arité
//   - Record   : chaque clé passe par `fn`, la valeur est transformée
//                récursivement, le drapeau de présence est conservé
//   - Scalar   : inchangé (cas de base)
//
// CAS LIMITES (voir `MapperConfig`) :
//   - `fn` rend autre chose qu'une clé → l'entrée est supprimée
//     (ou garde sa clé d'origine si `drop_non_key_results = false`)
//   - deux clés d'origine donnent la même nouvelle clé → `CollisionPolicy`
//
// MapKeys est la version "un seul niveau" ; MapValues est le dual : les
// clés restent, chaque valeur devient `fn(valeur, clé)`.
//
// =============================================================================

use tracing::{debug, trace};

use super::shape::{Key, Record, Shape};
use crate::config::{CollisionPolicy, MapperConfig};
use crate::error::RuleResult;
use crate::rule::{call1, call2, Rule};

/// Renomme les clés du niveau supérieur uniquement.
///
/// Une forme qui n'est pas un record est rendue telle quelle.
pub fn map_keys<R: Rule + ?Sized>(
    shape: &Shape,
    rule: &R,
    config: &MapperConfig,
) -> RuleResult<Shape> {
    match shape {
        Shape::Record(record) => Ok(Shape::Record(rename_record(record, rule, config, false)?)),
        _ => Ok(shape.clone()),
    }
}

/// Renomme récursivement toutes les clés, à toute profondeur, en traversant
/// les séquences.
pub fn map_keys_deep<R: Rule + ?Sized>(
    shape: &Shape,
    rule: &R,
    config: &MapperConfig,
) -> RuleResult<Shape> {
    match shape {
        Shape::Record(record) => Ok(Shape::Record(rename_record(record, rule, config, true)?)),
        Shape::Sequence(items) => items
            .iter()
            .map(|item| map_keys_deep(item, rule, config))
            .collect::<RuleResult<Vec<_>>>()
            .map(Shape::Sequence),
        Shape::Scalar(_) => Ok(shape.clone()),
    }
}

fn rename_record<R: Rule + ?Sized>(
    record: &Record,
    rule: &R,
    config: &MapperConfig,
    deep: bool,
) -> RuleResult<Record> {
    let mut out = Record::new();
    for (key, field) in record {
        let renamed = call1(rule, &key.to_shape())?;
        let new_key = match Key::from_shape(&renamed) {
            Some(k) => k,
            None if config.drop_non_key_results => {
                trace!(key = %key, result = %renamed, rule = rule.name(), "rename: result is not a key, entry dropped");
                continue;
            }
            None => key.clone(),
        };

        if out.contains_key(&new_key) {
            debug!(key = %key, new_key = %new_key, policy = ?config.collision, "rename: key collision");
            if config.collision == CollisionPolicy::FirstWriteWins {
                continue;
            }
        }

        let value = if deep {
            map_keys_deep(&field.shape, rule, config)?
        } else {
            field.shape.clone()
        };
        out.insert(new_key, field.with_shape(value));
    }
    Ok(out)
}

/// Remplace chaque valeur par `fn(valeur, clé)`.
///
/// Sur une séquence, la "clé" est l'index de l'élément.
pub fn map_values<R: Rule + ?Sized>(shape: &Shape, rule: &R) -> RuleResult<Shape> {
    match shape {
        Shape::Record(record) => {
            let mut out = Record::new();
            for (key, field) in record {
                let value = call2(rule, &field.shape, &key.to_shape())?;
                out.insert(key.clone(), field.with_shape(value));
            }
            Ok(Shape::Record(out))
        }
        Shape::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| call2(rule, item, &Shape::int(i as i64)))
            .collect::<RuleResult<Vec<_>>>()
            .map(Shape::Sequence),
        Shape::Scalar(_) => Ok(shape.clone()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::Field;
    use crate::core::typeside::BaseType;
    use crate::record;
    use crate::rule::{binary, identity, unary};

    fn upper() -> impl Rule {
        unary("Upper", |k| match k.as_str() {
            Some(s) => Shape::str(s.to_uppercase()),
            None => k.clone(),
        })
    }

    fn nested() -> Shape {
        record! {
            "user" => record! {
                "name" => Shape::ty(BaseType::String),
                "tags" => Shape::sequence([record! { "label" => Shape::int(1) }]),
            },
            "id" => Shape::int(3),
        }
    }

    #[test]
    fn test_map_keys_deep_renames_every_level() {
        let out = map_keys_deep(&nested(), &upper(), &MapperConfig::default()).unwrap();
        let expected = record! {
            "USER" => record! {
                "NAME" => Shape::ty(BaseType::String),
                "TAGS" => Shape::sequence([record! { "LABEL" => Shape::int(1) }]),
            },
            "ID" => Shape::int(3),
        };
        assert_eq!(out, expected);
    }

    #[test]
    fn test_map_keys_is_shallow() {
        let out = map_keys(&nested(), &upper(), &MapperConfig::default()).unwrap();
        assert!(out.get("USER.name").is_found());
        assert!(out.get("USER.NAME").is_not_found());
    }

    #[test]
    fn test_identity_is_neutral() {
        let s = nested();
        assert_eq!(map_keys_deep(&s, &identity(), &MapperConfig::default()).unwrap(), s);
    }

    #[test]
    fn test_sequence_of_records_keeps_arity() {
        let s = Shape::sequence([record! { "a" => Shape::int(1) }, record! { "b" => Shape::int(2) }]);
        let out = map_keys_deep(&s, &upper(), &MapperConfig::default()).unwrap();
        assert_eq!(
            out,
            Shape::sequence([record! { "A" => Shape::int(1) }, record! { "B" => Shape::int(2) }])
        );
    }

    #[test]
    fn test_scalar_unchanged() {
        let s = Shape::int(1);
        assert_eq!(map_keys_deep(&s, &upper(), &MapperConfig::default()).unwrap(), s);
    }

    #[test]
    fn test_presence_flag_preserved() {
        let mut r = Record::new();
        r.add_optional("a", Shape::int(1));
        let out = map_keys(&Shape::Record(r), &upper(), &MapperConfig::default()).unwrap();
        let field = out.as_record().and_then(|r| r.get(&Key::name("A"))).cloned();
        assert_eq!(field, Some(Field::optional(Shape::int(1))));
    }

    fn colliding() -> Shape {
        record! { "a" => Shape::int(1), "A" => Shape::int(2), "b" => Shape::int(3) }
    }

    #[test]
    fn test_collision_last_write_wins() {
        let out = map_keys(&colliding(), &upper(), &MapperConfig::default()).unwrap();
        assert_eq!(out, record! { "A" => Shape::int(2), "B" => Shape::int(3) });
        // la clé garde la position de sa première apparition
        let keys: Vec<_> = out.as_record().map(|r| r.keys().cloned().collect()).unwrap_or_default();
        assert_eq!(keys, vec![Key::name("A"), Key::name("B")]);
    }

    #[test]
    fn test_collision_first_write_wins() {
        let config = MapperConfig::new().collision(CollisionPolicy::FirstWriteWins);
        let out = map_keys(&colliding(), &upper(), &config).unwrap();
        assert_eq!(out, record! { "A" => Shape::int(1), "B" => Shape::int(3) });
    }

    #[test]
    fn test_non_key_result_dropped_or_kept() {
        let to_type = unary("ToType", |k| {
            if k.as_str() == Some("drop") {
                Shape::ty(BaseType::Number)
            } else {
                k.clone()
            }
        });
        let s = record! { "drop" => Shape::int(1), "keep" => Shape::int(2) };

        let out = map_keys(&s, &to_type, &MapperConfig::default()).unwrap();
        assert_eq!(out, record! { "keep" => Shape::int(2) });

        let config = MapperConfig::new().drop_non_key_results(false);
        let out = map_keys(&s, &to_type, &config).unwrap();
        assert_eq!(out, s);
    }

    #[test]
    fn test_map_values_sees_key() {
        let s = record! { "a" => Shape::int(1), "b" => Shape::int(2) };
        let key_of = binary("KeyOf", |_, k| k.clone());
        let out = map_values(&s, &key_of).unwrap();
        assert_eq!(out, record! { "a" => Shape::str("a"), "b" => Shape::str("b") });
    }

    #[test]
    fn test_map_values_on_sequence_uses_index() {
        let s = Shape::sequence([Shape::str("x"), Shape::str("y")]);
        let key_of = binary("KeyOf", |_, k| k.clone());
        assert_eq!(
            map_values(&s, &key_of).unwrap(),
            Shape::sequence([Shape::int(0), Shape::int(1)])
        );
    }
}
