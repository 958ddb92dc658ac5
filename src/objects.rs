// =============================================================================
// OBJECTS — La surface publique des opérations, sous forme de règles
// =============================================================================
//
// Chaque opération du moteur existe ici sous forme de RÈGLE, pour être
// composée dans des pipelines "point-free" :
//
//   let pipeline = Pipe::new()
//       .then(bind(objects::get(), [Arg::bound(Shape::str("user"))]))
//       .then(objects::kebab_case_deep())
//       .then(objects::all_paths());
//   let paths = pipeline.call(&[schema])?;
//
// CONVENTIONS :
//   - les arguments de type FORME (chemins, ensembles de clés, objets,
//     valeurs, arguments de Assign/Create) sont POSITIONNELS : on les fixe
//     ou on les laisse ouverts avec `bind` ;
//   - un ensemble de clés s'écrit comme une clé seule ou une séquence de
//     clés : `"a"`, `["a", 1]` ;
//   - les arguments de type RÈGLE sont capturés à la construction
//     (`pick_by(gt1)`, `update_with(inc)`) ;
//   - les résultats "union" (keys, values, entries, all_paths) sont rendus
//     sous forme de séquences ;
//   - `get` rend `undefined` quand le chemin ne se résout pas.
//
// =============================================================================

use crate::config::MapperConfig;
use crate::core::path::Path;
use crate::core::resolve::{self, Replacement};
use crate::core::shape::{Key, KeySet, Shape};
use crate::core::{compose, enumerate, filter, mapping};
use crate::error::{RuleError, RuleResult};
use crate::rule::{arg_or_undefined, require_args, rule_fn, Rule};
use crate::strings::{self, CaseRule};

/// Lit un argument chemin : littéral chaîne, ou entier positif (un index).
fn path_arg(rule: &str, args: &[Shape], position: usize) -> RuleResult<Path> {
    let shape = arg_or_undefined(args, position);
    if let Some(s) = shape.as_str() {
        return Ok(Path::parse(s));
    }
    match shape.as_integer().and_then(|n| usize::try_from(n).ok()) {
        Some(i) => Ok(Path::from(i)),
        None => Err(RuleError::expected_kind(rule, position, "a path", shape.kind())),
    }
}

/// Lit un argument ensemble de clés : une clé, ou une séquence de clés.
fn key_set_arg(rule: &str, args: &[Shape], position: usize) -> RuleResult<KeySet> {
    let shape = arg_or_undefined(args, position);
    let keys = match shape {
        Shape::Sequence(items) => items.iter().map(Key::from_shape).collect::<Option<KeySet>>(),
        _ => Key::from_shape(shape).map(|key| [key].into_iter().collect()),
    };
    keys.ok_or_else(|| {
        RuleError::expected_kind(rule, position, "a key or a sequence of keys", shape.kind())
    })
}

/// `[keys, obj]`, ou `[obj]` seul pour toutes les clés.
fn optional_key_set_args<'a>(
    rule: &str,
    args: &'a [Shape],
) -> RuleResult<(Option<KeySet>, &'a Shape)> {
    match args {
        [obj] => Ok((None, obj)),
        [keys, obj, ..] if keys.is_undefined() => Ok((None, obj)),
        [_, obj, ..] => Ok((Some(key_set_arg(rule, args, 0)?), obj)),
        [] => Err(RuleError::arity(rule, 1, 0)),
    }
}

fn key_pair(shape: &Shape) -> Option<(Key, Shape)> {
    match shape.as_sequence()? {
        [key, value] => Some((Key::from_shape(key)?, value.clone())),
        _ => None,
    }
}

/// `[[k, v], ...]` → `{ k: v, ... }`. Les éléments qui ne sont pas des
/// paires `[clé, valeur]` sont ignorés.
pub fn from_entries() -> impl Rule {
    rule_fn("FromEntries", |args: &[Shape]| {
        require_args("FromEntries", args, 1)?;
        let pairs = args[0].as_sequence().ok_or_else(|| {
            RuleError::expected_kind("FromEntries", 0, "a sequence of pairs", args[0].kind())
        })?;
        Ok(compose::from_entries(pairs.iter().filter_map(key_pair)))
    })
}

/// `{ k: v, ... }` → `[[k, v], ...]`
pub fn entries() -> impl Rule {
    rule_fn("Entries", |args: &[Shape]| {
        require_args("Entries", args, 1)?;
        Ok(Shape::sequence(
            compose::entries(&args[0])
                .into_iter()
                .map(|(key, value)| Shape::sequence([key.to_shape(), value])),
        ))
    })
}

pub fn map_values<R: Rule + 'static>(rule: R) -> impl Rule {
    rule_fn(format!("MapValues<{}>", rule.name()), move |args: &[Shape]| {
        require_args("MapValues", args, 1)?;
        mapping::map_values(&args[0], &rule)
    })
}

pub fn map_keys<R: Rule + 'static>(rule: R) -> impl Rule {
    map_keys_with(rule, MapperConfig::default())
}

pub fn map_keys_with<R: Rule + 'static>(rule: R, config: MapperConfig) -> impl Rule {
    rule_fn(format!("MapKeys<{}>", rule.name()), move |args: &[Shape]| {
        require_args("MapKeys", args, 1)?;
        mapping::map_keys(&args[0], &rule, &config)
    })
}

pub fn map_keys_deep<R: Rule + 'static>(rule: R) -> impl Rule {
    map_keys_deep_with(rule, MapperConfig::default())
}

pub fn map_keys_deep_with<R: Rule + 'static>(rule: R, config: MapperConfig) -> impl Rule {
    rule_fn(format!("MapKeysDeep<{}>", rule.name()), move |args: &[Shape]| {
        require_args("MapKeysDeep", args, 1)?;
        mapping::map_keys_deep(&args[0], &rule, &config)
    })
}

pub fn kebab_case() -> impl Rule {
    map_keys(strings::kebab_case())
}

pub fn snake_case() -> impl Rule {
    map_keys(strings::snake_case())
}

pub fn camel_case() -> impl Rule {
    map_keys(strings::camel_case())
}

pub fn kebab_case_deep() -> impl Rule {
    map_keys_deep(strings::kebab_case())
}

pub fn snake_case_deep() -> impl Rule {
    map_keys_deep(strings::snake_case())
}

pub fn camel_case_deep() -> impl Rule {
    map_keys_deep(strings::camel_case())
}

/// Variante des dérivés de casse avec une configuration explicite.
pub fn case_keys_with(case: CaseRule, deep: bool, config: MapperConfig) -> Box<dyn Rule> {
    if deep {
        Box::new(map_keys_deep_with(case, config))
    } else {
        Box::new(map_keys_with(case, config))
    }
}

/// `[keys, obj]`
pub fn pick() -> impl Rule {
    rule_fn("Pick", |args: &[Shape]| {
        require_args("Pick", args, 2)?;
        let keys = key_set_arg("Pick", args, 0)?;
        Ok(filter::pick(&args[1], &keys))
    })
}

/// `[keys, obj]`
pub fn omit() -> impl Rule {
    rule_fn("Omit", |args: &[Shape]| {
        require_args("Omit", args, 2)?;
        let keys = key_set_arg("Omit", args, 0)?;
        Ok(filter::omit(&args[1], &keys))
    })
}

pub fn pick_by<R: Rule + 'static>(rule: R) -> impl Rule {
    rule_fn(format!("PickBy<{}>", rule.name()), move |args: &[Shape]| {
        require_args("PickBy", args, 1)?;
        filter::pick_by(&args[0], &rule)
    })
}

pub fn omit_by<R: Rule + 'static>(rule: R) -> impl Rule {
    rule_fn(format!("OmitBy<{}>", rule.name()), move |args: &[Shape]| {
        require_args("OmitBy", args, 1)?;
        filter::omit_by(&args[0], &rule)
    })
}

/// Variadique : fusionne tous ses arguments.
pub fn assign() -> impl Rule {
    rule_fn("Assign", |args: &[Shape]| Ok(compose::assign(args)))
}

pub fn group_by<R: Rule + 'static>(rule: R) -> impl Rule {
    rule_fn(format!("GroupBy<{}>", rule.name()), move |args: &[Shape]| {
        require_args("GroupBy", args, 1)?;
        filter::group_by(&args[0], &rule)
    })
}

/// `[path, obj]` → la forme au chemin, ou `undefined`.
pub fn get() -> impl Rule {
    rule_fn("Get", |args: &[Shape]| {
        require_args("Get", args, 2)?;
        let path = path_arg("Get", args, 0)?;
        Ok(resolve::get(&args[1], &path).into_shape())
    })
}

/// `[path, value, obj]` → obj avec `value` au chemin.
pub fn update() -> impl Rule {
    rule_fn("Update", |args: &[Shape]| {
        require_args("Update", args, 3)?;
        let path = path_arg("Update", args, 0)?;
        let with = Replacement::value(args[1].clone());
        resolve::update(&args[2], &path, &with)
    })
}

/// `[path, obj]` → obj avec la valeur au chemin passée dans `rule`.
pub fn update_with<R: Rule + 'static>(rule: R) -> impl Rule {
    let name = format!("Update<{}>", rule.name());
    let with = Replacement::rule(rule);
    rule_fn(name, move |args: &[Shape]| {
        require_args("Update", args, 2)?;
        let path = path_arg("Update", args, 0)?;
        resolve::update(&args[1], &path, &with)
    })
}

/// `[pattern, arg0, arg1, ...]` → le pattern instancié.
pub fn create() -> impl Rule {
    rule_fn("Create", |args: &[Shape]| {
        require_args("Create", args, 1)?;
        Ok(compose::create(&args[0], &args[1..]))
    })
}

/// `[keys, obj]`, ou `[obj]` pour rendre toutes les clés obligatoires.
/// Des clés `undefined` (slot laissé ouvert) sélectionnent aussi tout.
pub fn required() -> impl Rule {
    rule_fn("Required", |args: &[Shape]| {
        let (keys, obj) = optional_key_set_args("Required", args)?;
        Ok(compose::required(obj, keys.as_ref()))
    })
}

pub fn required_by<R: Rule + 'static>(rule: R) -> impl Rule {
    rule_fn(format!("RequiredBy<{}>", rule.name()), move |args: &[Shape]| {
        require_args("RequiredBy", args, 1)?;
        compose::required_by(&args[0], &rule)
    })
}

/// `[keys, obj]`, ou `[obj]` pour rendre toutes les clés optionnelles.
pub fn partial() -> impl Rule {
    rule_fn("Partial", |args: &[Shape]| {
        let (keys, obj) = optional_key_set_args("Partial", args)?;
        Ok(compose::partial(obj, keys.as_ref()))
    })
}

pub fn partial_by<R: Rule + 'static>(rule: R) -> impl Rule {
    rule_fn(format!("PartialBy<{}>", rule.name()), move |args: &[Shape]| {
        require_args("PartialBy", args, 1)?;
        compose::partial_by(&args[0], &rule)
    })
}

/// `[keys, value]` → `{ k: value }` pour chaque clé.
pub fn record() -> impl Rule {
    rule_fn("Record", |args: &[Shape]| {
        require_args("Record", args, 2)?;
        let keys = key_set_arg("Record", args, 0)?;
        Ok(compose::record_of(&keys, &args[1]))
    })
}

pub fn keys() -> impl Rule {
    rule_fn("Keys", |args: &[Shape]| {
        require_args("Keys", args, 1)?;
        Ok(Shape::sequence(
            compose::keys(&args[0]).iter().map(Key::to_shape),
        ))
    })
}

pub fn values() -> impl Rule {
    rule_fn("Values", |args: &[Shape]| {
        require_args("Values", args, 1)?;
        Ok(Shape::Sequence(compose::values(&args[0])))
    })
}

pub fn all_paths() -> impl Rule {
    rule_fn("AllPaths", |args: &[Shape]| {
        require_args("AllPaths", args, 1)?;
        Ok(Shape::sequence(
            enumerate::all_paths(&args[0]).into_iter().map(Shape::str),
        ))
    })
}
