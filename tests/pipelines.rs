// =============================================================================
// Pipelines point-free : objects + Bind + Pipe
// =============================================================================

use pretty_assertions::assert_eq;

use shapeshift::objects;
use shapeshift::record;
use shapeshift::rule::{bind, call1, not, pipe, predicate, unary};
use shapeshift::{Arg, BaseType, Bind, CollisionPolicy, MapperConfig, Pipe, Rule, Shape};

fn api_payload() -> Shape {
    record! {
        "data" => record! {
            "user_id" => Shape::ty(BaseType::Number),
            "__internal" => Shape::bool(true),
            "home_address" => record! {
                "zip_code" => Shape::ty(BaseType::String),
                "street_name" => Shape::ty(BaseType::String),
            },
            "tags" => Shape::sequence([record! { "tag_name" => Shape::ty(BaseType::String) }]),
        },
        "meta" => record! { "page" => Shape::int(1) },
    }
}

fn private_key() -> impl Rule {
    predicate("Private", |_, k| k.as_str().is_some_and(|s| s.starts_with("__")))
}

#[test]
fn test_normalize_payload() {
    let normalize = Pipe::new()
        .then(bind(objects::get(), [Arg::bound(Shape::str("data"))]))
        .then(objects::omit_by(private_key()))
        .then(objects::camel_case_deep());

    let out = call1(&normalize, &api_payload()).unwrap();
    assert_eq!(
        out,
        record! {
            "userId" => Shape::ty(BaseType::Number),
            "homeAddress" => record! {
                "zipCode" => Shape::ty(BaseType::String),
                "streetName" => Shape::ty(BaseType::String),
            },
            "tags" => Shape::sequence([record! { "tagName" => Shape::ty(BaseType::String) }]),
        }
    );
}

#[test]
fn test_pipeline_name_lists_stages() {
    let p = pipe(objects::keys(), objects::values());
    assert_eq!(p.name(), "Pipe<Keys, Values>");
}

#[test]
fn test_negated_pick_by_is_omit_by() {
    let gt1 = || predicate("Gt1", |v, _| v.as_integer().is_some_and(|n| n > 1));
    let s = record! { "a" => Shape::int(1), "b" => Shape::int(2), "c" => Shape::int(3) };
    assert_eq!(
        call1(&objects::pick_by(not(gt1())), &s).unwrap(),
        call1(&objects::omit_by(gt1()), &s).unwrap()
    );
}

#[test]
fn test_update_with_open_path_over_many_paths() {
    let s = record! { "a" => Shape::int(1), "b" => record! { "c" => Shape::int(2) } };
    let zero_at = Bind::new(objects::update())
        .open()
        .bound(Shape::int(0))
        .bound(s.clone());

    assert_eq!(
        call1(&zero_at, &Shape::str("b.c")).unwrap(),
        record! { "a" => Shape::int(1), "b" => record! { "c" => Shape::int(0) } }
    );
    // intermédiaire absent : no-op
    assert_eq!(call1(&zero_at, &Shape::str("x.y")).unwrap(), s);
}

#[test]
fn test_create_then_assign() {
    let pattern = record! {
        "id" => Shape::arg(0),
        "profile" => record! { "name" => Shape::arg(1) },
    };
    let make_user = bind(objects::create(), [Arg::bound(pattern)]);
    let user = make_user.call(&[Shape::int(7), Shape::str("ada")]).unwrap();

    let defaults = record! { "active" => Shape::bool(true), "id" => Shape::int(0) };
    let merged = objects::assign().call(&[defaults, user]).unwrap();
    assert_eq!(
        merged,
        record! {
            "active" => Shape::bool(true),
            "id" => Shape::int(7),
            "profile" => record! { "name" => Shape::str("ada") },
        }
    );
}

#[test]
fn test_group_then_keys() {
    let by_kind = unary("Kind", |v| Shape::str(v.kind()));
    let s = record! {
        "a" => Shape::int(1),
        "b" => Shape::ty(BaseType::String),
        "c" => Shape::int(2),
    };
    let labels = call1(&pipe(objects::group_by(by_kind), objects::keys()), &s).unwrap();
    assert_eq!(
        labels,
        Shape::sequence([Shape::str("number literal"), Shape::str("type")])
    );
}

#[test]
fn test_entries_map_then_from_entries() {
    let s = record! { "a" => Shape::int(1), "b" => Shape::int(2) };
    let swap = pipe(objects::entries(), objects::from_entries());
    assert_eq!(call1(&swap, &s).unwrap(), s);
}

#[test]
fn test_case_collision_policy_through_objects() {
    let s = record! { "user_id" => Shape::int(1), "userId" => Shape::int(2) };
    let first = objects::map_keys_with(
        shapeshift::strings::camel_case(),
        MapperConfig::new().collision(CollisionPolicy::FirstWriteWins),
    );
    assert_eq!(call1(&first, &s).unwrap(), record! { "userId" => Shape::int(1) });
    assert_eq!(
        call1(&objects::camel_case(), &s).unwrap(),
        record! { "userId" => Shape::int(2) }
    );
}

#[test]
fn test_partial_then_required_subset() {
    let s = record! { "a" => Shape::int(1), "b" => Shape::int(2) };
    let required_a = bind(objects::required(), [Arg::bound(Shape::str("a"))]);
    let p = pipe(objects::partial(), required_a);
    let out = call1(&p, &s).unwrap();
    let record = out.as_record().unwrap();
    let optional: Vec<bool> = record.iter().map(|(_, f)| f.optional).collect();
    assert_eq!(optional, vec![false, true]);
}

#[test]
fn test_pick_keys_supplied_later() {
    let payload = api_payload();
    let data = call1(&bind(objects::get(), [Arg::bound(Shape::str("data"))]), &payload).unwrap();
    // Pick<_, data> : la sélection est une donnée du pipeline
    let select = Bind::new(objects::pick()).open().bound(data);
    let wanted = record! { "user_id" => Shape::int(0), "tags" => Shape::int(0) };
    let names = call1(&objects::keys(), &wanted).unwrap();
    assert_eq!(
        call1(&select, &names).unwrap(),
        record! {
            "user_id" => Shape::ty(BaseType::Number),
            "tags" => Shape::sequence([record! { "tag_name" => Shape::ty(BaseType::String) }]),
        }
    );
}

#[test]
fn test_record_from_keys_of_another_shape() {
    let template = record! { "x" => Shape::int(1), "y" => Shape::int(2) };
    let names = call1(&objects::keys(), &template).unwrap();
    let zeroed = objects::record().call(&[names, Shape::int(0)]).unwrap();
    assert_eq!(zeroed, record! { "x" => Shape::int(0), "y" => Shape::int(0) });
}
