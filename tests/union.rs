use superschema::SchemaError;
use superschema::column::{Column, Tag};
use superschema::datatype::TypeInfo;
use superschema::schema::Schema;
use superschema::superschema::SuperSchema;

fn str_col(name: &str, tag: Tag, pk: bool) -> Column {
    Column::new(name, tag, TypeInfo::string_default(), pk, vec![])
}

fn must_schema(cols: Vec<Column>) -> Schema {
    Schema::from_columns(cols).expect("valid schema")
}

// (ss12, ss34) built from four schema versions of the same table
fn setup() -> (SuperSchema, SuperSchema) {
    let sch1 = must_schema(vec![str_col("a", 1, true), str_col("b", 2, false), str_col("c", 3, false)]);
    let sch2 = must_schema(vec![str_col("aa", 1, true), str_col("dd", 4, false)]);
    let sch3 = must_schema(vec![str_col("aaa", 1, true), str_col("bbb", 2, false), str_col("eee", 5, false)]);
    let sch4 = must_schema(vec![str_col("a", 1, true), str_col("eeee", 5, false), str_col("ffff", 6, false)]);
    (
        SuperSchema::new([&sch1, &sch2]).unwrap(),
        SuperSchema::new([&sch3, &sch4]).unwrap(),
    )
}

#[test]
fn union_treats_second_argument_as_newer() {
    let (ss12, ss34) = setup();
    let union = SuperSchema::union(&ss12, &ss34).unwrap();
    assert_eq!(union.tags().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(union.all_column_names(1), vec!["a", "aaa", "aa", "a"]);
    let expected = must_schema(vec![
        str_col("a", 1, true),
        str_col("bbb", 2, false),
        str_col("c", 3, false),
        str_col("dd", 4, false),
        str_col("eeee", 5, false),
        str_col("ffff", 6, false),
    ]);
    assert_eq!(union.generate_schema().unwrap(), expected);
}

#[test]
fn union_respects_argument_order() {
    let (ss12, ss34) = setup();
    let union = SuperSchema::union(&ss34, &ss12).unwrap();
    assert_eq!(union.tags().collect::<Vec<_>>(), vec![1, 2, 5, 6, 3, 4]);
    let expected = must_schema(vec![
        str_col("aa", 1, true),
        str_col("b", 2, false),
        str_col("eeee", 5, false),
        str_col("ffff", 6, false),
        str_col("c", 3, false),
        str_col("dd", 4, false),
    ]);
    assert_eq!(union.generate_schema().unwrap(), expected);
    assert_ne!(union, SuperSchema::union(&ss12, &ss34).unwrap());
}

#[test]
fn union_matches_accumulating_in_sequence() {
    let sch1 = must_schema(vec![str_col("a", 1, true), str_col("b", 2, false)]);
    let sch2 = must_schema(vec![str_col("x", 1, true), str_col("c", 3, false)]);
    let older = SuperSchema::new([&sch1]).unwrap();
    let newer = SuperSchema::new([&sch2]).unwrap();
    assert_eq!(
        SuperSchema::union(&older, &newer).unwrap(),
        SuperSchema::new([&sch1, &sch2]).unwrap()
    );
}

#[test]
fn union_all_folds_oldest_first() {
    let (ss12, ss34) = setup();
    let folded = SuperSchema::union_all([&ss12, &ss34]).unwrap();
    assert_eq!(folded, SuperSchema::union(&ss12, &ss34).unwrap());
    assert!(SuperSchema::union_all(std::iter::empty::<&SuperSchema>()).unwrap().is_empty());
}

#[test]
fn union_with_empty_is_identity() {
    let (ss12, _) = setup();
    let empty = SuperSchema::default();
    assert_eq!(SuperSchema::union(&empty, &ss12).unwrap(), ss12);
    assert_eq!(SuperSchema::union(&ss12, &empty).unwrap(), ss12);
}

#[test]
fn union_rejects_conflicting_definitions() {
    let (ss12, _) = setup();
    let conflicting = SuperSchema::new([&must_schema(vec![
        str_col("a", 1, true),
        Column::new("collision", 2, TypeInfo::int32(), false, vec![]),
    ])])
    .unwrap();
    let err = SuperSchema::union(&ss12, &conflicting).unwrap_err();
    assert!(matches!(err, SchemaError::TagCollision { tag: 2, .. }));
    assert_eq!(
        err.to_string(),
        "tag collision for columns b and collision, different definitions (tag: 2)"
    );
}
