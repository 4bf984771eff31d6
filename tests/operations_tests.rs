use gridworks_core::{Record, Value};
use gridworks_ops::*;

fn team() -> Vec<Record> {
    vec![
        Record::from_pairs([
            ("name", Value::from("Dana")),
            ("team", Value::from("design")),
            ("points", Value::from(12i64)),
        ]),
        Record::from_pairs([
            ("name", Value::from("alice")),
            ("team", Value::from("eng")),
            ("points", Value::from(7i64)),
        ]),
        Record::from_pairs([
            ("name", Value::from("Bob")),
            ("team", Value::from("eng")),
            ("points", Value::from(7i64)),
        ]),
        Record::from_pairs([
            ("name", Value::from("carol")),
            ("team", Value::from("design")),
        ]),
    ]
}

#[test]
fn test_sort_stability_for_every_direction_and_type() {
    for direction in [Direction::Asc, Direction::Desc] {
        for value_type in [ValueType::String, ValueType::Number, ValueType::Date] {
            let spec = SortSpec {
                key: "points".to_string(),
                direction,
                value_type,
            };
            let sorted = sort_records(&team(), &spec);
            // alice and Bob tie on points (7) for every coercion; their
            // input order must survive.
            let alice = sorted
                .iter()
                .position(|r| r.get("name").unwrap().text() == "alice")
                .unwrap();
            let bob = sorted
                .iter()
                .position(|r| r.get("name").unwrap().text() == "Bob")
                .unwrap();
            assert!(
                alice < bob,
                "stability violated for {:?}/{:?}",
                direction,
                value_type
            );
        }
    }
}

#[test]
fn test_sort_null_last_for_both_directions() {
    for direction in [Direction::Asc, Direction::Desc] {
        let spec = SortSpec {
            key: "points".to_string(),
            direction,
            value_type: ValueType::Number,
        };
        let sorted = sort_records(&team(), &spec);
        assert_eq!(sorted.last().unwrap().get("name").unwrap().text(), "carol");
    }
}

#[test]
fn test_filter_conjunction_distributes() {
    let c1 = FilterClause {
        key: "team".to_string(),
        operator: FilterOp::Eq,
        value: Value::from("eng"),
    };
    let c2 = FilterClause {
        key: "points".to_string(),
        operator: FilterOp::Gte,
        value: Value::from(7i64),
    };
    let combined = filter_records(&team(), &[c1.clone(), c2.clone()]);
    let sequential = filter_records(&filter_records(&team(), &[c1]), &[c2]);
    assert_eq!(combined, sequential);
    assert_eq!(combined.len(), 2);
}

#[test]
fn test_aggregate_reference_example() {
    let data = vec![
        Record::from_pairs([("g", Value::from("a")), ("v", Value::from(2i64))]),
        Record::from_pairs([("g", Value::from("a")), ("v", Value::from(4i64))]),
        Record::from_pairs([("g", Value::from("b")), ("v", Value::from(10i64))]),
    ];
    let spec = AggregateSpec {
        group_by_key: "g".to_string(),
        aggregations: vec![
            Aggregation {
                source_field: "v".to_string(),
                operation: AggregateOp::Sum,
                output_key: None,
            },
            Aggregation {
                source_field: "v".to_string(),
                operation: AggregateOp::Count,
                output_key: Some("size".to_string()),
            },
        ],
    };
    let out = aggregate_records(&data, &spec);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].get("g").unwrap().text(), "a");
    assert_eq!(out[0].get("sum_v").unwrap().coerce_number(), 6.0);
    assert_eq!(out[0].get("size").unwrap().coerce_number(), 2.0);
    assert_eq!(out[1].get("g").unwrap().text(), "b");
    assert_eq!(out[1].get("sum_v").unwrap().coerce_number(), 10.0);
    assert_eq!(out[1].get("size").unwrap().coerce_number(), 1.0);
}

#[test]
fn test_search_substring_vs_fuzzy() {
    let data = vec![Record::from_pairs([("name", Value::from("Alice"))])];
    let fuzzy = SearchSpec {
        query: "ace".to_string(),
        fields: vec!["name".to_string()],
        fuzzy: true,
    };
    assert_eq!(search_records(&data, &fuzzy).len(), 1);

    let substring = SearchSpec {
        fuzzy: false,
        ..fuzzy.clone()
    };
    assert!(search_records(&data, &substring).is_empty());

    let never = SearchSpec {
        query: "xyz".to_string(),
        fields: vec!["name".to_string()],
        fuzzy: false,
    };
    assert!(search_records(&data, &never).is_empty());
}

#[test]
fn test_transform_trim_and_uppercase_idempotent() {
    let data = vec![Record::from_pairs([("v", Value::from("  hello  "))])];
    let trim = [TransformStep {
        field: "v".to_string(),
        operation: TransformOp::Trim,
    }];
    let once = transform_records(&data, &trim);
    assert_eq!(transform_records(&once, &trim), once);

    let upper = [TransformStep {
        field: "v".to_string(),
        operation: TransformOp::Uppercase,
    }];
    let once = transform_records(&data, &upper);
    assert_eq!(transform_records(&once, &upper), once);
}

#[test]
fn test_stats_empty_numeric_set_is_all_zeros() {
    let data = vec![
        Record::from_pairs([("label", Value::from("a"))]),
        Record::from_pairs([("label", Value::from("b"))]),
    ];
    let spec = StatsSpec {
        fields: vec!["label".to_string()],
    };
    let out = compute_stats(&data, &spec);
    let s = &out[0];
    assert_eq!(
        (s.count, s.sum, s.avg, s.min, s.max, s.std_dev),
        (0, 0.0, 0.0, 0.0, 0.0, 0.0)
    );
}

#[test]
fn test_no_operation_mutates_its_input() {
    let data = team();
    let original = data.clone();

    let _ = sort_records(
        &data,
        &SortSpec {
            key: "name".to_string(),
            direction: Direction::Desc,
            value_type: ValueType::String,
        },
    );
    let _ = filter_records(
        &data,
        &[FilterClause {
            key: "points".to_string(),
            operator: FilterOp::Gt,
            value: Value::from(5i64),
        }],
    );
    let _ = aggregate_records(
        &data,
        &AggregateSpec {
            group_by_key: "team".to_string(),
            aggregations: vec![Aggregation {
                source_field: "points".to_string(),
                operation: AggregateOp::Avg,
                output_key: None,
            }],
        },
    );
    let _ = search_records(
        &data,
        &SearchSpec {
            query: "a".to_string(),
            fields: vec!["name".to_string()],
            fuzzy: true,
        },
    );
    let _ = transform_records(
        &data,
        &[TransformStep {
            field: "name".to_string(),
            operation: TransformOp::Uppercase,
        }],
    );
    let _ = compute_stats(
        &data,
        &StatsSpec {
            fields: vec!["points".to_string()],
        },
    );

    assert_eq!(data, original);
}
