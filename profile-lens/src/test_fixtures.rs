//! Sample profiles shared by the unit tests.

use std::collections::HashMap;

use crate::profile::{BasicStats, Histogram, Profile, Shape};

/// A small backend response covering numeric, categorical and partially
/// missing columns, in the exact shape pandas produces.
pub const MIXED_PROFILE_JSON: &str = r#"{
  "shape": [4, 3],
  "columns": ["age", "city", "score"],
  "data_types": {"age": "float64", "city": "object", "score": "int64"},
  "null_values": {"age": 1, "city": 0, "score": 0},
  "null_rate": {"age": 0.25, "city": 0.0, "score": 0.0},
  "basic_stats": {
    "age": {"count": 3.0, "unique": null, "top": null, "freq": null,
            "mean": 30.333333333333332, "std": 1.1547005383792515,
            "min": 29.0, "25%": 30.0, "50%": 31.0, "75%": 31.0, "max": 31.0},
    "city": {"count": 4.0, "unique": 3.0, "top": "Oslo", "freq": 2.0,
             "mean": null, "std": null},
    "score": {"count": 4.0, "top": 7, "mean": 6.25, "std": 2.217355782608345,
              "min": 3.0, "25%": 6.0, "50%": 7.0, "75%": 7.25, "max": 8.0}
  },
  "skewness": {"age": -1.7320508075688774, "score": -1.0},
  "kurtosis": {"age": null, "score": 0.5},
  "histogram": {
    "age": {"bins": [29.0, 30.0, 31.0], "counts": [1, 2]},
    "score": {"bins": [3.0, 5.5, 8.0], "counts": [1, 3]}
  }
}"#;

pub fn mixed_profile() -> Profile {
    Profile::from_json(MIXED_PROFILE_JSON).expect("fixture profile must decode")
}

/// Two columns over four rows, one null in `a`.
pub fn two_column_profile() -> Profile {
    Profile {
        shape: Shape::new(4, 2),
        columns: vec!["a".to_string(), "b".to_string()],
        data_types: HashMap::from([
            ("a".to_string(), "int64".to_string()),
            ("b".to_string(), "object".to_string()),
        ]),
        null_values: HashMap::from([("a".to_string(), 1), ("b".to_string(), 0)]),
        null_rate: HashMap::from([("a".to_string(), 0.25), ("b".to_string(), 0.0)]),
        basic_stats: HashMap::from([(
            "a".to_string(),
            Some(BasicStats {
                count: Some(3),
                mean: Some(2.0),
                std: Some(1.0),
                ..BasicStats::default()
            }),
        )]),
        skewness: HashMap::from([("a".to_string(), Some(0.0))]),
        kurtosis: HashMap::from([("a".to_string(), Some(-1.5))]),
        histogram: HashMap::from([(
            "a".to_string(),
            Some(Histogram::new(vec![0.0, 1.0, 2.0], vec![3, 5])),
        )]),
    }
}
