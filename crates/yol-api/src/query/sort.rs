//! Generic property sort over the serde representation of records

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use super::SortOrder;

/// Sort `items` by the (possibly dotted) property `sort_by`
///
/// Numbers compare numerically, strings lexicographically and booleans
/// `false < true`. Missing or `null` values go last in either direction.
/// The sort is stable and `None` leaves the input order untouched.
pub fn apply_sorting<T: Serialize>(items: Vec<T>, sort_by: Option<&str>, order: SortOrder) -> Vec<T> {
    let Some(path) = sort_by.filter(|path| !path.is_empty()) else {
        return items;
    };

    let mut keyed: Vec<(Value, T)> = items
        .into_iter()
        .map(|item| (sort_key(&item, path), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare(a, b, order));
    keyed.into_iter().map(|(_, item)| item).collect()
}

fn sort_key<T: Serialize>(item: &T, path: &str) -> Value {
    let Ok(value) = serde_json::to_value(item) else {
        return Value::Null;
    };
    lookup(&value, path).cloned().unwrap_or(Value::Null)
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| match current {
        Value::Object(map) => map.get(key),
        Value::Array(list) => key.parse::<usize>().ok().and_then(|idx| list.get(idx)),
        _ => None,
    })
}

fn compare(a: &Value, b: &Value, order: SortOrder) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    let ordering = compare_present(a, b);
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
