//! Random JSON tree generation for the property tests.
//!
//! Trees are generated as `serde_json::Value`s so the reference serializer
//! produces the input text; the tests then compare our parse against the
//! generated tree. Numbers stay within `i64` so numeric comparison is
//! exact; floating point gets its own dedicated tests.

use alloc::string::String;
use alloc::vec::Vec;

use quickcheck::{Arbitrary, Gen};

/// A generated document whose root is always an array or object, so it
/// parses in strict mode too.
#[derive(Debug, Clone)]
pub(crate) struct ArbitraryJson(pub serde_json::Value);

impl Arbitrary for ArbitraryJson {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbitraryJson(container(g, 3))
    }
}

fn container(g: &mut Gen, depth: usize) -> serde_json::Value {
    if bool::arbitrary(g) {
        let len = usize::arbitrary(g) % 5;
        serde_json::Value::Array((0..len).map(|_| value(g, depth)).collect())
    } else {
        let len = usize::arbitrary(g) % 5;
        let members = (0..len)
            .map(|_| (String::arbitrary(g), value(g, depth)))
            .collect::<Vec<_>>();
        serde_json::Value::Object(members.into_iter().collect())
    }
}

fn value(g: &mut Gen, depth: usize) -> serde_json::Value {
    let choices = if depth == 0 { 4 } else { 6 };
    match u8::arbitrary(g) % choices {
        0 => serde_json::Value::Null,
        1 => serde_json::Value::Bool(bool::arbitrary(g)),
        2 => serde_json::Value::Number(i64::arbitrary(g).into()),
        3 => serde_json::Value::String(String::arbitrary(g)),
        _ => container(g, depth - 1),
    }
}
