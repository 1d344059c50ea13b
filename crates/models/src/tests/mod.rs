use serde_json::Value;

use crate::base::Attributes;


/// State entity behaviour
pub mod state_tests;




pub(crate) fn dict(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
