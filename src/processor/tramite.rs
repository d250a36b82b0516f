use serde::Deserialize;
use serde_json::{Map, Value};

// Fixed top-level columns every exported row starts with
pub const FIXED_FIELDS: [&str; 5] = [
    "id",
    "estado",
    "proceso_id",
    "fecha_inicio",
    "fecha_termino",
];

// Struct to represent a tramite as returned by the API: an object with a
// handful of fixed top-level fields plus a `datos` array of single-key
// objects. Kept as a raw JSON map so values of any type survive untouched
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Tramite {
    fields: Map<String, Value>,
}

impl Tramite {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    // Merges every object in the `datos` array into a single map; later
    // entries overwrite earlier ones on key collision. A missing `datos`,
    // a `datos` that is not an array, or entries that are not objects
    // contribute nothing
    pub fn flatten_datos(&self) -> Map<String, Value> {
        let mut merged = Map::new();
        let entries = self
            .fields
            .get("datos")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for entry in entries {
            if let Some(object) = entry.as_object() {
                for (key, value) in object {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }

        merged
    }
}
