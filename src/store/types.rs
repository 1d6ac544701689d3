use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name to value, as stored
pub type Fields = Map<String, Value>;

/// Dotted field path (`home.heroTitle`) to the value it should hold
pub type FieldWrites = BTreeMap<String, Value>;

/// A stored document and the id the store assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// What `update` does when the document is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    MustExist,
    Upsert,
}

/// Flatten an object into field writes, descending `depth` levels into nested
/// objects. Anything deeper (and every array) is written as a whole value.
pub fn field_writes(fields: &Fields, depth: usize) -> FieldWrites {
    let mut writes = FieldWrites::new();
    collect_writes(fields, depth, "", &mut writes);
    writes
}

/// Serialize a patch and flatten it into field writes
pub fn field_writes_of<T: Serialize>(
    value: &T,
    depth: usize,
) -> Result<FieldWrites, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(field_writes(&fields, depth)),
        _ => Ok(FieldWrites::new()),
    }
}

fn collect_writes(fields: &Fields, depth: usize, prefix: &str, writes: &mut FieldWrites) {
    for (key, value) in fields {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(nested) if depth > 0 => collect_writes(nested, depth - 1, &path, writes),
            _ => {
                writes.insert(path, value.clone());
            }
        }
    }
}

/// Turn field writes back into a nested object
pub fn nest_writes(writes: &FieldWrites) -> Fields {
    let mut root = Fields::new();
    for (path, value) in writes {
        set_path(&mut root, path, value.clone());
    }
    root
}

/// Write `value` at a dotted path, creating intermediate objects as needed
pub fn set_path(root: &mut Fields, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }

        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Fields::new()));
        if !entry.is_object() {
            *entry = Value::Object(Fields::new());
        }
        current = match entry {
            Value::Object(map) => map,
            _ => return,
        };
    }
}
