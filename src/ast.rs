use std::fmt;

use indexmap::IndexMap;

/// An insertion-ordered table. Re-assigning a key replaces its value in place.
pub type Table = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    Array(Vec<Value>),
    Table(Table),
    /// Produced by an empty right-hand side (`key =`).
    Null,
}

/// The shape of a [`Value`], for consumers that dispatch on structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Bool,
    Array,
    Table,
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Bool => "boolean",
            ValueKind::Array => "array",
            ValueKind::Table => "table",
            ValueKind::Null => "null",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::Array(_) => ValueKind::Array,
            Value::Table(_) => ValueKind::Table,
            Value::Null => ValueKind::Null,
        }
    }

    /// Look up `key` when this value is a table.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Table(table) => table.get(key),
            _ => None,
        }
    }

    /// Look up element `index` when this value is an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Walk a dotted path such as `items.0.name`.
    ///
    /// Numeric segments index into arrays, every other segment is a table key.
    /// An empty path matches nothing, the same as [`Document::lookup`].
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.trim().is_empty() {
            return None;
        }
        path.split('.').try_fold(self, |value, segment| step(value, segment))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

fn step<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Table(table) => table.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// The result of one parse: the root table plus read-only accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Table,
}

impl Document {
    pub(crate) fn from_table(root: Table) -> Self {
        Self { root }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Dotted lookup from the root, see [`Value::lookup`].
    /// An empty path matches nothing; use [`root`](Self::root) for the whole table.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.trim().is_empty() {
            return None;
        }
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.root.get(first)?, step)
    }

    pub fn root(&self) -> &Table {
        &self.root
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.root.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn into_table(self) -> Table {
        self.root
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Table(doc.root)
    }
}
