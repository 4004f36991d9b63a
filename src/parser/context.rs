use crate::ast::{Table, Value};

/// One hop from a table to a child table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// The table stored under a key.
    Key(String),
    /// Element `index` of the array-of-tables stored under a key.
    Item(String, usize),
}

/// A handle to a table in the document: the steps that reach it from the root.
pub(crate) type TablePath = Vec<Step>;

/// Where assignments currently land, and which array-of-tables element
/// deeper headers may resolve against.
#[derive(Debug, Default)]
pub(crate) struct NestingContext {
    pub current: TablePath,
    pub array_prefix: Option<Vec<String>>,
    pub array_item_root: Option<TablePath>,
}

impl NestingContext {
    /// The segments of `name` below the active array-of-tables, if `name` lives under it.
    pub fn relative_suffix<'n>(&self, name: &'n [String]) -> Option<&'n [String]> {
        let prefix = self.array_prefix.as_deref()?;
        name.strip_prefix(prefix).filter(|suffix| !suffix.is_empty())
    }

    pub fn enter_array(&mut self, name: &[String], item: TablePath) {
        self.array_prefix = Some(name.to_vec());
        self.array_item_root = Some(item.clone());
        self.current = item;
    }

    pub fn clear_array(&mut self) {
        self.array_prefix = None;
        self.array_item_root = None;
    }

    /// The path relative headers resolve against: the active array item, or the root.
    pub fn item_root(&self) -> TablePath {
        self.array_item_root.clone().unwrap_or_default()
    }
}

/// Values a header walk had to throw away to make room for a table or array.
#[derive(Debug, Default)]
pub(crate) struct Replaced {
    pub tables: Vec<String>,
    pub arrays: Vec<String>,
}

/// Walk `path` from `root`, creating whatever is missing, and return the table it names.
pub(crate) fn table_at<'t>(root: &'t mut Table, path: &[Step], replaced: &mut Replaced) -> &'t mut Table {
    let mut table = root;
    for step in path {
        table = match step {
            Step::Key(key) => child_table(table, key, replaced),
            Step::Item(key, index) => array_item(table, key, *index, replaced),
        };
    }
    table
}

/// Append a fresh table to the array under `key`, returning its index.
pub(crate) fn push_item(table: &mut Table, key: &str, replaced: &mut Replaced) -> usize {
    let items = child_array(table, key, replaced);
    items.push(Value::Table(Table::new()));
    items.len() - 1
}

fn child_table<'t>(table: &'t mut Table, key: &str, replaced: &mut Replaced) -> &'t mut Table {
    let slot = table
        .entry(key.to_string())
        .or_insert_with(|| Value::Table(Table::new()));
    ensure_table(slot, key, replaced)
}

fn child_array<'t>(table: &'t mut Table, key: &str, replaced: &mut Replaced) -> &'t mut Vec<Value> {
    let slot = table
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !matches!(slot, Value::Array(_)) {
        replaced.arrays.push(key.to_string());
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot was just made an array"),
    }
}

fn array_item<'t>(table: &'t mut Table, key: &str, index: usize, replaced: &mut Replaced) -> &'t mut Table {
    let items = child_array(table, key, replaced);
    if index >= items.len() {
        items.push(Value::Table(Table::new()));
    }
    let last = items.len() - 1;
    ensure_table(&mut items[index.min(last)], key, replaced)
}

fn ensure_table<'t>(slot: &'t mut Value, key: &str, replaced: &mut Replaced) -> &'t mut Table {
    if !matches!(slot, Value::Table(_)) {
        replaced.tables.push(key.to_string());
        *slot = Value::Table(Table::new());
    }
    match slot {
        Value::Table(table) => table,
        _ => unreachable!("slot was just made a table"),
    }
}
