use prost_types::{ListValue, Value};

use spanwire_googleapis::spanner::v1::batch_write_request::MutationGroup as InternalMutationGroup;
use spanwire_googleapis::spanner::v1::mutation::{Delete, Operation, Write};
use spanwire_googleapis::spanner::v1::Mutation;

use crate::key::KeySet;
use crate::statement::{ToKind, ToStruct};

type WriteOp = fn(Write) -> Operation;

fn to_row(values: impl IntoIterator<Item = prost_types::value::Kind>) -> ListValue {
    ListValue {
        values: values.into_iter().map(|kind| Value { kind: Some(kind) }).collect(),
    }
}

fn write(op: WriteOp, table: &str, columns: Vec<String>, rows: Vec<ListValue>) -> Mutation {
    Mutation {
        operation: Some(op(Write {
            table: table.to_string(),
            columns,
            values: rows,
        })),
    }
}

fn write_values(op: WriteOp, table: &str, columns: &[&str], rows: &[&[&dyn ToKind]]) -> Mutation {
    let columns = columns.iter().map(|c| c.to_string()).collect();
    let rows = rows
        .iter()
        .map(|row| to_row(row.iter().map(|v| v.to_kind())))
        .collect();
    write(op, table, columns, rows)
}

fn write_pairs(op: WriteOp, table: &str, columns_and_values: &[(&str, &dyn ToKind)]) -> Mutation {
    let (columns, kinds): (Vec<String>, Vec<_>) = columns_and_values
        .iter()
        .map(|(column, value)| (column.to_string(), value.to_kind()))
        .unzip();
    write(op, table, columns, vec![to_row(kinds)])
}

fn write_struct(op: WriteOp, table: &str, to_struct: impl ToStruct) -> Mutation {
    let (columns, kinds): (Vec<String>, Vec<_>) = to_struct
        .to_kinds()
        .into_iter()
        .map(|(column, kind)| (column.to_string(), kind))
        .unzip();
    write(op, table, columns, vec![to_row(kinds)])
}

/// Inserts a row. The commit fails with ALREADY_EXISTS if the row is present.
pub fn insert(table: &str, columns: &[&str], values: &[&dyn ToKind]) -> Mutation {
    write_values(Operation::Insert, table, columns, &[values])
}

/// Like [`insert`], with the row given as column/value pairs.
pub fn insert_map(table: &str, columns_and_values: &[(&str, &dyn ToKind)]) -> Mutation {
    write_pairs(Operation::Insert, table, columns_and_values)
}

/// Like [`insert`], with the row given by a [`ToStruct`] value.
pub fn insert_struct(table: &str, to_struct: impl ToStruct) -> Mutation {
    write_struct(Operation::Insert, table, to_struct)
}

/// Inserts several rows in one write. Each row carries one value per column.
pub fn insert_rows(table: &str, columns: &[&str], rows: &[&[&dyn ToKind]]) -> Mutation {
    write_values(Operation::Insert, table, columns, rows)
}

/// Updates an existing row. The commit fails with NOT_FOUND if the row is absent.
pub fn update(table: &str, columns: &[&str], values: &[&dyn ToKind]) -> Mutation {
    write_values(Operation::Update, table, columns, &[values])
}

pub fn update_map(table: &str, columns_and_values: &[(&str, &dyn ToKind)]) -> Mutation {
    write_pairs(Operation::Update, table, columns_and_values)
}

pub fn update_struct(table: &str, to_struct: impl ToStruct) -> Mutation {
    write_struct(Operation::Update, table, to_struct)
}

/// Writes a row, deleting any existing row first.
/// Columns that are not written become NULL, unlike [`insert_or_update`].
pub fn replace(table: &str, columns: &[&str], values: &[&dyn ToKind]) -> Mutation {
    write_values(Operation::Replace, table, columns, &[values])
}

pub fn replace_map(table: &str, columns_and_values: &[(&str, &dyn ToKind)]) -> Mutation {
    write_pairs(Operation::Replace, table, columns_and_values)
}

pub fn replace_struct(table: &str, to_struct: impl ToStruct) -> Mutation {
    write_struct(Operation::Replace, table, to_struct)
}

/// Inserts a row, or updates it if it already exists.
/// Columns that are not written keep their values.
pub fn insert_or_update(table: &str, columns: &[&str], values: &[&dyn ToKind]) -> Mutation {
    write_values(Operation::InsertOrUpdate, table, columns, &[values])
}

pub fn insert_or_update_map(table: &str, columns_and_values: &[(&str, &dyn ToKind)]) -> Mutation {
    write_pairs(Operation::InsertOrUpdate, table, columns_and_values)
}

pub fn insert_or_update_struct(table: &str, to_struct: impl ToStruct) -> Mutation {
    write_struct(Operation::InsertOrUpdate, table, to_struct)
}

/// Deletes the rows in `key_set`. Keys that do not exist are ignored.
pub fn delete(table: &str, key_set: impl Into<KeySet>) -> Mutation {
    Mutation {
        operation: Some(Operation::Delete(Delete {
            table: table.to_string(),
            key_set: Some(key_set.into().into()),
        })),
    }
}

/// A set of mutations applied atomically by a batch write.
///
/// Groups in the same batch write are independent: each commits or fails on its own.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationGroup {
    mutations: Vec<Mutation>,
}

impl MutationGroup {
    pub fn new(mutations: Vec<Mutation>) -> Self {
        Self { mutations }
    }

    pub fn add(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

impl From<MutationGroup> for InternalMutationGroup {
    fn from(group: MutationGroup) -> Self {
        InternalMutationGroup {
            mutations: group.mutations,
        }
    }
}
