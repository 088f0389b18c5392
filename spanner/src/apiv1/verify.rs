//! Structural checks applied to every request before it reaches the transport.
//!
//! A request that fails here is answered locally with `INVALID_ARGUMENT`.

use spanwire_gax::grpc::{invalid_argument, Status};
use spanwire_googleapis::spanner::v1::commit_request::Transaction as CommitTransaction;
use spanwire_googleapis::spanner::v1::mutation::Operation;
use spanwire_googleapis::spanner::v1::transaction_options::Mode;
use spanwire_googleapis::spanner::v1::transaction_selector::Selector;
use spanwire_googleapis::spanner::v1::{
    BatchCreateSessionsRequest, BatchWriteRequest, BeginTransactionRequest, CommitRequest, CreateSessionRequest,
    ExecuteBatchDmlRequest, ExecuteSqlRequest, Mutation, PartitionQueryRequest, PartitionReadRequest, ReadRequest,
    RollbackRequest, TransactionOptions, TransactionSelector,
};

pub(crate) fn name(field: &str, value: &str) -> Result<(), Status> {
    if value.is_empty() {
        return Err(invalid_argument(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn create_session(req: &CreateSessionRequest) -> Result<(), Status> {
    name("database", &req.database)
}

pub(crate) fn batch_create_sessions(req: &BatchCreateSessionsRequest) -> Result<(), Status> {
    name("database", &req.database)?;
    if req.session_count <= 0 {
        return Err(invalid_argument("session_count must be positive"));
    }
    Ok(())
}

pub(crate) fn transaction_options(options: &TransactionOptions) -> Result<(), Status> {
    match &options.mode {
        None => Err(invalid_argument("transaction mode is required")),
        Some(Mode::ReadOnly(ro)) if ro.timestamp_bound.is_none() => {
            Err(invalid_argument("read-only transaction requires a timestamp bound"))
        }
        Some(_) => Ok(()),
    }
}

fn is_read_only(options: &TransactionOptions) -> bool {
    matches!(options.mode, Some(Mode::ReadOnly(_)))
}

/// `allow_single_use` is false for the request kinds that can never run in a temporary transaction.
fn selector(selector: &Option<TransactionSelector>, allow_single_use: bool) -> Result<(), Status> {
    let selector = match selector {
        // absent selector means a strong single-use read
        None if allow_single_use => return Ok(()),
        None => return Err(invalid_argument("transaction is required")),
        Some(s) => s,
    };
    match &selector.selector {
        None => Err(invalid_argument("transaction selector must be set")),
        Some(Selector::SingleUse(options)) => {
            if !allow_single_use {
                return Err(invalid_argument("single-use transaction is not allowed for this request"));
            }
            transaction_options(options)?;
            if !is_read_only(options) {
                return Err(invalid_argument("single-use transaction must be read-only"));
            }
            Ok(())
        }
        Some(Selector::Begin(options)) => transaction_options(options),
        Some(Selector::Id(id)) if id.is_empty() => Err(invalid_argument("transaction id is empty")),
        Some(Selector::Id(_)) => Ok(()),
    }
}

pub(crate) fn mutation(mutation: &Mutation) -> Result<(), Status> {
    match &mutation.operation {
        None => Err(invalid_argument("mutation operation is required")),
        Some(Operation::Delete(delete)) => {
            name("table", &delete.table)?;
            if delete.key_set.is_none() {
                return Err(invalid_argument(format!("delete on {} requires a key set", delete.table)));
            }
            Ok(())
        }
        Some(Operation::Insert(w))
        | Some(Operation::Update(w))
        | Some(Operation::InsertOrUpdate(w))
        | Some(Operation::Replace(w)) => {
            name("table", &w.table)?;
            for (i, row) in w.values.iter().enumerate() {
                if row.values.len() != w.columns.len() {
                    return Err(invalid_argument(format!(
                        "row {i} of write on {} has {} values for {} columns",
                        w.table,
                        row.values.len(),
                        w.columns.len()
                    )));
                }
            }
            Ok(())
        }
    }
}

pub(crate) fn execute_sql(req: &ExecuteSqlRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    name("sql", &req.sql)?;
    selector(&req.transaction, true)
}

pub(crate) fn execute_batch_dml(req: &ExecuteBatchDmlRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    selector(&req.transaction, false)?;
    if req.statements.is_empty() {
        return Err(invalid_argument("at least one statement is required"));
    }
    Ok(())
}

pub(crate) fn read(req: &ReadRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    name("table", &req.table)?;
    if req.key_set.is_none() {
        return Err(invalid_argument("key_set is required"));
    }
    selector(&req.transaction, true)
}

pub(crate) fn begin_transaction(req: &BeginTransactionRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    let options = req
        .options
        .as_ref()
        .ok_or_else(|| invalid_argument("options is required"))?;
    transaction_options(options)?;
    if let Some(m) = &req.mutation_key {
        mutation(m)?;
    }
    Ok(())
}

pub(crate) fn commit(req: &CommitRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    match &req.transaction {
        None => return Err(invalid_argument("transaction is required")),
        Some(CommitTransaction::TransactionId(id)) if id.is_empty() => {
            return Err(invalid_argument("transaction id is empty"))
        }
        Some(CommitTransaction::TransactionId(_)) => {}
        Some(CommitTransaction::SingleUseTransaction(options)) => {
            transaction_options(options)?;
            if !matches!(options.mode, Some(Mode::ReadWrite(_))) {
                return Err(invalid_argument("single-use commit must be read-write"));
            }
        }
    }
    req.mutations.iter().try_for_each(mutation)
}

pub(crate) fn rollback(req: &RollbackRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    if req.transaction_id.is_empty() {
        return Err(invalid_argument("transaction_id is required"));
    }
    Ok(())
}

pub(crate) fn partition_query(req: &PartitionQueryRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    name("sql", &req.sql)?;
    selector(&req.transaction, false)
}

pub(crate) fn partition_read(req: &PartitionReadRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    name("table", &req.table)?;
    if req.key_set.is_none() {
        return Err(invalid_argument("key_set is required"));
    }
    selector(&req.transaction, false)
}

pub(crate) fn batch_write(req: &BatchWriteRequest) -> Result<(), Status> {
    name("session", &req.session)?;
    if req.mutation_groups.is_empty() {
        return Err(invalid_argument("at least one mutation group is required"));
    }
    for (i, group) in req.mutation_groups.iter().enumerate() {
        if group.mutations.is_empty() {
            return Err(invalid_argument(format!("mutation group {i} is empty")));
        }
        group.mutations.iter().try_for_each(mutation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use prost_types::{value::Kind, ListValue, Value};

    use spanwire_gax::grpc::Code;
    use spanwire_googleapis::spanner::v1::batch_write_request::MutationGroup;
    use spanwire_googleapis::spanner::v1::mutation::{Delete, Write};
    use spanwire_googleapis::spanner::v1::transaction_options::read_only::TimestampBound;
    use spanwire_googleapis::spanner::v1::transaction_options::{PartitionedDml, ReadOnly, ReadWrite};
    use spanwire_googleapis::spanner::v1::*;

    use super::*;

    fn read_only() -> TransactionOptions {
        TransactionOptions {
            exclude_txn_from_change_streams: false,
            mode: Some(Mode::ReadOnly(ReadOnly {
                return_read_timestamp: true,
                timestamp_bound: Some(TimestampBound::Strong(true)),
            })),
        }
    }

    fn read_write() -> TransactionOptions {
        TransactionOptions {
            exclude_txn_from_change_streams: false,
            mode: Some(Mode::ReadWrite(ReadWrite::default())),
        }
    }

    fn sql(selector: Option<Selector>) -> ExecuteSqlRequest {
        ExecuteSqlRequest {
            session: "s".to_string(),
            transaction: Some(TransactionSelector { selector }),
            sql: "SELECT 1".to_string(),
            ..Default::default()
        }
    }

    fn write(values: Vec<Vec<&str>>) -> Mutation {
        Mutation {
            operation: Some(Operation::Insert(Write {
                table: "Singers".to_string(),
                columns: vec!["SingerId".to_string(), "Name".to_string()],
                values: values
                    .into_iter()
                    .map(|row| ListValue {
                        values: row
                            .into_iter()
                            .map(|v| Value {
                                kind: Some(Kind::StringValue(v.to_string())),
                            })
                            .collect(),
                    })
                    .collect(),
            })),
        }
    }

    fn assert_invalid(result: Result<(), Status>) {
        assert_eq!(result.unwrap_err().code(), Code::InvalidArgument);
    }

    #[test]
    fn test_single_use_read_only_is_accepted() {
        execute_sql(&sql(Some(Selector::SingleUse(read_only())))).unwrap();
        let mut req = sql(None);
        req.transaction = None;
        execute_sql(&req).unwrap();
    }

    #[test]
    fn test_single_use_read_write_is_rejected() {
        assert_invalid(execute_sql(&sql(Some(Selector::SingleUse(read_write())))));
        let pdml = TransactionOptions {
            exclude_txn_from_change_streams: false,
            mode: Some(Mode::PartitionedDml(PartitionedDml {})),
        };
        assert_invalid(execute_sql(&sql(Some(Selector::SingleUse(pdml)))));
    }

    #[test]
    fn test_empty_selector_and_mode_are_rejected() {
        assert_invalid(execute_sql(&sql(None)));
        let options = TransactionOptions::default();
        assert_invalid(execute_sql(&sql(Some(Selector::Begin(options)))));
        let bound_missing = TransactionOptions {
            exclude_txn_from_change_streams: false,
            mode: Some(Mode::ReadOnly(ReadOnly::default())),
        };
        assert_invalid(execute_sql(&sql(Some(Selector::Begin(bound_missing)))));
        assert_invalid(execute_sql(&sql(Some(Selector::Id(vec![])))));
    }

    #[test]
    fn test_batch_dml_never_single_use() {
        let req = ExecuteBatchDmlRequest {
            session: "s".to_string(),
            transaction: Some(TransactionSelector {
                selector: Some(Selector::SingleUse(read_only())),
            }),
            statements: vec![execute_batch_dml_request::Statement {
                sql: "UPDATE T SET A = 1 WHERE TRUE".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_invalid(execute_batch_dml(&req));

        let mut req = req;
        req.transaction = Some(TransactionSelector {
            selector: Some(Selector::Id(vec![1])),
        });
        execute_batch_dml(&req).unwrap();
        req.statements.clear();
        assert_invalid(execute_batch_dml(&req));
    }

    #[test]
    fn test_partition_requires_transaction() {
        let req = PartitionQueryRequest {
            session: "s".to_string(),
            sql: "SELECT 1".to_string(),
            ..Default::default()
        };
        assert_invalid(partition_query(&req));
        let req = PartitionReadRequest {
            session: "s".to_string(),
            table: "Singers".to_string(),
            key_set: Some(KeySet {
                all: true,
                ..Default::default()
            }),
            transaction: Some(TransactionSelector {
                selector: Some(Selector::SingleUse(read_only())),
            }),
            ..Default::default()
        };
        assert_invalid(partition_read(&req));
    }

    #[test]
    fn test_mutation_shape() {
        mutation(&write(vec![vec!["1", "a"], vec!["2", "b"]])).unwrap();
        assert_invalid(mutation(&write(vec![vec!["1", "a"], vec!["2"]])));
        assert_invalid(mutation(&Mutation { operation: None }));
        assert_invalid(mutation(&Mutation {
            operation: Some(Operation::Delete(Delete {
                table: "Singers".to_string(),
                key_set: None,
            })),
        }));
    }

    #[test]
    fn test_commit() {
        let mut req = CommitRequest {
            session: "s".to_string(),
            ..Default::default()
        };
        assert_invalid(commit(&req));
        req.transaction = Some(CommitTransaction::SingleUseTransaction(read_only()));
        assert_invalid(commit(&req));
        req.transaction = Some(CommitTransaction::SingleUseTransaction(read_write()));
        commit(&req).unwrap();
        req.mutations.push(write(vec![vec!["1"]]));
        assert_invalid(commit(&req));
    }

    #[test]
    fn test_batch_write_groups() {
        let mut req = BatchWriteRequest {
            session: "s".to_string(),
            ..Default::default()
        };
        assert_invalid(batch_write(&req));
        req.mutation_groups.push(MutationGroup { mutations: vec![] });
        assert_invalid(batch_write(&req));
        req.mutation_groups[0].mutations.push(write(vec![vec!["1", "a"]]));
        batch_write(&req).unwrap();
    }

    #[test]
    fn test_names_and_rollback() {
        assert_invalid(create_session(&CreateSessionRequest::default()));
        assert_invalid(rollback(&RollbackRequest {
            session: "s".to_string(),
            transaction_id: vec![],
        }));
        rollback(&RollbackRequest {
            session: "s".to_string(),
            transaction_id: vec![1],
        })
        .unwrap();
    }
}
