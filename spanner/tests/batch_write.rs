use spanwire::batch_write::{BatchWriteOptions, GroupResult};
use spanwire::client::Error;
use spanwire::mutation::{insert, insert_or_update, MutationGroup};
use spanwire::transaction::CallOptions;
use spanwire_gax::cancel::CancellationToken;
use spanwire_gax::grpc::Code;
use spanwire_googleapis::spanner::v1::request_options::Priority;

mod common;
use common::*;

fn user_group(id: &str) -> MutationGroup {
    MutationGroup::new(vec![insert("User", &USER_COLUMNS, &[&id, &"batch", &1_i64])])
}

#[tokio::test]
async fn test_groups_commit_independently() {
    let fake = FakeSpanner::new();
    user_table(&fake, 0);
    let client = new_client(&fake).await;

    let groups = vec![
        user_group("user40"),
        MutationGroup::new(vec![insert("Missing", &["Id"], &[&"1"])]),
        user_group("user41").add(insert_or_update("User", &["UserId", "Name"], &[&"user41", &"updated"])),
    ];
    let results = client
        .batch_write(groups, None)
        .await
        .unwrap()
        .collect_results()
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    match &results[0] {
        GroupResult::Committed(Some(ts)) => assert_eq!(ts.unix_timestamp(), COMMIT_TIMESTAMP_SECONDS + 1),
        other => panic!("unexpected {other:?}"),
    }
    match &results[1] {
        GroupResult::Failed(status) => assert_eq!(status.code(), Code::NotFound),
        other => panic!("unexpected {other:?}"),
    }
    assert!(results[2].is_committed());

    let rows = fake.rows("User");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], string_value("updated"));
    client.close().await;
}

#[tokio::test]
async fn test_iterate_response_frames() {
    let fake = FakeSpanner::new();
    user_table(&fake, 0);
    let client = new_client(&fake).await;

    let options = BatchWriteOptions {
        exclude_txn_from_change_streams: true,
        call_options: CallOptions {
            priority: Some(Priority::Low),
            cancel: None,
        },
    };
    let mut iter = client
        .batch_write(vec![user_group("user1"), user_group("user2")], Some(options))
        .await
        .unwrap();
    let frame = iter.next().await.unwrap().unwrap();
    assert_eq!(frame.indexes, vec![0, 1]);
    assert_eq!(frame.status.unwrap().code, 0);
    assert!(iter.next().await.unwrap().is_none());

    let request = fake.requests().batch_writes.remove(0);
    assert!(request.exclude_txn_from_change_streams);
    assert_eq!(request.mutation_groups.len(), 2);
    assert_eq!(request.request_options.unwrap().priority, Priority::Low as i32);
    client.close().await;
}

#[tokio::test]
async fn test_empty_group_is_rejected_locally() {
    let fake = FakeSpanner::new();
    user_table(&fake, 0);
    let client = new_client(&fake).await;

    let groups = vec![user_group("user1"), MutationGroup::default()];
    match client.batch_write(groups, None).await {
        Err(Error::GRPC(status)) => assert_eq!(status.code(), Code::InvalidArgument),
        _ => panic!("empty group must be rejected"),
    }
    match client.batch_write(vec![], None).await {
        Err(Error::GRPC(status)) => assert_eq!(status.code(), Code::InvalidArgument),
        _ => panic!("empty batch must be rejected"),
    }
    assert!(fake.requests().batch_writes.is_empty());
    assert!(fake.rows("User").is_empty());
    client.close().await;
}

#[tokio::test]
async fn test_cancelled_batch_write() {
    let fake = FakeSpanner::new();
    user_table(&fake, 0);
    let client = new_client(&fake).await;
    let cancel = CancellationToken::new();
    let options = BatchWriteOptions {
        call_options: CallOptions {
            priority: None,
            cancel: Some(cancel.clone()),
        },
        ..Default::default()
    };
    let mut iter = client
        .batch_write(vec![user_group("user1")], Some(options))
        .await
        .unwrap();
    cancel.cancel();
    assert_eq!(iter.next().await.err().unwrap().code(), Code::Cancelled);
    client.close().await;
}
