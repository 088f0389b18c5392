pub mod spanner_client;
pub mod verify;
