use parcel_core::db::open_db_in_memory;
use parcel_core::{
    Parcel, ParcelRepository, RepoError, SqliteParcelRepository, STATUS_REGISTERED,
    STATUS_SHIPPED,
};
use rusqlite::Connection;

const CREATED_AT: &str = "2024-12-18T12:00:00Z";

fn test_parcel() -> Parcel {
    Parcel::new(1000, STATUS_REGISTERED, "test", CREATED_AT)
}

#[test]
fn add_get_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let parcel = test_parcel();

    let number = repo.add(&parcel).unwrap();
    assert!(number > 0);

    let stored = repo.get(number).unwrap();
    assert_eq!(stored, Parcel { number, ..parcel });

    repo.delete(number).unwrap();
    let err = repo.get(number).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == number));
}

#[test]
fn add_ignores_caller_number_and_never_reuses_deleted_numbers() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let mut parcel = test_parcel();
    parcel.number = 42;
    let first = repo.add(&parcel).unwrap();
    assert_eq!(first, 1);

    repo.delete(first).unwrap();
    let second = repo.add(&parcel).unwrap();
    assert!(second > first);
}

#[test]
fn set_status_changes_only_status() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let number = repo.add(&test_parcel()).unwrap();

    repo.set_status(number, STATUS_SHIPPED).unwrap();

    let updated = repo.get(number).unwrap();
    assert_eq!(updated.status, STATUS_SHIPPED);
    assert_eq!(updated.client, 1000);
    assert_eq!(updated.address, "test");
    assert_eq!(updated.created_at, CREATED_AT);
}

#[test]
fn set_status_accepts_arbitrary_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let number = repo.add(&test_parcel()).unwrap();

    repo.set_status(number, "lost in transit").unwrap();
    assert_eq!(repo.get(number).unwrap().status, "lost in transit");

    repo.set_status(number, STATUS_REGISTERED).unwrap();
    assert_eq!(repo.get(number).unwrap().status, STATUS_REGISTERED);
}

#[test]
fn set_address_updates_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let number = repo.add(&test_parcel()).unwrap();

    repo.set_address(number, "new address").unwrap();

    assert_eq!(repo.get(number).unwrap().address, "new address");
}

#[test]
fn set_address_is_ignored_after_shipping() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let number = repo.add(&test_parcel()).unwrap();

    repo.set_status(number, STATUS_SHIPPED).unwrap();
    repo.set_address(number, "new address").unwrap();

    let stored = repo.get(number).unwrap();
    assert_eq!(stored.address, "test");
    assert_eq!(stored.status, STATUS_SHIPPED);
}

#[test]
fn delete_is_ignored_after_shipping() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let number = repo.add(&test_parcel()).unwrap();

    repo.set_status(number, STATUS_SHIPPED).unwrap();
    repo.delete(number).unwrap();

    assert_eq!(repo.get(number).unwrap().status, STATUS_SHIPPED);
}

#[test]
fn get_by_client_returns_only_that_clients_parcels_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let first = Parcel::new(1000, STATUS_REGISTERED, "address 1", CREATED_AT);
    let second = Parcel::new(1000, STATUS_SHIPPED, "address 2", CREATED_AT);
    let other = Parcel::new(2000, STATUS_REGISTERED, "elsewhere", CREATED_AT);

    let first_number = repo.add(&first).unwrap();
    repo.add(&other).unwrap();
    let second_number = repo.add(&second).unwrap();

    let parcels = repo.get_by_client(1000).unwrap();
    assert_eq!(
        parcels,
        vec![
            Parcel {
                number: first_number,
                ..first
            },
            Parcel {
                number: second_number,
                ..second
            },
        ]
    );
}

#[test]
fn get_by_client_without_parcels_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    repo.add(&test_parcel()).unwrap();

    assert!(repo.get_by_client(9999).unwrap().is_empty());
}

#[test]
fn get_missing_number_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let err = repo.get(77).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(77)));
    assert_eq!(err.to_string(), "parcel not found: 77");
}

#[test]
fn repository_accepts_externally_created_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE parcel (
            number INTEGER PRIMARY KEY AUTOINCREMENT,
            client INTEGER,
            status TEXT,
            address TEXT,
            created_at TEXT
        );",
    )
    .unwrap();

    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let number = repo.add(&test_parcel()).unwrap();
    assert_eq!(repo.get(number).unwrap().address, "test");
}

#[test]
fn repository_rejects_connection_without_parcel_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteParcelRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("parcel"))
    ));
}

#[test]
fn repository_rejects_parcel_table_missing_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE parcel (
            number INTEGER PRIMARY KEY AUTOINCREMENT,
            client INTEGER,
            status TEXT,
            address TEXT
        );",
    )
    .unwrap();

    let result = SqliteParcelRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "parcel",
            column: "created_at"
        })
    ));
}

#[test]
fn get_by_client_reports_undecodable_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    conn.execute(
        "INSERT INTO parcel (client, status, address, created_at)
         VALUES (5, 'registered', NULL, ?1);",
        [CREATED_AT],
    )
    .unwrap();

    let err = repo.get_by_client(5).unwrap_err();
    assert_eq!(err.operation(), Some("get_by_client"));
}
