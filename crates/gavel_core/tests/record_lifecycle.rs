use gavel_core::db::open_db_in_memory;
use gavel_core::{EntityKey, Member, RawField, Record, RepoError};

fn sample_member() -> Member {
    Member::new(None::<i64>, "Nick", "Lopez", "nlopez").unwrap()
}

#[test]
fn insert_assigns_generated_key() {
    let conn = open_db_in_memory().unwrap();

    let mut member = sample_member();
    assert!(member.key().is_transient());

    let id = member.insert(&conn).unwrap();
    assert!(id > 0);
    assert_eq!(member.key(), EntityKey::Persisted(id));
}

#[test]
fn second_insert_is_a_conflict_and_skips_the_store() {
    let conn = open_db_in_memory().unwrap();

    let mut member = sample_member();
    member.insert(&conn).unwrap();

    // With the table gone, any store round trip would be a Db error; the
    // precondition must fire first.
    conn.execute_batch("DROP TABLE members;").unwrap();

    let err = member.insert(&conn).unwrap_err();
    assert!(matches!(err, RepoError::Conflict { entity: "member" }));
}

#[test]
fn update_on_transient_record_is_not_found_and_skips_the_store() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE members;").unwrap();

    let member = sample_member();
    let err = member.update(&conn).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "member",
            operation: "update"
        }
    ));
}

#[test]
fn delete_on_transient_record_is_not_found_and_skips_the_store() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE members;").unwrap();

    let member = sample_member();
    let err = member.delete(&conn).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "member",
            operation: "delete"
        }
    ));
}

#[test]
fn update_whose_row_vanished_is_not_found() {
    let conn = open_db_in_memory().unwrap();

    let mut member = sample_member();
    let id = member.insert(&conn).unwrap();
    conn.execute("DELETE FROM members WHERE member_id = ?1;", [id])
        .unwrap();

    let err = member.update(&conn).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn delete_removes_the_row_and_consumes_the_record() {
    let conn = open_db_in_memory().unwrap();

    let mut member = sample_member();
    let id = member.insert(&conn).unwrap();

    member.delete(&conn).unwrap();
    assert!(Member::find_by_id(&conn, id).unwrap().is_none());
}

#[test]
fn find_by_id_returns_none_for_absent_rows() {
    let conn = open_db_in_memory().unwrap();
    assert!(Member::find_by_id(&conn, 12345).unwrap().is_none());
}

#[test]
fn find_by_id_rejects_bad_keys_as_store_boundary_errors() {
    let conn = open_db_in_memory().unwrap();

    for raw in [
        RawField::Text("forty-two"),
        RawField::Integer(0),
        RawField::Integer(-1),
        RawField::Absent,
    ] {
        let err = Member::find_by_id(&conn, raw).unwrap_err();
        assert!(
            matches!(err, RepoError::InvalidData { entity: "member", .. }),
            "expected InvalidData for {raw:?}, got {err}"
        );
    }
}

#[test]
fn find_by_id_surfaces_rows_that_fail_reconstruction() {
    let conn = open_db_in_memory().unwrap();

    let mut member = sample_member();
    let id = member.insert(&conn).unwrap();
    conn.execute("UPDATE members SET first_name = '' WHERE member_id = ?1;", [id])
        .unwrap();

    let err = Member::find_by_id(&conn, id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData { .. }));
}

#[test]
fn clearing_the_key_builds_a_new_transient_copy() {
    let conn = open_db_in_memory().unwrap();

    let mut member = sample_member();
    let first_id = member.insert(&conn).unwrap();

    member.set_key(RawField::Absent).unwrap();
    assert!(member.key().is_transient());

    let second_id = member.insert(&conn).unwrap();
    assert_ne!(first_id, second_id);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM members;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}
