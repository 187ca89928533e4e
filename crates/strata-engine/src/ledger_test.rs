use super::*;
use strata_core::Version;
use strata_db::TargetDb;

fn test_db() -> TargetDb {
    TargetDb::in_memory().unwrap()
}

fn ver(id: i64, hash: &str, source: &str) -> Version {
    Version {
        id,
        content_hash: hash.to_string(),
        source: source.to_string(),
        up: Vec::new(),
        down: Vec::new(),
    }
}

#[test]
fn ensure_table_inserts_the_sentinel_once() {
    let db = test_db();
    let ledger = Ledger::new("main");

    assert!(ledger.ensure_table(&db).unwrap());
    let rows = ledger.list_versions(&db).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 0);

    // second call is a no-op, not a second sentinel
    assert!(!ledger.ensure_table(&db).unwrap());
    assert_eq!(ledger.list_versions(&db).unwrap().len(), 1);
}

#[test]
fn list_versions_is_descending() {
    let db = test_db();
    let ledger = Ledger::new("main");
    ledger.ensure_table(&db).unwrap();

    db.transaction::<_, _, EngineError>(|conn| {
        ledger.insert_version(conn, &ver(2, "h2", "002_b.sql"))?;
        ledger.insert_version(conn, &ver(1, "h1", "001_a.sql"))?;
        ledger.insert_version(conn, &ver(3, "h3", "003_c.sql"))?;
        Ok(())
    })
    .unwrap();

    let rows = ledger.list_versions(&db).unwrap();
    assert_eq!(rows.iter().map(|v| v.id).collect::<Vec<_>>(), [3, 2, 1, 0]);
}

#[test]
fn current_version_is_the_top_row() {
    let db = test_db();
    let ledger = Ledger::new("main");
    ledger.ensure_table(&db).unwrap();

    assert_eq!(ledger.current_version(&db).unwrap().id, 0);

    db.transaction::<_, _, EngineError>(|conn| {
        ledger.insert_version(conn, &ver(5, "h5", "005_e.sql"))
    })
    .unwrap();

    let current = ledger.current_version(&db).unwrap();
    assert_eq!(current.id, 5);
    assert_eq!(current.source, "005_e.sql");
}

#[test]
fn delete_version_removes_one_row() {
    let db = test_db();
    let ledger = Ledger::new("main");
    ledger.ensure_table(&db).unwrap();

    db.transaction::<_, _, EngineError>(|conn| {
        ledger.insert_version(conn, &ver(1, "h1", "001_a.sql"))?;
        ledger.insert_version(conn, &ver(2, "h2", "002_b.sql"))?;
        Ok(())
    })
    .unwrap();

    db.transaction::<_, _, EngineError>(|conn| {
        ledger.delete_version(conn, &ver(2, "h2", "002_b.sql"))
    })
    .unwrap();

    let rows = ledger.list_versions(&db).unwrap();
    assert_eq!(rows.iter().map(|v| v.id).collect::<Vec<_>>(), [1, 0]);
}

#[test]
fn failed_transaction_leaves_the_ledger_untouched() {
    let db = test_db();
    let ledger = Ledger::new("main");
    ledger.ensure_table(&db).unwrap();

    let result = db.transaction::<_, (), EngineError>(|conn| {
        ledger.insert_version(conn, &ver(1, "h1", "001_a.sql"))?;
        Err(EngineError::Cancelled)
    });
    assert!(result.is_err());

    assert_eq!(ledger.list_versions(&db).unwrap().len(), 1);
}
