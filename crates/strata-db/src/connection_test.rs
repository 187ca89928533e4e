use super::*;
use crate::error::DbResult;

#[test]
fn in_memory_opens() {
    let db = TargetDb::in_memory().unwrap();
    db.execute_batch("SELECT 1").unwrap();
}

#[test]
fn memory_path_special_case() {
    let db = TargetDb::new(":memory:").unwrap();
    db.execute_batch("SELECT 1").unwrap();
}

#[test]
fn file_backed_database_persists() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("target.duckdb");

    {
        let db = TargetDb::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE t (id BIGINT); INSERT INTO t VALUES (1);")
            .unwrap();
    }

    let db = TargetDb::from_path(&path).unwrap();
    assert!(db.relation_exists("main", "t").unwrap());
}

#[test]
fn current_schema_is_main_by_default() {
    let db = TargetDb::in_memory().unwrap();
    assert_eq!(db.current_schema().unwrap(), "main");
}

#[test]
fn relation_exists_probe() {
    let db = TargetDb::in_memory().unwrap();
    assert!(!db.relation_exists("main", "t").unwrap());

    db.execute_batch("CREATE TABLE t (id BIGINT)").unwrap();
    assert!(db.relation_exists("main", "t").unwrap());
    assert!(!db.relation_exists("other", "t").unwrap());
}

#[test]
fn transaction_commits_on_ok() {
    let db = TargetDb::in_memory().unwrap();
    db.execute_batch("CREATE TABLE t (id BIGINT)").unwrap();

    db.transaction::<_, _, DbError>(|conn| {
        conn.execute("INSERT INTO t VALUES (1)", [])?;
        conn.execute("INSERT INTO t VALUES (2)", [])?;
        Ok(())
    })
    .unwrap();

    let count: DbResult<i64> = db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .map_err(DbError::from)
    });
    assert_eq!(count.unwrap(), 2);
}

#[test]
fn transaction_rolls_back_on_error() {
    let db = TargetDb::in_memory().unwrap();
    db.execute_batch("CREATE TABLE t (id BIGINT)").unwrap();

    let result = db.transaction::<_, (), DbError>(|conn| {
        conn.execute("INSERT INTO t VALUES (1)", [])?;
        conn.execute("INSERT INTO missing_table VALUES (1)", [])?;
        Ok(())
    });
    assert!(result.is_err());

    let count: DbResult<i64> = db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .map_err(DbError::from)
    });
    assert_eq!(count.unwrap(), 0);
}
