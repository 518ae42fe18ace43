use crate::silent_logs;
use scanrow::{Connection, Session, params};

async fn count<C: Connection>(session: &mut Session<C>) -> i64 {
    session
        .query("SELECT COUNT(*) AS total FROM ledger", params![])
        .await
        .expect("Failed to count the ledger");
    session.get_int("total")
}

pub async fn transactions<C: Connection>(session: &mut Session<C>) {
    session
        .execute("DROP TABLE IF EXISTS ledger", params![])
        .await
        .expect("Failed to drop the ledger table");
    session
        .execute("CREATE TABLE ledger (amount INTEGER)", params![])
        .await
        .expect("Failed to create the ledger table");

    silent_logs! {
        assert!(session.commit().await.is_err());
        assert!(session.revert().await.is_err());
    }

    // Rolled back
    session.begin().await.expect("Failed to begin");
    assert!(session.in_transaction());
    silent_logs! {
        assert!(session.begin().await.is_err());
    }
    assert!(session.in_transaction());
    session
        .execute("INSERT INTO ledger (amount) VALUES (?)", params![100])
        .await
        .expect("Failed to insert in the transaction");
    assert_eq!(count(session).await, 1);
    session.revert().await.expect("Failed to roll back");
    assert!(!session.in_transaction());
    assert_eq!(count(session).await, 0);

    // Committed
    session.begin().await.expect("Failed to begin");
    session
        .execute(
            "INSERT INTO ledger (amount) VALUES (?), (?)",
            params![250, -50],
        )
        .await
        .expect("Failed to insert in the transaction");
    session.commit().await.expect("Failed to commit");
    assert!(!session.in_transaction());
    assert_eq!(count(session).await, 2);
    assert!(session.commit().await.is_err());
}
