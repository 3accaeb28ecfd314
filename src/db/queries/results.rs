use sqlx::SqlitePool;

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct GameResult {
    pub id: i64,
    pub username: String,
    pub score: i64,
}

pub async fn insert_result(pool: &SqlitePool, username: &str, score: i64) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;
    let id = sqlx::query(
        r#"
        INSERT INTO results (username, score) VALUES (?1, ?2)
        "#,
    )
    .bind(username)
    .bind(score)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn get_all_results(pool: &SqlitePool) -> sqlx::Result<Vec<GameResult>> {
    sqlx::query_as::<_, GameResult>(
        r#"
        SELECT id, username, score FROM results ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}
