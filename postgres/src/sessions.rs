use crate::rows::SessionRow;
use crate::{PostgresStore, db_error};
use booking_core::Session;
use booking_core::repository::{RepositoryResult, SessionRepository};

impl SessionRepository for PostgresStore {
    async fn find_by_token(&self, token: &str) -> RepositoryResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT user_id, token FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_session"))?;

        Ok(row.map(Session::from))
    }
}
