use crate::rows::EnrollmentRow;
use crate::{PostgresStore, db_error};
use booking_core::repository::{EnrollmentRepository, RepositoryResult};
use booking_core::{Enrollment, UserId};

impl EnrollmentRepository for PostgresStore {
    async fn find_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r"
            SELECT id, user_id
            FROM enrollments
            WHERE user_id = $1
            ",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_enrollment"))?;

        Ok(row.map(Enrollment::from))
    }
}
