use crate::rows::TicketRow;
use crate::{PostgresStore, db_error};
use booking_core::repository::{RepositoryResult, TicketRepository};
use booking_core::{EnrollmentId, Ticket};

impl TicketRepository for PostgresStore {
    async fn find_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> RepositoryResult<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(
            r"
            SELECT t.id, t.enrollment_id, t.status,
                   tt.id AS ticket_type_id, tt.name AS type_name, tt.price,
                   tt.is_remote, tt.includes_hotel
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            ",
        )
        .bind(enrollment_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_ticket"))?;

        row.map(Ticket::try_from).transpose()
    }
}
