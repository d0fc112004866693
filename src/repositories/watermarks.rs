use crate::common::context::Context;
use crate::entities::watermarks::ChangeMarks;
use uuid::Uuid;

/// Reads the latest timestamp of every event column in a single round trip.
pub async fn fetch<C: Context>(ctx: &C, match_data_id: Uuid) -> sqlx::Result<ChangeMarks> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        "(SELECT MAX(time) FROM shots WHERE match_data_id = ?) AS shot_time, ",
        "(SELECT MAX(time) FROM player_changes WHERE match_data_id = ?) AS player_change_time, ",
        "(SELECT MAX(start_time) FROM pauses WHERE match_data_id = ?) AS pause_start_time, ",
        "(SELECT MAX(end_time) FROM pauses WHERE match_data_id = ?) AS pause_end_time, ",
        "(SELECT MAX(start_time) FROM match_parts WHERE match_data_id = ?) AS part_start_time, ",
        "(SELECT MAX(end_time) FROM match_parts WHERE match_data_id = ?) AS part_end_time, ",
        "(SELECT MAX(time) FROM attacks WHERE match_data_id = ?) AS attack_time, ",
        "(SELECT changed_at FROM match_data WHERE id = ?) AS match_data_time"
    );
    sqlx::query_as(QUERY)
        .bind(match_data_id)
        .bind(match_data_id)
        .bind(match_data_id)
        .bind(match_data_id)
        .bind(match_data_id)
        .bind(match_data_id)
        .bind(match_data_id)
        .bind(match_data_id)
        .fetch_one(ctx.db())
        .await
}
