//! Seed script for development — populates a fresh database with sample teams and flows.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` and `JWT_SECRET` environment variables (reads .env).
//! Prints a bearer token for the seeded user.

use anyhow::Context;
use groupmatch::config::AppConfig;
use groupmatch::models::matching_flow::{FlowStatus, MatchingFlow};
use groupmatch::models::meeting_schedule::{MeetingSchedule, ScheduleStatus};
use groupmatch::models::team::Team;
use groupmatch::models::user::UserId;
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("DATABASE_URL and JWT_SECRET must be set")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== Group Matching Seed Script ===");

    let user = UserId::new_v4();
    let teams = seed_teams(&pool, user).await?;
    let flows = seed_flows(&pool, &teams).await?;
    seed_schedules(&pool, &flows).await?;

    let token = groupmatch::services::auth::issue_access_token(
        user,
        &config.jwt_secret,
        config.jwt_access_token_expiry_secs,
    )?;

    println!("\n=== Seed complete! ===");
    println!("User id: {user}");
    println!(
        "Bearer token (expires in {}s): {token}",
        config.jwt_access_token_expiry_secs
    );

    Ok(())
}

/// Create the user's own team plus three rivals; returns them own-team first.
async fn seed_teams(pool: &PgPool, user: UserId) -> anyhow::Result<Vec<Team>> {
    let mut teams = Vec::new();
    for name in ["Sakura Squad", "Night Owls", "Weekend Hikers", "Board Gamers"] {
        let team = sqlx::query_as::<_, Team>(
            "INSERT INTO teams (id, name) VALUES ($1, $2) RETURNING id, name, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .fetch_one(pool)
        .await?;
        teams.push(team);
    }

    sqlx::query("INSERT INTO team_members (team_id, user_id, is_active) VALUES ($1, $2, true)")
        .bind(teams[0].id)
        .bind(user)
        .execute(pool)
        .await?;

    println!("[done] Created {} teams", teams.len());
    Ok(teams)
}

async fn seed_flows(pool: &PgPool, teams: &[Team]) -> anyhow::Result<Vec<MatchingFlow>> {
    let own = teams[0].id;
    let plan = [
        (own, teams[1].id, FlowStatus::Confirmed),
        (teams[2].id, own, FlowStatus::Confirmed),
        (own, teams[3].id, FlowStatus::Cancelled),
        (teams[1].id, teams[3].id, FlowStatus::InProgress(1)),
    ];

    let mut flows = Vec::new();
    for (from, to, status) in plan {
        let flow = sqlx::query_as::<_, MatchingFlow>(
            r#"
            INSERT INTO team_matching_flows (id, from_team_id, to_team_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, from_team_id, to_team_id, status, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(from)
        .bind(to)
        .bind(status.code())
        .fetch_one(pool)
        .await?;
        flows.push(flow);
    }

    let visible = flows.iter().filter(|f| f.involves(own)).count();
    println!("[done] Created {} matching flows ({visible} visible to the seeded user)", flows.len());
    Ok(flows)
}

async fn seed_schedules(pool: &PgPool, flows: &[MatchingFlow]) -> anyhow::Result<()> {
    let Some(first_confirmed) = flows
        .iter()
        .find(|f| f.flow_status() == FlowStatus::Confirmed)
    else {
        return Ok(());
    };

    let schedule = sqlx::query_as::<_, MeetingSchedule>(
        r#"
        INSERT INTO meeting_schedules (id, matching_flow_id, status, scheduled_at, location)
        VALUES ($1, $2, $3, NOW() + INTERVAL '7 days', 'Shibuya')
        RETURNING id, matching_flow_id, status, scheduled_at, location, created_at
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(first_confirmed.id)
    .bind(ScheduleStatus::CONFIRMED)
    .fetch_one(pool)
    .await?;

    println!(
        "[done] Created meeting schedule ({}) for flow {}",
        schedule.schedule_status().as_str(),
        schedule.matching_flow_id
    );
    Ok(())
}
