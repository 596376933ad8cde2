use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use skywings_booking::{
    models::flight::{Flight, FlightStatus},
    models::flight_update::{NotificationLevel, OperationalUpdate, UpdateType},
    realtime::ChangeFeed,
    repository::memory::InMemoryRepository,
    services::operations_service::OperationsService,
    services::status_service::StatusService,
    utils::error::AppError,
};
use test_context::{test_context, AsyncTestContext};
use tokio::time::timeout;
use uuid::Uuid;

mod common {
    pub mod test_utils;
}
use common::test_utils::{add_flight, test_flight};

struct StatusServiceContext {
    feed: ChangeFeed,
    status_service: StatusService,
    operations_service: OperationsService,
    flight: Flight,
}

#[async_trait]
impl AsyncTestContext for StatusServiceContext {
    async fn setup() -> Self {
        let repository = Arc::new(InMemoryRepository::new());
        let flight = add_flight(&repository, test_flight("SW101", "JFK", "CDG")).await;
        let feed = ChangeFeed::new(16);
        StatusServiceContext {
            status_service: StatusService::new(repository.clone(), feed.clone()),
            operations_service: OperationsService::new(repository, feed.clone()),
            feed,
            flight,
        }
    }

    async fn teardown(self) {}
}

#[test_context(StatusServiceContext)]
#[tokio::test]
async fn test_snapshot_lists_newest_updates_first(ctx: &StatusServiceContext) -> Result<(), AppError> {
    for i in 0..12 {
        ctx.operations_service
            .apply(
                ctx.flight.id,
                OperationalUpdate::Notice {
                    message: format!("notice {}", i),
                },
            )
            .await?;
    }

    let view = ctx.status_service.snapshot(ctx.flight.id).await?;
    assert_eq!(view.updates.len(), 10);
    assert_eq!(view.updates[0].message, "notice 11");
    assert_eq!(view.status_label(), Some("Scheduled"));

    Ok(())
}

#[test_context(StatusServiceContext)]
#[tokio::test]
async fn test_snapshot_of_unknown_flight(ctx: &StatusServiceContext) -> Result<(), AppError> {
    let view = ctx.status_service.snapshot(Uuid::new_v4()).await?;
    assert!(view.flight.is_none());
    assert_eq!(view.summary().status_label, "Flight information not available");
    Ok(())
}

#[test_context(StatusServiceContext)]
#[tokio::test]
async fn test_monitor_follows_a_delay(ctx: &StatusServiceContext) -> Result<(), AppError> {
    let mut monitor = ctx.status_service.open(ctx.flight.id).await?;
    assert_eq!(monitor.view().delay_notice(), None);

    let logged = ctx
        .operations_service
        .apply(ctx.flight.id, OperationalUpdate::Delay { minutes: 20 })
        .await?;
    assert_eq!(logged.update_type, UpdateType::Delay);
    assert_eq!(logged.message, "Flight SW101 delayed by 20 minutes");

    // One change for the flight row, one for the log entry, in either order
    let mut levels = Vec::new();
    for _ in 0..2 {
        let notification = timeout(Duration::from_secs(1), monitor.next_change())
            .await
            .expect("change should arrive")
            .expect("feed is open");
        levels.push(notification.level);
    }
    assert!(levels.contains(&NotificationLevel::Info));
    assert!(levels.contains(&NotificationLevel::Warning));

    let view = monitor.view();
    assert_eq!(view.status_label(), Some("Delayed"));
    assert_eq!(view.delay_notice().as_deref(), Some("Delayed by 20 minutes"));
    assert_eq!(view.updates[0].id, logged.id);

    Ok(())
}

#[test_context(StatusServiceContext)]
#[tokio::test]
async fn test_monitor_ignores_other_flights(ctx: &StatusServiceContext) -> Result<(), AppError> {
    let mut monitor = ctx.status_service.open(ctx.flight.id).await?;

    let other = Uuid::new_v4();
    assert!(ctx
        .operations_service
        .apply(other, OperationalUpdate::Delay { minutes: 5 })
        .await
        .is_err());

    ctx.operations_service
        .apply(
            ctx.flight.id,
            OperationalUpdate::GateChange {
                gate: "c4".to_string(),
            },
        )
        .await?;

    let mut messages = Vec::new();
    for _ in 0..2 {
        let notification = timeout(Duration::from_secs(1), monitor.next_change())
            .await
            .expect("change should arrive")
            .expect("feed is open");
        messages.push(notification.message);
    }
    assert!(messages.contains(&"Gate changed from B22 to C4".to_string()));
    assert_eq!(monitor.view().summary().gate.as_deref(), Some("C4"));

    Ok(())
}

#[test_context(StatusServiceContext)]
#[tokio::test]
async fn test_dropping_monitor_unsubscribes(ctx: &StatusServiceContext) -> Result<(), AppError> {
    assert_eq!(ctx.feed.subscriber_count(), 0);

    let monitor = ctx.status_service.open(ctx.flight.id).await?;
    assert_eq!(ctx.feed.subscriber_count(), 2);

    drop(monitor);
    assert_eq!(ctx.feed.subscriber_count(), 0);

    // Publishing with nobody listening is fine
    ctx.operations_service
        .apply(
            ctx.flight.id,
            OperationalUpdate::StatusChange {
                status: FlightStatus::Boarding,
            },
        )
        .await?;

    Ok(())
}
