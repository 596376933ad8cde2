use std::sync::Arc;

use uuid::Uuid;

use crate::realtime::{ChangeFeed, Topic};
use crate::repository::{BookingRepository, RECENT_UPDATES_LIMIT};
use crate::status::{FlightStatusView, StatusMonitor};
use crate::utils::error::AppResult;

#[derive(Clone)]
pub struct StatusService {
    repository: Arc<dyn BookingRepository>,
    feed: ChangeFeed,
}

impl StatusService {
    pub fn new(repository: Arc<dyn BookingRepository>, feed: ChangeFeed) -> Self {
        StatusService { repository, feed }
    }

    /// Current flight row plus the newest update-log entries.
    pub async fn snapshot(&self, flight_id: Uuid) -> AppResult<FlightStatusView> {
        let flight = self.repository.get_flight(flight_id).await?;
        let updates = self
            .repository
            .list_recent_updates(flight_id, RECENT_UPDATES_LIMIT)
            .await?;
        Ok(FlightStatusView::new(flight, updates))
    }

    /// Fetches the snapshot, then subscribes to the flight row and its update
    /// log. Events published before the subscriptions exist are not replayed.
    pub async fn open(&self, flight_id: Uuid) -> AppResult<StatusMonitor> {
        let view = self.snapshot(flight_id).await?;
        let flight_events = self.feed.subscribe(Topic::Flight(flight_id));
        let update_events = self.feed.subscribe(Topic::FlightUpdates(flight_id));
        tracing::debug!(%flight_id, "status view opened");
        Ok(StatusMonitor::new(view, flight_events, update_events))
    }
}
