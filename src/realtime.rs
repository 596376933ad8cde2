// Best-effort fan-out: lagging or late subscribers miss events, nothing is replayed.

use schemars::JsonSchema;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::flight::Flight;
use crate::models::flight_update::FlightUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Row updates of one flight
    Flight(Uuid),
    /// Inserts into one flight's update log
    FlightUpdates(Uuid),
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "event", content = "new", rename_all = "snake_case")]
pub enum ChangeEvent {
    FlightUpdated(Flight),
    UpdateInserted(FlightUpdate),
}

impl ChangeEvent {
    pub fn topic(&self) -> Topic {
        match self {
            ChangeEvent::FlightUpdated(flight) => Topic::Flight(flight.id),
            ChangeEvent::UpdateInserted(update) => Topic::FlightUpdates(update.flight_id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        ChangeFeed { sender }
    }

    /// Returns how many subscriptions were open when the event was sent.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        let topic = event.topic();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!(?topic, receivers, "published change event");
                receivers
            }
            // No one listening; the event is dropped
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self, topic: Topic) -> Subscription {
        Subscription {
            topic,
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Handle to one topic. Dropping it (or calling [`Subscription::cancel`])
/// unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    topic: Topic,
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Waits for the next event on this topic. `None` once the feed is gone.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.topic() == self.topic => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(topic = ?self.topic, skipped, "subscriber lagged, events lost");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flight_update::UpdateType;
    use chrono::Utc;

    fn update(flight_id: Uuid, message: &str) -> FlightUpdate {
        FlightUpdate {
            id: Uuid::new_v4(),
            flight_id,
            update_type: UpdateType::Other,
            message: message.to_string(),
            old_value: None,
            new_value: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn subscription_only_sees_its_topic() {
        let feed = ChangeFeed::new(16);
        let watched = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut sub = feed.subscribe(Topic::FlightUpdates(watched));

        feed.publish(ChangeEvent::UpdateInserted(update(other, "elsewhere")));
        feed.publish(ChangeEvent::UpdateInserted(update(watched, "here")));

        match sub.recv().await {
            Some(ChangeEvent::UpdateInserted(update)) => assert_eq!(update.message, "here"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn dropping_a_subscription_unsubscribes() {
        let feed = ChangeFeed::new(16);
        let sub = feed.subscribe(Topic::Flight(Uuid::new_v4()));
        assert_eq!(feed.subscriber_count(), 1);
        sub.cancel();
        assert_eq!(feed.subscriber_count(), 0);
        assert_eq!(
            feed.publish(ChangeEvent::UpdateInserted(update(Uuid::new_v4(), "nobody"))),
            0
        );
    }

    #[tokio::test]
    async fn late_subscribers_get_no_replay() {
        let feed = ChangeFeed::new(16);
        let flight_id = Uuid::new_v4();
        let _keepalive = feed.subscribe(Topic::FlightUpdates(Uuid::new_v4()));
        feed.publish(ChangeEvent::UpdateInserted(update(flight_id, "before")));

        let mut sub = feed.subscribe(Topic::FlightUpdates(flight_id));
        feed.publish(ChangeEvent::UpdateInserted(update(flight_id, "after")));

        match sub.recv().await {
            Some(ChangeEvent::UpdateInserted(update)) => assert_eq!(update.message, "after"),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
