use schemars::JsonSchema;
use serde::Serialize;

use crate::models::flight::Flight;
use crate::models::flight_update::{FlightUpdate, NotificationLevel};
use crate::realtime::{ChangeEvent, Subscription};

/// Pushed rows replace the held flight wholesale; there is no field merge.
pub fn reconcile_flight(_current: Option<Flight>, incoming: Flight) -> Option<Flight> {
    Some(incoming)
}

/// New log entries go to the front. The live path does not cap the list.
pub fn prepend_update(mut updates: Vec<FlightUpdate>, incoming: FlightUpdate) -> Vec<FlightUpdate> {
    updates.insert(0, incoming);
    updates
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct FlightStatusView {
    pub flight: Option<Flight>,
    pub updates: Vec<FlightUpdate>,
}

impl FlightStatusView {
    pub fn new(flight: Option<Flight>, updates: Vec<FlightUpdate>) -> Self {
        FlightStatusView { flight, updates }
    }

    /// Folds one event into the view and returns the toast it should raise.
    pub fn apply(&mut self, event: ChangeEvent) -> Notification {
        match event {
            ChangeEvent::FlightUpdated(flight) => {
                self.flight = reconcile_flight(self.flight.take(), flight);
                Notification {
                    level: NotificationLevel::Info,
                    message: "Flight status updated!".to_string(),
                }
            }
            ChangeEvent::UpdateInserted(update) => {
                let notification = Notification {
                    level: update.update_type.notification_level(),
                    message: update.message.clone(),
                };
                self.updates = prepend_update(std::mem::take(&mut self.updates), update);
                notification
            }
        }
    }

    pub fn status_label(&self) -> Option<&'static str> {
        self.flight.as_ref().map(|flight| flight.status.label())
    }

    pub fn delay_notice(&self) -> Option<String> {
        self.flight.as_ref().and_then(Flight::delay_notice)
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary {
            status_label: self
                .status_label()
                .unwrap_or("Flight information not available")
                .to_string(),
            delay_notice: self.delay_notice(),
            gate: self.flight.as_ref().and_then(|flight| flight.gate.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct StatusSummary {
    pub status_label: String,
    pub delay_notice: Option<String>,
    pub gate: Option<String>,
}

// What a status stream sends after every change
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct StatusSnapshot {
    pub view: FlightStatusView,
    pub summary: StatusSummary,
    pub notification: Option<Notification>,
}

/// A status view bound to its two subscriptions. Dropping the monitor
/// tears both down.
pub struct StatusMonitor {
    view: FlightStatusView,
    flight_events: Subscription,
    update_events: Subscription,
}

impl StatusMonitor {
    pub fn new(view: FlightStatusView, flight_events: Subscription, update_events: Subscription) -> Self {
        StatusMonitor {
            view,
            flight_events,
            update_events,
        }
    }

    pub fn view(&self) -> &FlightStatusView {
        &self.view
    }

    pub fn snapshot(&self, notification: Option<Notification>) -> StatusSnapshot {
        StatusSnapshot {
            view: self.view.clone(),
            summary: self.view.summary(),
            notification,
        }
    }

    /// Waits for whichever subscription fires first and applies it.
    /// `None` when the feed has shut down.
    pub async fn next_change(&mut self) -> Option<Notification> {
        let event = tokio::select! {
            event = self.flight_events.recv() => event,
            event = self.update_events.recv() => event,
        };
        Some(self.view.apply(event?))
    }
}
