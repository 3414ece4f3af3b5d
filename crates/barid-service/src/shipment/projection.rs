//! Read-time projection of a shipment's current status and location.

use barid_entity::shipment::{Shipment, ShipmentStatus};
use barid_entity::tracking::TrackingEvent;

/// Current state shown to customers.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Current status.
    pub status: ShipmentStatus,
    /// Current location.
    pub location: String,
}

/// Derive the current state from the shipment and its history.
///
/// The latest event wins unless the shipment itself was updated strictly
/// later, which happens when a status change is saved without a description.
pub fn project(shipment: &Shipment, history: &[TrackingEvent]) -> Projection {
    let stored = Projection {
        status: shipment.status,
        location: shipment.display_location(),
    };

    let Some(latest) = history.iter().max_by_key(|event| event.timestamp) else {
        return stored;
    };
    if shipment.updated_at > latest.timestamp {
        return stored;
    }

    Projection {
        status: latest.status,
        location: if latest.location.trim().is_empty() {
            stored.location
        } else {
            latest.location.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barid_entity::shipment::Party;
    use chrono::{DateTime, Utc};

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn shipment(status: ShipmentStatus, location: &str, updated: i64) -> Shipment {
        Shipment {
            tracking_number: "AB1".into(),
            sender: Party {
                city: "Dubai".into(),
                country: "UAE".into(),
                ..Party::default()
            },
            receiver: Party::default(),
            package_details: Default::default(),
            delivery_options: Default::default(),
            status,
            current_location: location.into(),
            estimated_delivery: at(0),
            created_at: at(0),
            updated_at: at(updated),
        }
    }

    fn event(status: ShipmentStatus, location: &str, millis: i64) -> TrackingEvent {
        TrackingEvent::new("AB1", status, location, "", at(millis))
    }

    #[test]
    fn test_latest_event_wins() {
        let s = shipment(ShipmentStatus::Pending, "Dubai, UAE", 1_000);
        let history = vec![
            event(ShipmentStatus::Pending, "Dubai, UAE", 1_000),
            event(ShipmentStatus::Delivered, "Riyadh, KSA", 5_000),
            event(ShipmentStatus::InTransit, "Doha, Qatar", 3_000),
        ];
        let p = project(&s, &history);
        assert_eq!(p.status, ShipmentStatus::Delivered);
        assert_eq!(p.location, "Riyadh, KSA");
    }

    #[test]
    fn test_later_direct_update_wins() {
        let s = shipment(ShipmentStatus::Exception, "Customs, Jeddah", 9_000);
        let history = vec![event(ShipmentStatus::InTransit, "Doha, Qatar", 3_000)];
        let p = project(&s, &history);
        assert_eq!(p.status, ShipmentStatus::Exception);
        assert_eq!(p.location, "Customs, Jeddah");
    }

    #[test]
    fn test_empty_history_and_blank_location() {
        let s = shipment(ShipmentStatus::Pending, "", 0);
        let p = project(&s, &[]);
        assert_eq!(p.location, "Dubai, UAE");

        let p = project(&s, &[event(ShipmentStatus::PickedUp, " ", 10)]);
        assert_eq!(p.status, ShipmentStatus::PickedUp);
        assert_eq!(p.location, "Dubai, UAE");
    }
}
