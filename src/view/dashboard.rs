use super::contacts::{contact_card, ContactCard};
use crate::types::{ContactStats, ContactSummary, MapMarker};

pub const EMPTY_RECENT_MESSAGE: &str = "No contacts yet";
pub const RECENT_CONTACTS_LIMIT: usize = 5;
/// Roughly the middle of Türkiye.
pub const DEFAULT_MAP_CENTER: (f64, f64) = (39.0, 35.0);

#[derive(Debug, Clone, PartialEq)]
pub enum RecentContacts {
    Cards(Vec<ContactCard>),
    Empty { message: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: ContactStats,
    pub recent: RecentContacts,
}

pub fn dashboard(stats: ContactStats, recent: &[ContactSummary]) -> DashboardView {
    let recent = if recent.is_empty() {
        RecentContacts::Empty {
            message: EMPTY_RECENT_MESSAGE,
        }
    } else {
        RecentContacts::Cards(
            recent
                .iter()
                .take(RECENT_CONTACTS_LIMIT)
                .map(contact_card)
                .collect(),
        )
    };
    DashboardView { stats, recent }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl MapBounds {
    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub contact_id: i64,
    pub title: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub pins: Vec<MapPin>,
    pub bounds: Option<MapBounds>,
    pub center: (f64, f64),
}

/// Smallest box holding every marker; `None` when there are no usable markers.
pub fn fit_bounds(markers: &[MapMarker]) -> Option<MapBounds> {
    markers
        .iter()
        .filter(|m| m.latitude.is_finite() && m.longitude.is_finite())
        .fold(None, |acc: Option<MapBounds>, m| {
            Some(match acc {
                None => MapBounds {
                    south: m.latitude,
                    west: m.longitude,
                    north: m.latitude,
                    east: m.longitude,
                },
                Some(b) => MapBounds {
                    south: b.south.min(m.latitude),
                    west: b.west.min(m.longitude),
                    north: b.north.max(m.latitude),
                    east: b.east.max(m.longitude),
                },
            })
        })
}

pub fn map_view(markers: &[MapMarker]) -> MapView {
    let pins = markers
        .iter()
        .map(|m| MapPin {
            contact_id: m.id,
            title: m.full_name.clone(),
            address: m.address.clone().unwrap_or_default(),
            latitude: m.latitude,
            longitude: m.longitude,
        })
        .collect();
    let bounds = fit_bounds(markers);
    let center = bounds.map(|b| b.center()).unwrap_or(DEFAULT_MAP_CENTER);
    MapView {
        pins,
        bounds,
        center,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: i64, lat: f64, lng: f64) -> MapMarker {
        MapMarker {
            id,
            full_name: format!("Kişi {id}"),
            address: None,
            latitude: lat,
            longitude: lng,
            tags: None,
        }
    }

    #[test]
    fn no_markers_centres_on_default() {
        let view = map_view(&[]);
        assert!(view.pins.is_empty());
        assert_eq!(view.bounds, None);
        assert_eq!(view.center, DEFAULT_MAP_CENTER);
    }

    #[test]
    fn bounds_cover_every_marker() {
        let markers = [marker(1, 41.0, 29.0), marker(2, 39.9, 32.8), marker(3, 38.4, 27.1)];
        let view = map_view(&markers);
        assert_eq!(
            view.bounds,
            Some(MapBounds {
                south: 38.4,
                west: 27.1,
                north: 41.0,
                east: 32.8
            })
        );
        assert_eq!(view.pins.len(), 3);
        assert_eq!(view.pins[1].title, "Kişi 2");
    }

    #[test]
    fn dashboard_without_recent_contacts_shows_empty_state() {
        let stats = ContactStats {
            total: 0,
            ..ContactStats::default()
        };
        let view = dashboard(stats, &[]);
        assert_eq!(
            view.recent,
            RecentContacts::Empty {
                message: EMPTY_RECENT_MESSAGE
            }
        );
    }
}
