// ============================================
// Meetup Planner
// ============================================
//
// Turns a matched pair into concrete date proposals: the three closest
// meeting places by combined travel distance, a shared free time slot
// inside the planning window, an activity label derived from the place
// type, and an XP reward scaled by total distance.

use crate::models::GeoPoint;
use crate::utils::format_hhmm;
use serde::{Deserialize, Serialize};
use tracing::debug;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Planning window, minutes since midnight (07:00 - 22:00).
const WINDOW_START_MIN: u16 = 7 * 60;
const WINDOW_END_MIN: u16 = 22 * 60;

/// Minimum slot length for a date.
pub const DEFAULT_MIN_DURATION_MIN: u16 = 120;

/// Number of place proposals per pair.
const PROPOSALS_PER_PAIR: usize = 3;

/// XP awarded when the combined travel distance stays short.
const XP_NEARBY: u32 = 5;
const XP_FAR: u32 = 10;
const NEARBY_THRESHOLD_KM: f64 = 5.0;

/// A candidate meeting place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One concrete proposal for a pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetupPlan {
    pub place_name: String,
    pub activity: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_start: String,
    pub time_end: String,
    pub xp_reward: u32,
    pub total_distance_km: f64,
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    let h = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// First contiguous stretch of at least `min_duration` minutes inside
/// the planning window where neither user is busy. Busy intervals are
/// half-open `(start, end)` minute pairs. Returns the slot clipped to
/// exactly `min_duration`.
pub fn find_common_free_slot(
    busy_a: &[(u16, u16)],
    busy_b: &[(u16, u16)],
    min_duration: u16,
) -> Option<(u16, u16)> {
    let window = (WINDOW_END_MIN - WINDOW_START_MIN) as usize;
    let mut occupied = vec![false; window];

    for &(start, end) in busy_a.iter().chain(busy_b.iter()) {
        let from = start.max(WINDOW_START_MIN);
        let to = end.min(WINDOW_END_MIN);
        for minute in from..to {
            occupied[(minute - WINDOW_START_MIN) as usize] = true;
        }
    }

    let mut run = 0u16;
    for (offset, &busy) in occupied.iter().enumerate() {
        if busy {
            run = 0;
            continue;
        }
        run += 1;
        if run >= min_duration {
            let slot_start = offset as u16 + 1 - run + WINDOW_START_MIN;
            return Some((slot_start, slot_start + min_duration));
        }
    }
    None
}

/// Activity label for a place type.
pub fn activity_for(place_type: &str) -> &'static str {
    match place_type {
        "Cafe" => "Coffee date",
        "Dining" => "Dinner date",
        "Park" => "Walking date",
        "Shopping" => "Shopping date",
        "Cinema" => "Movie date",
        _ => "Hangout",
    }
}

/// XP for completing a date at the given combined distance.
pub fn xp_reward(total_distance_km: f64) -> u32 {
    if total_distance_km <= NEARBY_THRESHOLD_KM {
        XP_NEARBY
    } else {
        XP_FAR
    }
}

/// Propose up to three meetups for a pair. Returns an empty list when
/// either user has no home location or no shared free slot exists;
/// those pairs are skipped, not failed.
pub fn plan_for_pair(
    home_a: Option<GeoPoint>,
    home_b: Option<GeoPoint>,
    busy_a: &[(u16, u16)],
    busy_b: &[(u16, u16)],
    places: &[Place],
) -> Vec<MeetupPlan> {
    let (Some(home_a), Some(home_b)) = (home_a, home_b) else {
        debug!("skipping meetup planning: missing home location");
        return Vec::new();
    };

    let Some((slot_start, slot_end)) =
        find_common_free_slot(busy_a, busy_b, DEFAULT_MIN_DURATION_MIN)
    else {
        debug!("skipping meetup planning: no common free slot");
        return Vec::new();
    };

    let mut ranked: Vec<(f64, &Place)> = places
        .iter()
        .map(|place| {
            let location = GeoPoint {
                latitude: place.latitude,
                longitude: place.longitude,
            };
            let total = haversine_km(home_a, location) + haversine_km(home_b, location);
            (total, place)
        })
        .collect();
    ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(PROPOSALS_PER_PAIR)
        .map(|(total, place)| MeetupPlan {
            place_name: place.name.clone(),
            activity: activity_for(&place.place_type).to_string(),
            latitude: place.latitude,
            longitude: place.longitude,
            time_start: format_hhmm(slot_start),
            time_end: format_hhmm(slot_end),
            xp_reward: xp_reward(total),
            total_distance_km: total,
        })
        .collect()
}
