//! Charger pool shared by the whole fleet
//!
//! The allocator only counts slots. The queue is implicit: it is whichever
//! aircraft are in `WaitingToCharge` when a slot is handed out, ranked by
//! how long they have been waiting.

use tracing::debug;

use crate::aircraft::{AircraftState, Mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargerAllocator {
    /// Total chargers
    pub capacity: usize,
    /// Chargers currently occupied
    pub in_use: usize,
}

impl ChargerAllocator {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, in_use: 0 }
    }

    pub fn available(&self) -> usize {
        self.capacity - self.in_use
    }

    pub fn has_free_charger(&self) -> bool {
        self.in_use < self.capacity
    }

    /// Grant a slot straight away to an aircraft that just started waiting,
    /// if one is free. Returns the index on success.
    pub fn try_allocate(&mut self, fleet: &mut [AircraftState], index: usize) -> Option<usize> {
        if !self.has_free_charger() || fleet.get(index).map_or(true, |a| !a.is_waiting()) {
            return None;
        }
        self.grant(fleet, index);
        Some(index)
    }

    /// Free the slot held by the aircraft at `index`, return it to Idle,
    /// and hand the slot to the longest-waiting aircraft, if any.
    pub fn release(&mut self, fleet: &mut [AircraftState], index: usize) -> Option<usize> {
        debug_assert!(self.in_use > 0, "release with no chargers in use");
        self.in_use = self.in_use.saturating_sub(1);
        fleet[index].leave_charger();
        debug!(vehicle = index, in_use = self.in_use, "charger released");
        self.allocate_next(fleet)
    }

    /// Grant a free slot to the waiting aircraft with the most ticks queued.
    /// Ties go to the lowest fleet index.
    pub fn allocate_next(&mut self, fleet: &mut [AircraftState]) -> Option<usize> {
        if !self.has_free_charger() {
            return None;
        }
        let next = Self::longest_waiting(fleet)?;
        self.grant(fleet, next);
        Some(next)
    }

    /// Index of the waiting aircraft with the largest wait count
    pub fn longest_waiting(fleet: &[AircraftState]) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, aircraft) in fleet.iter().enumerate() {
            if aircraft.mode != Mode::WaitingToCharge {
                continue;
            }
            // Strictly greater keeps the earliest index on ties
            if best.map_or(true, |(_, wait)| aircraft.ticks_waiting_for_charger > wait) {
                best = Some((i, aircraft.ticks_waiting_for_charger));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Number of aircraft currently queued
    pub fn queue_len(fleet: &[AircraftState]) -> usize {
        fleet.iter().filter(|a| a.is_waiting()).count()
    }

    fn grant(&mut self, fleet: &mut [AircraftState], index: usize) {
        self.in_use += 1;
        debug_assert!(self.in_use <= self.capacity, "charger capacity exceeded");
        let waited = fleet[index].ticks_waiting_for_charger;
        fleet[index].grant_charger();
        debug!(vehicle = index, waited, in_use = self.in_use, "charger granted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft_profile::AircraftType;

    fn waiting(aircraft_type: AircraftType, ticks: u32) -> AircraftState {
        let mut a = AircraftState::of_type(aircraft_type);
        a.remaining_energy_kwh = 0.0;
        a.mode = Mode::WaitingToCharge;
        a.ticks_waiting_for_charger = ticks;
        a
    }

    fn complete(aircraft_type: AircraftType) -> AircraftState {
        let mut a = AircraftState::of_type(aircraft_type);
        a.mode = Mode::ChargeComplete;
        a
    }

    #[test]
    fn test_try_allocate_with_capacity() {
        let mut fleet = vec![waiting(AircraftType::Alpha, 0)];
        let mut chargers = ChargerAllocator::new(1);

        assert_eq!(chargers.try_allocate(&mut fleet, 0), Some(0));
        assert_eq!(chargers.in_use, 1);
        assert_eq!(fleet[0].mode, Mode::Charging);
        assert_eq!(fleet[0].charging_sessions_started, 1);
    }

    #[test]
    fn test_try_allocate_when_full() {
        let mut fleet = vec![waiting(AircraftType::Alpha, 0), waiting(AircraftType::Beta, 0)];
        let mut chargers = ChargerAllocator::new(1);

        assert_eq!(chargers.try_allocate(&mut fleet, 0), Some(0));
        assert_eq!(chargers.try_allocate(&mut fleet, 1), None);
        assert_eq!(chargers.in_use, 1);
        assert_eq!(fleet[1].mode, Mode::WaitingToCharge);
    }

    #[test]
    fn test_try_allocate_ignores_non_waiting() {
        let mut fleet = vec![AircraftState::of_type(AircraftType::Alpha)];
        let mut chargers = ChargerAllocator::new(2);
        assert_eq!(chargers.try_allocate(&mut fleet, 0), None);
        assert_eq!(chargers.try_allocate(&mut fleet, 5), None);
        assert_eq!(chargers.in_use, 0);
    }

    #[test]
    fn test_allocate_next_prefers_longest_wait() {
        let mut fleet = vec![
            waiting(AircraftType::Alpha, 2),
            waiting(AircraftType::Beta, 7),
            waiting(AircraftType::Charlie, 5),
        ];
        let mut chargers = ChargerAllocator::new(1);

        assert_eq!(chargers.allocate_next(&mut fleet), Some(1));
        assert_eq!(fleet[1].mode, Mode::Charging);
        assert_eq!(fleet[1].ticks_waiting_for_charger, 0);
        assert_eq!(fleet[0].mode, Mode::WaitingToCharge);
        assert_eq!(fleet[2].mode, Mode::WaitingToCharge);
    }

    #[test]
    fn test_allocate_next_tie_breaks_by_index() {
        let mut fleet = vec![
            AircraftState::of_type(AircraftType::Alpha),
            waiting(AircraftType::Beta, 4),
            waiting(AircraftType::Charlie, 4),
        ];
        let mut chargers = ChargerAllocator::new(1);
        assert_eq!(chargers.allocate_next(&mut fleet), Some(1));
    }

    #[test]
    fn test_allocate_next_empty_queue() {
        let mut fleet = vec![AircraftState::of_type(AircraftType::Alpha)];
        let mut chargers = ChargerAllocator::new(1);
        assert_eq!(chargers.allocate_next(&mut fleet), None);
        assert_eq!(chargers.in_use, 0);
    }

    #[test]
    fn test_release_hands_slot_to_longest_waiting() {
        let mut fleet = vec![
            complete(AircraftType::Alpha),
            waiting(AircraftType::Beta, 1),
            waiting(AircraftType::Delta, 3),
        ];
        let mut chargers = ChargerAllocator::new(1);
        chargers.in_use = 1;

        assert_eq!(chargers.release(&mut fleet, 0), Some(2));
        assert_eq!(fleet[0].mode, Mode::Idle);
        assert_eq!(fleet[2].mode, Mode::Charging);
        assert_eq!(fleet[1].mode, Mode::WaitingToCharge);
        assert_eq!(chargers.in_use, 1);
    }

    #[test]
    fn test_release_with_empty_queue() {
        let mut fleet = vec![complete(AircraftType::Echo)];
        let mut chargers = ChargerAllocator::new(2);
        chargers.in_use = 1;

        assert_eq!(chargers.release(&mut fleet, 0), None);
        assert_eq!(chargers.in_use, 0);
        assert_eq!(chargers.available(), 2);
    }

    #[test]
    fn test_queue_len() {
        let fleet = vec![
            waiting(AircraftType::Alpha, 0),
            AircraftState::of_type(AircraftType::Beta),
            waiting(AircraftType::Charlie, 3),
        ];
        assert_eq!(ChargerAllocator::queue_len(&fleet), 2);
        assert_eq!(ChargerAllocator::longest_waiting(&fleet), Some(2));
    }
}
