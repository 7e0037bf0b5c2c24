use evtol_fleet_sim::aircraft::Mode;
use evtol_fleet_sim::charger::ChargerAllocator;
use evtol_fleet_sim::sim_clock::MS_PER_HOUR;
use evtol_fleet_sim::{FleetSimulator, SimConfig, StatisticsAggregator};

fn main() {
    println!("=== Charger Contention Demo ===\n");

    // Same fleet, more chargers each run
    for chargers in 1..=5 {
        let config = SimConfig {
            fleet_size: 10,
            charger_count: chargers,
            ..SimConfig::default()
        };
        let mut sim = match FleetSimulator::with_random_fleet(config) {
            Ok(sim) => sim,
            Err(err) => {
                eprintln!("bad configuration: {err}");
                return;
            }
        };

        let mut peak_queue = 0;
        sim.simulate_with_callback(4 * MS_PER_HOUR, |s| {
            peak_queue = peak_queue.max(ChargerAllocator::queue_len(s.fleet()));
        });
        let waiting_ticks: u64 = sim.fleet().iter().map(|a| a.ticks_in(Mode::WaitingToCharge)).sum();
        let totals = StatisticsAggregator::new(&sim).fleet_totals();

        println!("{} charger(s)", chargers);
        println!("{}", "-".repeat(40));
        println!("  Trips:            {}", totals.trips);
        println!("  Passenger miles:  {:.0}", totals.passenger_miles);
        println!("  Peak queue:       {}", peak_queue);
        println!("  Hours queued:     {:.1}", sim.clock().ticks_to_hours(waiting_ticks));
        println!();
    }

    println!("=== Per-type summary (20 aircraft, 3 chargers) ===");
    let mut sim = match FleetSimulator::with_random_fleet(SimConfig::default()) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            return;
        }
    };
    sim.run();
    for stats in StatisticsAggregator::new(&sim).type_stats() {
        if stats.vehicle_count == 0 {
            continue;
        }
        println!(
            "  {:8} x{:2}  {:.2} h/flight  {:6.1} mi/flight  {:.2} h/charge  {:3} faults",
            stats.aircraft_type.label(),
            stats.vehicle_count,
            stats.flight_time_per_flight_hours,
            stats.distance_per_flight_miles,
            stats.charge_session_hours,
            stats.total_faults,
        );
    }
}
