use std::io::Write;

use serde::Serialize;

use crate::stats::{FleetTotals, ModeShare, TypeStats};

/// Output format for run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Serialize)]
struct TypeStatsRow<'a> {
    #[serde(rename = "VehicleType")]
    vehicle_type: &'a str,
    #[serde(rename = "VehicleCount")]
    vehicle_count: usize,
    #[serde(rename = "FlightTimePerFlight(Hours)")]
    flight_time_per_flight: f64,
    #[serde(rename = "DistPerFlight")]
    dist_per_flight: f64,
    #[serde(rename = "ChgSessionTime")]
    chg_session_time: f64,
    #[serde(rename = "TotalFaults")]
    total_faults: u32,
    #[serde(rename = "TotalPassengerMiles")]
    total_passenger_miles: f64,
}

#[derive(Serialize)]
struct ModeShareRow<'a> {
    #[serde(rename = "VehicleNumber")]
    vehicle_number: usize,
    #[serde(rename = "VehicleType")]
    vehicle_type: &'a str,
    #[serde(rename = "Idle")]
    idle: f64,
    #[serde(rename = "Wait_Chg")]
    wait_chg: f64,
    #[serde(rename = "Chg_Done")]
    chg_done: f64,
    #[serde(rename = "Chg")]
    chg: f64,
    #[serde(rename = "Fly")]
    fly: f64,
}

/// Per-type summary as CSV, one row per catalog type
pub fn write_type_stats_csv<W: Write>(writer: W, stats: &[TypeStats]) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for s in stats {
        csv.serialize(TypeStatsRow {
            vehicle_type: s.aircraft_type.label(),
            vehicle_count: s.vehicle_count,
            flight_time_per_flight: s.flight_time_per_flight_hours,
            dist_per_flight: s.distance_per_flight_miles,
            chg_session_time: s.charge_session_hours,
            total_faults: s.total_faults,
            total_passenger_miles: s.total_passenger_miles,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Per-vehicle time-in-mode fractions as CSV
pub fn write_mode_shares_csv<W: Write>(writer: W, shares: &[ModeShare]) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for s in shares {
        let [idle, wait_chg, chg_done, chg, fly] = s.shares;
        csv.serialize(ModeShareRow {
            vehicle_number: s.vehicle,
            vehicle_type: s.aircraft_type.label(),
            idle,
            wait_chg,
            chg_done,
            chg,
            fly,
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    totals: &'a FleetTotals,
    types: &'a [TypeStats],
    #[serde(skip_serializing_if = "Option::is_none")]
    modes: Option<&'a [ModeShare]>,
}

/// Full report as pretty JSON
pub fn write_json<W: Write>(
    writer: W,
    totals: &FleetTotals,
    types: &[TypeStats],
    modes: Option<&[ModeShare]>,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, &JsonReport { totals, types, modes })
}
