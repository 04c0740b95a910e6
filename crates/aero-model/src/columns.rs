//! Canonical column names shared by the yearly reports and the airport detail file.

/// Flight date after normalization.
pub const FECHA: &str = "Fecha";
/// Date column spelling used by some yearly reports.
pub const FECHA_UTC: &str = "Fecha UTC";
/// Passenger count after normalization.
pub const PASAJEROS: &str = "Pasajeros";
/// Passenger count spelling used by some yearly reports.
pub const PAX: &str = "PAX";
/// Airport the flight was recorded at.
pub const AEROPUERTO: &str = "Aeropuerto";
/// Aircraft type.
pub const AERONAVE: &str = "Aeronave";

/// Airport name in the reference table.
pub const DENOMINACION: &str = "denominacion";
/// Local airport code in the reference table.
pub const LOCAL: &str = "local";
