//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `parcel_core` linkage and schema bootstrap without external setup.
//! - Keep output deterministic apart from the generated timestamp.

use parcel_core::db::migrations::latest_version;
use parcel_core::db::open_db_in_memory;
use parcel_core::{ParcelService, SqliteParcelRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("parcel_core ping={}", parcel_core::ping());
    println!("parcel_core version={}", parcel_core::core_version());
    println!("parcel_core schema_version={}", latest_version());

    match probe_store() {
        Ok(summary) => {
            println!("parcel_core store={summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("parcel_core store probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn probe_store() -> Result<String, Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn)?);

    let parcel = service.register(1000, "probe address")?;
    let next = service.advance_status(parcel.number)?.unwrap_or("none");
    Ok(format!("ok number={} next_status={next}", parcel.number))
}
