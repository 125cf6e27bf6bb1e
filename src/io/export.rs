//! CSV export for the monthly series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::model::MonthlyMetrics;

/// Column header for the monthly CSV export.
const HEADER: &str = "month,days,ghi_kwh_m2,poa_irradiance,solar_elevation_deg,\
                      ambient_temp_c,module_temp_c,total_dc_power_kw,shading_losses_pct,\
                      inverter_efficiency_pct,loading_ratio_pct,total_ac_power_kw,\
                      total_energy_mwh,capacity_factor_pct,specific_yield_kwh_per_kwp,\
                      performance_ratio_pct";

/// Exports the monthly series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_monthly_csv(series: &[MonthlyMetrics], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_monthly_csv(series, buf)
}

/// Writes the monthly series as CSV to any writer.
///
/// One header row, then one row per month in series order. Output is
/// deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_monthly_csv(series: &[MonthlyMetrics], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for m in series {
        let sr = &m.solar_resource;
        wtr.write_record(&[
            m.month.to_string(),
            m.days.to_string(),
            format!("{:.2}", sr.ghi),
            format!("{:.4}", sr.poa_irradiance),
            format!("{:.4}", sr.solar_elevation_deg),
            format!("{:.2}", sr.ambient_temp_c),
            format!("{:.4}", sr.module_temp_c),
            format!("{:.3}", m.pv_modules.total_dc_power_kw),
            format!("{:.4}", m.fixed_structure.shading_losses_pct),
            format!("{:.2}", m.inverter.efficiency_pct),
            format!("{:.4}", m.inverter.loading_ratio_pct),
            format!("{:.3}", m.inverter.total_ac_power_kw),
            format!("{:.3}", m.overall.total_energy_mwh),
            format!("{:.4}", m.overall.capacity_factor_pct),
            format!("{:.4}", m.overall.specific_yield_kwh_per_kwp),
            format!("{:.4}", m.overall.performance_ratio_pct),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
