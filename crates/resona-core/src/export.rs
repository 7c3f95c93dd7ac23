//! Export formats for analysis results.
//!
//! - CSV for frequency responses and time series
//! - FRD (frequency response data, REW compatible)
//! - CSV import of input signals for simulation
//!
//! Writers take any [`Write`]; the `export_*` helpers create a file.

use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::response::FrequencyResponse;
use crate::transient::TimeSeries;

/// Write a frequency response as CSV.
///
/// Columns: `omega_rad_s, frequency_hz, magnitude_db, magnitude_normalized,
/// phase_deg`, plus `group_delay_s` when `unwrap_phase` is set (in which
/// case the phase column is unwrapped).
pub fn write_response_csv<W: Write>(
    mut writer: W,
    response: &FrequencyResponse,
    unwrap_phase: bool,
) -> io::Result<()> {
    write!(
        writer,
        "omega_rad_s,frequency_hz,magnitude_db,magnitude_normalized,phase_deg"
    )?;
    let (phase, delay) = if unwrap_phase {
        writeln!(writer, ",group_delay_s")?;
        (response.unwrapped_phase_degrees(), Some(response.group_delay()))
    } else {
        writeln!(writer)?;
        (response.phase_degrees.clone(), None)
    };

    for i in 0..response.len() {
        let w = response.omegas[i];
        write!(
            writer,
            "{:.9e},{:.9e},{:.6},{:.9},{:.6}",
            w,
            w / core::f64::consts::TAU,
            response.magnitude_db[i],
            response.magnitude_linear_normalized[i],
            phase[i]
        )?;
        match &delay {
            Some(d) => writeln!(writer, ",{:.9e}", d[i])?,
            None => writeln!(writer)?,
        }
    }
    Ok(())
}

/// Export a frequency response to a CSV file.
pub fn export_response_csv(
    response: &FrequencyResponse,
    path: impl AsRef<Path>,
    unwrap_phase: bool,
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_response_csv(&mut file, response, unwrap_phase)?;
    file.flush()
}

/// Export a frequency response in FRD format (`frequency_hz magnitude_db
/// phase_deg` per line).
pub fn export_frd(response: &FrequencyResponse, path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    writeln!(file, "* Frequency response data exported by resona")?;
    for i in 0..response.len() {
        writeln!(
            file,
            "{:.6} {:.6} {:.6}",
            response.omegas[i] / core::f64::consts::TAU,
            response.magnitude_db[i],
            response.phase_degrees[i]
        )?;
    }
    file.flush()
}

/// Write aligned columns sharing one time base as CSV.
///
/// The header is `t_s` followed by the column names.
///
/// # Errors
///
/// `InvalidInput` if a column's length differs from `t`.
pub fn write_time_series_csv<W: Write>(
    mut writer: W,
    t: &[f64],
    columns: &[(&str, &[f64])],
) -> io::Result<()> {
    if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != t.len()) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "column '{name}' has {} samples, time base has {}",
                values.len(),
                t.len()
            ),
        ));
    }

    write!(writer, "t_s")?;
    for (name, _) in columns {
        write!(writer, ",{name}")?;
    }
    writeln!(writer)?;

    for (i, ti) in t.iter().enumerate() {
        write!(writer, "{ti:.9e}")?;
        for (_, values) in columns {
            write!(writer, ",{:.9e}", values[i])?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Export one series to a CSV file with columns `t_s, <name>`.
pub fn export_time_series_csv(
    series: &TimeSeries,
    name: &str,
    path: impl AsRef<Path>,
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_time_series_csv(&mut file, series.t(), &[(name, series.values())])?;
    file.flush()
}

/// Read a signal from CSV.
///
/// The first two numeric columns of each row are taken as time and value.
/// Blank lines and `#` comments are skipped anywhere. Rows whose first field
/// is not a number (such as a header) are skipped only before the first data
/// row. Both `,` and `;` separate fields.
///
/// # Errors
///
/// `InvalidData` if a data row has fewer than two fields or a malformed
/// value, if a non-numeric row follows the first data row, or if the result
/// is not a valid [`TimeSeries`].
pub fn read_time_series_csv<R: BufRead>(reader: R) -> io::Result<TimeSeries> {
    let mut t = Vec::new();
    let mut values = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split([',', ';']).map(str::trim);
        let time = match fields.next().map(str::parse::<f64>) {
            Some(Ok(time)) => time,
            _ if t.is_empty() => continue,
            Some(Err(e)) => return Err(invalid_data(format!("line {}: {e}", number + 1))),
            None => return Err(invalid_data(format!("line {}: missing time column", number + 1))),
        };
        let value = fields
            .next()
            .ok_or_else(|| invalid_data(format!("line {}: missing value column", number + 1)))?
            .parse::<f64>()
            .map_err(|e| invalid_data(format!("line {}: {e}", number + 1)))?;

        t.push(time);
        values.push(value);
    }

    TimeSeries::new(t, values).map_err(|e| invalid_data(e.to_string()))
}

/// Read a signal from a CSV file.
pub fn import_time_series_csv(path: impl AsRef<Path>) -> io::Result<TimeSeries> {
    read_time_series_csv(BufReader::new(std::fs::File::open(path)?))
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
