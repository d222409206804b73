use std::io::Write;

use crate::errors::KmerResult;
use crate::KmerReport;

mod json;

pub use json::write_json;

/// Significant digits used for frequencies in the text output.
pub const FREQUENCY_PRECISION: usize = 12;

pub const TEXT_EXT: &str = ".txt";
pub const JSON_EXT: &str = ".json";

/// Write one line per reported k-mer: the raw k-mer bytes, a space and its
/// frequency.
pub fn write_text<W: Write + ?Sized>(writer: &mut W, report: &KmerReport) -> KmerResult<()> {
    for kmer in report.iter() {
        writer.write_all(kmer.kmer)?;
        writeln!(
            writer,
            " {}",
            format_general(kmer.frequency, FREQUENCY_PRECISION)
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Render `value` like printf's `%.<precision>g`: `precision` significant
/// digits, trailing zeros removed, and scientific notation only when the
/// decimal exponent is below -4 or at least `precision`.
pub fn format_general(value: f64, precision: usize) -> String {
    let precision = usize::max(precision, 1);
    if value == 0. || !value.is_finite() {
        return value.to_string();
    }

    // the exponent has to come from the rounded value (0.99999... can
    // become 1.0 and move up a decade)
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{frequent_kmers, CountParams};

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(1., 12), "1");
        assert_eq!(format_general(2. / 3., 12), "0.666666666667");
        assert_eq!(format_general(1. / 3., 12), "0.333333333333");
        assert_eq!(format_general(0.5, 12), "0.5");
        assert_eq!(format_general(0.25, 12), "0.25");
        assert_eq!(format_general(0.0001, 12), "0.0001");
        assert_eq!(format_general(0.00001, 12), "1e-05");
        assert_eq!(format_general(1. / 70_000., 12), "1.42857142857e-05");
        assert_eq!(format_general(1e-8, 12), "1e-08");
        assert_eq!(format_general(123456789012345., 12), "1.23456789012e+14");
        assert_eq!(format_general(0., 12), "0");
        assert_eq!(format_general(0.999999999999999, 12), "1");
        assert_eq!(format_general(0.123456, 3), "0.123");
    }

    #[test]
    fn test_write_text() {
        let data = b"ABAB";
        let params = CountParams::new(2, 0.4).unwrap();
        let report = frequent_kmers(data, &params).unwrap();
        let mut out = Vec::new();
        write_text(&mut out, &report).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "AB 0.666666666667\nBA 0.333333333333\n"
        );
    }

    #[test]
    fn test_write_text_raw_bytes() {
        let data = b"\x00\xff\x00\xff";
        let params = CountParams::new(3, 0.).unwrap();
        let report = frequent_kmers(data, &params).unwrap();
        let mut out = Vec::new();
        write_text(&mut out, &report).unwrap();
        assert_eq!(out, b"\x00\xff\x00 0.5\n\xff\x00\xff 0.5\n".to_vec());
    }
}
