use crate::error::RecordError;
use crate::models::Tenths;
use crate::utils::constants::FIELD_DELIMITER;

/// One `station;temperature` line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRecord<'a> {
    pub station: &'a str,
    pub temperature: Tenths,
}

/// Split a non-blank line on its first `;` and parse the temperature.
///
/// The station name is taken verbatim; the caller is expected to have
/// trimmed the line itself.
pub fn parse_record(line: &str) -> std::result::Result<ParsedRecord<'_>, RecordError> {
    let (station, temperature) = line
        .split_once(FIELD_DELIMITER)
        .ok_or(RecordError::MissingDelimiter)?;

    if station.is_empty() {
        return Err(RecordError::EmptyStation);
    }

    Ok(ParsedRecord {
        station,
        temperature: Tenths::parse(temperature)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record = parse_record("Hamburg;12.0").unwrap();
        assert_eq!(record.station, "Hamburg");
        assert_eq!(record.temperature, Tenths(120));
    }

    #[test]
    fn test_station_kept_verbatim() {
        let record = parse_record("Palmerston North;-3.4").unwrap();
        assert_eq!(record.station, "Palmerston North");
        assert_eq!(record.temperature, Tenths(-34));

        let record = parse_record("São Paulo;23.1").unwrap();
        assert_eq!(record.station, "São Paulo");
    }

    #[test]
    fn test_splits_on_first_delimiter_only() {
        // Everything after the first ';' is temperature text, so a second
        // delimiter makes the value invalid.
        assert_eq!(
            parse_record("A;1.0;2.0"),
            Err(RecordError::InvalidTemperature("1.0;2.0".to_string()))
        );
    }

    #[test]
    fn test_missing_delimiter() {
        assert_eq!(parse_record("Hamburg 12.0"), Err(RecordError::MissingDelimiter));
    }

    #[test]
    fn test_empty_station() {
        assert_eq!(parse_record(";12.0"), Err(RecordError::EmptyStation));
    }

    #[test]
    fn test_invalid_temperature() {
        assert_eq!(
            parse_record("Y;notanumber"),
            Err(RecordError::InvalidTemperature("notanumber".to_string()))
        );
        assert_eq!(
            parse_record("Y;"),
            Err(RecordError::InvalidTemperature(String::new()))
        );
    }
}
