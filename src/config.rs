use crate::error::{
    BadEnvVarSnafu, FormatDateSnafu, InvalidDateFormatSnafu, ParseDateSnafu, SkdResult,
    UnrepresentableDateSnafu,
};
use dotenvy::var;
use jiff::civil::{Date, date};
use snafu::{ResultExt, ensure};
use std::env::VarError;

pub const DEFAULT_FORM_DATE_FORMAT: &str = "%Y-%m-%d";
const FORM_DATE_FORMAT_VAR: &str = "SKD_FORM_DATE_FORMAT";
/// Day and month both distinguishable, so swapped or dropped fields show up on the way back.
const SAMPLE_DATE: Date = date(2000, 12, 31);

/// How [`FormStudent`](crate::data::student::FormStudent) reads and writes birth dates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormConfig {
    date_format: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_FORM_DATE_FORMAT.to_string(),
        }
    }
}

impl FormConfig {
    /// Reads `SKD_FORM_DATE_FORMAT`, falling back to [`DEFAULT_FORM_DATE_FORMAT`] when it isn't set.
    pub fn new() -> SkdResult<Self> {
        let config = match var(FORM_DATE_FORMAT_VAR) {
            Ok(date_format) => Self::with_date_format(date_format)?,
            Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Self::default(),
            Err(e) => {
                return Err(e).context(BadEnvVarSnafu {
                    name: FORM_DATE_FORMAT_VAR,
                });
            }
        };

        debug!(date_format = ?config.date_format, "Loaded form config");
        Ok(config)
    }

    /// Fails unless a sample date survives being written and read back with `date_format`.
    pub fn with_date_format(date_format: impl Into<String>) -> SkdResult<Self> {
        let config = Self {
            date_format: date_format.into(),
        };
        config
            .format_date(SAMPLE_DATE)
            .context(InvalidDateFormatSnafu {
                format: config.date_format.as_str(),
            })?;
        Ok(config)
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Renders `date`, making sure [`Self::parse_date`] gives back the same date.
    pub fn format_date(&self, date: Date) -> SkdResult<String> {
        let rendered = jiff::fmt::strtime::format(&self.date_format, date)
            .context(FormatDateSnafu { date })?;

        let read_back = Date::strptime(&self.date_format, &rendered);
        if let Err(e) = &read_back {
            debug!(?e, ?rendered, "Rendered date doesn't parse back");
        }
        ensure!(
            read_back.is_ok_and(|read_back| read_back == date),
            UnrepresentableDateSnafu {
                date,
                format: self.date_format.as_str(),
            }
        );

        Ok(rendered)
    }

    pub fn parse_date(&self, original: &str) -> SkdResult<Date> {
        Date::strptime(&self.date_format, original).context(ParseDateSnafu { original })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkdError;
    use rstest::rstest;

    #[test]
    fn default_uses_iso_dates() {
        let config = FormConfig::default();

        assert_eq!(config.date_format(), "%Y-%m-%d");
        assert_eq!(config.format_date(date(2000, 1, 1)).unwrap(), "2000-01-01");
        assert_eq!(config.parse_date("2000-01-01").unwrap(), date(2000, 1, 1));
    }

    #[test]
    fn custom_format_is_kept_verbatim() {
        let config = FormConfig::with_date_format("%d/%m/%Y").unwrap();

        assert_eq!(config.date_format(), "%d/%m/%Y");
        assert_ne!(config, FormConfig::default());
    }

    #[rstest]
    #[case::empty("")]
    #[case::year_only("%Y")]
    #[case::no_day("%Y-%m")]
    #[case::literal_text("birthday")]
    fn formats_that_lose_the_date_are_rejected(#[case] format: &str) {
        match FormConfig::with_date_format(format) {
            Err(SkdError::InvalidDateFormat {
                format: reported,
                source,
            }) => {
                assert_eq!(reported, format);
                assert!(
                    matches!(*source, SkdError::UnrepresentableDate { .. }),
                    "unexpected cause {source:?}"
                );
            }
            other => panic!("expected an invalid format error, got {other:?}"),
        }
    }

    #[test]
    fn formats_needing_a_time_are_rejected() {
        match FormConfig::with_date_format("%H:%M") {
            Err(SkdError::InvalidDateFormat { source, .. }) => match *source {
                SkdError::FormatDate { date, .. } => assert_eq!(date, SAMPLE_DATE),
                other => panic!("expected a format error, got {other:?}"),
            },
            other => panic!("expected an invalid format error, got {other:?}"),
        }
    }

    #[test]
    fn two_digit_years_only_cover_one_century() {
        let config = FormConfig::with_date_format("%d/%m/%y").unwrap();

        assert_eq!(config.format_date(date(1999, 3, 4)).unwrap(), "04/03/99");
        match config.format_date(date(1850, 3, 4)) {
            Err(SkdError::UnrepresentableDate { date: reported, format }) => {
                assert_eq!(reported, date(1850, 3, 4));
                assert_eq!(format, "%d/%m/%y");
            }
            other => panic!("expected an unrepresentable date error, got {other:?}"),
        }
    }

    //the only test touching SKD_FORM_DATE_FORMAT, so nothing else races on it
    #[test]
    fn new_reads_the_environment() {
        // SAFETY: no other test reads or writes this variable
        unsafe { std::env::remove_var(FORM_DATE_FORMAT_VAR) };
        assert_eq!(FormConfig::new().unwrap(), FormConfig::default());

        unsafe { std::env::set_var(FORM_DATE_FORMAT_VAR, "%d.%m.%Y") };
        assert_eq!(FormConfig::new().unwrap().date_format(), "%d.%m.%Y");

        unsafe { std::env::set_var(FORM_DATE_FORMAT_VAR, "%Y") };
        assert!(matches!(
            FormConfig::new(),
            Err(SkdError::InvalidDateFormat { .. })
        ));

        #[cfg(unix)]
        {
            use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

            unsafe { std::env::set_var(FORM_DATE_FORMAT_VAR, OsStr::from_bytes(b"\xff")) };
            match FormConfig::new() {
                Err(SkdError::BadEnvVar { source, name }) => {
                    assert_eq!(name, FORM_DATE_FORMAT_VAR);
                    assert!(matches!(
                        source,
                        dotenvy::Error::EnvVar(VarError::NotUnicode(_))
                    ));
                }
                other => panic!("expected a bad env var error, got {other:?}"),
            }
        }

        unsafe { std::env::remove_var(FORM_DATE_FORMAT_VAR) };
    }
}
