use jiff::civil::Date;
use snafu::Snafu;

pub type SkdResult<T> = Result<T, SkdError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SkdError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse date {:?}", original))]
    ParseDate {
        source: jiff::Error,
        original: String,
    },
    #[snafu(display("Unable to format date {}", date))]
    FormatDate { source: jiff::Error, date: Date },
    #[snafu(display("Date {} doesn't survive a round trip through {:?}", date, format))]
    UnrepresentableDate { date: Date, format: String },
    #[snafu(display("Unusable form date format {:?}", format))]
    InvalidDateFormat {
        #[snafu(source(from(SkdError, Box::new)))]
        source: Box<SkdError>,
        format: String,
    },
}
