use crate::{config::FormConfig, data::non_blank, error::SkdResult};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One student. Every field is optional and nothing is validated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    birth_date: Option<Date>,
}

impl Student {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> StudentBuilder {
        StudentBuilder::default()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub const fn birth_date(&self) -> Option<Date> {
        self.birth_date
    }

    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.first_name = first_name;
    }

    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.last_name = last_name;
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn set_birth_date(&mut self, birth_date: Option<Date>) {
        self.birth_date = birth_date;
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        //strings are debug-quoted so that `Some("None")` can't render the same as `None`
        fn text(f: &mut Formatter<'_>, name: &str, value: Option<&str>) -> std::fmt::Result {
            match value {
                Some(value) => write!(f, "{name}={value:?}"),
                None => write!(f, "{name}=None"),
            }
        }

        write!(f, "Student(")?;
        text(f, "first_name", self.first_name())?;
        text(f, ", last_name", self.last_name())?;
        text(f, ", email", self.email())?;
        match self.birth_date {
            Some(birth_date) => write!(f, ", birth_date={birth_date})"),
            None => write!(f, ", birth_date=None)"),
        }
    }
}

/// Accumulates fields for a [`Student`]. Steps that are never called leave their field unset.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct StudentBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    birth_date: Option<Date>,
}

impl StudentBuilder {
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: Date) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn build(self) -> Student {
        let Self {
            first_name,
            last_name,
            email,
            birth_date,
        } = self;

        let student = Student {
            first_name,
            last_name,
            email,
            birth_date,
        };
        trace!(%student, "Built student");
        student
    }
}

/// A student as it arrives from (or leaves for) a text form - blank strings are unset fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: String,
}

impl FormStudent {
    pub fn from_student(student: &Student, config: &FormConfig) -> SkdResult<Self> {
        let birth_date = match student.birth_date {
            Some(date) => config.format_date(date)?,
            None => String::new(),
        };

        Ok(Self {
            first_name: student.first_name().unwrap_or_default().to_string(),
            last_name: student.last_name().unwrap_or_default().to_string(),
            email: student.email().unwrap_or_default().to_string(),
            birth_date,
        })
    }

    pub fn into_student(self, config: &FormConfig) -> SkdResult<Student> {
        let Self {
            first_name,
            last_name,
            email,
            birth_date,
        } = self;

        let birth_date = match non_blank(birth_date) {
            Some(birth_date) => Some(config.parse_date(&birth_date)?),
            None => None,
        };

        let student = Student {
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
            email: non_blank(email),
            birth_date,
        };
        debug!(%student, "Parsed student form");
        Ok(student)
    }
}
