// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One registrant, as read from the registration worksheet.
///
/// All the fields are kept as text, exactly as they appear in the sheet.
/// Any of them may be empty: a registrant renting a punch card typically
/// has no `punch_card_id`, and guests without an Eventor account have no
/// `person_id`.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Registration {
    pub given_name: String,
    pub surname: String,
    pub punch_card_id: String,
    pub club_name: String,
    /// The class the registrant entered, used as the course in SI-Droid.
    pub course_name: String,
    /// Identifier issued by Eventor.
    pub person_id: String,
}

// ******** Output data structures *********

/// One line of the lookup file read by SI-Droid.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Runner {
    pub punch_card_id: String,
    pub full_name: String,
    pub club_name: String,
    pub person_id: String,
    pub course_name: String,
}

impl Runner {
    /// The labels of the columns of the lookup file, in output order.
    pub const HEADER: [&'static str; 5] = ["Sportident", "Name", "Club", "Id", "Course"];

    pub fn from_registration(registration: &Registration) -> Runner {
        Runner {
            punch_card_id: registration.punch_card_id.clone(),
            full_name: format!("{} {}", registration.given_name, registration.surname),
            club_name: registration.club_name.clone(),
            person_id: registration.person_id.clone(),
            course_name: registration.course_name.clone(),
        }
    }

    /// The values of this runner, in the order of `Runner::HEADER`.
    pub fn fields(&self) -> [&str; 5] {
        [
            self.punch_card_id.as_str(),
            self.full_name.as_str(),
            self.club_name.as_str(),
            self.person_id.as_str(),
            self.course_name.as_str(),
        ]
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum LookupErrors {
    /// The string is not a well-formed BCP-47 language tag.
    InvalidLocale(String),
    /// No collation data could be loaded for this locale.
    CollatorUnavailable(String),
}

impl Error for LookupErrors {}

impl Display for LookupErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupErrors::InvalidLocale(tag) => write!(f, "invalid locale: {:?}", tag),
            LookupErrors::CollatorUnavailable(tag) => {
                write!(f, "no collation available for locale {:?}", tag)
            }
        }
    }
}

// ********* Configuration **********

/// The locale used for collation when nothing else is configured.
///
/// Eventor registrations are recorded in Swedish, where å, ä and ö are
/// letters of their own sorted after z.
pub const DEFAULT_LOCALE: &str = "sv";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            LookupErrors::InvalidLocale("??".to_string()).to_string(),
            "invalid locale: \"??\""
        );
        assert_eq!(
            LookupErrors::CollatorUnavailable("xx".to_string()).to_string(),
            "no collation available for locale \"xx\""
        );
    }
}
