/*!
Turns the registrations of an orienteering event into the runner lookup
table used by SI-Droid.

```
use runner_lookup::{transform, LocaleCollation, Registration};
# use runner_lookup::LookupErrors;

let collation = LocaleCollation::new("sv")?;
let registrations = vec![Registration {
    given_name: "Anna".to_string(),
    surname: "Svensson".to_string(),
    punch_card_id: "123456".to_string(),
    club_name: "IFK".to_string(),
    course_name: "D21".to_string(),
    person_id: "1".to_string(),
}];
let runners = transform(&registrations, &collation);
assert_eq!(runners[0].full_name, "Anna Svensson");
# Ok::<(), LookupErrors>(())
```
*/

mod collation;
mod config;
use log::{debug, info};

use std::cmp::Ordering;
use std::collections::BTreeSet;

pub use crate::collation::*;
pub use crate::config::*;

/// Builds the lookup table for the given registrations.
///
/// The runners are ordered by course, then by surname, both compared with
/// `collation`. Registrations that compare equal on both keys keep their
/// relative order from the input. Every registration produces exactly one
/// runner; blank fields are carried over as blank.
pub fn transform<C: Collation + ?Sized>(
    registrations: &[Registration],
    collation: &C,
) -> Vec<Runner> {
    info!("transform: processing {:?} registrations", registrations.len());
    let runners: Vec<Runner> = sort_by_course_and_surname(registrations, collation)
        .into_iter()
        .map(Runner::from_registration)
        .collect();
    debug!("transform: runners: {:?}", runners);
    runners
}

/// Orders the registrations by course then surname.
///
/// The sort is stable.
pub fn sort_by_course_and_surname<'a, C: Collation + ?Sized>(
    registrations: &'a [Registration],
    collation: &C,
) -> Vec<&'a Registration> {
    let mut sorted: Vec<&Registration> = registrations.iter().collect();
    sorted.sort_by(|a, b| compare_course_and_surname(a, b, collation));
    sorted
}

fn compare_course_and_surname<C: Collation + ?Sized>(
    a: &Registration,
    b: &Registration,
    collation: &C,
) -> Ordering {
    collation
        .compare(&a.course_name, &b.course_name)
        .then_with(|| collation.compare(&a.surname, &b.surname))
}

/// A few numbers about a lookup table, for reporting.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LookupSummary {
    pub runners: usize,
    pub courses: usize,
    /// Runners with a blank punch card, who need a rental card on site.
    pub without_punch_card: usize,
}

pub fn summarize(runners: &[Runner]) -> LookupSummary {
    let courses: BTreeSet<&str> = runners.iter().map(|r| r.course_name.as_str()).collect();
    LookupSummary {
        runners: runners.len(),
        courses: courses.len(),
        without_punch_card: runners
            .iter()
            .filter(|r| r.punch_card_id.trim().is_empty())
            .count(),
    }
}
