use chrono::{Datelike, NaiveDate};
use gtfs_structures::{Calendar, Exception, Gtfs};
use std::collections::HashSet;

/// the GTFS services running on a single date
#[derive(Debug, Clone)]
pub struct ServiceCalendar {
    date: NaiveDate,
    active: HashSet<String>,
}

impl ServiceCalendar {
    /// a service runs on `date` if its calendar.txt entry covers the date and weekday and
    /// calendar_dates.txt does not remove it, or if calendar_dates.txt adds it for the date.
    pub fn new(gtfs: &Gtfs, date: NaiveDate) -> ServiceCalendar {
        let mut active: HashSet<String> = gtfs
            .calendar
            .iter()
            .filter(|(_, c)| runs_on(c, &date))
            .map(|(service_id, _)| service_id.clone())
            .collect();

        for (service_id, dates) in gtfs.calendar_dates.iter() {
            for calendar_date in dates.iter().filter(|cd| cd.date == date) {
                match calendar_date.exception_type {
                    Exception::Added => {
                        active.insert(service_id.clone());
                    }
                    Exception::Deleted => {
                        active.remove(service_id);
                    }
                }
            }
        }
        log::info!("{} service(s) running on {date}", active.len());
        ServiceCalendar { date, active }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn runs(&self, service_id: &str) -> bool {
        self.active.contains(service_id)
    }
}

fn runs_on(c: &Calendar, date: &NaiveDate) -> bool {
    if *date < c.start_date || c.end_date < *date {
        return false;
    }
    match date.weekday() {
        chrono::Weekday::Mon => c.monday,
        chrono::Weekday::Tue => c.tuesday,
        chrono::Weekday::Wed => c.wednesday,
        chrono::Weekday::Thu => c.thursday,
        chrono::Weekday::Fri => c.friday,
        chrono::Weekday::Sat => c.saturday,
        chrono::Weekday::Sun => c.sunday,
    }
}
