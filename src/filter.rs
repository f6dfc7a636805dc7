use crate::domain::{CalendarResponse, FilterResult, SlotRow};

/// Walks every session of every center and pushes a row into each bucket
/// whose dose has open capacity, keyed by the session's exact age bracket
/// (18 or 45). Call once per weekly response; rows accumulate in `result`
/// so a 14-day lookahead is one combined pass, not two.
pub fn collect_available(calendar: &CalendarResponse, result: &mut FilterResult) {
    for center in &calendar.centers {
        for session in &center.sessions {
            if session.available_capacity_dose1 <= 0.0 && session.available_capacity_dose2 <= 0.0 {
                continue;
            }

            let row = |availability: f64| SlotRow {
                centre_name: center.name.clone(),
                district_name: center.district_name.clone(),
                pincode: center.pincode.to_string(),
                session_date: session.date.clone(),
                availability,
                min_age_limit: session.min_age_limit,
                vaccine: session.vaccine.clone(),
            };

            if session.available_capacity_dose1 > 0.0 {
                match session.min_age_limit {
                    18 => result.dose1_age18.push(row(session.available_capacity_dose1)),
                    45 => result.dose1_age45.push(row(session.available_capacity_dose1)),
                    _ => {}
                }
            }

            if session.available_capacity_dose2 > 0.0 {
                match session.min_age_limit {
                    18 => result.dose2_age18.push(row(session.available_capacity_dose2)),
                    45 => result.dose2_age45.push(row(session.available_capacity_dose2)),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Center, Session};

    fn calendar(sessions: Vec<Session>) -> CalendarResponse {
        CalendarResponse {
            centers: vec![Center {
                name: "Apollo Clinic".to_string(),
                district_name: "Satara".to_string(),
                pincode: 415514,
                sessions,
                ..Default::default()
            }],
        }
    }

    fn session(min_age: u32, dose1: f64, dose2: f64) -> Session {
        Session {
            date: "10-05-2021".to_string(),
            min_age_limit: min_age,
            vaccine: "COVISHIELD".to_string(),
            available_capacity: dose1 + dose2,
            available_capacity_dose1: dose1,
            available_capacity_dose2: dose2,
            ..Default::default()
        }
    }

    #[test]
    fn dose1_age18_lands_in_exactly_one_bucket() {
        let mut result = FilterResult::default();
        collect_available(&calendar(vec![session(18, 5.0, 0.0)]), &mut result);

        assert_eq!(result.dose1_age18.len(), 1);
        assert!(result.dose2_age18.is_empty());
        assert!(result.dose1_age45.is_empty());
        assert!(result.dose2_age45.is_empty());

        let row = &result.dose1_age18[0];
        assert_eq!(row.centre_name, "Apollo Clinic");
        assert_eq!(row.pincode, "415514");
        assert_eq!(row.availability, 5.0);
    }

    #[test]
    fn zero_capacity_in_both_doses_produces_no_rows() {
        let mut result = FilterResult::default();
        collect_available(&calendar(vec![session(18, 0.0, 0.0)]), &mut result);
        assert!(result.is_empty());
    }

    #[test]
    fn capacity_in_both_doses_produces_two_bucket_entries() {
        let mut result = FilterResult::default();
        collect_available(&calendar(vec![session(45, 3.0, 7.0)]), &mut result);

        assert_eq!(result.dose1_age45.len(), 1);
        assert_eq!(result.dose2_age45.len(), 1);
        assert_eq!(result.dose1_age45[0].availability, 3.0);
        assert_eq!(result.dose2_age45[0].availability, 7.0);
        assert!(result.dose1_age18.is_empty());
        assert!(result.dose2_age18.is_empty());
    }

    #[test]
    fn age_brackets_do_not_cross() {
        let mut result = FilterResult::default();
        collect_available(
            &calendar(vec![session(18, 1.0, 0.0), session(45, 2.0, 0.0)]),
            &mut result,
        );

        assert_eq!(result.dose1_age18.len(), 1);
        assert_eq!(result.dose1_age45.len(), 1);
        assert_eq!(result.dose1_age18[0].min_age_limit, 18);
        assert_eq!(result.dose1_age45[0].min_age_limit, 45);
    }

    #[test]
    fn unlisted_age_bracket_is_dropped() {
        let mut result = FilterResult::default();
        collect_available(&calendar(vec![session(60, 4.0, 4.0)]), &mut result);
        assert!(result.is_empty());
    }

    #[test]
    fn weekly_responses_merge_into_one_pass() {
        let mut result = FilterResult::default();
        collect_available(&calendar(vec![session(18, 5.0, 0.0)]), &mut result);
        collect_available(&calendar(vec![session(18, 2.0, 0.0)]), &mut result);

        assert_eq!(result.dose1_age18.len(), 2);
        assert_eq!(result.dose1_age18[0].availability, 5.0);
        assert_eq!(result.dose1_age18[1].availability, 2.0);
    }

    #[test]
    fn source_order_is_preserved() {
        let mut result = FilterResult::default();
        let mut first = session(18, 9.0, 0.0);
        first.date = "10-05-2021".to_string();
        let mut second = session(18, 1.0, 0.0);
        second.date = "11-05-2021".to_string();

        collect_available(&calendar(vec![first, second]), &mut result);
        assert_eq!(result.dose1_age18[0].session_date, "10-05-2021");
        assert_eq!(result.dose1_age18[1].session_date, "11-05-2021");
    }
}
