#[cfg(test)]
mod tests {
    use crate::entry::{ChangeFrequency, Entry, LastModified, Location, Priority};
    use crate::errors::EntryError;

    /// Test: Location validation
    ///
    /// Purpose
    /// - Only absolute http(s) URLs with a host are accepted as locations
    ///
    /// Expected
    /// - Valid URLs keep their original text
    /// - Empty, relative and non-http URLs are rejected with InvalidLocation
    #[test]
    fn test_location_validation() {
        let loc = Location::new("https://www.acme.com/product/1234").expect("valid url");
        assert_eq!(loc.as_str(), "https://www.acme.com/product/1234");

        for bad in ["", "   ", "/product/1234", "acme.com", "ftp://acme.com/file", "mailto:me@acme.com"] {
            match Location::new(bad) {
                Err(EntryError::InvalidLocation { value, .. }) => assert_eq!(value, bad),
                other => panic!("expected InvalidLocation for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_change_frequency_closed_set() {
        let parsed: Vec<ChangeFrequency> = ["always", "hourly", "daily", "weekly", "monthly", "yearly", "never"]
            .iter()
            .map(|s| s.parse().expect("known frequency"))
            .collect();
        assert_eq!(parsed, ChangeFrequency::ALL.to_vec());

        assert_eq!(
            "Daily".parse::<ChangeFrequency>(),
            Err(EntryError::InvalidChangeFrequency("Daily".to_string()))
        );
        assert!("sometimes".parse::<ChangeFrequency>().is_err());
        assert_eq!(ChangeFrequency::Weekly.to_string(), "weekly");
    }

    #[test]
    fn test_change_frequency_serde_lowercase() {
        let freq: ChangeFrequency = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(freq, ChangeFrequency::Monthly);
        assert_eq!(serde_json::to_string(&ChangeFrequency::Never).unwrap(), "\"never\"");
    }

    /// Test: Priority bounds and formatting
    ///
    /// Expected
    /// - 0.0 and 1.0 are inclusive bounds; NaN and out-of-range values are rejected
    /// - Default priority is 0.5
    /// - Display uses the shortest float form ("1", "0.5")
    #[test]
    fn test_priority_bounds() {
        assert!(Priority::new(0.0).is_ok());
        assert!(Priority::new(1.0).is_ok());
        assert_eq!(Priority::new(1.01), Err(EntryError::InvalidPriority(1.01)));
        assert_eq!(Priority::new(-0.1), Err(EntryError::InvalidPriority(-0.1)));
        assert!(Priority::new(f64::NAN).is_err());

        assert_eq!(Priority::default().value(), 0.5);
        assert_eq!(Priority::new(1.0).unwrap().to_string(), "1");
        assert_eq!(Priority::new(0.7).unwrap().to_string(), "0.7");
    }

    #[test]
    fn test_last_modified_formats_date_only() {
        let lm = LastModified::from_ymd(2017, 1, 1).unwrap();
        assert_eq!(lm.to_string(), "2017-01-01");

        // 2017-01-01T23:59:59Z
        let from_ts = LastModified::from_unix_timestamp(1_483_315_199).unwrap();
        assert_eq!(from_ts, lm);

        let parsed: LastModified = "2017-01-01".parse().unwrap();
        assert_eq!(parsed, lm);

        assert!(LastModified::from_ymd(2017, 2, 30).is_err());
        assert!("01/01/2017".parse::<LastModified>().is_err());
    }

    #[test]
    fn test_last_modified_from_system_time() {
        let t = std::time::UNIX_EPOCH + std::time::Duration::from_secs(86_400 * 365);
        assert_eq!(LastModified::from_system_time(t).to_string(), "1971-01-01");
    }

    #[test]
    fn test_entry_builder_keeps_optional_fields() {
        let minimal = Entry::new(Location::new("https://www.acme.com/").unwrap());
        assert!(minimal.change_frequency().is_none());
        assert!(minimal.last_modified().is_none());
        assert!(minimal.priority().is_none());

        let full = minimal
            .clone()
            .with_change_frequency(ChangeFrequency::Daily)
            .with_priority(Priority::new(0.7).unwrap())
            .with_last_modified(LastModified::from_ymd(2020, 5, 17).unwrap());
        assert_eq!(full.location(), minimal.location());
        assert_eq!(full.change_frequency(), Some(ChangeFrequency::Daily));
        assert_eq!(full.priority().map(|p| p.value()), Some(0.7));
        assert_eq!(full.last_modified().unwrap().to_string(), "2020-05-17");
    }
}
