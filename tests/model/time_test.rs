#[cfg(test)]
mod tests {
    use crosscut::model::{
        DateOrNow, Granularity, TimeDimension, DEFAULT_NUM_STEPS, TIME_DIMENSION_ID,
    };

    #[test]
    fn test_virtual_dimension_id_is_reserved() {
        // Stored expressions depend on the exact spelling.
        assert_eq!(TIME_DIMENSION_ID, "TIME_DIMENSION_ID");
    }

    #[test]
    fn test_granularity_round_trip() {
        for granularity in [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Quarter,
            Granularity::Year,
        ] {
            let rendered = granularity.to_string();
            assert_eq!(Granularity::from_str(&rendered), Some(granularity));
        }
        assert_eq!(Granularity::from_str("decade"), None);
    }

    #[test]
    fn test_default_time_dimension() {
        let time = TimeDimension::default();
        assert_eq!(time.start, DateOrNow::Now);
        assert_eq!(time.end, DateOrNow::Now);
        assert_eq!(time.granularity, Granularity::Month);
        assert_eq!(time.num_steps(), DEFAULT_NUM_STEPS);
    }

    #[test]
    fn test_step_items_are_decimal_indices() {
        let time = TimeDimension::new(
            DateOrNow::Date("2024-01-01".to_string()),
            DateOrNow::Now,
            Granularity::Week,
            4,
        );
        assert_eq!(time.step_item_ids(), vec!["0", "1", "2", "3"]);
        assert_eq!(TimeDimension::step_item_id(12), "12");
    }

    #[test]
    fn test_time_dimension_serde_round_trip() {
        let time = TimeDimension::new(
            DateOrNow::Date("2024-01-01".to_string()),
            DateOrNow::Date("2024-06-01".to_string()),
            Granularity::Month,
            5,
        );
        let json = serde_json::to_string(&time).unwrap();
        let back: TimeDimension = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
    }
}
