/// Time that can actually be planned: `available - buffer`, floored at 0.
///
/// A buffer larger than the available time is not an error; it just
/// leaves nothing to plan.
pub fn usable_minutes(available_minutes: u32, buffer_minutes: Option<u32>) -> u32 {
    available_minutes.saturating_sub(buffer_minutes.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtracts_buffer() {
        assert_eq!(usable_minutes(180, Some(30)), 150);
        assert_eq!(usable_minutes(90, None), 90);
    }

    #[test]
    fn floors_at_zero() {
        assert_eq!(usable_minutes(60, Some(90)), 0);
        assert_eq!(usable_minutes(60, Some(60)), 0);
    }
}
