pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Fails the enclosing function with [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange)
/// unless the condition holds. The error names the argument and the violated
/// condition.
#[macro_export]
macro_rules! verify_range {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_range(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_range(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        out_of_range(name, condition)
    }
}

#[cold]
pub fn out_of_range(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::OutOfRange {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use crate::ErrorKind;

    fn checked_month(month: i32) -> super::Result<i32> {
        verify_range!(month, (1..=12).contains(&month));
        Ok(month)
    }

    #[test]
    fn test_verify_range_reports_name_and_condition() {
        assert_eq!(checked_month(12).unwrap(), 12);
        let err = checked_month(13).unwrap_err();
        match err.kind() {
            ErrorKind::OutOfRange { name, message } => {
                assert_eq!(name, "month");
                assert!(message.contains("contains"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
