//! Result type alias for pinload

use super::errors::PinloadError;

/// Result type alias for pinload operations
///
/// # Examples
///
/// ```
/// use pinload::domain::result::Result;
/// use pinload::domain::errors::PinloadError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PinloadError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PinloadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(PinloadError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
