//! Result type alias for ifcbatch

use super::errors::IfcBatchError;

/// Result type alias for ifcbatch operations
///
/// # Examples
///
/// ```
/// use ifcbatch::domain::result::Result;
/// use ifcbatch::domain::errors::IfcBatchError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(IfcBatchError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, IfcBatchError>;
