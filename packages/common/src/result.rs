use crate::error::CommonError;
use std::path::Path;

/// Common Result type alias
pub type CommonResult<T> = Result<T, CommonError>;

/// Read a UTF-8 source file, naming the path on failure
pub fn read_source(path: &Path) -> CommonResult<String> {
    std::fs::read_to_string(path).map_err(|e| CommonError::read(path, e))
}
