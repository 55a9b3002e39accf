//! Status codes and error types for conversion calls.

use thiserror::Error;

use crate::kernel::KernelError;

/// Numeric result of a conversion call.
///
/// The values are part of the stable C ABI and are also used as process
/// exit codes by the CLI. Callers branch on these, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// Conversion succeeded.
    Ok = 0,
    /// A path argument was null.
    NullPath = 1,
    /// A path argument was empty.
    EmptyPath = 2,
    /// A path argument was not valid UTF-8.
    InvalidUtf8 = 3,
    /// A numeric option was zero, negative or not finite.
    InvalidOption = 4,
    /// The kernel could not read the input file.
    ReadFailed = 10,
    /// The kernel read the file but could not transfer its root entities.
    TransferFailed = 11,
    /// The input produced a null (empty) shape.
    NullShape = 12,
    /// The output file was not present after writing.
    WriteFailed = 20,
    /// The kernel reported a failure while processing.
    KernelFailure = 100,
    /// An unrecognized failure occurred while processing.
    Unknown = 101,
}

impl Status {
    /// The numeric code as used by the C ABI.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Errors returned by a conversion call.
///
/// The `Display` text is the diagnostic stored in the thread's last-error
/// slot. It is advisory only; use [`ConvertError::status`] to branch.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A path argument was null.
    #[error("Null parameter")]
    NullPath,

    /// A path argument was empty.
    #[error("Empty path")]
    EmptyPath,

    /// A path argument was not valid UTF-8.
    #[error("Invalid UTF-8 path")]
    InvalidUtf8,

    /// A numeric option was rejected.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The input could not be read.
    #[error("STEP read failed: {0}")]
    Read(String),

    /// Root entities could not be transferred.
    #[error("STEP read failed: {0}")]
    Transfer(String),

    /// The loaded shape is null.
    #[error("STEP read failed: resulting shape is null")]
    NullShape,

    /// The output file was missing after the write step.
    #[error("STL write failed: output file not created ({0})")]
    OutputMissing(String),

    /// The kernel reported a failure.
    #[error("Kernel exception: {0}")]
    Kernel(String),

    /// Anything else, including a panic inside the kernel.
    #[error("Unknown exception: {0}")]
    Unknown(String),
}

impl ConvertError {
    /// The status code reported for this error.
    pub fn status(&self) -> Status {
        match self {
            Self::NullPath => Status::NullPath,
            Self::EmptyPath => Status::EmptyPath,
            Self::InvalidUtf8 => Status::InvalidUtf8,
            Self::InvalidOption(_) => Status::InvalidOption,
            Self::Read(_) => Status::ReadFailed,
            Self::Transfer(_) => Status::TransferFailed,
            Self::NullShape => Status::NullShape,
            Self::OutputMissing(_) => Status::WriteFailed,
            Self::Kernel(_) => Status::KernelFailure,
            Self::Unknown(_) => Status::Unknown,
        }
    }
}

impl From<KernelError> for ConvertError {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::Read(msg) => Self::Read(msg),
            KernelError::Transfer(msg) => Self::Transfer(msg),
            KernelError::NullShape => Self::NullShape,
            e @ KernelError::Failure(_) => Self::Kernel(e.to_string()),
            KernelError::Other(msg) => Self::Unknown(msg),
        }
    }
}

/// Result type for conversion calls.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Ok.as_i32(), 0);
        assert_eq!(Status::NullPath.as_i32(), 1);
        assert_eq!(Status::EmptyPath.as_i32(), 2);
        assert_eq!(Status::InvalidUtf8.as_i32(), 3);
        assert_eq!(Status::InvalidOption.as_i32(), 4);
        assert_eq!(Status::ReadFailed.as_i32(), 10);
        assert_eq!(Status::TransferFailed.as_i32(), 11);
        assert_eq!(Status::NullShape.as_i32(), 12);
        assert_eq!(Status::WriteFailed.as_i32(), 20);
        assert_eq!(Status::KernelFailure.as_i32(), 100);
        assert_eq!(Status::Unknown.as_i32(), 101);
    }

    #[test]
    fn test_kernel_error_mapping() {
        let e: ConvertError = KernelError::Read("no such file".into()).into();
        assert_eq!(e.status(), Status::ReadFailed);

        let e: ConvertError = KernelError::Transfer("no roots".into()).into();
        assert_eq!(e.status(), Status::TransferFailed);

        let e: ConvertError = KernelError::NullShape.into();
        assert_eq!(e.status(), Status::NullShape);

        let e: ConvertError = KernelError::Failure(Some("BRep_API: command not done".into())).into();
        assert_eq!(e.status(), Status::KernelFailure);
        assert!(e.to_string().contains("BRep_API: command not done"));

        let e: ConvertError = KernelError::Failure(None).into();
        assert_eq!(e.status(), Status::KernelFailure);
        assert_eq!(e.to_string(), "Kernel exception: kernel failure");

        let e: ConvertError = KernelError::Other("bad state".into()).into();
        assert_eq!(e.status(), Status::Unknown);
    }
}
