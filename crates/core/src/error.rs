use thiserror::Error;

/// Errors from fixed-point arithmetic on reserve money types.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("arithmetic overflow")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("value {0} is out of the allowed range")]
    OutOfRange(i64),

    #[error("quantity must be strictly positive")]
    NotPositive,

    #[error("quantity must be non-negative")]
    Negative,
}
