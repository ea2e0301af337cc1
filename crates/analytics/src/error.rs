use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("target yield per period must be positive to compute a break-even price")]
    ZeroYield,

    #[error(transparent)]
    Core(#[from] reserve_core::Error),
}
