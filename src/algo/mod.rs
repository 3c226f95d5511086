//! Numerical building blocks shared by the dispatchers.
//!
//! Summation, term generators and recurrence tools are public and
//! re-exported at the crate root; the kernels stay crate-private.

pub(crate) mod asym;
pub(crate) mod bessel;
pub(crate) mod bessel_relation;
pub(crate) mod constants;
pub(crate) mod gamma;
pub(crate) mod laguerre;
pub mod recurrence;
pub mod series;
pub(crate) mod terms;
