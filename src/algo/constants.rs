//! Shared constants used by multiple algorithm modules.
//!
//! Module-specific constants remain in their respective files.

#![allow(clippy::excessive_precision)]
#![allow(clippy::approx_constant)]

/// π
pub(crate) const PI: f64 = 3.14159265358979324e+00;

/// ln(π), used by the reflection formula for ln Γ.
pub(crate) const LN_PI: f64 = 1.14472988584940017e+00;

/// ln(2π), used in Stirling's formula.
pub(crate) const LN_2PI: f64 = 1.83787706640934548e+00;

/// log₁₀(2): converts binary digits to decimal digits.
pub(crate) const R1M5: f64 = 0.30102999566398120;
