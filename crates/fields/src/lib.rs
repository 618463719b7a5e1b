//! Finite field arithmetic over GF(p) and GF(2^8).
//!
//! This crate provides three self-contained field implementations, each
//! backed by discrete-log/antilog lookup tables built once at construction:
//!
//! * [`PrimeField`] — GF(p) arithmetic with the fixed multiplicative
//!   generator 16, trusting the caller that the characteristic is prime.
//! * [`RobustPrimeField`] — GF(p) arithmetic that validates the
//!   characteristic and derives (and verifies) its own generator.
//! * [`Gf256`] — the 256-element binary extension field under the primitive
//!   polynomial 0x11D, as used by Reed–Solomon-style byte codes.
//!
//! The three fields are independent; pick the one matching the field order
//! you need and construct it once. A field instance is immutable after
//! construction and every operation is a pure function of its inputs and the
//! precomputed tables, so shared references can be used from multiple
//! threads without synchronization.
//!
//! # Examples
//! ```
//! use galois_fields::Gf256;
//!
//! let field = Gf256::new();
//! let product = field.mul(0x02, 0x8E);
//! assert_eq!(product, 0x01);
//! assert_eq!(field.inv(0x02), 0x8E);
//! ```

pub mod gf256;
pub mod prime;
pub mod robust;

pub use gf256::Gf256;
pub use prime::PrimeField;
pub use robust::{find_prime, is_prime, RobustPrimeField};

use core::fmt;
use thiserror::Error;

/// Errors that can occur while constructing a field.
///
/// Construction is the only fallible stage: once a field exists, its tables
/// are complete and every operation is total over in-range elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The characteristic cannot describe a field with at least two elements.
    #[error("characteristic {0} is too small for a prime field")]
    CharacteristicTooSmall(u16),
    /// The characteristic failed the primality check.
    #[error("characteristic {0} is not prime")]
    NonPrimeCharacteristic(u16),
    /// The generator's powers repeat before reaching every nonzero element,
    /// so complete lookup tables cannot be built.
    #[error("generator {generator} does not span the multiplicative group of GF({characteristic})")]
    DegenerateGenerator {
        /// The characteristic of the field being constructed.
        characteristic: u16,
        /// The generator whose cycle closed early.
        generator: u16,
    },
}

pub type Result<T> = core::result::Result<T, FieldError>;

/// Common arithmetic surface shared by every field in this crate.
///
/// This is the seam a coefficient-level consumer (for example a polynomial
/// layer doing convolution, long division, or Horner evaluation) codes
/// against: the six operations below are all it needs.
///
/// Two conventions hold for every implementation:
///
/// * dividing by zero (or dividing zero) returns the zero element rather
///   than signaling an error, and `inv(0)` returns zero;
/// * `pow(x, 0)` is the one element for every `x`, including zero.
pub trait Field {
    /// Raw representation of a field element.
    type Element: Copy + Eq + fmt::Debug;

    /// Number of elements in the field.
    fn order(&self) -> u32;
    /// The additive identity.
    fn zero(&self) -> Self::Element;
    /// The multiplicative identity.
    fn one(&self) -> Self::Element;
    /// Field addition.
    fn add(&self, x: Self::Element, y: Self::Element) -> Self::Element;
    /// Field subtraction.
    fn sub(&self, x: Self::Element, y: Self::Element) -> Self::Element;
    /// Field multiplication.
    fn mul(&self, x: Self::Element, y: Self::Element) -> Self::Element;
    /// Field division; zero divisor or zero dividend yields zero.
    fn div(&self, dividend: Self::Element, divisor: Self::Element) -> Self::Element;
    /// Raises `x` to `exponent`.
    fn pow(&self, x: Self::Element, exponent: u16) -> Self::Element;
    /// Multiplicative inverse; zero maps to zero.
    fn inv(&self, x: Self::Element) -> Self::Element;
}
