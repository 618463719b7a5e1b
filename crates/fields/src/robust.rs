//! Self-validating GF(p) arithmetic.
//!
//! Unlike [`PrimeField`](crate::PrimeField), construction here proves its
//! own preconditions: the characteristic must pass a primality check, and
//! the derived generator — the largest prime strictly below the
//! characteristic — must walk through every nonzero element exactly once
//! before wrapping. That heuristic usually produces a full multiplicative
//! cycle but not always (the powers of 13 modulo 17 repeat after four
//! steps), so construction watches for the cycle closing early and refuses
//! to build degenerate tables. Division uses the discrete-log identity and
//! is O(1), in contrast to the table-free fallback in
//! [`PrimeField::div`](crate::PrimeField::div).

use tracing::debug;

use crate::{Field, FieldError, Result};

/// GF(p) with a validated characteristic and a verified generator.
///
/// Tables are sized exactly `order`: the antilog table fills `order - 1`
/// slots from successive powers of the generator, and the wraparound value
/// `generator^(order-1) == 1` is stored at `exp[order-1]` without a `log`
/// entry, so `log(1)` keeps the canonical exponent 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobustPrimeField {
    order: u16,
    generator: u16,
    exp: Box<[u16]>,
    log: Box<[u16]>,
}

impl RobustPrimeField {
    /// Validates `characteristic`, derives a generator, and builds the
    /// lookup tables.
    ///
    /// # Errors
    /// * [`FieldError::NonPrimeCharacteristic`] when the characteristic
    ///   fails the primality check.
    /// * [`FieldError::DegenerateGenerator`] when the derived generator's
    ///   powers repeat before covering every nonzero element. This also
    ///   rejects any composite the trial-division window misses, since no
    ///   composite modulus has a multiplicative cycle of length p−1.
    pub fn new(characteristic: u16) -> Result<Self> {
        if !is_prime(characteristic) {
            return Err(FieldError::NonPrimeCharacteristic(characteristic));
        }
        let Some(generator) = find_prime(characteristic) else {
            return Err(FieldError::NonPrimeCharacteristic(characteristic));
        };

        let p = characteristic as usize;
        let mut exp = vec![0u16; p].into_boxed_slice();
        let mut log = vec![0u16; p].into_boxed_slice();

        let mut x: u16 = 1;
        for i in 0..p - 1 {
            if x == 1 && i > 0 {
                return Err(FieldError::DegenerateGenerator {
                    characteristic,
                    generator,
                });
            }
            exp[i] = x;
            log[x as usize] = i as u16;
            x = mod_mul(x, generator, characteristic);
        }
        exp[p - 1] = x;

        debug!(
            order = characteristic,
            generator, "built validated prime field lookup tables"
        );
        Ok(Self {
            order: characteristic,
            generator,
            exp,
            log,
        })
    }

    /// Number of elements in the field.
    pub fn order(&self) -> u32 {
        u32::from(self.order)
    }

    /// The generator derived at construction.
    pub fn generator(&self) -> u16 {
        self.generator
    }

    fn check_element(&self, x: u16) {
        assert!(
            x < self.order,
            "element {x} out of field range for GF({})",
            self.order
        );
    }

    /// Addition modulo the characteristic.
    pub fn add(&self, x: u16, y: u16) -> u16 {
        self.check_element(x);
        self.check_element(y);
        ((u32::from(x) + u32::from(y)) % u32::from(self.order)) as u16
    }

    /// Subtraction modulo the characteristic. The borrow case is computed as
    /// `p - (y - x)`; subtracting in unsigned arithmetic first would wrap.
    pub fn sub(&self, x: u16, y: u16) -> u16 {
        self.check_element(x);
        self.check_element(y);
        if x >= y {
            x - y
        } else {
            self.order - (y - x)
        }
    }

    /// Table-backed multiplication with the index sum reduced modulo the
    /// multiplicative group order.
    pub fn mul(&self, x: u16, y: u16) -> u16 {
        self.check_element(x);
        self.check_element(y);
        if x == 0 || y == 0 {
            return 0;
        }
        let index = (u32::from(self.log[x as usize]) + u32::from(self.log[y as usize]))
            % u32::from(self.order - 1);
        self.exp[index as usize]
    }

    /// Division via the discrete-log identity: the logarithm difference is
    /// taken through a signed intermediate and normalized back into table
    /// range when negative. Dividing by zero, or dividing zero, yields zero
    /// by convention.
    pub fn div(&self, dividend: u16, divisor: u16) -> u16 {
        self.check_element(dividend);
        self.check_element(divisor);
        if divisor == 0 || dividend == 0 {
            return 0;
        }
        let diff =
            i32::from(self.log[dividend as usize]) - i32::from(self.log[divisor as usize]);
        if diff >= 0 {
            self.exp[diff as usize]
        } else {
            self.exp[(i32::from(self.order - 1) + diff) as usize]
        }
    }

    /// Raises `x` to `exponent` via the log identity. `pow(x, 0)` is 1 for
    /// every `x`, and zero raised to a positive power stays zero.
    pub fn pow(&self, x: u16, exponent: u16) -> u16 {
        self.check_element(x);
        if exponent == 0 {
            return 1;
        }
        if x == 0 {
            return 0;
        }
        let index =
            u32::from(exponent) * u32::from(self.log[x as usize]) % u32::from(self.order - 1);
        self.exp[index as usize]
    }

    /// Multiplicative inverse; zero has none and maps to zero.
    pub fn inv(&self, x: u16) -> u16 {
        self.check_element(x);
        if x == 0 {
            return 0;
        }
        self.exp[(self.order - 1 - self.log[x as usize]) as usize]
    }

    /// Plain modular multiplication, used to build the tables and kept
    /// public as the reference implementation for the fast path.
    pub fn slow_mul(&self, x: u16, y: u16) -> u16 {
        self.check_element(x);
        self.check_element(y);
        if x == 0 || y == 0 {
            return 0;
        }
        mod_mul(x, y, self.order)
    }
}

impl Field for RobustPrimeField {
    type Element = u16;

    fn order(&self) -> u32 {
        RobustPrimeField::order(self)
    }
    fn zero(&self) -> u16 {
        0
    }
    fn one(&self) -> u16 {
        1
    }
    fn add(&self, x: u16, y: u16) -> u16 {
        RobustPrimeField::add(self, x, y)
    }
    fn sub(&self, x: u16, y: u16) -> u16 {
        RobustPrimeField::sub(self, x, y)
    }
    fn mul(&self, x: u16, y: u16) -> u16 {
        RobustPrimeField::mul(self, x, y)
    }
    fn div(&self, dividend: u16, divisor: u16) -> u16 {
        RobustPrimeField::div(self, dividend, divisor)
    }
    fn pow(&self, x: u16, exponent: u16) -> u16 {
        RobustPrimeField::pow(self, x, exponent)
    }
    fn inv(&self, x: u16) -> u16 {
        RobustPrimeField::inv(self, x)
    }
}

/// Trial-division primality check over the divisor window `[2, x/2)`.
///
/// The open upper bound is part of this field's compatibility contract: 4
/// has no divisor in `[2, 2)` and is reported prime here. It is the only
/// composite the window misses, and [`RobustPrimeField::new`] still rejects
/// it through the degenerate-generator check.
pub fn is_prime(x: u16) -> bool {
    if x < 2 {
        return false;
    }
    (2..x / 2).all(|i| x % i != 0)
}

/// Largest prime strictly below `max`, found by decrementing from
/// `max - 1`. Returns `None` when no such prime exists (`max < 2`);
/// `find_prime(2)` answers 2 itself as a boundary convention.
pub fn find_prime(max: u16) -> Option<u16> {
    if max < 2 {
        return None;
    }
    if max == 2 {
        return Some(2);
    }
    (2..max).rev().find(|&candidate| is_prime(candidate))
}

fn mod_mul(x: u16, y: u16, modulus: u16) -> u16 {
    ((u32::from(x) * u32::from(y)) % u32::from(modulus)) as u16
}
