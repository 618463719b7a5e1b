//! GF(p) arithmetic with a fixed multiplicative generator.
//!
//! This field trusts its caller: the characteristic is assumed to be prime
//! and is not validated. The lookup tables are built from the fixed
//! generator 16, and because 16 = 4² is a quadratic residue modulo every odd
//! prime, its powers reach at most half of the nonzero elements. The
//! table-backed operations — [`mul`](PrimeField::mul),
//! [`pow`](PrimeField::pow), [`inv`](PrimeField::inv) — are therefore only
//! defined for elements in the orbit of 16; [`add`](PrimeField::add),
//! [`sub`](PrimeField::sub), [`div`](PrimeField::div) and
//! [`slow_mul`](PrimeField::slow_mul) never consult the tables and are
//! correct for the whole field. [`RobustPrimeField`](crate::RobustPrimeField)
//! is the variant that validates its inputs and verifies its generator.

use tracing::debug;

use crate::{Field, FieldError, Result};

/// Fixed multiplicative generator used to build the lookup tables.
pub const GENERATOR: u16 = 16;

/// GF(p) with log/antilog lookup tables over the fixed generator 16.
///
/// The antilog table is stored at double length (2p entries) so that the
/// index sums produced by multiplication never need a modular reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    order: u16,
    exp: Box<[u16]>,
    log: Box<[u16]>,
}

impl PrimeField {
    /// Builds the lookup tables for GF(`characteristic`).
    ///
    /// The characteristic must be at least 2; primality is the caller's
    /// responsibility and is not checked.
    pub fn new(characteristic: u16) -> Result<Self> {
        if characteristic < 2 {
            return Err(FieldError::CharacteristicTooSmall(characteristic));
        }

        let p = characteristic as usize;
        let mut exp = vec![0u16; 2 * p].into_boxed_slice();
        let mut log = vec![0u16; p].into_boxed_slice();

        let mut x: u16 = 1;
        for i in 0..p - 1 {
            exp[i] = x;
            log[x as usize] = i as u16;
            x = mod_mul(x, GENERATOR, characteristic);
        }
        // Fermat closes the cycle at exponent p-1, so the doubled region
        // repeats the antilog sequence with period p-1.
        exp[p - 1] = x;
        for i in p..2 * p {
            exp[i] = exp[i - (p - 1)];
        }

        debug!(
            order = characteristic,
            generator = GENERATOR,
            "built prime field lookup tables"
        );
        Ok(Self {
            order: characteristic,
            exp,
            log,
        })
    }

    /// Number of elements in the field.
    pub fn order(&self) -> u32 {
        u32::from(self.order)
    }

    /// The fixed multiplicative generator.
    pub fn generator(&self) -> u16 {
        GENERATOR
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

    /// Table-backed multiplication. Only defined for elements in the orbit
    /// of the generator (see the module docs).
    pub fn mul(&self, x: u16, y: u16) -> u16 {
        self.check_element(x);
        self.check_element(y);
        if x == 0 || y == 0 {
            return 0;
        }
        self.exp[self.log[x as usize] as usize + self.log[y as usize] as usize]
    }

    /// Division by lifting the dividend: finds the smallest `k` such that
    /// `dividend + k·p` is an exact integer multiple of `divisor` and
    /// returns that quotient reduced modulo `p`. O(divisor), and valid for
    /// every element — it deliberately avoids the log tables, which only
    /// cover the generator's orbit. Dividing by zero, or dividing zero,
    /// yields zero by convention.
    pub fn div(&self, dividend: u16, divisor: u16) -> u16 {
        self.check_element(dividend);
        self.check_element(divisor);
        if divisor == 0 || dividend == 0 {
            return 0;
        }
        if dividend % divisor == 0 {
            return (dividend / divisor) % self.order;
        }

        let divisor = u64::from(divisor);
        let mut lifted = u64::from(dividend);
        for _ in 1..divisor {
            lifted += u64::from(self.order);
            if lifted % divisor == 0 {
                return ((lifted / divisor) % u64::from(self.order)) as u16;
            }
        }
        0
    }

    /// Raises `x` to `exponent` via the log identity. `pow(x, 0)` is 1 for
    /// every `x`, and zero raised to a positive power stays zero. Only
    /// defined for `x` in the generator's orbit.
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

    /// Multiplicative inverse; zero has none and maps to zero. Only defined
    /// for `x` in the generator's orbit.
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

impl Field for PrimeField {
    type Element = u16;

    fn order(&self) -> u32 {
        PrimeField::order(self)
    }
    fn zero(&self) -> u16 {
        0
    }
    fn one(&self) -> u16 {
        1
    }
    fn add(&self, x: u16, y: u16) -> u16 {
        PrimeField::add(self, x, y)
    }
    fn sub(&self, x: u16, y: u16) -> u16 {
        PrimeField::sub(self, x, y)
    }
    fn mul(&self, x: u16, y: u16) -> u16 {
        PrimeField::mul(self, x, y)
    }
    fn div(&self, dividend: u16, divisor: u16) -> u16 {
        PrimeField::div(self, dividend, divisor)
    }
    fn pow(&self, x: u16, exponent: u16) -> u16 {
        PrimeField::pow(self, x, exponent)
    }
    fn inv(&self, x: u16) -> u16 {
        PrimeField::inv(self, x)
    }
}

fn mod_mul(x: u16, y: u16, modulus: u16) -> u16 {
    ((u32::from(x) * u32::from(y)) % u32::from(modulus)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand_chacha::rand_core::SeedableRng;

    /// Elements reachable by successive multiplications by the generator,
    /// which is exactly the domain of the table-backed operations.
    fn generator_orbit(field: &PrimeField) -> Vec<u16> {
        let generator = GENERATOR % field.order;
        let mut orbit = vec![1u16];
        let mut x = field.slow_mul(1, generator);
        while x != 1 {
            orbit.push(x);
            x = field.slow_mul(x, generator);
        }
        orbit
    }

    #[test]
    fn rejects_characteristics_below_two() {
        assert_eq!(
            PrimeField::new(0),
            Err(FieldError::CharacteristicTooSmall(0))
        );
        assert_eq!(
            PrimeField::new(1),
            Err(FieldError::CharacteristicTooSmall(1))
        );
    }

    #[test]
    fn addition_and_subtraction_stay_in_range_and_invert() {
        let field = PrimeField::new(23).unwrap();
        for x in 0..23u16 {
            for y in 0..23u16 {
                let sum = field.add(x, y);
                assert!(sum < 23);
                assert_eq!(field.sub(sum, y), x);
            }
            assert_eq!(field.add(x, 0), x);
            // x + (0 - x) == 0
            assert_eq!(field.add(x, field.sub(0, x)), 0);
        }
    }

    #[test]
    fn subtraction_borrow_case_matches_modular_arithmetic() {
        let field = PrimeField::new(11).unwrap();
        assert_eq!(field.sub(3, 7), 7); // 3 - 7 = -4 = 7 (mod 11)
        assert_eq!(field.sub(0, 1), 10);
        assert_eq!(field.sub(10, 10), 0);
    }

    #[test]
    fn fast_and_slow_multiplication_agree_on_the_generator_orbit() {
        for p in [19u16, 23] {
            let field = PrimeField::new(p).unwrap();
            let orbit = generator_orbit(&field);
            assert!(orbit.len() > 1);
            for &x in &orbit {
                for &y in &orbit {
                    assert_eq!(field.mul(x, y), field.slow_mul(x, y), "p={p} x={x} y={y}");
                }
                assert_eq!(field.mul(x, 0), 0);
                assert_eq!(field.mul(0, x), 0);
                assert_eq!(field.mul(x, 1), x);
            }
        }
    }

    #[test]
    fn division_round_trips_for_every_element() {
        let field = PrimeField::new(23).unwrap();
        for x in 0..23u16 {
            for y in 1..23u16 {
                let quotient = field.div(x, y);
                assert_eq!(field.slow_mul(quotient, y), x, "x={x} y={y}");
            }
            assert_eq!(field.div(x, 0), 0);
        }
        for y in 1..23u16 {
            assert_eq!(field.div(0, y), 0);
        }
    }

    #[test]
    fn division_and_table_multiplication_agree_on_the_orbit() {
        let field = PrimeField::new(23).unwrap();
        let orbit = generator_orbit(&field);
        for &x in &orbit {
            for &y in &orbit {
                assert_eq!(field.mul(field.div(x, y), y), x, "x={x} y={y}");
            }
        }
    }

    #[test]
    fn inverses_on_the_orbit_multiply_to_one() {
        let field = PrimeField::new(19).unwrap();
        for x in generator_orbit(&field) {
            assert_eq!(field.mul(x, field.inv(x)), 1, "x={x}");
        }
        assert_eq!(field.inv(0), 0);
    }

    #[test]
    fn power_on_the_orbit_matches_repeated_multiplication() {
        let field = PrimeField::new(23).unwrap();
        for x in generator_orbit(&field) {
            assert_eq!(field.pow(x, 0), 1);
            assert_eq!(field.pow(x, 1), x);
            assert_eq!(field.pow(x, 2), field.mul(x, x));
            assert_eq!(field.pow(x, 3), field.mul(field.mul(x, x), x));
        }
        assert_eq!(field.pow(0, 0), 1);
        assert_eq!(field.pow(0, 5), 0);
    }

    #[test]
    fn table_free_operations_hold_for_a_large_characteristic() {
        // 65521 is the largest prime below 2^16; exhaustive coverage is too
        // slow here, so sample operand pairs from a seeded generator.
        let field = PrimeField::new(65521).unwrap();
        let mut rng = rand_chacha::ChaCha8Rng::from_seed([0x47; 32]);
        for _ in 0..100 {
            let x = rng.gen_range(0..65521u16);
            let y = rng.gen_range(1..65521u16);
            assert_eq!(field.slow_mul(field.div(x, y), y), x, "x={x} y={y}");
            assert_eq!(field.sub(field.add(x, y), y), x);
        }
    }

    #[test]
    fn construction_is_deterministic() {
        assert_eq!(PrimeField::new(23).unwrap(), PrimeField::new(23).unwrap());
    }

    #[test]
    #[should_panic(expected = "out of field range")]
    fn out_of_range_operands_are_rejected() {
        let field = PrimeField::new(23).unwrap();
        field.add(23, 0);
    }

    #[test]
    #[should_panic(expected = "out of field range")]
    fn out_of_range_divisor_is_rejected() {
        let field = PrimeField::new(11).unwrap();
        field.div(5, 11);
    }
}
