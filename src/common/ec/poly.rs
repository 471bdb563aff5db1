use super::galois::{gexp, glog};
use crate::common::error::QRResult;

// Polynomial over GF(256), highest degree coefficient first
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Polynomial {
    coeffs: Vec<u8>,
}

impl Polynomial {
    /// Strips leading zero coefficients and appends `shift` zero coefficients,
    /// i.e. multiplies by x^shift.
    pub fn new(coeffs: &[u8], shift: usize) -> Self {
        let lead = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len());
        let len = coeffs.len() - lead + shift;
        let mut res = Vec::with_capacity(len);
        res.extend_from_slice(&coeffs[lead..]);
        res.resize(len, 0);
        Self { coeffs: res }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[u8] {
        &self.coeffs
    }

    pub fn multiply(&self, other: &Self) -> QRResult<Self> {
        if self.is_empty() || other.is_empty() {
            return Ok(Self::new(&[], 0));
        }

        let mut res = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            let log_a = glog(a)? as i32;
            for (j, &b) in other.coeffs.iter().enumerate() {
                res[i + j] ^= gexp(log_a + glog(b)? as i32);
            }
        }
        Ok(Self::new(&res, 0))
    }

    /// Remainder of long division by `divisor`. Consumes the dividend.
    pub fn rem(self, divisor: &Self) -> QRResult<Self> {
        debug_assert!(!divisor.is_empty(), "Division by zero polynomial");

        let log_lead = glog(divisor.coeffs[0])? as i32;
        let mut res = self;
        while res.len() >= divisor.len() {
            let ratio = glog(res.coeffs[0])? as i32 - log_lead;
            let mut coeffs = res.coeffs;
            for (c, &d) in coeffs.iter_mut().zip(divisor.coeffs.iter()) {
                *c ^= gexp(glog(d)? as i32 + ratio);
            }
            res = Self::new(&coeffs, 0);
        }
        Ok(res)
    }
}
