//! `Array`, a one-dimensional vector of reals.
//!
//! A thin newtype around `nalgebra::DVector<f64>` giving the optimizer its
//! parameter-vector type: indexing, element-wise arithmetic, dot product,
//! and norms.

use nalgebra::DVector;
use sr_core::Real;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

/// A dynamically-sized 1D vector of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Array(DVector<Real>);

impl Array {
    /// Create a zero-filled array of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self(DVector::zeros(n))
    }

    /// Create an array from a slice.
    pub fn from_slice(data: &[Real]) -> Self {
        Self(DVector::from_column_slice(data))
    }

    /// Create an array from a `Vec`.
    pub fn from_vec(data: Vec<Real>) -> Self {
        Self(DVector::from_vec(data))
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the elements as a slice.
    pub fn as_slice(&self) -> &[Real] {
        self.0.as_slice()
    }

    /// Borrow the inner `DVector`.
    pub fn inner(&self) -> &DVector<Real> {
        &self.0
    }

    /// Dot product with another array.
    pub fn dot(&self, other: &Array) -> Real {
        self.0.dot(&other.0)
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> Real {
        self.0.norm()
    }

    /// Squared Euclidean norm.
    pub fn norm_squared(&self) -> Real {
        self.0.norm_squared()
    }

    /// Iterator over elements.
    pub fn iter(&self) -> impl Iterator<Item = &Real> {
        self.0.iter()
    }
}

impl From<DVector<Real>> for Array {
    fn from(v: DVector<Real>) -> Self {
        Self(v)
    }
}

impl Index<usize> for Array {
    type Output = Real;

    fn index(&self, i: usize) -> &Real {
        &self.0[i]
    }
}

impl IndexMut<usize> for Array {
    fn index_mut(&mut self, i: usize) -> &mut Real {
        &mut self.0[i]
    }
}

impl Add for &Array {
    type Output = Array;

    fn add(self, rhs: &Array) -> Array {
        Array(&self.0 + &rhs.0)
    }
}

impl Sub for &Array {
    type Output = Array;

    fn sub(self, rhs: &Array) -> Array {
        Array(&self.0 - &rhs.0)
    }
}

impl Mul<Real> for &Array {
    type Output = Array;

    fn mul(self, s: Real) -> Array {
        Array(&self.0 * s)
    }
}

impl Neg for &Array {
    type Output = Array;

    fn neg(self) -> Array {
        Array(-&self.0)
    }
}
