//! Fixed-size single-precision vectors.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use approx::AbsDiffEq;
use nalgebra::SVector;

use crate::error::{LinalgError, LinalgResult};

/// Tolerance used by `==` on vectors.
pub const VECTOR_EPSILON: f32 = 1e-6;

/// An N-component vector of `f32`.
///
/// Vectors are plain values: every operation returns a new vector and
/// leaves its operands untouched. Equality is tolerance-based, two vectors
/// compare equal when every pair of components differs by less than
/// [`VECTOR_EPSILON`].
#[derive(Debug, Clone, Copy)]
pub struct Vector<const N: usize>([f32; N]);

pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;
pub type Vector4 = Vector<4>;

impl<const N: usize> Vector<N> {
    pub const fn from_array(components: [f32; N]) -> Self {
        Self(components)
    }

    pub const fn zeros() -> Self {
        Self([0.0; N])
    }

    /// Build a vector from an untyped slice.
    ///
    /// Fails with [`LinalgError::DimensionMismatch`] when the slice does not
    /// hold exactly `N` components.
    pub fn from_slice(components: &[f32]) -> LinalgResult<Self> {
        let array: [f32; N] =
            components
                .try_into()
                .map_err(|_| LinalgError::DimensionMismatch {
                    expected: N,
                    actual: components.len(),
                })?;
        Ok(Self(array))
    }

    pub const fn as_array(&self) -> &[f32; N] {
        &self.0
    }

    /// Component at `index`, or [`LinalgError::IndexOutOfRange`].
    pub fn get(&self, index: usize) -> LinalgResult<f32> {
        self.0
            .get(index)
            .copied()
            .ok_or(LinalgError::IndexOutOfRange { index, len: N })
    }

    pub fn add_scalar(&self, value: f32) -> Self {
        self.map(|c| c + value)
    }

    pub fn sub_scalar(&self, value: f32) -> Self {
        self.map(|c| c - value)
    }

    /// Divide every component by `divisor`.
    ///
    /// Division by exactly zero is rejected instead of producing infinities.
    pub fn div_scalar(&self, divisor: f32) -> LinalgResult<Self> {
        if divisor == 0.0 {
            return Err(LinalgError::DivideByZero);
        }
        Ok(self.map(|c| c / divisor))
    }

    /// Euclidean length.
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; a zero-length vector has none.
    pub fn normalize(&self) -> LinalgResult<Self> {
        self.div_scalar(self.length())
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum()
    }

    /// Component-wise comparison with an explicit tolerance.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self(self.0.map(f))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut out = self.0;
        for (target, &rhs) in out.iter_mut().zip(&other.0) {
            *target = f(*target, rhs);
        }
        Self(out)
    }
}

impl Vector<2> {
    pub const fn new(x: f32, y: f32) -> Self {
        Self([x, y])
    }

    pub const fn x(&self) -> f32 {
        self.0[0]
    }

    pub const fn y(&self) -> f32 {
        self.0[1]
    }
}

impl Vector<3> {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
    }

    pub const fn x(&self) -> f32 {
        self.0[0]
    }

    pub const fn y(&self) -> f32 {
        self.0[1]
    }

    pub const fn z(&self) -> f32 {
        self.0[2]
    }

    /// Cross product `self × other`.
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Self([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }

    /// Lift a point into homogeneous coordinates (w = 1).
    pub const fn to_homogeneous(&self) -> Vector<4> {
        let [x, y, z] = self.0;
        Vector([x, y, z, 1.0])
    }
}

impl Vector<4> {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    /// Drop the w component without dividing by it.
    pub const fn truncate(&self) -> Vector<3> {
        let [x, y, z, _] = self.0;
        Vector([x, y, z])
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl<const N: usize> Mul<f32> for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.map(|c| c * rhs)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl<const N: usize> PartialEq for Vector<N> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, VECTOR_EPSILON)
    }
}

impl<const N: usize> AbsDiffEq for Vector<N> {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        VECTOR_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(components: [f32; N]) -> Self {
        Self(components)
    }
}

impl<const N: usize> TryFrom<&[f32]> for Vector<N> {
    type Error = LinalgError;

    fn try_from(components: &[f32]) -> LinalgResult<Self> {
        Self::from_slice(components)
    }
}

impl<const N: usize> TryFrom<Vec<f32>> for Vector<N> {
    type Error = LinalgError;

    fn try_from(components: Vec<f32>) -> LinalgResult<Self> {
        Self::from_slice(&components)
    }
}

impl<const N: usize> From<SVector<f32, N>> for Vector<N> {
    fn from(v: SVector<f32, N>) -> Self {
        Self(std::array::from_fn(|i| v[i]))
    }
}

impl<const N: usize> From<Vector<N>> for SVector<f32, N> {
    fn from(v: Vector<N>) -> Self {
        SVector::from_column_slice(&v.0)
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

// Vectors travel as plain JSON arrays in transform parameter files.
#[cfg(feature = "serde")]
impl<const N: usize> serde::Serialize for Vector<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, const N: usize> serde::Deserialize<'de> for Vector<N> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let components = Vec::<f32>::deserialize(deserializer)?;
        Self::from_slice(&components).map_err(serde::de::Error::custom)
    }
}
