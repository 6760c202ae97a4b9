use super::Matrix2;
use crate::prelude::*;
use std::ops::{AddAssign, Mul};

pub trait Dot<I> {
    type Output;
    fn dot(self, rhs: I) -> Result<Self::Output>;
}

/// Row-vector times matrix: the `n`th output is the dot product of the
/// vector with the matrix's `n`th column.
impl<'a, T> Dot<&Matrix2<T>> for &'a [T]
where
    T: Mul<Output = T> + Default + AddAssign + Copy,
{
    type Output = Vec<T>;
    fn dot(self, rhs: &Matrix2<T>) -> Result<Self::Output> {
        if self.len() != rhs.rows() {
            return Err(Error::DimensionErr);
        }

        let mut out = Vec::with_capacity(rhs.cols());
        for col in 0..rhs.cols() {
            let mut sum = T::default();
            for (row, &x) in self.iter().enumerate() {
                sum += x * rhs[(row, col)];
            }
            out.push(sum);
        }

        Ok(out)
    }
}
