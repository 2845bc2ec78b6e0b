//! Matrices.

mod closed_form;
mod elimination;

use crate::{
    kernel::{BinaryOp, WeightedSum},
    num::{Float, Scalar},
    storage::{LaneCount, SupportedLaneCount},
    vector::Vector,
};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::{
    array, fmt,
    ops::{Index, IndexMut, Neg},
};

/// Matrix products where every dimension exceeds this size are computed
/// block by block.
pub const BLOCK_SIZE: usize = 32;

/// A matrix with `R` rows and `C` columns of type `T`, stored row by row.
///
/// Every row is a [`Vector`], so element-wise arithmetic, comparison and
/// the row reductions inside the matrix products run on a hardware register
/// exactly when the row type does. For 4x4 `f32` and `f64` matrices this
/// covers addition, subtraction, scaling, division, equality, approximate
/// equality, absolute value, the matrix-vector product and the product with
/// another 4x4 matrix.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct Matrix<T: Scalar, const R: usize, const C: usize>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    rows: [Vector<T, C>; R],
}

pub type Mat2f = Matrix<f32, 2, 2>;
pub type Mat3f = Matrix<f32, 3, 3>;
pub type Mat4f = Matrix<f32, 4, 4>;
pub type Mat2d = Matrix<f64, 2, 2>;
pub type Mat3d = Matrix<f64, 3, 3>;
pub type Mat4d = Matrix<f64, 4, 4>;

// SAFETY: `Matrix` is a transparent wrapper around an array of `Pod` rows.
unsafe impl<T: Scalar, const R: usize, const C: usize> Zeroable for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
}
unsafe impl<T: Scalar, const R: usize, const C: usize> Pod for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
}

#[inline]
fn fixed<T, const K: usize>(flat: &[T]) -> Option<&[T; K]> {
    flat.try_into().ok()
}

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    /// Whether this is a 4x4 matrix whose operations run on hardware
    /// registers.
    pub const HARDWARE_ACCELERATED: bool =
        R == 4 && C == 4 && Vector::<T, C>::HARDWARE_ACCELERATED;

    /// Alignment of this matrix type in bytes, which is that of its rows.
    pub const ALIGNMENT: usize = align_of::<Self>();

    /// Creates a matrix with the given rows.
    #[inline]
    pub const fn from_rows(rows: [Vector<T, C>; R]) -> Self {
        const { assert!(R > 0 && C > 0, "matrix dimensions must be non-zero") };
        Self { rows }
    }

    /// Creates a matrix with the given rows.
    #[inline]
    pub const fn from_row_arrays(rows: [[T; C]; R]) -> Self {
        let mut m = Self::zero();
        let mut i = 0;
        while i < R {
            m.rows[i] = Vector::from_array(rows[i]);
            i += 1;
        }
        m
    }

    /// Creates a matrix with the given columns.
    #[inline]
    pub const fn from_columns(columns: [Vector<T, R>; C]) -> Self {
        Matrix::<T, C, R>::from_rows(columns).transpose()
    }

    /// Creates a matrix from `R * C` elements in row-major order, or returns
    /// [`None`] if the slice has a different length.
    #[inline]
    pub fn try_from_flat_slice(elements: &[T]) -> Option<Self> {
        (elements.len() == R * C).then(|| Self::from_fn(|i, j| elements[i * C + j]))
    }

    /// Creates a matrix whose element `(i, j)` is `f(i, j)`.
    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self::from_rows(array::from_fn(|i| Vector::from_fn(|j| f(i, j))))
    }

    /// Creates a matrix with all elements set to the given value.
    #[inline]
    pub const fn filled(value: T) -> Self {
        Self::from_rows([Vector::filled(value); R])
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zero() -> Self {
        Self::filled(T::ZERO)
    }

    /// The number of rows and columns.
    #[inline]
    pub const fn size(&self) -> (usize, usize) {
        (R, C)
    }

    /// The element in row `i` and column `j`.
    ///
    /// # Panics
    /// If `i` or `j` is out of bounds.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> T {
        debug_assert!(i < R && j < C, "element ({i}, {j}) out of bounds for {R}x{C} matrix");
        self.rows[i][j]
    }

    /// A mutable reference to the element in row `i` and column `j`.
    ///
    /// # Panics
    /// If `i` or `j` is out of bounds.
    #[inline]
    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut T {
        debug_assert!(i < R && j < C, "element ({i}, {j}) out of bounds for {R}x{C} matrix");
        &mut self.rows[i][j]
    }

    /// The row with the given index.
    #[inline]
    pub fn row(&self, i: usize) -> &Vector<T, C> {
        debug_assert!(i < R, "row {i} out of bounds for {R}x{C} matrix");
        &self.rows[i]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut Vector<T, C> {
        debug_assert!(i < R, "row {i} out of bounds for {R}x{C} matrix");
        &mut self.rows[i]
    }

    /// The column with the given index.
    #[inline]
    pub fn column(&self, j: usize) -> Vector<T, R> {
        debug_assert!(j < C, "column {j} out of bounds for {R}x{C} matrix");
        Vector::from_fn(|i| self.rows[i][j])
    }

    #[inline]
    pub const fn rows(&self) -> &[Vector<T, C>; R] {
        &self.rows
    }

    #[inline]
    pub fn columns(&self) -> [Vector<T, R>; C] {
        array::from_fn(|j| self.column(j))
    }

    #[inline]
    pub fn set_row(&mut self, i: usize, row: Vector<T, C>) {
        *self.row_mut(i) = row;
    }

    #[inline]
    pub fn set_column(&mut self, j: usize, column: &Vector<T, R>) {
        debug_assert!(j < C, "column {j} out of bounds for {R}x{C} matrix");
        for (row, &value) in self.rows.iter_mut().zip(column) {
            row[j] = value;
        }
    }

    #[inline]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// The elements in row-major order.
    #[inline]
    pub fn as_flat_slice(&self) -> &[T] {
        bytemuck::cast_slice(&self.rows)
    }

    /// The elements in row-major order.
    #[inline]
    pub fn as_flat_slice_mut(&mut self) -> &mut [T] {
        bytemuck::cast_slice_mut(&mut self.rows)
    }

    /// Iterates over the elements in row-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_flat_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_flat_slice_mut().iter_mut()
    }

    /// Computes the transpose of the matrix.
    #[inline]
    pub const fn transpose(&self) -> Matrix<T, C, R> {
        let mut transposed = Matrix::<T, C, R>::zero();
        let mut i = 0;
        while i < R {
            let row = self.rows[i].as_array();
            let mut j = 0;
            while j < C {
                transposed.rows[j].as_array_mut()[i] = row[j];
                j += 1;
            }
            i += 1;
        }
        transposed
    }

    #[inline]
    fn map_rows(&self, f: impl Fn(&Vector<T, C>) -> Vector<T, C>) -> Self {
        Self::from_rows(array::from_fn(|i| f(&self.rows[i])))
    }

    #[inline]
    fn zip_rows(&self, other: &Self, op: BinaryOp) -> Self {
        Self::from_rows(array::from_fn(|i| self.rows[i].zip(&other.rows[i], op)))
    }

    /// Computes the element-wise absolute value of the matrix.
    #[inline]
    pub fn abs(&self) -> Self {
        self.map_rows(Vector::abs)
    }

    /// Multiplies every element by `scalar`.
    #[inline]
    pub fn scaled(&self, scalar: T) -> Self {
        let factor = Vector::filled(scalar);
        self.map_rows(|row| row.zip(&factor, BinaryOp::Mul))
    }

    /// Divides every element by `scalar`. Dividing by zero leaves the matrix
    /// unchanged.
    #[inline]
    pub fn divided(&self, scalar: T) -> Self {
        if scalar == T::ZERO {
            return *self;
        }
        let divisor = Vector::filled(scalar);
        self.map_rows(|row| row.zip(&divisor, BinaryOp::SafeDiv))
    }

    /// Whether no element differs from the corresponding element of `other`
    /// by more than [`Scalar::PRECISION_EPSILON`].
    #[inline]
    pub fn approx_equal(&self, other: &Self) -> bool {
        self.approx_equal_with(other, T::PRECISION_EPSILON)
    }

    /// Whether no element differs from the corresponding element of `other`
    /// by more than `epsilon`.
    #[inline]
    pub fn approx_equal_with(&self, other: &Self, epsilon: T) -> bool {
        self.rows
            .iter()
            .zip(&other.rows)
            .all(|(a, b)| a.approx_equal_with(b, epsilon))
    }

    /// Computes the product of the matrix and the given column vector.
    ///
    /// Register-eligible rows use the register dot product. Other 2x2, 3x3
    /// and 4x4 matrices use unrolled code, and the rest a loop over rows.
    #[inline]
    pub fn mul_vector(&self, vector: &Vector<T, C>) -> Vector<T, R> {
        if !Vector::<T, C>::HARDWARE_ACCELERATED && R == C {
            if let Some(product) = self.mul_vector_unrolled(vector) {
                return product;
            }
        }
        Vector::from_fn(|i| self.rows[i].dot(vector))
    }

    fn mul_vector_unrolled(&self, vector: &Vector<T, C>) -> Option<Vector<T, R>> {
        let (m, v) = (self.as_flat_slice(), vector.as_slice());
        match R {
            2 => Vector::try_from_slice(&closed_form::mul_vector2(fixed(m)?, fixed(v)?)),
            3 => Vector::try_from_slice(&closed_form::mul_vector3(fixed(m)?, fixed(v)?)),
            4 => Vector::try_from_slice(&closed_form::mul_vector4(fixed(m)?, fixed(v)?)),
            _ => None,
        }
    }

    /// Computes the product of this and the given matrix.
    ///
    /// When all of `R`, `C` and `K` exceed [`BLOCK_SIZE`] the product is
    /// computed by [`Self::mul_blocked`]. Otherwise unrolled code is used for
    /// square 2x2, 3x3 and 4x4 products whose rows have no register, and
    /// [`Self::mul_naive`] for everything else. Every variant accumulates
    /// each element in the same order, so they agree exactly.
    #[inline]
    pub fn mul_matrix<const K: usize>(&self, other: &Matrix<T, C, K>) -> Matrix<T, R, K>
    where
        LaneCount<K>: SupportedLaneCount,
    {
        if R > BLOCK_SIZE && C > BLOCK_SIZE && K > BLOCK_SIZE {
            return self.mul_blocked(other);
        }
        if !Vector::<T, K>::HARDWARE_ACCELERATED && R == C && C == K {
            if let Some(product) = self.mul_unrolled(other) {
                return product;
            }
        }
        self.mul_naive(other)
    }

    fn mul_unrolled<const K: usize>(&self, other: &Matrix<T, C, K>) -> Option<Matrix<T, R, K>>
    where
        LaneCount<K>: SupportedLaneCount,
    {
        let (a, b) = (self.as_flat_slice(), other.as_flat_slice());
        match R {
            2 => Matrix::try_from_flat_slice(&closed_form::mul2(fixed(a)?, fixed(b)?)),
            3 => Matrix::try_from_flat_slice(&closed_form::mul3(fixed(a)?, fixed(b)?)),
            4 => Matrix::try_from_flat_slice(&closed_form::mul4(fixed(a)?, fixed(b)?)),
            _ => None,
        }
    }

    /// Computes the product of this and the given matrix by forming every
    /// row of the result as a weighted sum of the rows of `other`. The sum
    /// runs on a hardware register when rows of width `K` have one.
    pub fn mul_naive<const K: usize>(&self, other: &Matrix<T, C, K>) -> Matrix<T, R, K>
    where
        LaneCount<K>: SupportedLaneCount,
    {
        let other_rows: &[[T; K]] = bytemuck::cast_slice(&other.rows);
        Matrix::from_rows(array::from_fn(|i| {
            Vector::from_array(T::execute(WeightedSum {
                weights: self.rows[i].as_slice(),
                rows: other_rows,
            }))
        }))
    }

    /// Computes the product of this and the given matrix one
    /// [`BLOCK_SIZE`] x [`BLOCK_SIZE`] block at a time.
    pub fn mul_blocked<const K: usize>(&self, other: &Matrix<T, C, K>) -> Matrix<T, R, K>
    where
        LaneCount<K>: SupportedLaneCount,
    {
        let mut product = Matrix::<T, R, K>::zero();
        for row_start in (0..R).step_by(BLOCK_SIZE) {
            let row_end = (row_start + BLOCK_SIZE).min(R);
            for inner_start in (0..C).step_by(BLOCK_SIZE) {
                let inner_end = (inner_start + BLOCK_SIZE).min(C);
                for col_start in (0..K).step_by(BLOCK_SIZE) {
                    let col_end = (col_start + BLOCK_SIZE).min(K);
                    for i in row_start..row_end {
                        let product_row = product.rows[i].as_array_mut();
                        for k in inner_start..inner_end {
                            let weight = self.rows[i][k];
                            let other_row = other.rows[k].as_array();
                            for j in col_start..col_end {
                                product_row[j] = product_row[j] + weight * other_row[j];
                            }
                        }
                    }
                }
            }
        }
        product
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Creates the identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::diagonal(T::ONE)
    }

    /// Creates a matrix with `value` on the diagonal and zeros elsewhere.
    #[inline]
    pub const fn diagonal(value: T) -> Self {
        Self::from_diagonal(&Vector::filled(value))
    }

    /// Creates a diagonal matrix with the given vector as the diagonal.
    #[inline]
    pub const fn from_diagonal(diagonal: &Vector<T, N>) -> Self {
        let mut m = Self::zero();
        let mut i = 0;
        while i < N {
            m.rows[i].as_array_mut()[i] = diagonal.as_array()[i];
            i += 1;
        }
        m
    }

    /// The diagonal of the matrix.
    #[inline]
    pub fn diagonal_vector(&self) -> Vector<T, N> {
        Vector::from_fn(|i| self.rows[i][i])
    }
}

impl<F: Float, const N: usize> Matrix<F, N, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Computes the determinant of the matrix.
    ///
    /// Matrices up to 4x4 use cofactor expansion. Larger matrices are reduced
    /// by elimination with partial pivoting, giving exactly zero when some
    /// column has no pivot of magnitude at least
    /// [`Scalar::PRECISION_EPSILON`].
    pub fn determinant(&self) -> F {
        let m = self.as_flat_slice();
        let closed_form = match N {
            1 => Some(m[0]),
            2 => fixed(m).map(closed_form::determinant2),
            3 => fixed(m).map(closed_form::determinant3),
            4 => fixed(m).map(closed_form::determinant4),
            _ => None,
        };
        closed_form.unwrap_or_else(|| elimination::determinant(self))
    }

    /// Computes the inverse of the matrix. A singular matrix, whose
    /// determinant (or elimination pivot) is within
    /// [`Scalar::PRECISION_EPSILON`] of zero, gives the zero matrix.
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(Self::zero)
    }

    /// Computes the inverse of the matrix, or returns [`None`] if it is
    /// singular.
    pub fn try_inverse(&self) -> Option<Self> {
        let m = self.as_flat_slice();
        match N {
            1 => closed_form::inverse1(m[0]).map(Self::filled),
            2 => Self::try_from_flat_slice(&closed_form::inverse2(fixed(m)?)?),
            3 => Self::try_from_flat_slice(&closed_form::inverse3(fixed(m)?)?),
            4 => Self::try_from_flat_slice(&closed_form::inverse4(fixed(m)?)?),
            _ => elimination::inverse(self),
        }
    }
}

macro_rules! impl_const_ops {
    ($($t:ty),*) => {
        $(
            impl<const R: usize, const C: usize> Matrix<$t, R, C>
            where
                LaneCount<R>: SupportedLaneCount,
                LaneCount<C>: SupportedLaneCount,
            {
                /// Element-wise sum as a plain loop, usable in constant
                /// expressions.
                pub const fn const_add(&self, other: &Self) -> Self {
                    let mut out = *self;
                    let mut i = 0;
                    while i < R {
                        out.rows[i] = self.rows[i].const_add(&other.rows[i]);
                        i += 1;
                    }
                    out
                }

                /// Element-wise difference as a plain loop, usable in
                /// constant expressions.
                pub const fn const_sub(&self, other: &Self) -> Self {
                    let mut out = *self;
                    let mut i = 0;
                    while i < R {
                        out.rows[i] = self.rows[i].const_sub(&other.rows[i]);
                        i += 1;
                    }
                    out
                }

                /// Multiplies every element by `scalar` as a plain loop,
                /// usable in constant expressions.
                pub const fn const_scale(&self, scalar: $t) -> Self {
                    let mut out = *self;
                    let mut i = 0;
                    while i < R {
                        out.rows[i] = self.rows[i].const_scale(scalar);
                        i += 1;
                    }
                    out
                }

                /// Matrix-vector product as a plain loop, usable in constant
                /// expressions.
                pub const fn const_mul_vector(&self, vector: &Vector<$t, C>) -> Vector<$t, R> {
                    let mut out = Vector::<$t, R>::zero();
                    let mut i = 0;
                    while i < R {
                        out.as_array_mut()[i] = self.rows[i].const_dot(vector);
                        i += 1;
                    }
                    out
                }

                /// Matrix product as a plain loop, usable in constant
                /// expressions. Each element is accumulated in the same
                /// order as [`Self::mul_matrix`].
                pub const fn const_mul<const K: usize>(
                    &self,
                    other: &Matrix<$t, C, K>,
                ) -> Matrix<$t, R, K>
                where
                    LaneCount<K>: SupportedLaneCount,
                {
                    let mut out = Matrix::<$t, R, K>::zero();
                    let mut i = 0;
                    while i < R {
                        let mut j = 0;
                        while j < K {
                            let mut sum = 0 as $t;
                            let mut k = 0;
                            while k < C {
                                sum += self.rows[i].as_array()[k] * other.rows[k].as_array()[j];
                                k += 1;
                            }
                            out.rows[i].as_array_mut()[j] = sum;
                            j += 1;
                        }
                        i += 1;
                    }
                    out
                }

                /// Exact equality as a plain loop, usable in constant
                /// expressions.
                pub const fn const_eq(&self, other: &Self) -> bool {
                    let mut i = 0;
                    while i < R {
                        if !self.rows[i].const_eq(&other.rows[i]) {
                            return false;
                        }
                        i += 1;
                    }
                    true
                }
            }

            impl_binop!(
                [const R: usize, const C: usize]
                where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
                Mul, mul, $t, Matrix<$t, R, C>, Matrix<$t, R, C>,
                |a, b| { b.scaled(*a) }
            );
        )*
    };
}

impl_const_ops!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

impl<T: Scalar, const R: usize, const C: usize> Default for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar, const R: usize, const C: usize> PartialEq for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    fn from(rows: [[T; C]; R]) -> Self {
        Self::from_row_arrays(rows)
    }
}

impl<T: Scalar, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < R && j < C, "element ({i}, {j}) out of bounds for {R}x{C} matrix");
        &self.rows[i][j]
    }
}

impl<T: Scalar, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        self.at_mut(i, j)
    }
}

impl<T: Scalar, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rows.iter().map(Vector::as_array))
            .finish()
    }
}

impl<T: Scalar, const R: usize, const C: usize> fmt::Display for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

impl_binop!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    Add, add, Matrix<T, R, C>, Matrix<T, R, C>, Matrix<T, R, C>,
    |a, b| { a.zip_rows(b, BinaryOp::Add) }
);

impl_binop!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    Sub, sub, Matrix<T, R, C>, Matrix<T, R, C>, Matrix<T, R, C>,
    |a, b| { a.zip_rows(b, BinaryOp::Sub) }
);

impl_binop!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    Mul, mul, Matrix<T, R, C>, T, Matrix<T, R, C>,
    |a, b| { a.scaled(*b) }
);

impl_binop!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    Div, div, Matrix<T, R, C>, T, Matrix<T, R, C>,
    |a, b| { a.divided(*b) }
);

impl_binop!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    Mul, mul, Matrix<T, R, C>, Vector<T, C>, Vector<T, R>,
    |a, b| { a.mul_vector(b) }
);

impl_binop!(
    [T: Scalar, const R: usize, const C: usize, const K: usize]
    where [
        LaneCount<R>: SupportedLaneCount,
        LaneCount<C>: SupportedLaneCount,
        LaneCount<K>: SupportedLaneCount,
    ],
    Mul, mul, Matrix<T, R, C>, Matrix<T, C, K>, Matrix<T, R, K>,
    |a, b| { a.mul_matrix(b) }
);

impl_binop_assign!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    AddAssign, add_assign, Matrix<T, R, C>, Matrix<T, R, C>,
    |a, b| { *a = a.zip_rows(b, BinaryOp::Add); }
);

impl_binop_assign!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    SubAssign, sub_assign, Matrix<T, R, C>, Matrix<T, R, C>,
    |a, b| { *a = a.zip_rows(b, BinaryOp::Sub); }
);

impl_binop_assign!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    MulAssign, mul_assign, Matrix<T, R, C>, T,
    |a, b| { *a = a.scaled(*b); }
);

impl_binop_assign!(
    [T: Scalar, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    DivAssign, div_assign, Matrix<T, R, C>, T,
    |a, b| { *a = a.divided(*b); }
);

impl_binop_assign!(
    [T: Scalar, const N: usize] where [LaneCount<N>: SupportedLaneCount],
    MulAssign, mul_assign, Matrix<T, N, N>, Matrix<T, N, N>,
    |a, b| { *a = a.mul_matrix(b); }
);

impl_unary_op!(
    [T: Scalar + Neg<Output = T>, const R: usize, const C: usize]
    where [LaneCount<R>: SupportedLaneCount, LaneCount<C>: SupportedLaneCount],
    Neg, neg, Matrix<T, R, C>, Matrix<T, R, C>,
    |val| { val.map_rows(|row| -row) }
);

impl<F: Float, const R: usize, const C: usize> AbsDiffEq for Matrix<F, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::PRECISION_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.approx_equal_with(other, epsilon)
    }
}

impl<F: Float, const R: usize, const C: usize> RelativeEq for Matrix<F, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    fn default_max_relative() -> F {
        F::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.rows
            .iter()
            .zip(&other.rows)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(feature = "serde")]
impl<T: Scalar + serde::Serialize, const R: usize, const C: usize> serde::Serialize
    for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::storage::serde_array::serialize(&self.rows, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Scalar + serde::Deserialize<'de>, const R: usize, const C: usize>
    serde::Deserialize<'de> for Matrix<T, R, C>
where
    LaneCount<R>: SupportedLaneCount,
    LaneCount<C>: SupportedLaneCount,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::storage::serde_array::deserialize(deserializer).map(Self::from_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{Vec2d, Vec3f, Vec4f};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn sample_mat4f() -> Mat4f {
        Mat4f::from_row_arrays([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    #[test]
    fn element_access_is_row_major() {
        let mut m = Matrix::<i32, 2, 3>::from_row_arrays([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.at(0, 2), 3);
        assert_eq!(m[(1, 0)], 4);
        assert_eq!(m.as_flat_slice(), &[1, 2, 3, 4, 5, 6]);
        m[(1, 2)] = 9;
        *m.at_mut(0, 0) = 7;
        assert_eq!(m.row(1).as_array(), &[4, 5, 9]);
        assert_eq!(m.column(0).as_array(), &[7, 4]);
        assert_eq!(m.size(), (2, 3));
    }

    #[test]
    fn setting_rows_and_columns_works() {
        let mut m = Matrix::<i32, 3, 3>::zero();
        m.set_row(0, Vector::from_array([1, 2, 3]));
        m.set_column(2, &Vector::from_array([7, 8, 9]));
        assert_eq!(m, Matrix::from_row_arrays([[1, 2, 7], [0, 0, 8], [0, 0, 9]]));
        let columns = m.columns();
        assert_eq!(Matrix::from_columns(columns), m);
    }

    #[test]
    fn identity_and_diagonal_work() {
        assert_eq!(
            Matrix::<i32, 3, 3>::identity(),
            Matrix::from_row_arrays([[1, 0, 0], [0, 1, 0], [0, 0, 1]])
        );
        assert_eq!(Mat2d::diagonal(3.0).diagonal_vector(), Vec2d::new(3.0, 3.0));
    }

    #[test]
    fn transposing_twice_gives_original() {
        let m = Matrix::<i64, 2, 3>::from_row_arrays([[1, 2, 3], [4, 5, 6]]);
        let t = m.transpose();
        assert_eq!(t, Matrix::from_row_arrays([[1, 4], [2, 5], [3, 6]]));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn transpose_is_usable_in_constants() {
        const M: Mat2f = Mat2f::from_row_arrays([[1.0, 2.0], [3.0, 4.0]]);
        const TRANSPOSED: Mat2f = M.transpose();
        assert!(TRANSPOSED.const_eq(&Mat2f::from_row_arrays([[1.0, 3.0], [2.0, 4.0]])));
    }

    #[test]
    fn hardware_eligibility_is_reported_for_4x4_floats_only() {
        assert!(Mat4f::HARDWARE_ACCELERATED);
        assert!(Mat4d::HARDWARE_ACCELERATED);
        assert!(!Mat3f::HARDWARE_ACCELERATED);
        assert!(!Matrix::<i32, 4, 4>::HARDWARE_ACCELERATED);
    }

    #[test]
    fn matrices_are_aligned_like_their_rows() {
        assert_eq!(align_of::<Mat4f>(), 16);
        assert_eq!(align_of::<Mat4d>(), 32);
        assert_eq!(align_of::<Mat2d>(), 16);
        assert_eq!(align_of::<Matrix<f32, 8, 8>>(), 32);
        assert_eq!(align_of::<Mat3f>(), 4);
        assert_eq!(align_of::<Matrix<i32, 4, 4>>(), 4);
        assert_eq!(Mat4d::ALIGNMENT, 32);
        assert_eq!(Mat4f::ALIGNMENT, align_of::<Mat4f>());
        assert_eq!(size_of::<Mat4d>(), 128);
    }

    #[test]
    fn register_path_agrees_with_constant_path_for_mat4f() {
        let a = sample_mat4f();
        let b = a.transpose().scaled(0.5);

        assert!((a + b).const_eq(&a.const_add(&b)));
        assert!((a - b).const_eq(&a.const_sub(&b)));
        assert!((a * 3.0).const_eq(&a.const_scale(3.0)));
        assert!((a * b).const_eq(&a.const_mul(&b)));
        assert_eq!(a == b, a.const_eq(&b));
        assert_eq!(a == a, a.const_eq(&a));

        let v = Vec4f::new(1.0, -1.0, 0.5, 2.0);
        assert!((a * v).const_eq(&a.const_mul_vector(&v)));
    }

    #[test]
    fn multiplying_2x2_matrices_works() {
        let a = Mat2d::from_row_arrays([[1.0, 2.0], [3.0, 4.0]]);
        let b = Mat2d::from_row_arrays([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(a * b, Mat2d::from_row_arrays([[2.0, 1.0], [4.0, 3.0]]));
        assert_eq!(&a * &Vec2d::new(1.0, 1.0), Vec2d::new(3.0, 7.0));
    }

    #[test]
    fn multiplying_rectangular_matrices_works() {
        let a = Matrix::<i32, 2, 3>::from_row_arrays([[1, 2, 3], [4, 5, 6]]);
        let b = Matrix::<i32, 3, 2>::from_row_arrays([[7, 8], [9, 10], [11, 12]]);
        assert_eq!(a * b, Matrix::from_row_arrays([[58, 64], [139, 154]]));
        assert_eq!(a * Vector::from_array([1, 0, -1]), Vector::from_array([-2, -2]));
    }

    #[test]
    fn blocked_product_agrees_with_naive_product() {
        let a = Matrix::<f64, 40, 36>::from_fn(|i, j| ((i * 7 + j * 3) % 11) as f64 - 5.0);
        let b = Matrix::<f64, 36, 34>::from_fn(|i, j| ((i * 5 + j * 2) % 13) as f64 * 0.25);
        let blocked = a * b;
        assert_eq!(blocked, a.mul_naive(&b));
        assert_eq!(blocked, a.mul_blocked(&b));
        assert_eq!(blocked.at(3, 5), (0..36).map(|k| a.at(3, k) * b.at(k, 5)).sum::<f64>());
    }

    #[test]
    fn dividing_by_zero_scalar_leaves_matrix_unchanged() {
        let m = sample_mat4f();
        assert_eq!(m / 0.0, m);
        assert_eq!(Matrix::<i32, 2, 2>::identity() / 0, Matrix::identity());
        assert_abs_diff_eq!(m / 2.0, m.scaled(0.5));
    }

    #[test]
    fn negation_and_abs_work() {
        let m = Mat2d::from_row_arrays([[1.0, -2.0], [-3.0, 4.0]]);
        assert_eq!((-m).abs(), m.abs());
        assert_eq!(m.abs(), Mat2d::from_row_arrays([[1.0, 2.0], [3.0, 4.0]]));
    }

    #[test]
    fn determinant_of_2x2_works() {
        let m = Mat2f::from_row_arrays([[1.0, 2.0], [3.0, 4.0]]);
        assert_abs_diff_eq!(m.determinant(), -2.0);
    }

    #[test]
    fn inverse_of_2x2_works() {
        let m = Mat2d::from_row_arrays([[1.0, 2.0], [3.0, 4.0]]);
        let inv = m.inverse();
        assert_abs_diff_eq!(inv, Mat2d::from_row_arrays([[-2.0, 1.0], [1.5, -0.5]]));
        assert_abs_diff_eq!(m * inv, Mat2d::identity(), epsilon = 1e-12);

        let m = Mat2f::from_row_arrays([[1.0, 2.0], [3.0, 4.0]]);
        assert_abs_diff_eq!(m * m.inverse(), Mat2f::identity(), epsilon = 1e-6);
    }

    #[test]
    fn inverse_of_1x1_is_reciprocal() {
        let m = Matrix::<f64, 1, 1>::filled(4.0);
        assert_eq!(m.inverse(), Matrix::filled(0.25));
        assert_eq!(Matrix::<f64, 1, 1>::zero().inverse(), Matrix::zero());
    }

    #[test]
    fn inverse_of_singular_matrix_is_zero() {
        let m = Mat3f::from_row_arrays([[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverse(), Mat3f::zero());
        assert!(m.try_inverse().is_none());

        let mut m =
            Matrix::<f64, 5, 5>::from_fn(|i, j| if i == 3 { 1.0 } else { (i * 5 + j) as f64 });
        m.set_row(4, *m.row(3));
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverse(), Matrix::zero());
    }

    #[test]
    fn determinant_of_large_diagonal_matrix_is_product() {
        let m = Matrix::<f64, 6, 6>::from_diagonal(&Vector::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
        assert_abs_diff_eq!(m.determinant(), 720.0, epsilon = 1e-9);
    }

    fn well_conditioned<const N: usize>(values: &[f64]) -> Matrix<f64, N, N>
    where
        LaneCount<N>: SupportedLaneCount,
    {
        // Diagonal dominance keeps the matrix far from singular.
        Matrix::from_fn(|i, j| {
            let value = values[(i * N + j) % values.len()];
            if i == j { value + 4.0 * N as f64 } else { value }
        })
    }

    proptest! {
        #[test]
        fn inverse_times_matrix_is_identity(
            values in prop::collection::vec(-1.0_f64..1.0, 36)
        ) {
            let m2 = well_conditioned::<2>(&values);
            prop_assert!((m2 * m2.inverse()).approx_equal_with(&Mat2d::identity(), 1e-10));
            let m3 = well_conditioned::<3>(&values);
            prop_assert!((m3 * m3.inverse()).approx_equal_with(&Mat3d::identity(), 1e-10));
            let m4 = well_conditioned::<4>(&values);
            prop_assert!((m4 * m4.inverse()).approx_equal_with(&Mat4d::identity(), 1e-10));
            let m5 = well_conditioned::<5>(&values);
            prop_assert!((m5 * m5.inverse()).approx_equal_with(&Matrix::identity(), 1e-10));
            let m6 = well_conditioned::<6>(&values);
            prop_assert!((m6 * m6.inverse()).approx_equal_with(&Matrix::identity(), 1e-10));
        }

        #[test]
        fn transpose_is_an_involution(values in prop::collection::vec(-100_i32..100, 12)) {
            let m = Matrix::<i32, 3, 4>::from_fn(|i, j| values[i * 4 + j]);
            prop_assert_eq!(m.transpose().transpose(), m);
        }

        #[test]
        fn closed_form_determinant_agrees_with_elimination(
            values in prop::collection::vec(-2.0_f64..2.0, 16)
        ) {
            let m = Mat4d::from_fn(|i, j| values[i * 4 + j]);
            let expected = elimination::determinant(&m);
            prop_assert!((m.determinant() - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
        }

        #[test]
        fn product_of_vector_and_transpose_matches_column_dot_products(
            values in prop::collection::vec(-10.0_f32..10.0, 9),
            v in prop::array::uniform3(-10.0_f32..10.0),
        ) {
            let m = Mat3f::from_fn(|i, j| values[i * 3 + j]);
            let v = Vec3f::from_array(v);
            let product = m.transpose() * v;
            for j in 0..3 {
                prop_assert_eq!(product[j], m.column(j).dot(&v));
            }
        }
    }
}
