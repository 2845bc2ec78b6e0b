//! Lane storage shared by vectors and matrix rows.

use crate::{
    num::Scalar,
    simd::{self, Register},
};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Zero-sized field type that sets the alignment of [`Storage`].
pub trait AlignmentMarker: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    const MARKER: Self;
}

/// Leaves storage at the natural alignment of its element type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NaturalAlignment;

/// Aligns storage for a 128-bit register.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(align(16))]
pub struct Align16;

/// Aligns storage for a 256-bit register.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(align(32))]
pub struct Align32;

impl AlignmentMarker for NaturalAlignment {
    const MARKER: Self = Self;
}

impl AlignmentMarker for Align16 {
    const MARKER: Self = Self;
}

impl AlignmentMarker for Align32 {
    const MARKER: Self = Self;
}

/// Storage alignment for the lane counts that can have a register.
pub trait LaneAlignments {
    type Two: AlignmentMarker;
    type Four: AlignmentMarker;
    type Eight: AlignmentMarker;
}

macro_rules! impl_lane_alignments {
    ($two:ty, $four:ty, $eight:ty => $($t:ty),+) => {
        $(
            impl LaneAlignments for $t {
                type Two = $two;
                type Four = $four;
                type Eight = $eight;
            }
        )+
    };
}

impl_lane_alignments!(NaturalAlignment, Align16, Align32 => f32);
impl_lane_alignments!(Align16, Align32, NaturalAlignment => f64);
impl_lane_alignments!(
    NaturalAlignment, NaturalAlignment, NaturalAlignment =>
    i8, i16, i32, i64, u8, u16, u32, u64
);

/// Type-level lane count.
#[derive(Clone, Copy, Debug)]
pub struct LaneCount<const N: usize>;

/// Lane counts that vectors and matrix rows may have. Each selects the
/// alignment of its storage per element type.
pub trait SupportedLaneCount {
    type Alignment<T: Scalar>: AlignmentMarker;
}

impl SupportedLaneCount for LaneCount<2> {
    type Alignment<T: Scalar> = T::Two;
}

impl SupportedLaneCount for LaneCount<4> {
    type Alignment<T: Scalar> = T::Four;
}

impl SupportedLaneCount for LaneCount<8> {
    type Alignment<T: Scalar> = T::Eight;
}

macro_rules! impl_natural_lane_counts {
    ($($n:literal),+) => {
        $(
            impl SupportedLaneCount for LaneCount<$n> {
                type Alignment<T: Scalar> = NaturalAlignment;
            }
        )+
    };
}

impl_natural_lane_counts!(
    1, 3, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
    29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52,
    53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64
);

/// `N` contiguous values of type `T`.
///
/// The lanes can always be read as a plain array. When `(T, N)` has a
/// hardware register, the same lanes can also be loaded into and stored from
/// that register without any other bookkeeping, so a value never needs to
/// know which of the two views was last used to write it. Storage for such a
/// pair is aligned to the register width, 16 bytes for `f32 x 4` and
/// `f64 x 2` and 32 bytes for `f32 x 8` and `f64 x 4`. Every other pair keeps
/// the alignment of `T`.
#[repr(C)]
#[derive(Clone, Copy, PartialEq)]
pub struct Storage<T: Scalar, const N: usize>
where
    LaneCount<N>: SupportedLaneCount,
{
    lanes: [T; N],
    alignment: <LaneCount<N> as SupportedLaneCount>::Alignment<T>,
}

// SAFETY: the alignment marker is zero-sized, and a raised alignment always
// equals the byte size of the lanes, so there is no padding.
unsafe impl<T: Scalar, const N: usize> Zeroable for Storage<T, N> where
    LaneCount<N>: SupportedLaneCount
{
}
unsafe impl<T: Scalar, const N: usize> Pod for Storage<T, N> where LaneCount<N>: SupportedLaneCount {}

impl<T: Scalar, const N: usize> Storage<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Whether operations on this storage can run on a hardware register.
    pub const HARDWARE_ACCELERATED: bool = simd::has_register::<T>(N);

    /// Alignment of this storage in bytes. Equals the register width when
    /// there is a register and the alignment of `T` otherwise.
    pub const ALIGNMENT: usize = align_of::<Self>();

    /// Creates storage holding the given lanes.
    #[inline]
    pub const fn new(lanes: [T; N]) -> Self {
        Self {
            lanes,
            alignment: <<LaneCount<N> as SupportedLaneCount>::Alignment<T> as AlignmentMarker>::MARKER,
        }
    }

    /// Creates storage with every lane set to `value`.
    #[inline]
    pub const fn filled(value: T) -> Self {
        Self::new([value; N])
    }

    /// The lanes as an array.
    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.lanes
    }

    /// The lanes as a mutable array.
    #[inline]
    pub const fn as_array_mut(&mut self) -> &mut [T; N] {
        &mut self.lanes
    }

    /// Consumes the storage and returns its lanes.
    #[inline]
    pub const fn into_array(self) -> [T; N] {
        self.lanes
    }

    /// The raw bytes of the lanes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Loads the lanes into the register type `R`, or returns [`None`] if
    /// `R` does not hold exactly `N` lanes.
    #[inline]
    pub fn load<R: Register<Scalar = T>>(&self) -> Option<R> {
        (R::LANES == N).then(|| R::load(&self.lanes))
    }

    /// Overwrites the lanes with the contents of `register`, or returns
    /// `false` and leaves the lanes untouched if `R` does not hold exactly
    /// `N` lanes.
    #[inline]
    pub fn store<R: Register<Scalar = T>>(&mut self, register: R) -> bool {
        if R::LANES == N {
            register.store(&mut self.lanes);
            true
        } else {
            false
        }
    }
}

impl<T: Scalar, const N: usize> Default for Storage<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn default() -> Self {
        Self::filled(T::ZERO)
    }
}

impl<T: Scalar, const N: usize> fmt::Debug for Storage<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lanes.iter()).finish()
    }
}

#[cfg(feature = "serde")]
pub(crate) mod serde_array {
    //! Serialization of `[T; N]` for any `N` as a fixed-length tuple.

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{self, SeqAccess, Visitor},
        ser::SerializeTuple,
    };
    use std::{fmt, marker::PhantomData};

    pub fn serialize<S, T, const N: usize>(array: &[T; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut tuple = serializer.serialize_tuple(N)?;
        for value in array {
            tuple.serialize_element(value)?;
        }
        tuple.end()
    }

    pub fn deserialize<'de, D, T, const N: usize>(deserializer: D) -> Result<[T; N], D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Copy + Default,
    {
        struct ArrayVisitor<T, const N: usize>(PhantomData<T>);

        impl<'de, T, const N: usize> Visitor<'de> for ArrayVisitor<T, N>
        where
            T: Deserialize<'de> + Copy + Default,
        {
            type Value = [T; N];

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an array of length {N}")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut array = [T::default(); N];
                for (idx, value) in array.iter_mut().enumerate() {
                    *value = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(idx, &self))?;
                }
                Ok(array)
            }
        }

        deserializer.deserialize_tuple(N, ArrayVisitor::<T, N>(PhantomData))
    }
}

#[cfg(feature = "serde")]
impl<T: Scalar + serde::Serialize, const N: usize> serde::Serialize for Storage<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_array::serialize(&self.lanes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Scalar + serde::Deserialize<'de>, const N: usize> serde::Deserialize<'de>
    for Storage<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_array::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wide::{f32x4, f64x2};

    #[test]
    fn array_and_register_views_share_lanes() {
        let mut storage = Storage::new([1.0_f32, 2.0, 3.0, 4.0]);
        let register: f32x4 = storage.load().expect("f32 x 4 has a register");
        assert!(storage.store(register + f32x4::splat(1.0)));
        assert_eq!(storage.as_array(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn loading_register_with_wrong_width_gives_none() {
        let storage = Storage::new([1.0_f64, 2.0, 3.0]);
        assert!(storage.load::<f64x2>().is_none());
    }

    #[test]
    fn storing_register_with_wrong_width_leaves_lanes_untouched() {
        let mut storage = Storage::new([1.0_f64, 2.0, 3.0]);
        assert!(!storage.store(f64x2::splat(7.0)));
        assert_eq!(storage.into_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn storage_reports_hardware_eligibility() {
        assert!(Storage::<f32, 4>::HARDWARE_ACCELERATED);
        assert!(Storage::<f32, 8>::HARDWARE_ACCELERATED);
        assert!(Storage::<f64, 2>::HARDWARE_ACCELERATED);
        assert!(Storage::<f64, 4>::HARDWARE_ACCELERATED);
        assert!(!Storage::<f32, 3>::HARDWARE_ACCELERATED);
        assert!(!Storage::<f64, 8>::HARDWARE_ACCELERATED);
        assert!(!Storage::<i32, 4>::HARDWARE_ACCELERATED);
    }

    #[test]
    fn register_eligible_storage_is_aligned_to_register_width() {
        assert_eq!(align_of::<Storage<f32, 4>>(), 16);
        assert_eq!(align_of::<Storage<f32, 8>>(), 32);
        assert_eq!(align_of::<Storage<f64, 2>>(), 16);
        assert_eq!(align_of::<Storage<f64, 4>>(), 32);
        assert_eq!(Storage::<f32, 4>::ALIGNMENT, simd::register_alignment::<f32>(4));
        assert_eq!(Storage::<f32, 8>::ALIGNMENT, simd::register_alignment::<f32>(8));
        assert_eq!(Storage::<f64, 2>::ALIGNMENT, simd::register_alignment::<f64>(2));
        assert_eq!(Storage::<f64, 4>::ALIGNMENT, simd::register_alignment::<f64>(4));
    }

    #[test]
    fn other_storage_keeps_natural_alignment_and_size() {
        assert_eq!(align_of::<Storage<f32, 3>>(), 4);
        assert_eq!(align_of::<Storage<f32, 2>>(), 4);
        assert_eq!(align_of::<Storage<f64, 8>>(), 8);
        assert_eq!(align_of::<Storage<i32, 4>>(), 4);
        assert_eq!(align_of::<Storage<u8, 16>>(), 1);
        assert_eq!(size_of::<Storage<f32, 3>>(), 12);
        assert_eq!(size_of::<Storage<f64, 5>>(), 40);
        assert_eq!(Storage::<i32, 4>::ALIGNMENT, 4);
    }

    #[test]
    fn aligned_storage_has_no_padding() {
        assert_eq!(size_of::<Storage<f32, 4>>(), 16);
        assert_eq!(size_of::<Storage<f32, 8>>(), 32);
        assert_eq!(size_of::<Storage<f64, 2>>(), 16);
        assert_eq!(size_of::<Storage<f64, 4>>(), 32);
        assert_eq!(Storage::new([1.0_f32; 8]).as_bytes().len(), 32);
    }

    #[test]
    fn byte_view_covers_all_lanes() {
        let storage = Storage::new([1_u16, 2, 3]);
        assert_eq!(storage.as_bytes().len(), 6);
    }
}
