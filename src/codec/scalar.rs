//! Type-driven scalar dispatch.
//!
//! Every primitive integer and float gets a fixed-width big-endian encoding. Single-byte types
//! are copied as-is, floats travel as the bit pattern of the unsigned integer of the same width.
//! Field-less enums reuse the encoding of their `#[repr]` type through [`scalar_enum!`].
use super::{ByteReader, ByteWriter};
use crate::error::CodecResult;

/// A fixed-width value the cursors know how to encode.
pub trait Scalar: Copy {
    /// Encoded size in bytes.
    const WIDTH: usize;

    fn write_to(self, writer: &mut ByteWriter);

    fn read_from(reader: &mut ByteReader<'_>) -> CodecResult<Self>;
}

macro_rules! impl_int_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const WIDTH: usize = size_of::<$ty>();

                #[inline]
                fn write_to(self, writer: &mut ByteWriter) {
                    writer.write_raw(&self.to_be_bytes());
                }

                #[inline]
                fn read_from(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
                    reader.read_array().map(<$ty>::from_be_bytes)
                }
            }
        )*
    };
}

// usize/isize are left out: their width depends on the target.
impl_int_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128);

impl Scalar for f32 {
    const WIDTH: usize = 4;

    #[inline]
    fn write_to(self, writer: &mut ByteWriter) {
        self.to_bits().write_to(writer);
    }

    #[inline]
    fn read_from(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        u32::read_from(reader).map(f32::from_bits)
    }
}

impl Scalar for f64 {
    const WIDTH: usize = 8;

    #[inline]
    fn write_to(self, writer: &mut ByteWriter) {
        self.to_bits().write_to(writer);
    }

    #[inline]
    fn read_from(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        u64::read_from(reader).map(f64::from_bits)
    }
}

impl Scalar for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn write_to(self, writer: &mut ByteWriter) {
        writer.write_u8(u8::from(self));
    }

    /// Any non-zero byte decodes as `true`.
    #[inline]
    fn read_from(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        reader.read_u8().map(|b| b != 0)
    }
}

/// Implements [`Scalar`] for a field-less enum by routing it through its `#[repr]` integer.
///
/// The enum must derive `strum::FromRepr`. Decoding an unknown discriminant fails with
/// `InvalidDiscriminant` and leaves the reader where it was.
///
/// ```
/// use strum::FromRepr;
/// use wirepack::scalar_enum;
///
/// #[derive(Clone, Copy, Debug, PartialEq, FromRepr)]
/// #[repr(u16)]
/// enum Shape {
///     Circle = 1,
///     Square = 2,
/// }
/// scalar_enum!(Shape: u16);
///
/// let mut writer = wirepack::ByteWriter::new();
/// writer.write_scalar(Shape::Square);
/// assert_eq!(writer.as_bytes(), &[0, 2]);
/// ```
#[macro_export]
macro_rules! scalar_enum {
    ($ty:ty : $repr:ty) => {
        impl $crate::codec::Scalar for $ty {
            const WIDTH: usize = <$repr as $crate::codec::Scalar>::WIDTH;

            #[inline]
            fn write_to(self, writer: &mut $crate::codec::ByteWriter) {
                <$repr as $crate::codec::Scalar>::write_to(self as $repr, writer);
            }

            fn read_from(
                reader: &mut $crate::codec::ByteReader<'_>,
            ) -> $crate::CodecResult<Self> {
                reader.try_read(|r| {
                    let raw = <$repr as $crate::codec::Scalar>::read_from(r)?;
                    <$ty>::from_repr(raw).ok_or($crate::CodecError::InvalidDiscriminant {
                        type_name: stringify!($ty),
                        value: raw as u64,
                    })
                })
            }
        }
    };
}
