#[cfg(test)]
mod tests {
    use crate::codec::{BitRead, BitWrite, ByteReader, ByteWriter, Scalar};
    use crate::common::encoding::varint_len;
    use crate::CodecError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::fmt::Debug;
    use test_case::test_case;

    fn round_trip<T: Scalar + Debug>(value: T) -> T {
        let mut writer = ByteWriter::new();
        writer.write_scalar(value);
        assert_eq!(writer.len(), T::WIDTH);

        let mut reader = ByteReader::new(writer.as_bytes());
        let got = reader.read_scalar::<T>().unwrap();
        assert!(reader.is_empty());
        got
    }

    #[test]
    fn test_fixed_width_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let v: u64 = rng.random();
            assert_eq!(round_trip(v as u8), v as u8);
            assert_eq!(round_trip(v as i8), v as i8);
            assert_eq!(round_trip(v as u16), v as u16);
            assert_eq!(round_trip(v as i16), v as i16);
            assert_eq!(round_trip(v as u32), v as u32);
            assert_eq!(round_trip(v as i32), v as i32);
            assert_eq!(round_trip(v), v);
            assert_eq!(round_trip(v as i64), v as i64);

            let wide = ((v as u128) << 64) | rng.random::<u64>() as u128;
            assert_eq!(round_trip(wide), wide);
            assert_eq!(round_trip(wide as i128), wide as i128);
        }
    }

    #[test]
    fn test_float_bit_patterns_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut singles = vec![
            0.0f32.to_bits(),
            (-0.0f32).to_bits(),
            f32::INFINITY.to_bits(),
            f32::NEG_INFINITY.to_bits(),
            f32::NAN.to_bits(),
            0x7FC0_1234, // quiet NaN with payload
            0xFF80_0001, // signalling NaN, negative
            1,           // smallest subnormal
        ];
        singles.extend((0..200).map(|_| rng.random::<u32>()));
        for bits in singles {
            let value = f32::from_bits(bits);
            assert_eq!(round_trip(value).to_bits(), bits);
        }

        let mut doubles = vec![
            0.0f64.to_bits(),
            (-0.0f64).to_bits(),
            f64::NAN.to_bits(),
            0x7FF8_0000_DEAD_BEEF,
            0xFFF0_0000_0000_0001,
            f64::MIN_POSITIVE.to_bits(),
        ];
        doubles.extend((0..200).map(|_| rng.random::<u64>()));
        for bits in doubles {
            let value = f64::from_bits(bits);
            assert_eq!(round_trip(value).to_bits(), bits);
        }
    }

    #[test]
    fn test_vector_round_trip() {
        let position = [1.5f32, -2.25, 1e9];
        let rotation = [0.0f32, 0.0, 0.707, 0.707];
        let grid = [-3i32, 4];
        let mut transform = [0f32; 16];
        for (i, v) in transform.iter_mut().enumerate() {
            *v = i as f32 * 0.5;
        }

        let mut writer = ByteWriter::new();
        writer.write_vector::<3, _>(&position);
        writer.write_vector::<4, _>(&rotation);
        writer.write_vector::<2, _>(&grid);
        writer.write_vector::<16, _>(&transform);
        assert_eq!(writer.len(), 3 * 4 + 4 * 4 + 2 * 4 + 16 * 4);

        let mut reader = ByteReader::new(writer.as_bytes());
        assert_eq!(reader.read_vector::<3, [f32; 3]>().unwrap(), position);
        assert_eq!(reader.read_vector::<4, [f32; 4]>().unwrap(), rotation);
        assert_eq!(reader.read_vector::<2, [i32; 2]>().unwrap(), grid);
        assert_eq!(reader.read_vector::<16, [f32; 16]>().unwrap(), transform);
        assert!(reader.is_empty());
    }

    #[test_case(0 ; "zero")]
    #[test_case(1 ; "one")]
    #[test_case(127 ; "seven bits")]
    #[test_case(128 ; "eight bits")]
    #[test_case(300 ; "three hundred")]
    #[test_case(2_097_151 ; "twenty one bits")]
    #[test_case(268_435_455 ; "twenty eight bits")]
    #[test_case(268_435_456 ; "twenty nine bits")]
    #[test_case(u32::MAX ; "max")]
    fn test_var_u32_round_trip(value: u32) {
        let mut writer = ByteWriter::new();
        writer.write_var_u32(value);

        let bit_length = 32 - value.leading_zeros() as usize;
        assert_eq!(writer.len(), bit_length.div_ceil(7).max(1));
        assert_eq!(writer.len(), varint_len(value));

        let mut reader = ByteReader::new(writer.as_bytes());
        assert_eq!(reader.read_var_u32().unwrap(), value);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_varint_random_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut writer = ByteWriter::new();
        let mut expected = Vec::with_capacity(1000);
        for _ in 0..1000 {
            // bias towards short encodings
            let shift = rng.random_range(0..32);
            let u = rng.random::<u32>() >> shift;
            let i = rng.random::<i32>() >> shift;
            let wide = rng.random::<u64>() >> (shift * 2);
            writer.write_var_u32(u);
            writer.write_var_i32(i);
            writer.write_var_u64(wide);
            writer.write_var_i64(wide as i64);
            expected.push((u, i, wide));
        }

        let mut reader = ByteReader::new(writer.as_bytes());
        for (u, i, wide) in expected {
            assert_eq!(reader.read_var_u32().unwrap(), u);
            assert_eq!(reader.read_var_i32().unwrap(), i);
            assert_eq!(reader.read_var_u64().unwrap(), wide);
            assert_eq!(reader.read_var_i64().unwrap(), wide as i64);
        }
        assert!(reader.is_empty());
    }

    #[test_case(0, &[0x00])]
    #[test_case(-1, &[0x01])]
    #[test_case(1, &[0x02])]
    #[test_case(-2, &[0x03])]
    #[test_case(-64, &[0x7F])]
    #[test_case(64, &[0x80, 0x01])]
    #[test_case(i32::MAX, &[0xFE, 0xFF, 0xFF, 0xFF, 0x0F])]
    fn test_var_i32_encoding(value: i32, expected: &[u8]) {
        let mut writer = ByteWriter::new();
        writer.write_var_i32(value);
        assert_eq!(writer.as_bytes(), expected);

        let mut reader = ByteReader::new(expected);
        assert_eq!(reader.read_var_i32().unwrap(), value);
    }

    #[test]
    fn test_bit_packing_round_trip() {
        let mut rng = StdRng::seed_from_u64(0xB175);
        for _ in 0..50 {
            let fields: Vec<(u32, u32)> = (0..rng.random_range(1..200))
                .map(|_| {
                    let width = rng.random_range(1..=32u32);
                    let value = rng.random::<u32>() & (u32::MAX >> (32 - width));
                    (value, width)
                })
                .collect();

            let mut writer = ByteWriter::new();
            for &(value, width) in &fields {
                writer.write_bits(value, width).unwrap();
            }
            writer.finalize_bits();
            assert!(writer.byte_aligned());

            let total_bits: u32 = fields.iter().map(|(_, w)| w).sum();
            assert_eq!(writer.len(), total_bits.div_ceil(8) as usize);

            let mut reader = ByteReader::new(writer.as_bytes());
            for &(value, width) in &fields {
                assert_eq!(reader.read_bits(width).unwrap(), value);
            }
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_finalize_pads_with_zero_and_keeps_flushed_bytes() {
        let mut writer = ByteWriter::new();
        writer.write_bits(0xABCD, 16).unwrap();
        let flushed = writer.as_bytes().to_vec();

        writer.write_bits(0b1, 1).unwrap();
        writer.finalize_bits();

        assert_eq!(&writer.as_bytes()[..2], flushed.as_slice());
        assert_eq!(writer.as_bytes()[2], 0b0000_0001);
    }

    #[test]
    fn test_bits_then_bytes_with_alignment() {
        let mut writer = ByteWriter::new();
        writer.write_bits(5, 3).unwrap();
        writer.finalize_bits();
        writer.write_u16(0xCAFE);
        writer.write_bits(1, 1).unwrap();
        writer.finalize_bits();

        let mut reader = ByteReader::new(writer.as_bytes());
        assert_eq!(reader.read_bits(3).unwrap(), 5);
        reader.align_bits();
        assert_eq!(reader.read_u16().unwrap(), 0xCAFE);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        reader.align_bits();
        assert!(reader.is_empty());
    }

    #[test]
    fn test_strings_and_blobs_round_trip() {
        let blob = (0..=255u8).collect::<Vec<_>>();
        let mut writer = ByteWriter::new();
        writer.write_str("").unwrap();
        writer.write_str("héllo\0wörld").unwrap();
        writer.write_blob(&blob).unwrap();
        writer.write_str(&"x".repeat(1000)).unwrap();

        let mut reader = ByteReader::new(writer.as_bytes());
        assert_eq!(reader.read_str().unwrap(), "");
        assert_eq!(reader.read_string().unwrap(), "héllo\0wörld");
        assert_eq!(reader.read_blob().unwrap(), blob.as_slice());
        assert_eq!(reader.read_str().unwrap().len(), 1000);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_tlv_skip_lands_on_next_record() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut writer = ByteWriter::new();
        let mut starts = Vec::new();
        for tag in 0..50u16 {
            starts.push(writer.len());
            let len = rng.random_range(0..300);
            let value = (0..len).map(|_| rng.random::<u8>()).collect::<Vec<_>>();
            writer.tlv_bytes(tag, &value).unwrap();
        }

        let mut reader = ByteReader::new(writer.as_bytes());
        for (expected_tag, start) in starts.iter().enumerate() {
            assert_eq!(reader.position(), *start);
            let record = reader.next_tlv().unwrap().unwrap();
            assert_eq!(record.tag as usize, expected_tag);
        }
        assert_eq!(reader.next_tlv().unwrap(), None);
        assert_eq!(reader.position(), writer.len());
    }

    #[test]
    fn test_underrun_never_moves_cursor() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xEE);
        writer.write_str("abcdef").unwrap();
        writer.tlv_bytes(4, &[1, 2, 3, 4]).unwrap();
        let full = writer.into_inner();

        // every proper prefix of the stream after the first byte
        for cut in 1..full.len() {
            let mut reader = ByteReader::new(&full[..cut]);
            reader.read_u8().unwrap();
            let before = reader.position();

            let result = reader.read_str();
            if result.is_err() {
                assert!(matches!(result, Err(CodecError::BufferUnderrun { .. })));
                assert_eq!(reader.position(), before);
                assert!(reader.read_u64().is_err());
                assert_eq!(reader.position(), before);
                continue;
            }

            let before = reader.position();
            if reader.is_empty() {
                // cut exactly on a record boundary
                assert_eq!(reader.next_tlv(), Ok(None));
                continue;
            }
            assert!(matches!(
                reader.next_tlv(),
                Err(CodecError::BufferUnderrun { .. })
            ));
            assert_eq!(reader.position(), before);
        }
    }

    #[test]
    fn test_concrete_scenarios() {
        let mut writer = ByteWriter::new();
        writer.write_u32(300);
        writer.write_var_u32(300);
        assert_eq!(writer.as_bytes(), &[0x00, 0x00, 0x01, 0x2C, 0xAC, 0x02]);

        let mut reader = ByteReader::new(writer.as_bytes());
        assert_eq!(reader.read_u32().unwrap(), 300);
        assert_eq!(reader.read_var_u32().unwrap(), 300);

        let mut writer = ByteWriter::new();
        writer.write_var_i32(-2);
        assert_eq!(writer.as_bytes(), &[0x03]);
        assert_eq!(ByteReader::new(&[0x03]).read_var_i32().unwrap(), -2);
    }
}
