use pgraster::raster::{PixelType, Value};
use proptest::prelude::*;

fn ints(data: &[i64]) -> Vec<Value> {
    data.iter().copied().map(Value::Int).collect()
}

proptest! {
    #[test]
    fn small_unsigned_selects_u8(data in prop::collection::vec(0i64..=255, 1..32), nodata in prop::option::of(0i64..=255)) {
        let selected = PixelType::select(&ints(&data), nodata.map(Value::Int)).unwrap();
        prop_assert_eq!(selected, PixelType::U8);
    }

    #[test]
    fn value_256_selects_at_least_16_bits(data in prop::collection::vec(0i64..=65_535, 0..32)) {
        let mut data = data;
        data.push(256);
        let selected = PixelType::select(&ints(&data), None).unwrap();
        prop_assert_eq!(selected, PixelType::U16);
    }

    #[test]
    fn negative_never_selects_unsigned(
        data in prop::collection::vec(i64::from(i32::MIN)..=i64::from(i32::MAX), 0..32),
        negative in i64::MIN..0,
    ) {
        let mut data = data;
        data.push(negative);
        let selected = PixelType::select(&ints(&data), None).unwrap();
        prop_assert!(selected.is_signed());
        prop_assert!(selected.covers(&Value::Int(negative)));
    }

    #[test]
    fn fractional_selects_float(
        data in prop::collection::vec(-1e6f64..1e6, 0..32),
        fraction in 0.01f64..0.99,
    ) {
        let mut values: Vec<Value> = data.into_iter().map(Value::Float).collect();
        values.push(Value::Float(7.0 + fraction));
        let selected = PixelType::select(&values, None).unwrap();
        prop_assert!(selected.is_floating());
    }

    #[test]
    fn beyond_u32_selects_float(
        data in prop::collection::vec(0i64..=i64::from(u32::MAX), 0..32),
        big in (i64::from(u32::MAX) + 1)..i64::MAX,
    ) {
        let mut data = data;
        data.push(big);
        let selected = PixelType::select(&ints(&data), None).unwrap();
        prop_assert!(selected.is_floating());
    }

    #[test]
    fn selection_covers_every_value(data in prop::collection::vec(any::<i32>(), 1..32)) {
        let values: Vec<Value> = data.iter().copied().map(Value::from).collect();
        let selected = PixelType::select(&values, None).unwrap();
        for value in &values {
            prop_assert!(selected.covers(value));
        }
    }
}

#[test]
fn beyond_f64_fails() {
    assert!(PixelType::select(&[Value::Float(f64::MAX), Value::Float(f64::INFINITY)], None).is_err());
    assert!(PixelType::select(&[Value::Float(-f64::INFINITY)], None).is_err());
}
