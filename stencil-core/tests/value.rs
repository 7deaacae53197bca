#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::{borrow::Cow, str::FromStr, sync::Arc};
    use stencil_core::{AsValue, Value};
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float32(Some(1.0)), Value::Null);
        assert!(Value::Null.is_null());
        assert!(Value::Int32(None).is_null());
        assert!(!Value::Int32(Some(0)).is_null());
    }

    #[test]
    fn value_bool() {
        let val: Value = true.as_value();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Boolean(None));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        let var: bool = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, true);
        assert_eq!(bool::try_from_value(1_i8.as_value()).unwrap(), true);
        assert_eq!(bool::try_from_value(0_u64.as_value()).unwrap(), false);
        assert!(bool::try_from_value(0.5_f32.as_value()).is_err());
    }

    #[test]
    fn value_integers() {
        let val = 127_i8.as_value();
        assert_eq!(val, Value::Int8(Some(127)));
        assert_eq!(i8::try_from_value(val).unwrap(), 127);
        assert_eq!(i8::try_from_value(99_u8.as_value()).unwrap(), 99);
        assert_eq!(i8::try_from_value((-128_i64).as_value()).unwrap(), -128);
        assert!(i8::try_from_value(128_i64.as_value()).is_err());
        assert_eq!(i64::try_from_value(5_i32.as_value()).unwrap(), 5);
        assert_eq!(u16::try_from_value(65535_u32.as_value()).unwrap(), 65535);
        assert!(u16::try_from_value(65536_u32.as_value()).is_err());
        assert!(u32::try_from_value((-1_i32).as_value()).is_err());
        assert_eq!(
            i32::try_from_value(Decimal::from_str("42").unwrap().as_value()).unwrap(),
            42
        );
        let error = i32::try_from_value(Decimal::from_str("4.2").unwrap().as_value()).unwrap_err();
        assert!(format!("{:#}", error).contains("not a integer"));
        assert!(i32::try_from_value(Value::Varchar(Some("1".into()))).is_err());
    }

    #[test]
    fn value_floats() {
        assert_eq!(1.5_f32.as_value(), Value::Float32(Some(1.5)));
        assert_eq!(f64::try_from_value(1.5_f32.as_value()).unwrap(), 1.5);
        assert_eq!(f64::try_from_value(7_i32.as_value()).unwrap(), 7.0);
        assert!(f32::try_from_value(f64::MAX.as_value()).is_err());
        assert_eq!(
            f64::try_from_value(Decimal::new(25, 1).as_value()).unwrap(),
            2.5
        );
    }

    #[test]
    fn value_strings() {
        assert_eq!("hi".as_value(), Value::Varchar(Some("hi".into())));
        assert_eq!(String::from("hi").as_value(), "hi".as_value());
        assert_eq!(Cow::Borrowed("hi").as_value(), "hi".as_value());
        assert_eq!(
            String::try_from_value(Value::Char(Some('c'))).unwrap(),
            "c"
        );
        assert_eq!(char::try_from_value("c".as_value()).unwrap(), 'c');
        assert!(char::try_from_value("cc".as_value()).is_err());
        assert!(<&str>::try_from_value("borrowed".as_value()).is_err());
    }

    #[test]
    fn value_wrappers() {
        assert_eq!(Some(3_i16).as_value(), Value::Int16(Some(3)));
        assert_eq!(Option::<i16>::None.as_value(), Value::Int16(None));
        assert_eq!(Option::<i16>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(Box::new(2_u8).as_value(), Value::UInt8(Some(2)));
        assert_eq!(Arc::new(2_u8).as_value(), Value::UInt8(Some(2)));
        assert_eq!(Value::Int8(Some(1)).as_value(), Value::Int8(Some(1)));
    }

    #[test]
    fn value_list() {
        let val = vec![1_i32, 2, 3].as_value();
        assert_eq!(
            val,
            Value::List(
                Some(vec![
                    Value::Int32(Some(1)),
                    Value::Int32(Some(2)),
                    Value::Int32(Some(3))
                ]),
                Box::new(Value::Int32(None))
            )
        );
        assert_eq!(Vec::<i64>::try_from_value(val).unwrap(), vec![1, 2, 3]);
        assert_ne!(
            Vec::<i32>::new().as_value(),
            Vec::<i64>::new().as_value()
        );
    }

    #[test]
    fn type_descriptors() {
        assert_eq!(5_i32.as_value().as_null(), Value::Int32(None));
        assert_eq!(Value::Decimal(Some(Decimal::ONE), 10, 2).as_null(), Value::Decimal(None, 10, 2));
        assert!(Value::Int32(Some(1)).same_type(&Value::Int32(None)));
        assert!(!Value::Int32(Some(1)).same_type(&Value::Int64(None)));
        assert!(!Value::Decimal(None, 10, 2).same_type(&Value::Decimal(None, 10, 3)));
        assert_eq!(Value::Int64(None).type_name(), "BIGINT");
        assert_eq!(Value::Decimal(None, 10, 2).type_name(), "DECIMAL(10,2)");
        assert_eq!(Vec::<String>::as_empty_value().type_name(), "VARCHAR[]");
        assert_eq!(Value::Null.type_name(), "NULL");
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Int32(None).to_string(), "NULL");
        assert_eq!(42_i64.as_value().to_string(), "42");
        assert_eq!("O'Brien".as_value().to_string(), "'O''Brien'");
        assert_eq!('\''.as_value().to_string(), "''''");
        assert_eq!(
            Box::<[u8]>::from(&[0xCA_u8, 0xFE][..]).as_value().to_string(),
            "'\\xCAFE'"
        );
        assert_eq!(date!(2024 - 01 - 31).as_value().to_string(), "'2024-01-31'");
        assert_eq!(time!(10:30).as_value().to_string(), "'10:30:00.0'");
        assert_eq!(
            datetime!(2024-01-31 10:30).as_value().to_string(),
            "'2024-01-31T10:30:00.0'"
        );
        assert_eq!(
            Uuid::nil().as_value().to_string(),
            "'00000000-0000-0000-0000-000000000000'"
        );
        assert_eq!(vec!["a", "b"].as_value().to_string(), "['a','b']");
    }
}
