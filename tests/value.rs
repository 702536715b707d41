#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::borrow::Cow;
    use tempo::{AsValue, SqlLiteralFormatter, Value, ValueFormatter};
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    #[test]
    fn native_types_convert_to_their_variant() {
        assert_eq!(true.as_value(), Value::Boolean(Some(true)));
        assert_eq!(42_i32.as_value(), Value::Int32(Some(42)));
        assert_eq!((-7_i64).as_value(), Value::Int64(Some(-7)));
        assert_eq!(255_u8.as_value(), Value::UInt8(Some(255)));
        assert_eq!(2.5_f64.as_value(), Value::Float64(Some(2.5)));
        assert_eq!(
            "hello".as_value(),
            Value::Varchar(Some("hello".to_owned())),
        );
        assert_eq!(
            String::from("owned").as_value(),
            Value::Varchar(Some("owned".to_owned())),
        );
        assert_eq!(
            Cow::Borrowed("borrowed").as_value(),
            Value::Varchar(Some("borrowed".to_owned())),
        );
        assert_eq!(
            Decimal::new(1234, 2).as_value(),
            Value::Decimal(Some(Decimal::new(1234, 2))),
        );
        assert_eq!(
            date!(2026 - 08 - 06).as_value(),
            Value::Date(Some(date!(2026 - 08 - 06))),
        );
    }

    #[test]
    fn options_convert_to_typed_nulls() {
        let value = None::<i32>.as_value();
        assert_eq!(value, Value::Int32(None));
        assert!(value.is_null());
        assert_eq!(Some(9_i16).as_value(), Value::Int16(Some(9)));
        assert_eq!(None::<String>.as_value(), Value::Varchar(None));
    }

    #[test]
    fn byte_slices_convert_to_blobs() {
        assert_eq!(
            (&[1_u8, 2, 3][..]).as_value(),
            Value::Blob(Some(vec![1, 2, 3].into())),
        );
    }

    #[test]
    fn vectors_convert_to_lists() {
        let value = vec![1_i32, 2].as_value();
        let Value::List(Some(items), element) = value else {
            panic!("expected a list");
        };
        assert_eq!(items, vec![Value::Int32(Some(1)), Value::Int32(Some(2))]);
        assert!(element.same_type(&Value::Int32(None)));
    }

    #[test]
    fn kind_names_follow_the_variant() {
        assert_eq!(42_i32.as_value().kind(), "int32");
        assert_eq!("x".as_value().kind(), "varchar");
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(None::<f32>.as_value().kind(), "float32");
    }

    #[test]
    fn display_is_a_plain_fallback_form() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Int64(None).to_string(), "NULL");
        assert_eq!(42_i32.as_value().to_string(), "42");
        assert_eq!("hi".as_value().to_string(), "hi");
        assert_eq!(
            (&[1_u8, 2][..]).as_value().to_string(),
            "<blob of 2 bytes>",
        );
        assert_eq!(
            vec![1_i32, 2].as_value().to_string(),
            "[1, 2]",
        );
    }

    #[test]
    fn literal_formatter_quotes_and_escapes() {
        let formatter = SqlLiteralFormatter;
        assert_eq!(formatter.format(&Value::Null).unwrap(), "NULL");
        assert_eq!(formatter.format(&true.as_value()).unwrap(), "true");
        assert_eq!(formatter.format(&42_i32.as_value()).unwrap(), "42");
        assert_eq!(formatter.format(&2.5_f64.as_value()).unwrap(), "2.5");
        assert_eq!(
            formatter.format(&"O'Brien".as_value()).unwrap(),
            "'O''Brien'",
        );
        assert_eq!(
            formatter.format(&Value::Clob(Some("text".to_owned()))).unwrap(),
            "'text'",
        );
        assert_eq!(
            formatter.format(&(&[0xAB_u8, 0x01][..]).as_value()).unwrap(),
            "'\\xAB01'",
        );
    }

    #[test]
    fn literal_formatter_renders_temporal_values() {
        let formatter = SqlLiteralFormatter;
        assert_eq!(
            formatter.format(&date!(2026 - 08 - 06).as_value()).unwrap(),
            "'2026-08-06'",
        );
        assert_eq!(
            formatter.format(&time!(12:30:45).as_value()).unwrap(),
            "'12:30:45'",
        );
        assert_eq!(
            formatter.format(&time!(12:30:45.5).as_value()).unwrap(),
            "'12:30:45.500'",
        );
        assert_eq!(
            formatter
                .format(&datetime!(2026-08-06 12:30:45).as_value())
                .unwrap(),
            "'2026-08-06 12:30:45'",
        );
        assert_eq!(
            formatter
                .format(&datetime!(2026-08-06 12:30:45 +02:00).as_value())
                .unwrap(),
            "'2026-08-06 12:30:45+02:00'",
        );
    }

    #[test]
    fn literal_formatter_renders_uuids_and_lists() {
        let formatter = SqlLiteralFormatter;
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            formatter.format(&id.as_value()).unwrap(),
            "'67e55044-10b1-426f-9247-bb680e5fe0c8'",
        );
        assert_eq!(
            formatter.format(&vec![1_i32, 2].as_value()).unwrap(),
            "[1, 2]",
        );
        assert_eq!(
            formatter
                .format(&vec![String::from("a"), String::from("b")].as_value())
                .unwrap(),
            "['a', 'b']",
        );
    }
}
