#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use stencil_core::{
        AsValue, Error, ResolvedArgument, TypeRegistry, TypeResolutionError, Value,
    };
    use time::macros::date;

    fn typed(value: Value, ty: Value) -> ResolvedArgument {
        ResolvedArgument {
            value,
            ty,
            explicit: true,
        }
    }

    fn resolution_error(error: &Error) -> &TypeResolutionError {
        error
            .downcast_ref::<TypeResolutionError>()
            .unwrap_or_else(|| panic!("Expected a TypeResolutionError, got: {:#}", error))
    }

    #[test]
    fn inferred_values_pass_through() {
        let registry = TypeRegistry::new();
        for value in [
            true.as_value(),
            1i8.as_value(),
            2u64.as_value(),
            3.5f64.as_value(),
            Decimal::new(1234, 2).as_value(),
            'x'.as_value(),
            "text".as_value(),
            Box::<[u8]>::from(&[1u8, 2][..]).as_value(),
            date!(2024 - 02 - 29).as_value(),
        ] {
            let argument = ResolvedArgument::new(value.clone());
            assert_eq!(registry.prepare(&argument).unwrap(), value);
        }
    }

    #[test]
    fn explicit_type_converts() {
        let registry = TypeRegistry::new();
        let result = registry
            .prepare(&typed(Value::Int32(Some(5)), Value::Int64(None)))
            .unwrap();
        assert_eq!(result, Value::Int64(Some(5)));

        let result = registry
            .prepare(&typed(Value::Char(Some('a')), Value::Varchar(None)))
            .unwrap();
        assert_eq!(result, Value::Varchar(Some("a".into())));
    }

    #[test]
    fn adapter_failure() {
        let registry = TypeRegistry::new();
        let error = registry
            .prepare(&typed(Value::Int32(Some(300)), Value::Int8(None)))
            .unwrap_err();
        assert!(matches!(
            resolution_error(&error),
            TypeResolutionError::Adapter { type_name, .. } if type_name == "TINYINT"
        ));
        assert!(format!("{:#}", error).contains("out of range"));
    }

    #[test]
    fn nulls() {
        let registry = TypeRegistry::new();
        let result = registry.prepare(&ResolvedArgument::new(Value::Null)).unwrap();
        assert_eq!(result, Value::Null);
        let result = registry
            .prepare(&typed(Value::Varchar(None), Value::Varchar(None)))
            .unwrap();
        assert_eq!(result, Value::Varchar(None));
        let result = registry
            .prepare(&typed(Value::Null, Value::Uuid(None)))
            .unwrap();
        assert_eq!(result, Value::Uuid(None));
    }

    #[test]
    fn lists_are_not_registered() {
        let registry = TypeRegistry::new();
        let error = registry
            .prepare(&ResolvedArgument::new(vec![1, 2].as_value()))
            .unwrap_err();
        assert!(matches!(
            resolution_error(&error),
            TypeResolutionError::Unregistered { type_name, .. } if type_name == "INTEGER[]"
        ));
    }

    #[test]
    fn empty_registry() {
        let mut registry = TypeRegistry::empty();
        assert!(!registry.is_registered(&Value::Int32(None)));
        let argument = ResolvedArgument::new(Value::Int32(Some(1)));
        let error = registry.prepare(&argument).unwrap_err();
        assert_eq!(
            resolution_error(&error).to_string(),
            "No argument adapter registered for 1 of type INTEGER"
        );
        registry.register(&Value::Int32(None), |v| match v {
            Value::Int32(Some(v)) => Ok(Value::Int32(Some(v * 10))),
            v => Err(Error::msg(format!("unexpected {}", v))),
        });
        assert!(registry.is_registered(&Value::Int32(None)));
        assert_eq!(registry.prepare(&argument).unwrap(), Value::Int32(Some(10)));
    }

    #[test]
    fn custom_list_adapter() {
        let mut registry = TypeRegistry::new();
        registry.register_type::<Vec<i64>>();
        let result = registry
            .prepare(&typed(vec![1i32, 2].as_value(), Vec::<i64>::as_empty_value()))
            .unwrap();
        assert_eq!(result, vec![1i64, 2].as_value());
    }
}
