use crate::{AsValue, ResolvedArgument, Result, TypeResolutionError, Value};
use rust_decimal::Decimal;
use std::{
    collections::HashMap,
    fmt,
    mem::{self, Discriminant},
    sync::Arc,
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Converts a bound value into the value handed to the driver.
pub type ArgumentAdapter = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// Adapters keyed by the type descriptor of the argument.
///
/// The descriptor is the explicit type given at binding time or, when absent, the
/// typed null of the bound value. Nulls never reach the adapter: a typed null is
/// forwarded as is, provided its type is registered. An untyped argument
/// (`Value::Null` descriptor) is forwarded unchanged.
#[derive(Clone)]
pub struct TypeRegistry {
    adapters: HashMap<Discriminant<Value>, (String, ArgumentAdapter)>,
}

impl TypeRegistry {
    /// Registry knowing every scalar type of [`Value`]. Lists are left out.
    pub fn new() -> Self {
        let mut result = Self::empty();
        result
            .register_type::<bool>()
            .register_type::<i8>()
            .register_type::<i16>()
            .register_type::<i32>()
            .register_type::<i64>()
            .register_type::<u8>()
            .register_type::<u16>()
            .register_type::<u32>()
            .register_type::<u64>()
            .register_type::<f32>()
            .register_type::<f64>()
            .register_type::<Decimal>()
            .register_type::<char>()
            .register_type::<String>()
            .register_type::<Box<[u8]>>()
            .register_type::<Date>()
            .register_type::<Time>()
            .register_type::<PrimitiveDateTime>()
            .register_type::<OffsetDateTime>()
            .register_type::<Uuid>();
        result
    }

    /// Registry without any adapter.
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Use `adapter` for arguments whose type descriptor has the variant of `ty`.
    pub fn register(
        &mut self,
        ty: &Value,
        adapter: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> &mut Self {
        let previous = self
            .adapters
            .insert(mem::discriminant(ty), (ty.type_name(), Arc::new(adapter)));
        if previous.is_some() {
            log::debug!("Argument adapter for {} replaced", ty.type_name());
        }
        self
    }

    /// Register the conversion of `T`: any value `T` accepts becomes its canonical variant.
    pub fn register_type<T: AsValue + 'static>(&mut self) -> &mut Self {
        self.register(&T::as_empty_value(), |v| T::try_from_value(v).map(T::as_value))
    }

    pub fn is_registered(&self, ty: &Value) -> bool {
        self.adapters.contains_key(&mem::discriminant(ty))
    }

    /// The value to bind for `argument`.
    pub fn prepare(&self, argument: &ResolvedArgument) -> Result<Value> {
        if let Value::Null = argument.ty {
            return Ok(argument.value.clone());
        }
        let Some((_, adapter)) = self.adapters.get(&mem::discriminant(&argument.ty)) else {
            return Err(TypeResolutionError::Unregistered {
                type_name: argument.ty.type_name(),
                value: argument.value.to_string(),
            }
            .into());
        };
        if argument.value.is_null() {
            return Ok(argument.ty.as_null());
        }
        adapter(argument.value.clone()).map_err(|source| {
            TypeResolutionError::Adapter {
                type_name: argument.ty.type_name(),
                value: argument.value.to_string(),
                source: source.into(),
            }
            .into()
        })
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.adapters.values().map(|(name, _)| name).collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}
