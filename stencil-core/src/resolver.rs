use crate::{
    Argument, Binding, BindingMismatch, Context, ParsedParameters, ParsedSql, Result,
    StatementContext, Value, truncate_long,
};
use std::collections::HashMap;

/// An argument ready for its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgument {
    pub value: Value,
    /// Type descriptor, a typed null.
    pub ty: Value,
    /// The type was given at binding time rather than inferred from the value.
    pub explicit: bool,
}

impl ResolvedArgument {
    pub fn new(value: Value) -> Self {
        Self {
            ty: value.as_null(),
            value,
            explicit: false,
        }
    }
}

impl Argument {
    /// Produce the value, invoking the supplier if this is one.
    pub fn realize(&self) -> Result<ResolvedArgument> {
        Ok(match self {
            Argument::Value(value) => ResolvedArgument::new(value.clone()),
            Argument::Typed { value, ty } => ResolvedArgument {
                value: value.clone(),
                ty: ty.clone(),
                explicit: true,
            },
            Argument::Supplier(supplier) => ResolvedArgument::new(supplier()?),
        })
    }
}

enum Source<'b> {
    Bound(&'b Argument),
    Found(Argument),
}

impl Source<'_> {
    fn argument(&self) -> &Argument {
        match self {
            Source::Bound(argument) => argument,
            Source::Found(argument) => argument,
        }
    }
}

/// Match the parameters of `parsed` against `binding`, one argument per slot.
///
/// Strict unless `allow_unused`: every argument bound must be consumed, which
/// includes arguments of the other mode (named arguments for a positional
/// template and vice versa). Missing arguments are reported before unused ones,
/// and arguments of the template's own mode before the other mode. Only the
/// first failing class is reported, listing all its offenders.
///
/// A named argument is realized once and copied into each slot declaring it.
pub fn resolve(
    parsed: &ParsedSql,
    binding: &Binding<'_>,
    context: &StatementContext<'_>,
    allow_unused: bool,
) -> Result<Vec<ResolvedArgument>> {
    let result = match parsed.parameters() {
        ParsedParameters::Positional(count) => resolve_positional(*count, binding, allow_unused),
        ParsedParameters::Named(names) => resolve_named(names, binding, context, allow_unused),
    };
    result
        .with_context(|| {
            format!(
                "Cannot bind {} to query:\n{}",
                binding,
                truncate_long!(context.rendered_sql)
            )
        })
        .inspect_err(|error| log::error!("{:#}", error))
}

fn resolve_positional(
    count: usize,
    binding: &Binding<'_>,
    allow_unused: bool,
) -> Result<Vec<ResolvedArgument>> {
    let missing: Vec<usize> = (0..count)
        .filter(|i| binding.get_positional(*i).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(BindingMismatch::MissingPositional(missing).into());
    }
    if !allow_unused {
        let unused: Vec<usize> = binding.positional().range(count..).map(|(i, _)| *i).collect();
        if !unused.is_empty() {
            return Err(BindingMismatch::UnusedPositional(unused).into());
        }
        let unused: Vec<String> = binding.named().keys().cloned().collect();
        if !unused.is_empty() {
            return Err(BindingMismatch::UnusedNamed(unused).into());
        }
    }
    binding
        .positional()
        .range(..count)
        .map(|(i, argument)| {
            argument
                .realize()
                .with_context(|| format!("Cannot compute the argument at position {}", i))
        })
        .collect()
}

fn resolve_named(
    names: &[String],
    binding: &Binding<'_>,
    context: &StatementContext<'_>,
    allow_unused: bool,
) -> Result<Vec<ResolvedArgument>> {
    let mut sources = Vec::<(&str, Source<'_>)>::new();
    let mut missing = Vec::new();
    for name in names {
        let name = name.as_str();
        if sources.iter().any(|(n, _)| *n == name) || missing.iter().any(|n| n == name) {
            continue;
        }
        if let Some(argument) = binding.get_named(name) {
            sources.push((name, Source::Bound(argument)));
        } else if let Some(argument) = binding.finders().find_map(|f| f.find(name, context)) {
            sources.push((name, Source::Found(argument)));
        } else {
            missing.push(name.to_owned());
        }
    }
    if !missing.is_empty() {
        return Err(BindingMismatch::MissingNamed(missing).into());
    }
    if !allow_unused {
        let unused: Vec<String> = binding
            .named()
            .keys()
            .filter(|k| !names.contains(*k))
            .cloned()
            .collect();
        if !unused.is_empty() {
            return Err(BindingMismatch::UnusedNamed(unused).into());
        }
        let unused: Vec<usize> = binding.positional().keys().copied().collect();
        if !unused.is_empty() {
            return Err(BindingMismatch::UnusedPositional(unused).into());
        }
    }
    let mut realized = HashMap::<&str, ResolvedArgument>::with_capacity(sources.len());
    for (name, source) in &sources {
        let argument = source
            .argument()
            .realize()
            .with_context(|| format!("Cannot compute the argument for parameter `{}`", name))?;
        realized.insert(*name, argument);
    }
    Ok(names
        .iter()
        .filter_map(|name| realized.get(name.as_str()).cloned())
        .collect())
}
