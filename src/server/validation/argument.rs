//! Argument validation rules.

use crate::server::domain::{Argument, ArgumentType, DescriptorError};

const FORBIDDEN_NAME_CHARACTERS: [char; 3] = ['<', '>', '$'];

/// Validates every argument in order.
///
/// # Errors
///
/// Returns the first [`DescriptorError`] from [`validate_argument`].
pub fn validate_arguments(arguments: &[Argument]) -> Result<(), DescriptorError> {
    arguments.iter().try_for_each(validate_argument)
}

/// Validates a single argument.
///
/// Named arguments need a bare flag name whose value does not repeat it.
/// Positional arguments are free-form.
///
/// # Errors
///
/// Returns [`DescriptorError::InvalidArgumentName`],
/// [`DescriptorError::ArgumentValueRepeatsName`] or
/// [`DescriptorError::UnsupportedArgumentType`].
///
/// # Examples
///
/// ```
/// use publish_gate::server::domain::Argument;
/// use publish_gate::server::validation::argument::validate_argument;
///
/// assert!(validate_argument(&Argument::named("--port").with_default("8080")).is_ok());
/// assert!(validate_argument(&Argument::named("--port").with_value("--port 8080")).is_err());
/// assert!(validate_argument(&Argument::named("--port 8080")).is_err());
/// ```
pub fn validate_argument(argument: &Argument) -> Result<(), DescriptorError> {
    match &argument.kind {
        ArgumentType::Named => validate_named_argument(argument),
        ArgumentType::Positional => Ok(()),
        ArgumentType::Unsupported(raw) => Err(DescriptorError::UnsupportedArgumentType(raw.clone())),
    }
}

fn validate_named_argument(argument: &Argument) -> Result<(), DescriptorError> {
    let name = argument.name.as_deref().unwrap_or_default();
    let reject = |reason: &str| DescriptorError::InvalidArgumentName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    if name.is_empty() {
        return Err(reject("named arguments must have a name"));
    }
    if name.contains(char::is_whitespace) {
        return Err(reject("name must not contain whitespace"));
    }
    if name.contains(FORBIDDEN_NAME_CHARACTERS) {
        return Err(reject("name must not contain '<', '>' or '$'"));
    }

    let fields = [
        ("value", argument.input.value.as_deref()),
        ("default", argument.input.default.as_deref()),
    ];
    for (field, candidate) in fields {
        if let Some(value) = candidate
            && repeats_name(name, value)
        {
            return Err(DescriptorError::ArgumentValueRepeatsName {
                name: name.to_owned(),
                field: field.to_owned(),
                value: value.to_owned(),
            });
        }
    }

    Ok(())
}

fn repeats_name(name: &str, value: &str) -> bool {
    value
        .strip_prefix(name)
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}
