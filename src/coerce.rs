use crate::{
    enums,
    log::{Logs, MapLog},
    plan::BoundColumn,
    value::{Timestamp, Type, Value},
    Error, Result,
};

/// Converts a raw column value into the bound leaf's declared type.
///
/// Nulls into nullable leaves become `Null`; nulls into non-nullable leaves
/// keep the zero value and record a non-fatal log. Everything else either
/// converts or fails the assemble call.
pub(crate) fn coerce(
    raw: &Value,
    bound: &BoundColumn,
    model: &'static str,
    logs: &mut Logs,
) -> Result<Value> {
    if raw.is_null() {
        if bound.nullable {
            return Ok(Value::Null);
        }
        logs.push(MapLog::NullIntoNonNullable {
            model,
            field: bound.field_name,
        });
        return Ok(bound.ty.zero());
    }

    match bound.ty {
        Type::Bool => match raw {
            Value::Bool(v) => Ok(Value::Bool(*v)),
            Value::I64(v) => Ok(Value::Bool(*v != 0)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            Value::String(s) => Err(Error::InvalidBoolean {
                column: bound.column_name.clone(),
                value: s.clone(),
            }),
            _ => Err(incompatible(raw, bound)),
        },
        Type::I32 => int(raw, bound, i64::from(i32::MIN), i64::from(i32::MAX)),
        Type::I64 => int(raw, bound, i64::MIN, i64::MAX),
        Type::U32 => int(raw, bound, 0, i64::from(u32::MAX)),
        Type::U64 => int(raw, bound, 0, i64::MAX),
        Type::F32 | Type::F64 => match raw {
            Value::F64(v) => Ok(Value::F64(*v)),
            // integers widen into floats
            Value::I64(v) => Ok(Value::F64(*v as f64)),
            _ => Err(incompatible(raw, bound)),
        },
        Type::String => match raw {
            Value::String(s) => Ok(Value::String(s.clone())),
            _ => Err(incompatible(raw, bound)),
        },
        Type::Timestamp => match raw {
            Value::Timestamp(ts) => Ok(Value::Timestamp(*ts)),
            Value::String(s) => parse_timestamp(s, bound),
            _ => Err(incompatible(raw, bound)),
        },
        Type::Enum(name) => match raw {
            // integer codes are assigned directly
            Value::I64(v) => Ok(Value::I64(*v)),
            Value::String(s) => match enums::lookup(name, s) {
                Some(code) => Ok(Value::I64(code)),
                None => Err(Error::UnknownEnumValue {
                    ty: name,
                    column: bound.column_name.clone(),
                    value: s.clone(),
                }),
            },
            _ => Err(incompatible(raw, bound)),
        },
    }
}

/// Integer widening is free; narrowing that loses information fails.
fn int(raw: &Value, bound: &BoundColumn, min: i64, max: i64) -> Result<Value> {
    match raw {
        Value::I64(v) if (min..=max).contains(v) => Ok(Value::I64(*v)),
        Value::I64(v) => Err(Error::NumericOverflow {
            column: bound.column_name.clone(),
            value: *v,
            ty: bound.ty,
        }),
        _ => Err(incompatible(raw, bound)),
    }
}

fn parse_timestamp(text: &str, bound: &BoundColumn) -> Result<Value> {
    let parsed = chrono::DateTime::parse_from_rfc3339(text).map_err(|_| Error::InvalidTimestamp {
        column: bound.column_name.clone(),
        value: text.to_string(),
    })?;
    Ok(Value::Timestamp(Timestamp::new(
        parsed.timestamp(),
        parsed.timestamp_subsec_nanos() as i32,
    )))
}

fn incompatible(raw: &Value, bound: &BoundColumn) -> Error {
    Error::IncompatibleValue {
        column: bound.column_name.clone(),
        ty: bound.ty,
        found: raw.kind(),
    }
}
