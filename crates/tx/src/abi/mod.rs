// Path: crates/tx/src/abi/mod.rs
//! Schema-driven binary encoding of action data.
//!
//! [`AbiEncoder`] walks a JSON value alongside a type from the contract's ABI
//! and writes the chain's canonical binary form. Numbers may arrive either as
//! JSON numbers or as decimal strings, because numeric generators that target
//! a `string`-typed field emit quoted values.

pub mod writer;

use cryptonym_api::chain::ActionEncoder;
use cryptonym_api::error::EncodeError;
use cryptonym_types::abi::{AbiDef, StructDef};
use serde_json::Value;

pub use writer::{name_to_u64, parse_time_point_sec, ByteWriter};

const MAX_DEPTH: usize = 32;

/// Builtin types the chain defines but this encoder does not write.
const UNSUPPORTED: &[&str] = &[
    "int128",
    "uint128",
    "float128",
    "time_point",
    "block_timestamp_type",
    "symbol",
    "symbol_code",
    "asset",
    "extended_asset",
    "public_key",
    "signature",
];

/// Encodes action data against a contract ABI.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbiEncoder;

impl AbiEncoder {
    /// Encodes `value` as `type_name`.
    pub fn encode_type(
        &self,
        abi: &AbiDef,
        type_name: &str,
        value: &Value,
    ) -> Result<Vec<u8>, EncodeError> {
        let mut w = ByteWriter::default();
        Encoding { abi }.encode(type_name, value, type_name, 0, &mut w)?;
        Ok(w.into_bytes())
    }
}

impl ActionEncoder for AbiEncoder {
    fn encode_action(
        &self,
        abi: &AbiDef,
        action: &str,
        json: &Value,
    ) -> Result<Vec<u8>, EncodeError> {
        let struct_name = abi.action_struct_name(action);
        if abi.find_struct(struct_name).is_none() {
            return Err(EncodeError::UnknownAction(action.to_string()));
        }
        self.encode_type(abi, struct_name, json)
    }
}

fn describe(v: &Value) -> String {
    match v {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(_) => "string".into(),
        Value::Array(_) => "array".into(),
        Value::Object(_) => "object".into(),
    }
}

fn mismatch(path: &str, expected: &str, got: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        got: describe(got),
    }
}

struct Encoding<'a> {
    abi: &'a AbiDef,
}

impl Encoding<'_> {
    fn encode(
        &self,
        ty: &str,
        v: &Value,
        path: &str,
        depth: usize,
        w: &mut ByteWriter,
    ) -> Result<(), EncodeError> {
        if depth > MAX_DEPTH {
            return Err(EncodeError::TooDeep(path.to_string()));
        }
        if let Some(inner) = ty.strip_suffix("[]") {
            let items = v.as_array().ok_or_else(|| mismatch(path, ty, v))?;
            let len = u32::try_from(items.len()).map_err(|_| EncodeError::OutOfRange {
                path: path.to_string(),
                ty: ty.to_string(),
                value: items.len().to_string(),
            })?;
            w.varuint32(len);
            for (i, item) in items.iter().enumerate() {
                self.encode(inner, item, &format!("{path}[{i}]"), depth + 1, w)?;
            }
            return Ok(());
        }
        if let Some(inner) = ty.strip_suffix('?') {
            if v.is_null() {
                w.u8(0);
                return Ok(());
            }
            w.u8(1);
            return self.encode(inner, v, path, depth + 1, w);
        }
        if let Some(inner) = ty.strip_suffix('$') {
            return self.encode(inner, v, path, depth + 1, w);
        }
        let resolved = self.abi.resolve_alias(ty);
        if resolved != ty {
            return self.encode(resolved, v, path, depth + 1, w);
        }
        if self.builtin(ty, v, path, w)? {
            return Ok(());
        }
        match self.abi.find_struct(ty) {
            Some(s) => self.encode_struct(s, v, path, depth + 1, w),
            None => Err(EncodeError::UnknownType(ty.to_string())),
        }
    }

    fn encode_struct(
        &self,
        s: &StructDef,
        v: &Value,
        path: &str,
        depth: usize,
        w: &mut ByteWriter,
    ) -> Result<(), EncodeError> {
        if depth > MAX_DEPTH {
            return Err(EncodeError::TooDeep(path.to_string()));
        }
        let obj = v.as_object().ok_or_else(|| mismatch(path, &s.name, v))?;
        if !s.base.is_empty() {
            let base = self
                .abi
                .find_struct(self.abi.resolve_alias(&s.base))
                .ok_or_else(|| EncodeError::UnknownType(s.base.clone()))?;
            self.encode_struct(base, v, path, depth + 1, w)?;
        }
        for field in &s.fields {
            let field_path = format!("{path}.{}", field.name);
            match obj.get(&field.name) {
                Some(fv) => self.encode(&field.type_name, fv, &field_path, depth + 1, w)?,
                // A missing binary extension ends the struct.
                None if field.type_name.ends_with('$') => return Ok(()),
                None => {
                    return Err(EncodeError::MissingField {
                        structure: s.name.clone(),
                        field: field.name.clone(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Writes a builtin type. Returns false if `ty` is not a builtin.
    fn builtin(&self, ty: &str, v: &Value, path: &str, w: &mut ByteWriter) -> Result<bool, EncodeError> {
        match ty {
            "bool" => w.u8(u8::from(bool_value(v, path)?)),
            "int8" => w.u8(int_in_range(v, path, ty, i8::MIN.into(), i8::MAX.into())? as i8 as u8),
            "uint8" => w.u8(int_in_range(v, path, ty, 0, u8::MAX.into())? as u8),
            "int16" => w.u16(int_in_range(v, path, ty, i16::MIN.into(), i16::MAX.into())? as i16 as u16),
            "uint16" => w.u16(int_in_range(v, path, ty, 0, u16::MAX.into())? as u16),
            "int32" => w.u32(int_in_range(v, path, ty, i32::MIN.into(), i32::MAX.into())? as i32 as u32),
            "uint32" => w.u32(int_in_range(v, path, ty, 0, u32::MAX.into())? as u32),
            "int64" => w.u64(int_in_range(v, path, ty, i64::MIN.into(), i64::MAX.into())? as i64 as u64),
            "uint64" => w.u64(int_in_range(v, path, ty, 0, u64::MAX.into())? as u64),
            "varint32" => w.varint32(int_in_range(v, path, ty, i32::MIN.into(), i32::MAX.into())? as i32),
            "varuint32" => w.varuint32(int_in_range(v, path, ty, 0, u32::MAX.into())? as u32),
            "float32" => w.f32(float_value(v, path, ty)? as f32),
            "float64" => w.f64(float_value(v, path, ty)?),
            "string" => {
                let s = v.as_str().ok_or_else(|| mismatch(path, ty, v))?;
                w.string(s).map_err(|e| out_of_range(path, ty, e))?;
            }
            "name" => {
                let s = v.as_str().ok_or_else(|| mismatch(path, ty, v))?;
                w.name(s).map_err(|e| out_of_range(path, ty, e))?;
            }
            "bytes" => {
                let bytes = hex_value(v, path, ty)?;
                w.bytes(&bytes).map_err(|e| out_of_range(path, ty, e))?;
            }
            "checksum160" => w.raw(&fixed_hex(v, path, ty, 20)?),
            "checksum256" => w.raw(&fixed_hex(v, path, ty, 32)?),
            "checksum512" => w.raw(&fixed_hex(v, path, ty, 64)?),
            "time_point_sec" => {
                let secs = match v {
                    Value::String(s) if s.contains('T') => {
                        parse_time_point_sec(s).map_err(|e| out_of_range(path, ty, e))?
                    }
                    _ => int_in_range(v, path, ty, 0, u32::MAX.into())? as u32,
                };
                w.u32(secs);
            }
            other if UNSUPPORTED.contains(&other) => {
                return Err(EncodeError::UnsupportedType(other.to_string()))
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn out_of_range(path: &str, ty: &str, value: impl ToString) -> EncodeError {
    EncodeError::OutOfRange {
        path: path.to_string(),
        ty: ty.to_string(),
        value: value.to_string(),
    }
}

fn bool_value(v: &Value, path: &str) -> Result<bool, EncodeError> {
    match v {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
        Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
        Value::String(s) => match s.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(mismatch(path, "bool", v)),
        },
        _ => Err(mismatch(path, "bool", v)),
    }
}

fn int_in_range(v: &Value, path: &str, ty: &str, min: i128, max: i128) -> Result<i128, EncodeError> {
    let n: i128 = match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into()
            } else if let Some(u) = n.as_u64() {
                u.into()
            } else {
                return Err(mismatch(path, ty, v));
            }
        }
        Value::String(s) => s.trim().parse().map_err(|_| mismatch(path, ty, v))?,
        _ => return Err(mismatch(path, ty, v)),
    };
    if n < min || n > max {
        return Err(out_of_range(path, ty, n));
    }
    Ok(n)
}

fn float_value(v: &Value, path: &str, ty: &str) -> Result<f64, EncodeError> {
    match v {
        Value::Number(n) => n.as_f64().ok_or_else(|| mismatch(path, ty, v)),
        Value::String(s) => s.trim().parse().map_err(|_| mismatch(path, ty, v)),
        _ => Err(mismatch(path, ty, v)),
    }
}

fn hex_value(v: &Value, path: &str, ty: &str) -> Result<Vec<u8>, EncodeError> {
    let s = v.as_str().ok_or_else(|| mismatch(path, ty, v))?;
    hex::decode(s.trim()).map_err(|e| out_of_range(path, ty, e))
}

fn fixed_hex(v: &Value, path: &str, ty: &str, len: usize) -> Result<Vec<u8>, EncodeError> {
    let bytes = hex_value(v, path, ty)?;
    if bytes.len() != len {
        return Err(out_of_range(path, ty, format!("{} bytes", bytes.len())));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests;
