// Path: crates/tx/src/resolve/mod.rs
//! Payload resolution: turns each field's generation strategy into a value.
//!
//! Rows are resolved in order. Each row is copied out under its lock, resolved
//! without holding any lock, and written back, so a slow chain query never
//! blocks edits to other rows. The first error stops the pass; rows resolved
//! before it keep their new values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cryptonym_api::chain::ChainQuery;
use cryptonym_api::error::PayloadError;
use cryptonym_api::identity::SignerIdentity;
use cryptonym_fuzzer::bytes::{random_bytes_encoded, random_checksum, random_length, ByteEncoding};
use cryptonym_fuzzer::{counter, digest, fio, identity, numeric, text};
use cryptonym_types::field::{
    is_slice_type, BytesVariant, FieldSpec, FieldValue, FioVariant, FormVariant, GenerationMode,
    IdentityVariant, IntType, LengthSelector, NumericVariant,
};
use cryptonym_types::SUF_PER_FIO;

use crate::table::FieldSpecTable;

/// The result of resolving one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The value.
    pub value: FieldValue,
    /// Emit the value unescaped.
    pub emit_raw: bool,
    /// Encoding type to use instead of the declared type.
    pub abi_type: Option<String>,
    /// The value is a complete JSON value even if the declared type is an array.
    pub whole: bool,
}

impl Resolution {
    fn escaped(value: FieldValue) -> Self {
        Self {
            value,
            emit_raw: false,
            abi_type: None,
            whole: false,
        }
    }

    fn raw(value: FieldValue) -> Self {
        Self {
            emit_raw: true,
            ..Self::escaped(value)
        }
    }

    fn text(s: String) -> Self {
        Self::escaped(FieldValue::Text(s))
    }

    fn typed(mut self, abi_type: impl Into<String>) -> Self {
        self.abi_type = Some(abi_type.into());
        self
    }

    fn whole(mut self) -> Self {
        self.whole = true;
        self
    }

    /// Writes the resolution into `field`.
    pub fn apply(self, field: &mut FieldSpec) {
        field.is_slice = is_slice_type(&field.declared_type) && !self.whole;
        field.values = if field.is_slice {
            split_list(&field.raw_input)
        } else {
            Vec::new()
        };
        field.type_override = self.abi_type;
        field.emit_raw = self.emit_raw;
        field.value = Some(self.value);
    }
}

/// Resolves every field of `table` in order.
pub async fn generate_payloads<Q>(
    table: &FieldSpecTable,
    identity: &SignerIdentity,
    chain: &Q,
) -> Result<(), PayloadError>
where
    Q: ChainQuery + ?Sized,
{
    for row in table.rows() {
        let field = row.read().clone();
        let resolution = resolve_field(&field, identity, chain).await?;
        tracing::trace!(
            target: "resolve",
            field = %field.name,
            mode = field.mode.mode_label(),
            variant = field.mode.variant_label(),
            "resolved field"
        );
        resolution.apply(&mut row.write());
    }
    Ok(())
}

/// Resolves a single field without touching the table.
pub async fn resolve_field<Q>(
    field: &FieldSpec,
    identity: &SignerIdentity,
    chain: &Q,
) -> Result<Resolution, PayloadError>
where
    Q: ChainQuery + ?Sized,
{
    match field.mode {
        GenerationMode::FormValue(v) => form_value(field, v, identity),
        GenerationMode::ActorDerived(IdentityVariant::Mine) => {
            Ok(Resolution::text(identity.actor.clone()))
        }
        GenerationMode::ActorDerived(IdentityVariant::Random) => {
            Ok(Resolution::text(identity::random_actor()))
        }
        GenerationMode::PubKeyDerived(IdentityVariant::Mine) => {
            Ok(Resolution::text(identity.public_key.clone()))
        }
        GenerationMode::PubKeyDerived(IdentityVariant::Random) => {
            Ok(Resolution::text(identity::random_pub_key()))
        }
        GenerationMode::NumericGenerator(v) => numeric_value(field, v),
        GenerationMode::BytesGenerator(v) => bytes_value(field, v),
        GenerationMode::FioTypeGenerator(v) => fio_value(field, v, chain).await,
    }
}

/// Splits a comma-separated list, trimming each element.
pub fn split_list(input: &str) -> Vec<String> {
    input.split(',').map(|s| s.trim().to_string()).collect()
}

fn form_value(
    field: &FieldSpec,
    variant: FormVariant,
    identity: &SignerIdentity,
) -> Result<Resolution, PayloadError> {
    let input = field.raw_input.as_str();
    match variant {
        FormVariant::AsIs => {
            if is_slice_type(&field.declared_type) {
                return Ok(Resolution::escaped(FieldValue::List(split_list(input))));
            }
            let ty = field.declared_type.as_str();
            let trimmed = input.trim();
            if ty.contains("int") {
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Ok(Resolution::raw(FieldValue::Int(i)));
                }
                trimmed
                    .parse::<u64>()
                    .map(|u| Resolution::raw(FieldValue::Uint(u)))
                    .map_err(|e| PayloadError::invalid(&field.name, e))
            } else if ty.contains("float") {
                trimmed
                    .parse::<f64>()
                    .map(|f| Resolution::raw(FieldValue::Float(f)))
                    .map_err(|e| PayloadError::invalid(&field.name, e))
            } else {
                Ok(Resolution::text(input.to_string()))
            }
        }
        FormVariant::FioToSuf => {
            let cleaned: String = input
                .trim()
                .chars()
                .filter(|c| *c != ',' && *c != '_')
                .collect();
            let fio = cleaned
                .parse::<f64>()
                .map_err(|e| PayloadError::invalid(&field.name, e))?;
            if !fio.is_finite() || fio < 0.0 {
                return Err(PayloadError::invalid(
                    &field.name,
                    format!("'{input}' is not a FIO amount"),
                ));
            }
            Ok(Resolution::raw(FieldValue::Uint((fio * SUF_PER_FIO) as u64)))
        }
        FormVariant::JsonToStruct => {
            Ok(Resolution::raw(FieldValue::Raw(input.to_string())).whole())
        }
        FormVariant::Base64ToBytes => STANDARD
            .decode(input.trim())
            .map(|b| Resolution::escaped(FieldValue::Bytes(b)))
            .map_err(|e| PayloadError::invalid(&field.name, e)),
        FormVariant::HexToBytes => hex::decode(input.trim())
            .map(|b| Resolution::escaped(FieldValue::Bytes(b)))
            .map_err(|e| PayloadError::invalid(&field.name, e)),
        FormVariant::Checksum256 => Ok(Resolution::text(digest::checksum_of(input))),
        FormVariant::Signature => Ok(Resolution::text(digest::signature_for(
            input,
            identity.signer.as_ref(),
        ))),
        FormVariant::InvalidAddress => Ok(Resolution::text(fio::invalid_address_at(input))),
        FormVariant::ValidAddress => Ok(Resolution::text(fio::address_at(input))),
        FormVariant::MaxAddress => Ok(Resolution::text(fio::max_address_at(input))),
    }
}

fn width(field: &FieldSpec) -> Result<u32, PayloadError> {
    match field.length {
        Some(LengthSelector::Count(n)) => u32::try_from(n).map_err(|_| PayloadError::InvalidLength {
            field: field.name.clone(),
            value: n.to_string(),
        }),
        Some(other) => Err(PayloadError::InvalidLength {
            field: field.name.clone(),
            value: other.to_string(),
        }),
        None => Err(PayloadError::MissingWidth {
            field: field.name.clone(),
        }),
    }
}

fn numeric_value(field: &FieldSpec, variant: NumericVariant) -> Result<Resolution, PayloadError> {
    let resolution = match variant {
        NumericVariant::Mixed => {
            let n = numeric::random_number();
            Resolution::raw(n.value).typed(n.abi_type)
        }
        NumericVariant::MaxInt => {
            let ty = match field.length {
                None => IntType::Int32,
                Some(LengthSelector::IntType(t)) => t,
                Some(LengthSelector::Count(n)) => u32::try_from(n)
                    .ok()
                    .and_then(|bits| IntType::from_width(bits, true))
                    .ok_or_else(|| PayloadError::InvalidLength {
                        field: field.name.clone(),
                        value: n.to_string(),
                    })?,
                Some(LengthSelector::Random) => {
                    return Err(PayloadError::InvalidLength {
                        field: field.name.clone(),
                        value: LengthSelector::Random.to_string(),
                    })
                }
            };
            let n = numeric::max_int(ty);
            Resolution::raw(n.value).typed(n.abi_type)
        }
        NumericVariant::IncrementingFloat => {
            width(field)?;
            Resolution::raw(FieldValue::Float(counter::incrementing_float())).typed("float64")
        }
        NumericVariant::IncrementingInt => {
            width(field)?;
            Resolution::raw(FieldValue::Int(counter::incrementing_int())).typed("int64")
        }
        NumericVariant::RandomFloat => {
            let bits = width(field)?;
            Resolution::raw(FieldValue::Float(numeric::random_float(bits)))
                .typed(format!("float{bits}"))
        }
        NumericVariant::RandomInt => {
            let bits = width(field)?;
            if bits == 128 {
                Resolution::text(numeric::random_int128()).typed("string")
            } else {
                let signed = !field.declared_type.starts_with("uint");
                let n = numeric::random_integer(bits, signed);
                Resolution::raw(n.value).typed(n.abi_type)
            }
        }
        NumericVariant::OverflowInt => {
            let bits = width(field)?;
            let signed = field.declared_type.starts_with("int");
            let value = numeric::overflow_int(bits, signed).parse::<u64>().map_err(|_| {
                PayloadError::InvalidLength {
                    field: field.name.clone(),
                    value: bits.to_string(),
                }
            })?;
            Resolution::raw(FieldValue::Uint(value)).typed("uint64")
        }
    };
    if field.declared_type == "string" {
        return Ok(Resolution {
            emit_raw: false,
            ..resolution.typed("string")
        });
    }
    Ok(resolution)
}

fn byte_length(field: &FieldSpec) -> Result<usize, PayloadError> {
    match field.length {
        Some(LengthSelector::Count(n)) => Ok(n),
        Some(LengthSelector::Random) => Ok(random_length()),
        Some(other @ LengthSelector::IntType(_)) => Err(PayloadError::InvalidInput {
            field: field.name.clone(),
            reason: format!("invalid number for payload length: {other}"),
        }),
        None => Err(PayloadError::MissingLength {
            field: field.name.clone(),
        }),
    }
}

fn bytes_value(field: &FieldSpec, variant: BytesVariant) -> Result<Resolution, PayloadError> {
    let value = match variant {
        BytesVariant::Checksum => hex::encode(random_checksum()),
        BytesVariant::Raw => random_bytes_encoded(byte_length(field)?, ByteEncoding::Raw),
        BytesVariant::Base64 => random_bytes_encoded(byte_length(field)?, ByteEncoding::Base64),
        BytesVariant::Hex => random_bytes_encoded(byte_length(field)?, ByteEncoding::Hex),
        BytesVariant::Text => text::random_string(byte_length(field)?),
    };
    Ok(Resolution::text(value))
}

async fn fio_value<Q>(
    field: &FieldSpec,
    variant: FioVariant,
    chain: &Q,
) -> Result<Resolution, PayloadError>
where
    Q: ChainQuery + ?Sized,
{
    Ok(match variant {
        FioVariant::InvalidDomain => Resolution::text(fio::invalid_domain()),
        FioVariant::ValidDomain => Resolution::text(fio::domain()),
        FioVariant::MaxDomain => Resolution::text(fio::max_domain()),
        FioVariant::MaxNewFundsContent => Resolution::text(fio::max_new_funds_content()),
        FioVariant::MaxRecordObtContent => Resolution::text(fio::max_record_obt_content()),
        FioVariant::MaxProducerUrl => Resolution::text(fio::max_producer_url()),
        FioVariant::MaxVoteProducers => {
            let producers = chain.producers().await.map_err(|e| PayloadError::Query {
                field: field.name.clone(),
                reason: e.to_string(),
            })?;
            Resolution::escaped(FieldValue::List(fio::max_vote_producers(&producers)))
                .typed("string[]")
                .whole()
        }
        FioVariant::MaxAddAddress => Resolution::raw(FieldValue::Raw(fio::max_add_address())).whole(),
        FioVariant::VariableAddAddress => {
            let count = match field.length {
                Some(LengthSelector::Count(n)) if n > 0 => n,
                None => 1,
                Some(other) => {
                    cryptonym_api::diagnostics::report(
                        "resolve",
                        format!("{}: invalid address count '{other}', using 1", field.name),
                    );
                    1
                }
            };
            Resolution::raw(FieldValue::Raw(fio::variable_add_address(count))).whole()
        }
        FioVariant::ExistingAddress => {
            let rows = chain
                .table_rows(fio::NAMES_CODE, fio::NAMES_CODE, fio::NAMES_TABLE, fio::NAMES_LIMIT)
                .await;
            match rows {
                Ok(rows) => Resolution::text(fio::existing_address(&rows)),
                Err(e) => {
                    cryptonym_api::diagnostics::report(
                        "resolve",
                        format!("{}: could not list registered addresses: {e}", field.name),
                    );
                    Resolution::text(String::new())
                }
            }
        }
    })
}

#[cfg(test)]
mod tests;
