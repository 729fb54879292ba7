//! Checked projection from an untyped JSON result into domain records.
//!
//! The envelope's `result` is a [`serde_json::Value`]. Decoders read fields
//! by exact key and check each one's shape, so malformed input becomes
//! [`Error::MalformedResponse`] rather than a panic.
//!
//! Integral fields go through [`narrow_u64`]. Unsigned integers are taken
//! exactly. Floating-point values are truncated toward zero, which loses
//! precision above 2^53; negative and non-finite values are rejected.

use serde_json::{Map, Value};

use super::types::{Block, BlockCount, ChartPoint, CurrentStats, DailyStats, Page, Stats};
use crate::error::{Error, Result};

/// Records that can be projected from a JSON object.
pub(crate) trait Decode: Sized {
    fn decode(fields: &Fields<'_>) -> Result<Self>;
}

/// Borrowed view of a JSON object with checked accessors.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    context: String,
}

impl<'a> Fields<'a> {
    pub fn new(value: &'a Value, context: impl Into<String>) -> Result<Self> {
        let context = context.into();
        match value {
            Value::Object(map) => Ok(Self { map, context }),
            other => Err(Error::malformed(
                context,
                format!("expected object, found {}", kind(other)),
            )),
        }
    }

    pub fn get(&self, key: &str) -> Result<&'a Value> {
        self.map
            .get(key)
            .ok_or_else(|| Error::malformed(&self.context, format!("missing field `{key}`")))
    }

    fn field_context(&self, key: &str) -> String {
        format!("{}.{}", self.context, key)
    }

    pub fn u64(&self, key: &str) -> Result<u64> {
        narrow_u64(self.get(key)?, &self.field_context(key))
    }

    pub fn f64(&self, key: &str) -> Result<f64> {
        number(self.get(key)?, &self.field_context(key))
    }

    pub fn string(&self, key: &str) -> Result<String> {
        match self.get(key)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.mismatch(key, "string", other)),
        }
    }

    pub fn bool(&self, key: &str) -> Result<bool> {
        match self.get(key)? {
            Value::Bool(b) => Ok(*b),
            other => Err(self.mismatch(key, "bool", other)),
        }
    }

    pub fn object(&self, key: &str) -> Result<Fields<'a>> {
        Fields::new(self.get(key)?, self.field_context(key))
    }

    /// A nested list that the API leaves `null` or absent when empty.
    pub fn list_or_empty<T: Decode>(&self, key: &str) -> Result<Vec<T>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => list(value, &self.field_context(key)),
        }
    }

    fn mismatch(&self, key: &str, expected: &str, found: &Value) -> Error {
        Error::malformed(
            self.field_context(key),
            format!("expected {expected}, found {}", kind(found)),
        )
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Narrow a JSON number to `u64`.
pub(crate) fn narrow_u64(value: &Value, context: &str) -> Result<u64> {
    let Value::Number(n) = value else {
        return Err(Error::malformed(
            context,
            format!("expected number, found {}", kind(value)),
        ));
    };

    if let Some(v) = n.as_u64() {
        return Ok(v);
    }

    // 2^64, the first value past u64::MAX.
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f < LIMIT => Ok(f as u64),
        _ => Err(Error::malformed(
            context,
            format!("{n} is not a non-negative integer in u64 range"),
        )),
    }
}

pub(crate) fn number(value: &Value, context: &str) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::malformed(context, format!("{n} is not representable as f64"))),
        other => Err(Error::malformed(
            context,
            format!("expected number, found {}", kind(other)),
        )),
    }
}

pub(crate) fn object<T: Decode>(value: &Value, context: &str) -> Result<T> {
    T::decode(&Fields::new(value, context)?)
}

/// A top-level list; `null` is malformed.
pub(crate) fn list<T: Decode>(value: &Value, context: &str) -> Result<Vec<T>> {
    let Value::Array(items) = value else {
        return Err(Error::malformed(
            context,
            format!("expected array, found {}", kind(value)),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| object(item, &format!("{context}[{i}]")))
        .collect()
}

/// A top-level list where `null` means no entries.
pub(crate) fn list_or_empty<T: Decode>(value: &Value, context: &str) -> Result<Vec<T>> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => list(other, context),
    }
}

/// A paginated listing. `data` may be `null` or missing; the counters may
/// not.
pub(crate) fn page<T: Decode>(value: &Value, context: &str) -> Result<Page<T>> {
    let fields = Fields::new(value, context)?;
    Ok(Page {
        data: fields.list_or_empty("data")?,
        items_per_page: fields.u64("items_per_page")?,
        total_items: fields.u64("total_items")?,
        total_pages: fields.u64("total_pages")?,
    })
}

impl Decode for Block {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            hash: f.string("hash")?,
            number: f.u64("number")?,
            kind: f.string("type")?,
            miner: f.string("miner")?,
            difficulty: f.u64("difficulty")?,
            timestamp: f.u64("timestamp")?,
            confirmed: f.bool("confirmed")?,
            round_time: f.u64("round_time")?,
            luck: f.f64("luck")?,
            server_name: f.string("server_name")?,
            block_reward: f.u64("block_reward")?,
            block_fees: f.u64("block_fees")?,
            uncle_inclusion_rewards: f.u64("uncle_inclusion_rewards")?,
            total_rewards: f.u64("total_rewards")?,
        })
    }
}

impl Decode for CurrentStats {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            effective_hashrate: f.u64("effective_hashrate")?,
            reported_hashrate: f.u64("reported_hashrate")?,
        })
    }
}

impl Decode for DailyStats {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            effective_hashrate: f.u64("effective_hashrate")?,
            reported_hashrate: f.u64("reported_hashrate")?,
            valid_shares: f.u64("valid_shares")?,
            stale_shares: f.u64("stale_shares")?,
            invalid_shares: f.u64("invalid_shares")?,
        })
    }
}

impl Decode for Stats {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            current: CurrentStats::decode(&f.object("current")?)?,
            daily: DailyStats::decode(&f.object("daily")?)?,
        })
    }
}

impl Decode for ChartPoint {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            timestamp: f.u64("timestamp")?,
            effective_hashrate: f.u64("effective_hashrate")?,
            average_effective_hashrate: f.f64("average_effective_hashrate")?,
            reported_hashrate: f.u64("reported_hashrate")?,
            valid_shares: f.u64("valid_shares")?,
            stale_shares: f.u64("stale_shares")?,
            invalid_shares: f.u64("invalid_shares")?,
        })
    }
}

impl Decode for BlockCount {
    fn decode(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            confirmed: f.u64("confirmed")?,
            unconfirmed: f.u64("unconfirmed")?,
        })
    }
}
