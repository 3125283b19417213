//! Response decoding.
//!
//! The service answers every command with a JSON object that carries either
//! the success payload or a `{result, msg}` fault, and encodes some records
//! as mixed-type arrays. Decoding runs in three steps:
//!
//! 1. Reject non-200 responses without looking at the body.
//! 2. Parse the body into a neutral [`serde_json::Value`] and read the status
//!    envelope. Anything but `result == "OK"` becomes a [`ServiceFault`].
//! 3. Deserialize the command's wire struct and normalize its tuples, checking
//!    length and per-position types.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use pictriev_models::{
    Attribute, Command, DetectionResult, Gender, IdentityResult, Language, ServiceFault,
};

use crate::error::{PictrievError, PictrievResult};
use crate::transport::RawResponse;

/// Result code the service sends on success.
pub const RESULT_OK: &str = "OK";

/// Status fields shared by every response. Missing or `null` reads as empty.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

/// `findface` success payload.
#[derive(Debug, Deserialize)]
struct FindFaceWire {
    imageid: String,
    nfaces: u32,
    ptime: f64,
    sx: u32,
    sy: u32,
}

/// `whoissim` success payload, tuples still untyped.
#[derive(Debug, Deserialize)]
struct WhoisWire {
    age: f64,
    #[serde(default)]
    agedist: Option<Vec<f64>>,
    #[serde(default)]
    attrs: Option<Vec<Vec<Value>>>,
    gender: Vec<Value>,
}

/// Decode a `findface` response.
pub fn decode_find_face(response: &RawResponse) -> PictrievResult<DetectionResult> {
    let value = parse_checked(Command::FindFace, response)?;
    let wire: FindFaceWire = serde_json::from_value(value)?;

    Ok(DetectionResult {
        image_id: wire.imageid,
        face_count: wire.nfaces,
        processing_time: wire.ptime,
        width: wire.sx,
        height: wire.sy,
    })
}

/// Decode a `whoissim` response. `language` is the language the lookup was
/// requested in.
pub fn decode_whois(response: &RawResponse, language: Language) -> PictrievResult<IdentityResult> {
    let value = parse_checked(Command::Whois, response)?;
    let wire: WhoisWire = serde_json::from_value(value)?;

    let attributes = wire
        .attrs
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, tuple)| attribute_from_tuple(i, tuple))
        .collect::<PictrievResult<Vec<_>>>()?;

    Ok(IdentityResult {
        age: wire.age,
        age_distribution: wire.agedist.unwrap_or_default(),
        attributes,
        gender: gender_from_tuple(&wire.gender)?,
        language,
    })
}

/// Status check, JSON parse and fault detection.
fn parse_checked(command: Command, response: &RawResponse) -> PictrievResult<Value> {
    if response.status != 200 {
        warn!(command = %command, status = response.status, "unexpected HTTP status");
        return Err(PictrievError::BadStatus(response.status));
    }

    let value: Value = serde_json::from_slice(&response.body)?;
    if !value.is_object() {
        return Err(PictrievError::malformed(format!(
            "{} response is not a JSON object",
            command
        )));
    }

    let envelope = Envelope::deserialize(&value)?;
    let result = envelope.result.unwrap_or_default();
    if result != RESULT_OK {
        let fault = ServiceFault::new(command, result, envelope.msg.unwrap_or_default());
        warn!(command = %command, result = %fault.result, "service fault: {}", fault);
        return Err(fault.into());
    }

    Ok(value)
}

/// `[_, probability, label, image_id]`; position 0 is unused.
fn attribute_from_tuple(index: usize, tuple: &[Value]) -> PictrievResult<Attribute> {
    if tuple.len() < 4 {
        return Err(PictrievError::malformed(format!(
            "attrs[{}] has {} elements, expected 4",
            index,
            tuple.len()
        )));
    }

    let probability = tuple[1].as_f64().ok_or_else(|| {
        PictrievError::malformed(format!("attrs[{}][1] is not a number", index))
    })?;
    let label = tuple[2].as_str().ok_or_else(|| {
        PictrievError::malformed(format!("attrs[{}][2] is not a string", index))
    })?;
    let image_id = integer_string(&tuple[3]).ok_or_else(|| {
        PictrievError::malformed(format!("attrs[{}][3] is not a number", index))
    })?;

    Ok(Attribute {
        probability,
        label: label.to_string(),
        image_id,
    })
}

/// `[label, probability]`.
fn gender_from_tuple(tuple: &[Value]) -> PictrievResult<Gender> {
    if tuple.len() < 2 {
        return Err(PictrievError::malformed(format!(
            "gender has {} elements, expected 2",
            tuple.len()
        )));
    }

    let label = tuple[0]
        .as_str()
        .ok_or_else(|| PictrievError::malformed("gender[0] is not a string"))?;
    let probability = tuple[1]
        .as_f64()
        .ok_or_else(|| PictrievError::malformed("gender[1] is not a number"))?;

    Ok(Gender::from_label(label, probability))
}

/// Decimal form of a JSON number, truncated toward zero. `None` if the
/// value is not a number or does not fit in an `i64`.
fn integer_string(value: &Value) -> Option<String> {
    if let Some(n) = value.as_i64() {
        return Some(n.to_string());
    }
    if let Some(n) = value.as_u64() {
        return Some(n.to_string());
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| (f.trunc() as i64).to_string())
}
