use argus_core::Metric;
use eyre::{bail, WrapErr};
use serde_json::Value;

/// Decodes a metrics document: either a JSON array of metrics or an object
/// carrying them under `metrics`. A `null` or missing `metrics` field decodes
/// to `None`.
pub fn decode(raw: &[u8]) -> eyre::Result<Option<Vec<Metric>>> {
    let document: Value = serde_json::from_slice(raw).wrap_err("Invalid JSON")?;

    let metrics = match document {
        Value::Array(_) => document,
        Value::Object(mut fields) => match fields.remove("metrics") {
            None | Some(Value::Null) => return Ok(None),
            Some(metrics) => metrics,
        },
        Value::Null => return Ok(None),
        other => bail!(
            "Expecting a list of metrics or an object with a 'metrics' field, got: {}",
            other
        ),
    };

    let metrics = serde_json::from_value(metrics).wrap_err("Invalid metrics")?;

    Ok(Some(metrics))
}

pub fn encode(metrics: &[Metric], pretty: bool) -> eyre::Result<Vec<u8>> {
    let mut out = if pretty {
        serde_json::to_vec_pretty(metrics)
    } else {
        serde_json::to_vec(metrics)
    }
    .wrap_err("Error when serializing metrics")?;

    out.push(b'\n');

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_and_object() {
        let list = decode(br#"[{"scope":"s","metric":"m","tags":{"host":"h1"}}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].tag("host"), Some("h1"));

        let object = decode(br#"{"metrics":[{"scope":"s","metric":"m"},{"scope":"s","metric":"n"}]}"#)
            .unwrap()
            .unwrap();
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_decode_absent_metrics() {
        assert!(decode(br#"{"metrics":null}"#).unwrap().is_none());
        assert!(decode(br#"{}"#).unwrap().is_none());
        assert!(decode(b"null").unwrap().is_none());
    }

    #[test]
    fn test_decode_rejects_invalid_metrics() {
        assert!(decode(br#"[{"scope":"","metric":"m"}]"#).is_err());
        assert!(decode(br#"[{"scope":"s","metric":"m","tags":{"displayName":"x"}}]"#).is_err());
        assert!(decode(b"42").is_err());
        assert!(decode(b"not json").is_err());
    }

    #[test]
    fn test_encode_round_trips_display_name() {
        let mut metric = Metric::new("s", "m").unwrap();
        metric.set_display_name("h1,us");

        let out = encode(&[metric], false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(r#""displayName":"h1,us""#));
        assert!(text.ends_with('\n'));
    }
}
