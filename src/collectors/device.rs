//! Device model detection

use crate::error::{OverlayError, Result};
use std::process::Command;
use tracing::debug;

/// The platform model string, e.g. `"samsung SCV31"`.
///
/// An explicit override wins. Otherwise Android's property store is asked for
/// manufacturer and model; anything else yields an empty string.
pub fn detect_device_model(override_model: Option<&str>) -> String {
    if let Some(model) = override_model {
        return model.to_string();
    }

    match read_android_model() {
        Ok(model) => model,
        Err(err) => {
            debug!("Device model not detected: {}", err);
            String::new()
        }
    }
}

fn read_android_model() -> Result<String> {
    let manufacturer = getprop("ro.product.manufacturer")?;
    let model = getprop("ro.product.model")?;
    Ok(format!("{} {}", manufacturer, model))
}

/// Read one Android system property.
/// A missing `getprop` binary surfaces as `Io(NotFound)`; an unset property as `Detection`.
fn getprop(key: &str) -> Result<String> {
    let output = Command::new("getprop").arg(key).output()?;

    if !output.status.success() {
        return Err(OverlayError::Detection(format!(
            "getprop {} failed with exit code: {:?}",
            key,
            output.status.code()
        )));
    }

    property_value(key, &output.stdout)
}

fn property_value(key: &str, stdout: &[u8]) -> Result<String> {
    let value = String::from_utf8_lossy(stdout).trim().to_string();
    if value.is_empty() {
        Err(OverlayError::Detection(format!("property {} is not set", key)))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        assert_eq!(detect_device_model(Some("samsung SCV33")), "samsung SCV33");
    }

    #[test]
    fn property_output_is_trimmed() {
        assert_eq!(property_value("ro.product.model", b"SCV31\n").unwrap(), "SCV31");
    }

    #[test]
    fn empty_property_is_a_detection_error() {
        let err = property_value("ro.product.model", b" \n").unwrap_err();
        assert!(matches!(err, OverlayError::Detection(_)));
    }
}
