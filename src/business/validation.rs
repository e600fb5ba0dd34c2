use crate::domain::Manifest;

/// Scan validation failures
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyCode,
    AlreadyScanned(String),
    PickupMismatch { expected: String, found: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyCode => write!(f, "Scanned code is empty"),
            ValidationError::AlreadyScanned(_) => {
                write!(f, "Package already added in this manifest")
            }
            ValidationError::PickupMismatch { .. } => write!(
                f,
                "Barcode belongs to a different pickup provider. Cannot add to the manifest."
            ),
        }
    }
}

/// Trim scanner noise off a scanned code
pub fn normalize_scan_code(raw: &str) -> Result<&str, ValidationError> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(ValidationError::EmptyCode);
    }
    Ok(code)
}

/// Reject codes whose AWB number is already on the manifest
pub fn ensure_not_scanned(manifest: &Manifest, code: &str) -> Result<(), ValidationError> {
    if manifest.contains_awb(code) {
        return Err(ValidationError::AlreadyScanned(code.to_string()));
    }
    Ok(())
}

/// Compare a fetched pickup id with the one the manifest is bound to.
///
/// Returns the pickup id the manifest should carry after accepting the scan.
pub fn reconcile_pickup(current: Option<&str>, fetched: &str) -> Result<String, ValidationError> {
    match current {
        Some(expected) if !expected.is_empty() && expected != fetched => {
            Err(ValidationError::PickupMismatch {
                expected: expected.to_string(),
                found: fetched.to_string(),
            })
        }
        _ => Ok(fetched.to_string()),
    }
}
