//! Input items and their resolved per-item parameters.
//!
//! Parameter names follow the host's camelCase naming so items can be
//! deserialized straight from workflow JSON.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// File name sent with uploads whose attachment has none.
pub const DEFAULT_UPLOAD_FILE_NAME: &str = "slip.jpg";

/// Content type sent with uploads whose attachment declares none.
pub const DEFAULT_UPLOAD_MIME_TYPE: &str = "image/jpeg";

/// Binary property read by the image operations unless overridden.
pub const DEFAULT_BINARY_PROPERTY: &str = "data";

/// Kind of slip being verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    /// Bank transfer slip.
    #[default]
    BankSlip,
    /// TrueMoney wallet transfer slip.
    TruemoneyWallet,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BankSlip => write!(f, "bankSlip"),
            Self::TruemoneyWallet => write!(f, "truemoneyWallet"),
        }
    }
}

/// How the slip is handed to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// QR payload string read from the slip.
    VerifyByPayload,
    /// Uploaded image binary.
    VerifyByImage,
    /// Base64-encoded image.
    VerifyByBase64,
    /// Publicly reachable image URL.
    VerifyByUrl,
}

impl Operation {
    /// Operation used when an item names none for `resource`.
    #[must_use]
    pub fn default_for(resource: Resource) -> Self {
        match resource {
            Resource::BankSlip => Self::VerifyByPayload,
            Resource::TruemoneyWallet => Self::VerifyByImage,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerifyByPayload => write!(f, "verifyByPayload"),
            Self::VerifyByImage => write!(f, "verifyByImage"),
            Self::VerifyByBase64 => write!(f, "verifyByBase64"),
            Self::VerifyByUrl => write!(f, "verifyByUrl"),
        }
    }
}

/// Optional filtering and diagnostics settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalOptions {
    /// Receiver bank code or abbreviation; empty means all banks.
    #[serde(default)]
    pub receiver_bank_code: Option<String>,

    /// Receiver name substring; empty means no name filter.
    #[serde(default)]
    pub receiver_name: Option<String>,

    /// Emit per-item debug events.
    #[serde(default)]
    pub enable_debug_logging: bool,
}

impl AdditionalOptions {
    /// Configured bank filter, if non-empty.
    #[must_use]
    pub fn bank_code(&self) -> Option<&str> {
        non_empty(self.receiver_bank_code.as_deref())
    }

    /// Configured name filter, if non-empty.
    ///
    /// A whitespace-only name still counts as set: it matches any slip that
    /// carries a receiver name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(self.receiver_name.as_deref())
    }

    /// Whether either filter field is set.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.bank_code().is_some() || self.name().is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Resolved parameter set for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemParameters {
    /// Resource to verify.
    #[serde(default)]
    pub resource: Resource,

    /// Operation; defaults per resource when absent.
    #[serde(default)]
    pub operation: Option<Operation>,

    /// QR payload for `verifyByPayload`.
    #[serde(default)]
    pub payload: Option<String>,

    /// Base64 image for `verifyByBase64`.
    #[serde(default)]
    pub image_data: Option<String>,

    /// Image URL for `verifyByUrl`.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Binary property holding the image for `verifyByImage`.
    #[serde(default = "default_binary_property")]
    pub image_binary_property: String,

    /// Ask the API to flag slips it has already verified.
    #[serde(default)]
    pub check_duplicate: bool,

    /// Filters and debug switch.
    #[serde(default)]
    pub additional_options: AdditionalOptions,
}

fn default_binary_property() -> String {
    DEFAULT_BINARY_PROPERTY.to_string()
}

impl ItemParameters {
    fn with_operation(resource: Resource, operation: Operation) -> Self {
        Self {
            resource,
            operation: Some(operation),
            payload: None,
            image_data: None,
            image_url: None,
            image_binary_property: default_binary_property(),
            check_duplicate: false,
            additional_options: AdditionalOptions::default(),
        }
    }

    /// Bank slip verification by QR payload.
    #[must_use]
    pub fn payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::with_operation(Resource::BankSlip, Operation::VerifyByPayload)
        }
    }

    /// Bank slip verification by base64 image.
    #[must_use]
    pub fn base64(image_data: impl Into<String>) -> Self {
        Self {
            image_data: Some(image_data.into()),
            ..Self::with_operation(Resource::BankSlip, Operation::VerifyByBase64)
        }
    }

    /// Bank slip verification by image URL.
    #[must_use]
    pub fn url(image_url: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
            ..Self::with_operation(Resource::BankSlip, Operation::VerifyByUrl)
        }
    }

    /// Bank slip verification by uploaded image.
    #[must_use]
    pub fn image(binary_property: impl Into<String>) -> Self {
        Self {
            image_binary_property: binary_property.into(),
            ..Self::with_operation(Resource::BankSlip, Operation::VerifyByImage)
        }
    }

    /// TrueMoney wallet verification by uploaded image.
    #[must_use]
    pub fn wallet_image(binary_property: impl Into<String>) -> Self {
        Self {
            image_binary_property: binary_property.into(),
            ..Self::with_operation(Resource::TruemoneyWallet, Operation::VerifyByImage)
        }
    }

    /// Set the duplicate check flag.
    #[must_use]
    pub fn with_check_duplicate(mut self, check_duplicate: bool) -> Self {
        self.check_duplicate = check_duplicate;
        self
    }

    /// Filter on receiver bank.
    #[must_use]
    pub fn with_receiver_bank(mut self, code: impl Into<String>) -> Self {
        self.additional_options.receiver_bank_code = Some(code.into());
        self
    }

    /// Filter on receiver name substring.
    #[must_use]
    pub fn with_receiver_name(mut self, name: impl Into<String>) -> Self {
        self.additional_options.receiver_name = Some(name.into());
        self
    }

    /// Toggle per-item debug events.
    #[must_use]
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.additional_options.enable_debug_logging = enabled;
        self
    }

    /// Effective operation.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
            .unwrap_or_else(|| Operation::default_for(self.resource))
    }

    /// Whether this item asks for receiver filtering.
    ///
    /// Filters only apply to bank slips.
    #[must_use]
    pub fn requests_filtering(&self) -> bool {
        self.resource == Resource::BankSlip && self.additional_options.has_filters()
    }

    /// Whether debug events are enabled for this item.
    #[must_use]
    pub fn debug_logging(&self) -> bool {
        self.additional_options.enable_debug_logging
    }
}

/// An image attachment carried by an input item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryData {
    /// Raw file contents.
    pub data: Bytes,
    /// Declared file name.
    pub file_name: Option<String>,
    /// Declared MIME type.
    pub mime_type: Option<String>,
}

impl BinaryData {
    /// Attachment with no declared name or type.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            file_name: None,
            mime_type: None,
        }
    }

    /// Set the declared file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the declared MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// File name to upload under.
    #[must_use]
    pub fn upload_file_name(&self) -> &str {
        self.file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_FILE_NAME)
    }

    /// Content type to upload with.
    #[must_use]
    pub fn upload_mime_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_MIME_TYPE)
    }
}

/// One item flowing through a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    /// Resolved parameters.
    pub parameters: ItemParameters,
    /// Named binary attachments.
    pub binary: HashMap<String, BinaryData>,
}

impl InputItem {
    /// Item without attachments.
    #[must_use]
    pub fn new(parameters: ItemParameters) -> Self {
        Self {
            parameters,
            binary: HashMap::new(),
        }
    }

    /// Attach a binary under `property`.
    #[must_use]
    pub fn with_binary(mut self, property: impl Into<String>, binary: BinaryData) -> Self {
        self.binary.insert(property.into(), binary);
        self
    }
}
