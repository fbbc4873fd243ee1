//! Request building: item parameters to verification requests.
//!
//! Resolution turns an item's parameters into a [`VerificationRequestSpec`],
//! one variant per verification mode, and each variant knows the single
//! [`OutboundRequest`] shape the API expects for it.

use crate::error::{Error, Result};
use crate::filter::FilterSpec;
use crate::item::{BinaryData, InputItem, Operation, Resource};
use serde_json::{json, Value};

/// Bank slip verification endpoint.
pub const VERIFY_PATH: &str = "/verify";

/// TrueMoney wallet verification endpoint.
pub const WALLET_VERIFY_PATH: &str = "/verify/truewallet";

/// A fully resolved verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationRequestSpec {
    /// Bank slip by QR payload.
    Payload {
        /// QR payload string.
        payload: String,
        /// Duplicate check flag.
        check_duplicate: bool,
        /// Receiver filters.
        filter: FilterSpec,
    },
    /// Bank slip by base64 image.
    Base64Image {
        /// Base64 image data.
        image: String,
        /// Duplicate check flag.
        check_duplicate: bool,
        /// Receiver filters.
        filter: FilterSpec,
    },
    /// Bank slip by image URL.
    ImageUrl {
        /// Image URL.
        url: String,
        /// Duplicate check flag.
        check_duplicate: bool,
        /// Receiver filters.
        filter: FilterSpec,
    },
    /// Bank slip by uploaded image.
    ImageBinary {
        /// Binary property the image came from.
        property: String,
        /// The image.
        file: BinaryData,
        /// Duplicate check flag.
        check_duplicate: bool,
        /// Receiver filters.
        filter: FilterSpec,
    },
    /// TrueMoney wallet slip by uploaded image. Never filtered.
    WalletImageBinary {
        /// Binary property the image came from.
        property: String,
        /// The image.
        file: BinaryData,
        /// Duplicate check flag.
        check_duplicate: bool,
    },
}

impl VerificationRequestSpec {
    /// Resolve an input item into a request.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedOperation`] for a resource/operation pair the
    ///   API does not offer
    /// - [`Error::MissingParameter`] when the mode's string input is absent
    /// - [`Error::MissingBinaryData`] when an image mode's attachment is absent
    pub fn resolve(item: &InputItem) -> Result<Self> {
        let params = &item.parameters;
        let check_duplicate = params.check_duplicate;

        match (params.resource, params.operation()) {
            (Resource::BankSlip, operation) => {
                let filter = FilterSpec::from_options(&params.additional_options);
                match operation {
                    Operation::VerifyByPayload => Ok(Self::Payload {
                        payload: required(params.payload.as_ref(), "payload")?,
                        check_duplicate,
                        filter,
                    }),
                    Operation::VerifyByBase64 => Ok(Self::Base64Image {
                        image: required(params.image_data.as_ref(), "imageData")?,
                        check_duplicate,
                        filter,
                    }),
                    Operation::VerifyByUrl => Ok(Self::ImageUrl {
                        url: required(params.image_url.as_ref(), "imageUrl")?,
                        check_duplicate,
                        filter,
                    }),
                    Operation::VerifyByImage => {
                        let property = params.image_binary_property.clone();
                        let file = attachment(item, &property)?;
                        Ok(Self::ImageBinary {
                            property,
                            file,
                            check_duplicate,
                            filter,
                        })
                    }
                }
            }
            (Resource::TruemoneyWallet, Operation::VerifyByImage) => {
                let property = params.image_binary_property.clone();
                let file = attachment(item, &property)?;
                Ok(Self::WalletImageBinary {
                    property,
                    file,
                    check_duplicate,
                })
            }
            (resource, operation) => Err(Error::UnsupportedOperation {
                resource: resource.to_string(),
                operation: operation.to_string(),
            }),
        }
    }

    /// Receiver filters; `None` for wallet slips.
    #[must_use]
    pub fn filter(&self) -> Option<&FilterSpec> {
        match self {
            Self::Payload { filter, .. }
            | Self::Base64Image { filter, .. }
            | Self::ImageUrl { filter, .. }
            | Self::ImageBinary { filter, .. } => Some(filter),
            Self::WalletImageBinary { .. } => None,
        }
    }

    /// Duplicate check flag.
    #[must_use]
    pub fn check_duplicate(&self) -> bool {
        match self {
            Self::Payload { check_duplicate, .. }
            | Self::Base64Image { check_duplicate, .. }
            | Self::ImageUrl { check_duplicate, .. }
            | Self::ImageBinary { check_duplicate, .. }
            | Self::WalletImageBinary { check_duplicate, .. } => *check_duplicate,
        }
    }

    /// Uploaded attachment and its property name, for image modes.
    #[must_use]
    pub fn attachment(&self) -> Option<(&str, &BinaryData)> {
        match self {
            Self::ImageBinary { property, file, .. }
            | Self::WalletImageBinary { property, file, .. } => Some((property.as_str(), file)),
            _ => None,
        }
    }

    /// Build the HTTP request for this mode.
    #[must_use]
    pub fn to_request(&self) -> OutboundRequest {
        match self {
            Self::Payload {
                payload,
                check_duplicate,
                ..
            } => OutboundRequest {
                method: Method::Get,
                path: VERIFY_PATH,
                query: vec![
                    ("payload".to_string(), payload.clone()),
                    ("checkDuplicate".to_string(), check_duplicate.to_string()),
                ],
                body: RequestBody::Empty,
            },
            Self::Base64Image {
                image,
                check_duplicate,
                ..
            } => OutboundRequest::post_json(
                VERIFY_PATH,
                json!({ "image": image, "checkDuplicate": check_duplicate }),
            ),
            Self::ImageUrl {
                url,
                check_duplicate,
                ..
            } => OutboundRequest::post_json(
                VERIFY_PATH,
                json!({ "url": url, "checkDuplicate": check_duplicate }),
            ),
            Self::ImageBinary {
                file,
                check_duplicate,
                ..
            } => OutboundRequest::post_multipart(
                VERIFY_PATH,
                file,
                Some(check_duplicate.to_string()),
            ),
            // The wallet endpoint only accepts checkDuplicate when it is set.
            Self::WalletImageBinary {
                file,
                check_duplicate,
                ..
            } => OutboundRequest::post_multipart(
                WALLET_VERIFY_PATH,
                file,
                check_duplicate.then(|| true.to_string()),
            ),
        }
    }
}

fn required(value: Option<&String>, name: &'static str) -> Result<String> {
    value.cloned().ok_or(Error::MissingParameter { name })
}

fn attachment(item: &InputItem, property: &str) -> Result<BinaryData> {
    item.binary
        .get(property)
        .cloned()
        .ok_or_else(|| Error::MissingBinaryData {
            property: property.to_string(),
        })
}

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

impl Method {
    /// Method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// `application/json` body.
    Json(Value),
    /// `multipart/form-data` body.
    Multipart(MultipartForm),
}

/// Multipart upload of one slip image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    /// The `file` part.
    pub file: BinaryData,
    /// Text parts, in order.
    pub fields: Vec<(String, String)>,
}

impl MultipartForm {
    /// Value of a text part.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Transport-neutral description of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API base URL.
    pub path: &'static str,
    /// Query parameters, unencoded.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

impl OutboundRequest {
    fn post_json(path: &'static str, body: Value) -> Self {
        Self {
            method: Method::Post,
            path,
            query: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    fn post_multipart(path: &'static str, file: &BinaryData, check_duplicate: Option<String>) -> Self {
        let fields = check_duplicate
            .map(|value| vec![("checkDuplicate".to_string(), value)])
            .unwrap_or_default();
        Self {
            method: Method::Post,
            path,
            query: Vec::new(),
            body: RequestBody::Multipart(MultipartForm {
                file: file.clone(),
                fields,
            }),
        }
    }

    /// Absolute URL for this request under `base_url`, query included.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined URL does not parse.
    pub fn url(&self, base_url: &str) -> Result<reqwest::Url> {
        let joined = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        let mut url = reqwest::Url::parse(&joined)
            .map_err(|e| Error::InvalidRequest(format!("bad URL {joined}: {e}")))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}
