use std::fmt;

/// Maximum product images per listing, existing plus new.
pub const MAX_PRODUCT_IMAGES: usize = 3;

/// Size limit for any single product image or receipt (1 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 1024 * 1024;

/// Bucket holding product images and payment receipts.
pub const ASSETS_BUCKET: &str = "business-assets";

/// File picker filter for product images.
pub const PRODUCT_IMAGE_ACCEPT: &str = "image/*";

/// File picker filter for payment receipts.
pub const RECEIPT_ACCEPT: &str = "image/*,.pdf";

/// Whether `content_type` may be stored under `key`: images for product
/// keys, images or PDF for receipt keys.
pub fn content_type_allowed(key: &str, content_type: &str) -> bool {
    let is_image = content_type.starts_with("image/");
    if key.starts_with("products/") {
        is_image
    } else if key.starts_with("receipts/") {
        is_image || content_type == "application/pdf"
    } else {
        false
    }
}

/// The browser-reported content type, or one inferred from the file
/// extension when the browser reported none.
pub fn content_type_for(file_name: &str, reported: Option<&str>) -> String {
    if let Some(ct) = reported.filter(|ct| !ct.is_empty()) {
        return ct.to_string();
    }
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// File name as a single key segment.
fn key_segment(file_name: &str) -> String {
    file_name.replace(['/', '\\'], "_")
}

/// Object key for the `index`-th product image of a submission.
pub fn product_image_key(user_id: &str, timestamp_ms: i64, index: usize, file_name: &str) -> String {
    format!(
        "products/{user_id}/{timestamp_ms}_{index}_{}",
        key_segment(file_name)
    )
}

/// Object key for a payment receipt.
pub fn receipt_key(user_id: &str, timestamp_ms: i64, file_name: &str) -> String {
    format!("receipts/{user_id}/{timestamp_ms}_{}", key_segment(file_name))
}

/// Whether `key` lives under one of the caller's own upload prefixes.
pub fn key_owned_by(key: &str, user_id: &str) -> bool {
    let owned = |prefix: &str| {
        key.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(user_id))
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|name| !matches!(name, "" | "." | "..") && !name.contains('/'))
    };
    owned("products/") || owned("receipts/")
}

/// A file picked in the browser, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Why a file selection was refused. Prior state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    TooManyImages { remaining: usize, existing: usize },
    ImagesTooLarge { count: usize },
    ReceiptTooLarge,
}

impl UploadRejection {
    /// Short toast title.
    pub fn title(&self) -> &'static str {
        match self {
            UploadRejection::TooManyImages { .. } => "Too Many Files",
            UploadRejection::ImagesTooLarge { .. } => "Files Too Large",
            UploadRejection::ReceiptTooLarge => "File Too Large",
        }
    }
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::TooManyImages {
                remaining,
                existing,
            } => write!(
                f,
                "You can only add {remaining} more image(s). You already have {existing} existing image(s)."
            ),
            UploadRejection::ImagesTooLarge { count } => write!(
                f,
                "Each product image must be smaller than 1MB. {count} file(s) exceed this limit."
            ),
            UploadRejection::ReceiptTooLarge => write!(
                f,
                "Receipt file must be smaller than 1MB. Please choose a smaller file."
            ),
        }
    }
}

impl std::error::Error for UploadRejection {}

/// Check a product image batch given the sizes of the newly picked files.
/// The count check runs before the size check.
pub fn validate_product_images(existing: usize, sizes: &[u64]) -> Result<(), UploadRejection> {
    let remaining = MAX_PRODUCT_IMAGES.saturating_sub(existing);
    if sizes.len() > remaining {
        return Err(UploadRejection::TooManyImages {
            remaining,
            existing,
        });
    }

    let oversized = sizes.iter().filter(|&&s| s > MAX_UPLOAD_BYTES).count();
    if oversized > 0 {
        return Err(UploadRejection::ImagesTooLarge { count: oversized });
    }

    Ok(())
}

pub fn validate_receipt(size: u64) -> Result<(), UploadRejection> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::ReceiptTooLarge);
    }
    Ok(())
}

/// Product images (already-stored URLs plus pending files) and the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadSet {
    existing_images: Vec<String>,
    new_images: Vec<SelectedFile>,
    receipt: Option<SelectedFile>,
}

impl UploadSet {
    /// Start from the image URLs of the listing being edited.
    pub fn with_existing(urls: Vec<String>) -> Self {
        Self {
            existing_images: urls,
            ..Self::default()
        }
    }

    pub fn existing_images(&self) -> &[String] {
        &self.existing_images
    }

    pub fn new_images(&self) -> &[SelectedFile] {
        &self.new_images
    }

    pub fn receipt(&self) -> Option<&SelectedFile> {
        self.receipt.as_ref()
    }

    /// Slots left for a new batch.
    pub fn remaining_slots(&self) -> usize {
        MAX_PRODUCT_IMAGES.saturating_sub(self.existing_images.len())
    }

    /// Replace the pending batch with `files`, or reject the whole batch.
    pub fn accept_product_images(&mut self, files: Vec<SelectedFile>) -> Result<(), UploadRejection> {
        let sizes: Vec<u64> = files.iter().map(SelectedFile::size).collect();
        validate_product_images(self.existing_images.len(), &sizes)?;
        self.new_images = files;
        Ok(())
    }

    pub fn accept_receipt(&mut self, file: SelectedFile) -> Result<(), UploadRejection> {
        validate_receipt(file.size())?;
        self.receipt = Some(file);
        Ok(())
    }

    pub fn remove_existing(&mut self, url: &str) {
        self.existing_images.retain(|u| u != url);
    }

    pub fn remove_new(&mut self, index: usize) {
        if index < self.new_images.len() {
            self.new_images.remove(index);
        }
    }
}
