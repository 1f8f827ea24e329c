/// A file received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Lowercased extension of the client file name.
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    /// Client file name reduced to a safe single path segment.
    pub fn safe_name(&self) -> String {
        let base = std::path::Path::new(&self.file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file");

        base.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}
