use bytes::Bytes;

/// Audio payload as received from the client.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioUpload {
    pub filename: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl AudioUpload {
    /// Keeps the declared MIME type when it is specific, otherwise guesses
    /// one from the filename extension.
    pub fn new(filename: impl Into<String>, declared_mime: Option<&str>, data: Bytes) -> Self {
        let mut upload = Self {
            filename: filename.into(),
            mime_type: String::new(),
            data,
        };
        upload.mime_type = match declared_mime {
            Some(mime) if !mime.is_empty() && mime != "application/octet-stream" => {
                mime.to_string()
            }
            _ => mime_from_extension(upload.extension().as_deref()).to_string(),
        };
        upload
    }

    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

fn mime_from_extension(extension: Option<&str>) -> &'static str {
    match extension.unwrap_or_default() {
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "mp4" => "video/mp4",
        "oga" | "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}
