//! Binary payloads and the context-dependent "is this file-like?" check used
//! before an upload. Which representation counts as file-like depends on the
//! side the check runs on, which callers pass in explicitly.

use std::fmt::Display;

use crate::args::ArgValue;
use crate::error::{IssueKind, IssuePath, ValidationError};
use crate::types::Type;

/// The environment a binary check runs in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
    /// server side: only raw byte buffers are file-like
    #[default]
    Server,
    /// client side: only platform file handles are file-like
    Client,
}

impl ExecutionContext {
    pub fn expected_kind(&self) -> BinaryKind {
        match self {
            ExecutionContext::Server => BinaryKind::Buffer,
            ExecutionContext::Client => BinaryKind::FileHandle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryKind {
    Buffer,
    FileHandle,
}

impl Display for BinaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryKind::Buffer => f.write_str("a byte buffer"),
            BinaryKind::FileHandle => f.write_str("a file handle"),
        }
    }
}

/// A named blob of bytes, the client-side notion of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        FileHandle {
            name: name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryPayload {
    Buffer(Vec<u8>),
    File(FileHandle),
}

impl BinaryPayload {
    pub fn kind(&self) -> BinaryKind {
        match self {
            BinaryPayload::Buffer(_) => BinaryKind::Buffer,
            BinaryPayload::File(_) => BinaryKind::FileHandle,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            BinaryPayload::Buffer(b) => b,
            BinaryPayload::File(f) => f.data(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            BinaryPayload::Buffer(b) => b,
            BinaryPayload::File(f) => f.data,
        }
    }

    /// media type to announce when sending; buffers carry none of their own
    pub fn content_type(&self) -> &str {
        match self {
            BinaryPayload::File(FileHandle {
                content_type: Some(ct),
                ..
            }) => ct,
            _ => "application/octet-stream",
        }
    }
}

impl From<Vec<u8>> for BinaryPayload {
    fn from(bytes: Vec<u8>) -> Self {
        BinaryPayload::Buffer(bytes)
    }
}

impl From<FileHandle> for BinaryPayload {
    fn from(file: FileHandle) -> Self {
        BinaryPayload::File(file)
    }
}

/// Returns the payload unchanged if it is file-like in the given context,
/// fails naming the expected kind otherwise. Structured data is never file-like.
pub fn check_is_file_like(
    ctx: ExecutionContext,
    value: ArgValue,
) -> Result<BinaryPayload, ValidationError> {
    check_at(ctx, value, &IssuePath::root())
}

pub(crate) fn check_at(
    ctx: ExecutionContext,
    value: ArgValue,
    path: &IssuePath,
) -> Result<BinaryPayload, ValidationError> {
    let expected = ctx.expected_kind();
    let received = match value {
        ArgValue::Binary(payload) if payload.kind() == expected => return Ok(payload),
        ArgValue::Binary(payload) => payload.kind().to_string(),
        ArgValue::Json(json) => Type::of(&json).to_string(),
    };
    log::debug!("rejecting upload payload in {ctx:?} context: {received}");
    Err(ValidationError::single(
        path.clone(),
        IssueKind::NotFileLike { expected, received },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_accepts_buffer() {
        let payload = check_is_file_like(
            ExecutionContext::Server,
            ArgValue::Binary(BinaryPayload::Buffer(vec![0x89, b'P', b'N', b'G'])),
        )
        .unwrap();
        assert_eq!(payload.bytes(), &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_server_rejects_plain_object() {
        let e = check_is_file_like(ExecutionContext::Server, ArgValue::Json(json!({})))
            .unwrap_err();
        assert_eq!(e.issues().len(), 1);
        assert_eq!(
            e.issues()[0].kind,
            IssueKind::NotFileLike {
                expected: BinaryKind::Buffer,
                received: "object".to_string()
            }
        );
        assert!(e.to_string().contains("data is not a byte buffer"));
    }

    #[test]
    fn test_client_accepts_file_handle() {
        let file = FileHandle::new("filename", vec![1, 2, 3]).with_content_type("image/png");
        let payload = check_is_file_like(
            ExecutionContext::Client,
            ArgValue::Binary(BinaryPayload::File(file.clone())),
        )
        .unwrap();
        assert_eq!(payload, BinaryPayload::File(file));
        assert_eq!(payload.content_type(), "image/png");
        let BinaryPayload::File(handle) = &payload else {
            panic!("expected a file handle");
        };
        assert_eq!(handle.name(), "filename");
        assert_eq!(handle.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_context_mismatch_is_rejected() {
        let e = check_is_file_like(
            ExecutionContext::Client,
            ArgValue::Binary(BinaryPayload::Buffer(vec![1])),
        )
        .unwrap_err();
        assert!(e.to_string().contains("data is not a file handle, received a byte buffer"));

        let e = check_is_file_like(
            ExecutionContext::Server,
            ArgValue::Binary(BinaryPayload::File(FileHandle::new("f", vec![]))),
        )
        .unwrap_err();
        assert!(e.to_string().contains("data is not a byte buffer, received a file handle"));
    }
}
