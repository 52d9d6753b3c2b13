//! Request descriptors produced by command actions.

use std::fmt;

use arbor_proto::Request;

/// HTTP method plus whether a JSON body is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET` without body.
    Get,
    /// `POST` with body.
    PostBody,
    /// `PUT` with body.
    PutBody,
    /// `PATCH` with body.
    PatchBody,
    /// `DELETE` without body.
    Delete,
    /// `DELETE` with body.
    DeleteBody,
}

impl Method {
    /// Whether the method carries a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        !matches!(self, Self::Get | Self::Delete)
    }

    /// HTTP verb.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::PostBody => "POST",
            Self::PutBody => "PUT",
            Self::PatchBody => "PATCH",
            Self::Delete | Self::DeleteBody => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// How the server result is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One line per entity.
    List,
    /// Details of a single entity.
    Show,
    /// Indented object tree.
    Tree,
    /// Status line for a state-changing command.
    Command,
}

/// Everything the transport needs to run one command.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path below the API base URL.
    pub path: String,
    /// JSON body, for methods that carry one.
    pub body: Option<Request>,
    /// Presentation of the result.
    pub render: RenderMode,
}

impl RequestDescriptor {
    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>, render: RenderMode) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
            render,
        }
    }

    /// `DELETE path` without body.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
            render: RenderMode::Command,
        }
    }

    /// State-changing request carrying `body`.
    #[must_use]
    pub fn with_body(method: Method, path: impl Into<String>, body: Request) -> Self {
        Self {
            method,
            path: path.into(),
            body: Some(body),
            render: RenderMode::Command,
        }
    }

    /// `POST path` with `body`.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Request) -> Self {
        Self::with_body(Method::PostBody, path, body)
    }
}

/// Query-escape a human name for use as a path segment.
#[must_use]
pub fn escape(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}
