use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
    http::Request,
};

const BOUNDARY: &str = "MY_BOUNDARY123456789";

enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Builds the body of a `multipart/form-data` request like the filter form sends.
///
/// Files are always sent in the `files` field.
#[derive(Default)]
pub(crate) struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(Part::Text {
            name: name.to_owned(),
            value: value.to_owned(),
        });
        self
    }

    pub(crate) fn file(mut self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(Part::File {
            file_name: file_name.to_owned(),
            content_type: content_type.to_owned(),
            bytes,
        });
        self
    }

    pub(crate) fn csv(self, file_name: &str, contents: &str) -> Self {
        self.file(file_name, "text/csv", contents.as_bytes().to_vec())
    }

    pub(crate) fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        let mut body = Vec::new();

        for part in self.parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());

            match part {
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\n\
                            Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&bytes);
                }
            }

            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    pub(crate) fn into_request(self, uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", Self::content_type())
            .body(self.into_bytes().into())
            .unwrap()
    }

    pub(crate) async fn into_multipart(self) -> Multipart {
        Multipart::from_request(self.into_request("/"), &{})
            .await
            .unwrap()
    }
}
