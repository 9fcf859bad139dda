use crate::error::ApiError;
use crate::types::{FileNameRequest, PathResponse};

/// One async call per board-server endpoint.
///
/// Implementations only move bytes; session bookkeeping and the UI policy on
/// failure belong to [`crate::Controller`].
#[allow(async_fn_in_trait)]
pub trait BoardApi {
    /// Whatever the drop target hands us (a browser `File` on the web).
    type File;

    /// `POST /sendfile` as multipart form data.
    async fn send_file(&self, file: &Self::File) -> Result<PathResponse, ApiError>;

    /// `GET /generateboard`.
    async fn generate_board(&self) -> Result<PathResponse, ApiError>;

    /// `POST /completeboard`.
    async fn complete_board(&self, req: &FileNameRequest) -> Result<PathResponse, ApiError>;

    /// `POST /renderboard`. The returned path points at an image.
    async fn render_board(&self, req: &FileNameRequest) -> Result<PathResponse, ApiError>;

    /// `POST /downloadfile`, returning the raw file contents.
    async fn download_file(&self, req: &FileNameRequest) -> Result<Vec<u8>, ApiError>;
}

/// Turn a finished HTTP exchange into a [`PathResponse`].
///
/// Non-2xx statuses keep the body text so it can be shown as-is.
pub fn decode_path_response(status: u16, body: &str) -> Result<PathResponse, ApiError> {
    check_status(status, body)?;
    Ok(serde_json::from_str(body)?)
}

pub fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status {
            status,
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success() {
        let r = decode_path_response(200, r#"{"path":"x.brd"}"#).unwrap();
        assert_eq!(r.path, "x.brd");
    }

    #[test]
    fn keeps_error_body() {
        let err = decode_path_response(500, "Error in generating a board").unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                body: "Error in generating a board".into()
            }
        );
    }

    #[test]
    fn garbage_is_decode_error() {
        let err = decode_path_response(200, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
