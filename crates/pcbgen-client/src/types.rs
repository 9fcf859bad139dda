use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Multipart field name the upload endpoint reads the board from.
pub const UPLOAD_FIELD: &str = "file2upload";

/// Body returned by every endpoint except `/downloadfile`.
///
/// A missing, `null`, `false` or `0` path reads as empty, which the
/// controller treats as "nothing to render".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResponse {
    #[serde(default, deserialize_with = "falsy_as_empty")]
    pub path: String,
}

fn falsy_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a path string, got {other}"
        ))),
    }
}

/// JSON body sent to `/completeboard`, `/renderboard` and `/downloadfile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNameRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,
}

impl FileNameRequest {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// Where the board server lives. An empty base means "same origin as the page".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base: String,
    pub send_file: String,
    pub generate_board: String,
    pub complete_board: String,
    pub render_board: String,
    pub download_file: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: String::new(),
            send_file: "/sendfile".to_string(),
            generate_board: "/generateboard".to_string(),
            complete_board: "/completeboard".to_string(),
            render_board: "/renderboard".to_string(),
            download_file: "/downloadfile".to_string(),
        }
    }
}

impl Endpoints {
    pub fn with_base(base: &str) -> Self {
        Self {
            base: base.to_string(),
            ..Self::default()
        }
    }

    pub fn url(&self, path: &str) -> String {
        if self.base.is_empty() {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }
}

/// Save-as name for a server path: everything after the last `/` or `\`.
pub fn download_file_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_request_uses_camel_case() {
        let json = serde_json::to_string(&FileNameRequest::new("a.brd")).unwrap();
        assert_eq!(json, r#"{"fileName":"a.brd"}"#);
    }

    #[test]
    fn path_response_ignores_extra_fields() {
        let r: PathResponse =
            serde_json::from_str(r#"{"path":"static/files/x.png","extra":1}"#).unwrap();
        assert_eq!(r.path, "static/files/x.png");
    }

    #[test]
    fn falsy_paths_read_as_empty() {
        for body in [r#"{}"#, r#"{"path":null}"#, r#"{"path":false}"#, r#"{"path":0}"#] {
            let r: PathResponse = serde_json::from_str(body).unwrap();
            assert_eq!(r.path, "", "{body}");
        }
    }

    #[test]
    fn non_string_path_is_rejected() {
        assert!(serde_json::from_str::<PathResponse>(r#"{"path":true}"#).is_err());
        assert!(serde_json::from_str::<PathResponse>(r#"{"path":[1]}"#).is_err());
    }

    #[test]
    fn url_join() {
        let e = Endpoints::default();
        assert_eq!(e.url(&e.render_board), "/renderboard");
        let e = Endpoints::with_base("http://localhost:5000/");
        assert_eq!(e.url(&e.send_file), "http://localhost:5000/sendfile");
    }

    #[test]
    fn download_name_strips_directories() {
        assert_eq!(download_file_name("static/files/abc.brd"), "abc.brd");
        assert_eq!(download_file_name(r"C:\tmp\files\abc.brd"), "abc.brd");
        assert_eq!(download_file_name("mixed/dir\\abc.brd"), "abc.brd");
        assert_eq!(download_file_name("abc.brd"), "abc.brd");
        assert_eq!(download_file_name("dir/"), "");
    }
}
