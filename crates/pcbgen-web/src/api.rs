use gloo::net::http::{Request, Response};
use pcbgen_client::api::{check_status, decode_path_response};
use pcbgen_client::types::UPLOAD_FIELD;
use pcbgen_client::{ApiError, BoardApi, Endpoints, FileNameRequest, PathResponse};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

/// Talks to the board server with `fetch`.
pub struct HttpApi {
    endpoints: Endpoints,
}

impl HttpApi {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    async fn post_json(&self, path: &str, req: &FileNameRequest) -> Result<Response, ApiError> {
        Request::post(&self.endpoints.url(path))
            .json(req)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)
    }
}

fn transport(e: gloo::net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

fn js_error(e: JsValue) -> ApiError {
    ApiError::Transport(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

async fn read_path(resp: Response) -> Result<PathResponse, ApiError> {
    let status = resp.status();
    let body = resp.text().await.map_err(transport)?;
    decode_path_response(status, &body)
}

impl BoardApi for HttpApi {
    type File = File;

    async fn send_file(&self, file: &File) -> Result<PathResponse, ApiError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(js_error)?;
        let resp = Request::post(&self.endpoints.url(&self.endpoints.send_file))
            .body(form)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_path(resp).await
    }

    async fn generate_board(&self) -> Result<PathResponse, ApiError> {
        let resp = Request::get(&self.endpoints.url(&self.endpoints.generate_board))
            .send()
            .await
            .map_err(transport)?;
        read_path(resp).await
    }

    async fn complete_board(&self, req: &FileNameRequest) -> Result<PathResponse, ApiError> {
        let resp = self.post_json(&self.endpoints.complete_board, req).await?;
        read_path(resp).await
    }

    async fn render_board(&self, req: &FileNameRequest) -> Result<PathResponse, ApiError> {
        let resp = self.post_json(&self.endpoints.render_board, req).await?;
        read_path(resp).await
    }

    async fn download_file(&self, req: &FileNameRequest) -> Result<Vec<u8>, ApiError> {
        let resp = self.post_json(&self.endpoints.download_file, req).await?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.map_err(transport)?;
            check_status(status, &body)?;
        }
        resp.binary().await.map_err(transport)
    }
}
