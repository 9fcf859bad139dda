use std::cell::RefCell;

use crate::api::BoardApi;
use crate::error::{ApiError, FlowError};
use crate::session::{FlowId, Phase, Session};
use crate::types::{download_file_name, FileNameRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// UI effects the controller needs. All methods are fire-and-forget.
pub trait BoardView {
    /// Replace the current notification with a new one.
    fn notify(&self, kind: NoticeKind, message: &str);
    fn clear_notice(&self);
    /// Show or hide the "wait" indicator.
    fn set_waiting(&self, waiting: bool);
    /// The page's flow state after every session change.
    fn phase_changed(&self, phase: Phase);
    /// Replace the display area contents with a single image.
    fn show_board_image(&self, image_path: &str);
    /// Hand a downloaded file to the browser's save-as machinery.
    fn save_file(&self, file_name: &str, bytes: Vec<u8>);
}

/// Sequences the upload, generate, suggest, render and download flows.
///
/// Every public flow applies the UI error policy itself before returning the
/// error, so callers only need to log it. The session is never borrowed
/// across an `.await`, which lets several flows interleave on one thread;
/// whichever response handler runs last wins.
pub struct Controller<A, V> {
    api: A,
    view: V,
    session: RefCell<Session>,
}

impl<A: BoardApi, V: BoardView> Controller<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            session: RefCell::new(Session::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Upload the first dropped file. An empty drop is ignored.
    pub async fn drop_files(&self, files: Vec<A::File>) -> Result<(), FlowError> {
        match files.first() {
            Some(file) => {
                if files.len() > 1 {
                    log::debug!("{} files dropped, uploading the first", files.len());
                }
                self.upload(file).await
            }
            None => {
                log::debug!("drop without files ignored");
                Ok(())
            }
        }
    }

    /// Upload a board, then ask the server to complete it and render the result.
    pub async fn upload(&self, file: &A::File) -> Result<(), FlowError> {
        log::info!("uploading board");
        self.view.set_waiting(true);
        self.view.notify(NoticeKind::Success, "Uploading board...");
        let flow = self.update(Session::begin_upload);

        let result = self.upload_stages(flow, file).await;
        self.update(|s| s.finish(flow));
        result
    }

    /// Ask the server for a brand new board and render it.
    pub async fn generate_board(&self) -> Result<(), FlowError> {
        log::info!("generating board");
        self.view.notify(NoticeKind::Success, "Generating board...");
        let flow = self.update(|s| s.begin(Phase::Generating));

        let result = self.generate_stages(flow).await;
        self.update(|s| s.finish(flow));
        result
    }

    /// Re-run completion on the last uploaded board.
    pub async fn suggest_again(&self) -> Result<(), FlowError> {
        let uploaded = self.session.borrow().uploaded_file_path().map(str::to_owned);
        let Some(path) = uploaded else {
            return self.refuse(FlowError::NoUpload);
        };
        let flow = self.update(|s| s.begin(Phase::Suggesting));

        let result = self.suggest_stages(flow, path).await;
        self.update(|s| s.finish(flow));
        result
    }

    /// Render a board file and show the image. An empty path is a no-op.
    pub async fn render_board(&self, path: &str) -> Result<(), FlowError> {
        if path.is_empty() {
            return Ok(());
        }
        let flow = self.update(|s| s.begin(Phase::Rendering));

        let result = self.render_stage(flow, path).await;
        self.update(|s| s.finish(flow));
        result
    }

    /// Fetch the last generated file and offer it as a download.
    pub async fn download(&self) -> Result<(), FlowError> {
        let generated = self.session.borrow().generated_file_path().map(str::to_owned);
        let Some(path) = generated else {
            return self.refuse(FlowError::NothingGenerated);
        };
        log::info!("downloading {path}");
        let flow = self.update(|s| s.begin(Phase::Downloading));

        let req = FileNameRequest::new(path.as_str());
        let result = self
            .guard(self.api.download_file(&req).await)
            .map(|bytes| self.view.save_file(download_file_name(&path), bytes));
        self.update(|s| s.finish(flow));
        result
    }

    async fn upload_stages(&self, flow: FlowId, file: &A::File) -> Result<(), FlowError> {
        let resp = self.guard(self.api.send_file(file).await)?;
        log::info!("board uploaded as {}", resp.path);
        self.update(|s| s.upload_succeeded(flow, resp.path.clone()));
        self.suggest_stages(flow, resp.path).await
    }

    async fn generate_stages(&self, flow: FlowId) -> Result<(), FlowError> {
        let resp = self.guard(self.api.generate_board().await)?;
        self.render_stage(flow, &resp.path).await
    }

    async fn suggest_stages(&self, flow: FlowId, path: String) -> Result<(), FlowError> {
        log::info!("suggesting completion for {path}");
        self.view
            .notify(NoticeKind::Success, "Suggesting board completion...");
        self.update(|s| s.advance(flow, Phase::Suggesting));

        let req = FileNameRequest::new(path);
        let resp = self.guard(self.api.complete_board(&req).await)?;
        self.render_stage(flow, &resp.path).await
    }

    // An empty path (what the server sends for "nothing to show") ends the
    // chain without a request or a notice.
    async fn render_stage(&self, flow: FlowId, path: &str) -> Result<(), FlowError> {
        if path.is_empty() {
            log::debug!("no board path to render");
            return Ok(());
        }
        log::info!("rendering {path}");
        self.view.notify(NoticeKind::Success, "Rendering board...");
        self.update(|s| s.begin_render(flow, path.to_string()));

        let req = FileNameRequest::new(path);
        let resp = self.guard(self.api.render_board(&req).await)?;
        self.view.clear_notice();
        self.view.show_board_image(&resp.path);
        self.view.set_waiting(false);
        Ok(())
    }

    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let (out, phase) = {
            let mut session = self.session.borrow_mut();
            let out = f(&mut session);
            (out, session.phase())
        };
        self.view.phase_changed(phase);
        out
    }

    fn guard<T>(&self, result: Result<T, ApiError>) -> Result<T, FlowError> {
        result.map_err(|e| {
            log::warn!("board server error: {e}");
            self.view.set_waiting(false);
            self.update(Session::fail);
            self.view.notify(NoticeKind::Error, &e.user_message());
            FlowError::Api(e)
        })
    }

    fn refuse(&self, err: FlowError) -> Result<(), FlowError> {
        log::debug!("refused: {err}");
        self.view.notify(NoticeKind::Error, &err.to_string());
        Err(err)
    }
}
