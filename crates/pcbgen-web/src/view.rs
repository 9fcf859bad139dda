use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use pcbgen_client::{BoardView, NoticeKind, Phase};
use yew::prelude::*;

use crate::files::save_bytes;
use crate::state::{Mode, NOTICE_TIMEOUT_MS};

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardImage {
    pub id: String,
    pub src: String,
}

/// Everything on the page that the flows can change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub mode: Mode,
    pub waiting: bool,
    pub phase: Phase,
    pub drag_active: bool,
    pub notice: Option<Notice>,
    pub image: Option<BoardImage>,
}

pub enum UiAction {
    SetMode(Mode),
    Notify(Notice),
    ClearNotice,
    /// Drop the notice only if it is still the one with this id.
    ExpireNotice(u64),
    Waiting(bool),
    Phase(Phase),
    DragActive(bool),
    ShowImage(BoardImage),
}

impl Reducible for UiState {
    type Action = UiAction;

    fn reduce(self: Rc<Self>, action: UiAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            UiAction::SetMode(mode) => next.mode = mode,
            UiAction::Notify(notice) => next.notice = Some(notice),
            UiAction::ClearNotice => next.notice = None,
            UiAction::ExpireNotice(id) => {
                if next.notice.as_ref().map(|n| n.id) == Some(id) {
                    next.notice = None;
                }
            }
            UiAction::Waiting(w) => next.waiting = w,
            UiAction::Phase(p) => next.phase = p,
            UiAction::DragActive(d) => next.drag_active = d,
            UiAction::ShowImage(image) => {
                next.image = Some(image);
                next.drag_active = false;
            }
        }
        Rc::new(next)
    }
}

fn bump(counter: &Cell<u64>) -> u64 {
    let next = counter.get() + 1;
    counter.set(next);
    next
}

/// [`BoardView`] backed by the page's reducer.
pub struct YewView {
    dispatcher: UseReducerDispatcher<UiState>,
    next_notice: Cell<u64>,
    next_image: Cell<u64>,
}

impl YewView {
    pub fn new(dispatcher: UseReducerDispatcher<UiState>) -> Self {
        Self {
            dispatcher,
            next_notice: Cell::new(0),
            next_image: Cell::new(0),
        }
    }
}

impl BoardView for YewView {
    fn notify(&self, kind: NoticeKind, message: &str) {
        let id = bump(&self.next_notice);
        self.dispatcher.dispatch(UiAction::Notify(Notice {
            id,
            kind,
            message: message.to_string(),
        }));
        let dispatcher = self.dispatcher.clone();
        Timeout::new(NOTICE_TIMEOUT_MS, move || {
            dispatcher.dispatch(UiAction::ExpireNotice(id));
        })
        .forget();
    }

    fn clear_notice(&self) {
        self.dispatcher.dispatch(UiAction::ClearNotice);
    }

    fn set_waiting(&self, waiting: bool) {
        self.dispatcher.dispatch(UiAction::Waiting(waiting));
    }

    fn phase_changed(&self, phase: Phase) {
        self.dispatcher.dispatch(UiAction::Phase(phase));
    }

    fn show_board_image(&self, image_path: &str) {
        // Fresh id per image so the browser never reuses the previous element.
        let id = format!("img{}", bump(&self.next_image));
        self.dispatcher.dispatch(UiAction::ShowImage(BoardImage {
            id,
            src: image_path.to_string(),
        }));
    }

    fn save_file(&self, file_name: &str, bytes: Vec<u8>) {
        if let Err(e) = save_bytes(file_name, &bytes) {
            log::error!("saving {file_name} failed: {e}");
        }
    }
}

/// Wait indicator text for the stage the page is in.
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Working on your board...",
        Phase::Uploading => "Uploading board...",
        Phase::Generating => "Generating board...",
        Phase::Suggesting => "Suggesting board completion...",
        Phase::Rendering => "Rendering board...",
        Phase::Downloading => "Downloading board...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: u64) -> Notice {
        Notice {
            id,
            kind: NoticeKind::Success,
            message: "Rendering board...".into(),
        }
    }

    #[test]
    fn stale_expiry_keeps_newer_notice() {
        let s = Rc::new(UiState::default())
            .reduce(UiAction::Notify(notice(1)))
            .reduce(UiAction::Notify(notice(2)))
            .reduce(UiAction::ExpireNotice(1));
        assert_eq!(s.notice.as_ref().map(|n| n.id), Some(2));

        let s = s.reduce(UiAction::ExpireNotice(2));
        assert!(s.notice.is_none());
    }

    #[test]
    fn new_image_clears_drag_highlight() {
        let s = Rc::new(UiState::default())
            .reduce(UiAction::DragActive(true))
            .reduce(UiAction::ShowImage(BoardImage {
                id: "img1".into(),
                src: "static/files/a.png".into(),
            }));
        assert!(!s.drag_active);
        assert_eq!(s.image.as_ref().map(|i| i.src.as_str()), Some("static/files/a.png"));
    }

    #[test]
    fn ids_never_repeat() {
        let counter = Cell::new(0);
        let ids: Vec<_> = (0..3).map(|_| format!("img{}", bump(&counter))).collect();
        assert_eq!(ids, ["img1", "img2", "img3"]);
    }

    #[test]
    fn phase_reaches_ui_state() {
        let s = Rc::new(UiState::default()).reduce(UiAction::Phase(Phase::Rendering));
        assert_eq!(s.phase, Phase::Rendering);
        assert_eq!(phase_label(s.phase), "Rendering board...");
    }
}
