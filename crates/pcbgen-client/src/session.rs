/// Which network stage a flow is waiting on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Generating,
    Suggesting,
    Rendering,
    Downloading,
}

/// Handle for one user-triggered flow while it is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowId(u64);

/// Per-page session state. Lives as long as the page; nothing is persisted.
///
/// `None` for either path means no operation of that kind has succeeded
/// since the last failure. Flows may overlap; each one keeps its own stage
/// and the page reports the stage of the most recently started flow still
/// running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    next_flow: u64,
    active: Vec<(FlowId, Phase)>,
    uploaded_file_path: Option<String>,
    generated_file_path: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.active.last().map(|(_, p)| *p).unwrap_or_default()
    }

    pub fn in_flight(&self) -> usize {
        self.active.len()
    }

    pub fn uploaded_file_path(&self) -> Option<&str> {
        self.uploaded_file_path.as_deref()
    }

    pub fn generated_file_path(&self) -> Option<&str> {
        self.generated_file_path.as_deref()
    }

    pub fn begin(&mut self, phase: Phase) -> FlowId {
        self.next_flow += 1;
        let flow = FlowId(self.next_flow);
        self.active.push((flow, phase));
        flow
    }

    /// Move a running flow to its next stage. Finished flows are ignored.
    pub fn advance(&mut self, flow: FlowId, phase: Phase) {
        if let Some(entry) = self.active.iter_mut().find(|(id, _)| *id == flow) {
            entry.1 = phase;
        }
    }

    pub fn finish(&mut self, flow: FlowId) {
        self.active.retain(|(id, _)| *id != flow);
    }

    /// A new upload forgets the previous one before the request goes out.
    pub fn begin_upload(&mut self) -> FlowId {
        self.uploaded_file_path = None;
        self.begin(Phase::Uploading)
    }

    pub fn upload_succeeded(&mut self, flow: FlowId, path: String) {
        self.uploaded_file_path = Some(path);
        self.advance(flow, Phase::Suggesting);
    }

    /// The rendered path becomes the download candidate as soon as the
    /// render is requested.
    pub fn begin_render(&mut self, flow: FlowId, path: String) {
        self.generated_file_path = Some(path);
        self.advance(flow, Phase::Rendering);
    }

    /// Any server failure invalidates both stored paths. The failing flow
    /// still has to be finished by its owner.
    pub fn fail(&mut self) {
        self.uploaded_file_path = None;
        self.generated_file_path = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_chain_transitions() {
        let mut s = Session::new();
        let first = s.begin(Phase::Rendering);
        s.begin_render(first, "old.brd".into());
        s.finish(first);

        let flow = s.begin_upload();
        assert_eq!(s.phase(), Phase::Uploading);
        assert_eq!(s.uploaded_file_path(), None);
        assert_eq!(s.generated_file_path(), Some("old.brd"));

        s.upload_succeeded(flow, "u_board.brd".into());
        assert_eq!(s.phase(), Phase::Suggesting);
        assert_eq!(s.uploaded_file_path(), Some("u_board.brd"));

        s.begin_render(flow, "gen.brd".into());
        assert_eq!(s.phase(), Phase::Rendering);
        s.finish(flow);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.generated_file_path(), Some("gen.brd"));
        assert_eq!(s.uploaded_file_path(), Some("u_board.brd"));
    }

    #[test]
    fn fail_clears_paths() {
        let mut s = Session::new();
        let flow = s.begin_upload();
        s.upload_succeeded(flow, "a.brd".into());
        s.begin_render(flow, "b.brd".into());
        s.fail();
        s.finish(flow);
        assert_eq!(s.uploaded_file_path(), None);
        assert_eq!(s.generated_file_path(), None);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn overlapping_flows_stay_busy_until_last_ends() {
        let mut s = Session::new();
        let upload = s.begin_upload();
        let generate = s.begin(Phase::Generating);
        assert_eq!(s.in_flight(), 2);
        assert_eq!(s.phase(), Phase::Generating);

        s.finish(generate);
        assert_eq!(s.phase(), Phase::Uploading);

        s.upload_succeeded(upload, "u.brd".into());
        assert_eq!(s.phase(), Phase::Suggesting);
        s.finish(upload);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.in_flight(), 0);
    }

    #[test]
    fn finished_flow_cannot_be_advanced() {
        let mut s = Session::new();
        let flow = s.begin(Phase::Generating);
        s.finish(flow);
        s.advance(flow, Phase::Rendering);
        assert_eq!(s.phase(), Phase::Idle);
    }
}
