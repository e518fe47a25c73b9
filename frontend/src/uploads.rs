/// Only Word documents are accepted from drag-and-drop.
pub const ACCEPTED_SUFFIX: &str = ".docx";
pub const UPLOAD_FAILED_TEXT: &str = "Uppladdningen misslyckades. Försök igen.";

/// Anything with a file name; `web_sys::File` in the browser.
pub trait NamedFile {
    fn file_name(&self) -> String;
}

impl NamedFile for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingFile<F> {
    pub id: u64,
    pub file: F,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Failed(String),
}

/// Files waiting to be uploaded, in the order they were added.
#[derive(Clone, Debug)]
pub struct UploadState<F> {
    files: Vec<PendingFile<F>>,
    next_id: u64,
    status: UploadStatus,
}

impl<F> Default for UploadState<F> {
    fn default() -> Self {
        Self { files: Vec::new(), next_id: 1, status: UploadStatus::Idle }
    }
}

impl<F: NamedFile + Clone> UploadState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[PendingFile<F>] {
        &self.files
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    /// Adds dropped files, skipping anything that is not a `.docx`.
    /// Returns how many were added.
    pub fn add_dropped(&mut self, files: impl IntoIterator<Item = F>) -> usize {
        self.add(
            files
                .into_iter()
                .filter(|f| f.file_name().to_lowercase().ends_with(ACCEPTED_SUFFIX)),
        )
    }

    /// Adds files from the picker, which already restricts the type.
    pub fn add_selected(&mut self, files: impl IntoIterator<Item = F>) -> usize {
        self.add(files)
    }

    pub fn remove(&mut self, id: u64) -> bool {
        if self.is_uploading() {
            return false;
        }
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.files.len() != before
    }

    /// Starts an upload and returns the files to put in the form, in order.
    /// `None` when there is nothing to send or an upload is running.
    pub fn begin_upload(&mut self) -> Option<Vec<F>> {
        if self.files.is_empty() || self.is_uploading() {
            return None;
        }
        self.status = UploadStatus::Uploading;
        Some(self.files.iter().map(|f| f.file.clone()).collect())
    }

    pub fn upload_succeeded(&mut self) {
        self.files.clear();
        self.status = UploadStatus::Idle;
    }

    /// Keeps the pending list so the user can retry.
    pub fn upload_failed(&mut self, message: impl Into<String>) {
        self.status = UploadStatus::Failed(message.into());
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.status, UploadStatus::Failed(_)) {
            self.status = UploadStatus::Idle;
        }
    }

    fn add(&mut self, files: impl IntoIterator<Item = F>) -> usize {
        if self.is_uploading() {
            return 0;
        }
        let before = self.files.len();
        for file in files {
            let id = self.next_id;
            self.next_id += 1;
            self.files.push(PendingFile { id, file });
        }
        self.files.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct FakeFile(&'static str);

    impl NamedFile for FakeFile {
        fn file_name(&self) -> String {
            self.0.to_string()
        }
    }

    fn names(state: &UploadState<FakeFile>) -> Vec<&'static str> {
        state.files().iter().map(|f| f.file.0).collect()
    }

    #[test]
    fn dropped_files_are_filtered_by_suffix() {
        let mut state = UploadState::new();
        let added = state.add_dropped([
            FakeFile("mote.docx"),
            FakeFile("bild.png"),
            FakeFile("PROTOKOLL.DOCX"),
            FakeFile("anteckningar.doc"),
        ]);
        assert_eq!(added, 2);
        assert_eq!(names(&state), vec!["mote.docx", "PROTOKOLL.DOCX"]);
    }

    #[test]
    fn selected_files_are_kept_as_is() {
        let mut state = UploadState::new();
        state.add_selected([FakeFile("a.docx"), FakeFile("b.txt")]);
        assert_eq!(names(&state), vec!["a.docx", "b.txt"]);
    }

    #[test]
    fn removed_file_is_not_submitted() {
        let mut state = UploadState::new();
        state.add_selected([FakeFile("a.docx"), FakeFile("b.docx"), FakeFile("c.docx")]);
        let b = state.files()[1].id;

        assert!(state.remove(b));
        assert!(!state.remove(b));

        let form = state.begin_upload().unwrap();
        assert_eq!(form, vec![FakeFile("a.docx"), FakeFile("c.docx")]);
    }

    #[test]
    fn same_file_twice_gets_distinct_entries() {
        let mut state = UploadState::new();
        state.add_selected([FakeFile("a.docx")]);
        state.add_selected([FakeFile("a.docx")]);
        let first = state.files()[0].id;
        state.remove(first);
        assert_eq!(names(&state), vec!["a.docx"]);
    }

    #[test]
    fn nothing_to_upload_when_empty() {
        let mut state: UploadState<FakeFile> = UploadState::new();
        assert!(state.begin_upload().is_none());
        assert_eq!(state.status(), &UploadStatus::Idle);
    }

    #[test]
    fn list_is_frozen_while_uploading() {
        let mut state = UploadState::new();
        state.add_selected([FakeFile("a.docx")]);
        let id = state.files()[0].id;
        state.begin_upload().unwrap();

        assert!(state.begin_upload().is_none());
        assert_eq!(state.add_selected([FakeFile("b.docx")]), 0);
        assert!(!state.remove(id));
        assert_eq!(names(&state), vec!["a.docx"]);
    }

    #[test]
    fn failure_keeps_files_and_error_is_dismissible() {
        let mut state = UploadState::new();
        state.add_selected([FakeFile("a.docx"), FakeFile("b.docx")]);
        state.begin_upload().unwrap();
        state.upload_failed(UPLOAD_FAILED_TEXT);

        assert_eq!(state.status(), &UploadStatus::Failed(UPLOAD_FAILED_TEXT.to_string()));
        assert_eq!(names(&state), vec!["a.docx", "b.docx"]);

        state.dismiss_error();
        assert_eq!(state.status(), &UploadStatus::Idle);
        assert_eq!(state.begin_upload().unwrap().len(), 2);
    }

    #[test]
    fn success_clears_the_list() {
        let mut state = UploadState::new();
        state.add_selected([FakeFile("a.docx")]);
        state.begin_upload().unwrap();
        state.upload_succeeded();
        assert!(state.files().is_empty());
        assert_eq!(state.status(), &UploadStatus::Idle);
    }
}
