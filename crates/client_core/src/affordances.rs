//! Renderer-agnostic models of the widgets the upload controller drives.
//!
//! Each affordance holds exactly the state a front end needs to draw it: text, enabled flags
//! and the style classes the markup layer understands (`drag`, `hidden`, `low`, `high`).

use std::{fs, io, path::Path};

pub const ANALYZE_LABEL: &str = "Analyze";
pub const ANALYZING_LABEL: &str = "Analyzing...";
pub const DRAG_CLASS: &str = "drag";
pub const HIDDEN_CLASS: &str = "hidden";
pub const DROP_ZONE_BASE_CLASS: &str = "drop-zone";
pub const RESULT_CARD_BASE_CLASS: &str = "result-card";
pub const RISK_LABEL_BASE_CLASS: &str = "value badge";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn from_attribute(attribute: &str) -> Self {
        let mut classes = Self::default();
        classes.reset(attribute);
        classes
    }

    /// Replaces every class with the whitespace-separated classes of `attribute`.
    pub fn reset(&mut self, attribute: &str) {
        self.0.clear();
        for class in attribute.split_whitespace() {
            self.add(class);
        }
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|existing| existing != class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|existing| existing == class)
    }

    pub fn attribute(&self) -> String {
        self.0.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// Content type guessed from the file extension.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// The active selection, as a browser file input would hold it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePicker {
    files: Vec<SelectedFile>,
}

impl FilePicker {
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn set_files(&mut self, files: Vec<SelectedFile>) {
        self.files = files;
    }

    pub fn first(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZone {
    pub classes: ClassList,
}

impl Default for DropZone {
    fn default() -> Self {
        Self {
            classes: ClassList::from_attribute(DROP_ZONE_BASE_CLASS),
        }
    }
}

impl DropZone {
    pub fn is_drag_active(&self) -> bool {
        self.classes.contains(DRAG_CLASS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeTrigger {
    pub enabled: bool,
    pub label: String,
}

impl Default for AnalyzeTrigger {
    fn default() -> Self {
        Self {
            enabled: true,
            label: ANALYZE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDisplay {
    pub card_classes: ClassList,
    pub risk_label: String,
    pub risk_classes: ClassList,
    pub confidence: String,
    pub disclaimer: String,
    pub probabilities: Vec<String>,
}

impl Default for ResultDisplay {
    fn default() -> Self {
        Self {
            card_classes: ClassList::from_attribute(&format!(
                "{RESULT_CARD_BASE_CLASS} {HIDDEN_CLASS}"
            )),
            risk_label: shared::domain::UNRECOGNIZED_LABEL.to_string(),
            risk_classes: ClassList::from_attribute(RISK_LABEL_BASE_CLASS),
            confidence: String::new(),
            disclaimer: String::new(),
            probabilities: Vec::new(),
        }
    }
}

impl ResultDisplay {
    pub fn is_visible(&self) -> bool {
        !self.card_classes.contains(HIDDEN_CLASS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusText {
    pub text: String,
}

/// Everything the controller is bound to, handed over at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affordances {
    pub file_picker: FilePicker,
    pub drop_zone: DropZone,
    pub trigger: AnalyzeTrigger,
    pub result: ResultDisplay,
    pub status: StatusText,
}

/// A drag-and-drop notification. Handlers call [`DragEvent::prevent_default`] so the host
/// does not fall back to opening the dragged payload itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragEvent {
    pub files: Vec<SelectedFile>,
    default_prevented: bool,
}

impl DragEvent {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self {
            files,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
