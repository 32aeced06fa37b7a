use arboard::Clipboard;

/// System clipboard access for the export strings.
pub struct ClipboardService;

impl ClipboardService {
    pub fn copy(text: &str) -> Result<(), String> {
        match Clipboard::new() {
            Ok(mut clipboard) => clipboard.set_text(text.to_string()).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
