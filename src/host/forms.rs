use crate::host::{Doctype, Document, HostAction};

/// One action button on a document form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormButton {
    pub label: &'static str,
    pub action: HostAction,
}

/// What the form view renders for a document in its current state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormLayout {
    pub buttons: Vec<FormButton>,
    pub show_player: bool,
}

/// Buttons and widgets available for `doc`, derived from its status fields
pub fn form_layout(doc: &Document) -> FormLayout {
    let mut layout = FormLayout::default();

    match doc.doc.doctype {
        Doctype::DriftSession => {
            if doc.status() == Some("Active") {
                layout.buttons.push(FormButton {
                    label: "Destroy Remote Session",
                    action: HostAction::DestroyRemoteSession,
                });
            }
            if doc.field_str("video_download_status") == Some("Downloaded") {
                layout.buttons.push(FormButton {
                    label: "Delete Downloaded Videos",
                    action: HostAction::DeleteDownloadedVideos,
                });
                layout.show_player = true;
            }
        }
        Doctype::DriftTest => {
            if matches!(doc.status(), Some("Pending") | Some("Stopped")) {
                layout.buttons.push(FormButton {
                    label: "Execute",
                    action: HostAction::Execute,
                });
            }
        }
        Doctype::DriftTestDefinition => {
            layout.buttons.push(FormButton {
                label: "Test Now",
                action: HostAction::CreateTest,
            });
        }
    }

    layout
}
