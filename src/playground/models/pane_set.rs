//! # Pane Set
//!
//! The three panes of a playground, constructed explicitly and handed by
//! reference to whoever needs them.

use crate::playground::events::{EditOrigin, HighlightMode, PaneId};

use super::document_pane::DocumentPane;

/// Seed template shown when no template file is given
pub const DEFAULT_TEMPLATE: &str = "/** xtrasonnet
input payload application/json
output application/xml
*/
{
    root: payload
}";

/// Seed input shown when no input file is given
pub const DEFAULT_INPUT: &str = "{
    \"message\": \"hello world!\"
}";

/// Seed output matching the seed template and input
pub const DEFAULT_OUTPUT: &str = "<?xml version='1.0' encoding='UTF-8'?>
<root>
    <message>hello world!</message>
</root>";

/// Input, Template and Output panes
#[derive(Debug)]
pub struct PaneSet {
    pub input: DocumentPane,
    pub template: DocumentPane,
    pub output: DocumentPane,
}

impl PaneSet {
    /// Build the panes from initial documents
    ///
    /// Input starts in JSON mode, Output in XML mode and Template in plain text.
    pub fn new(
        input: impl Into<String>,
        template: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            input: DocumentPane::editable(PaneId::Input, input, HighlightMode::Json),
            template: DocumentPane::editable(PaneId::Template, template, HighlightMode::PlainText),
            output: DocumentPane::read_only(PaneId::Output, output, HighlightMode::Xml),
        }
    }

    pub fn pane(&self, id: PaneId) -> &DocumentPane {
        match id {
            PaneId::Input => &self.input,
            PaneId::Template => &self.template,
            PaneId::Output => &self.output,
        }
    }

    /// The pane a user edit came from
    pub fn editable_mut(&mut self, origin: EditOrigin) -> &mut DocumentPane {
        match origin {
            EditOrigin::Input => &mut self.input,
            EditOrigin::Template => &mut self.template,
        }
    }
}

impl Default for PaneSet {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_TEMPLATE, DEFAULT_OUTPUT)
    }
}
