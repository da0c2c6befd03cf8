//! `:::center` blocks render as a centered `<div>`.

use glossmark_core::{AstTransform, Node, visit_mut};

/// Class marking centered content.
pub const CENTER_CLASS: &str = "centered-content";

/// Gives every `center` container directive a `div` hint with [`CENTER_CLASS`].
///
/// Other hint properties are kept; children are not touched.
pub fn remark_center(root: &mut Node) {
    visit_mut(root, &mut |node| {
        if let Node::ContainerDirective(directive) = node
            && directive.name == "center"
        {
            let hint = directive.hint.get_or_insert_with(Default::default);
            hint.set_element("div");
            hint.set_property("class", CENTER_CLASS);
            log::debug!("Rewrote :::center directive");
        }
    });
}

/// Pipeline pass wrapping [`remark_center`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterPass;

impl AstTransform for CenterPass {
    fn transform(&self, root: &mut Node) {
        remark_center(root);
    }
}
