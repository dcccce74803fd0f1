use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Element tag that marks the start of a new line of blip content.
pub const LINE_TAG: &str = "line";

pub type Attributes = BTreeMap<String, String>;

/// Content of one sub-document, as the sequence of operation components
/// that initializes it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocOp {
	pub components: Vec<DocComponent>,
}
impl DocOp {
	pub fn new(components: Vec<DocComponent>) -> Self {
		Self { components }
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DocComponent {
	Characters(String),
	ElementStart { tag: String, attributes: Attributes },
	ElementEnd,
	Retain(usize),
	DeleteCharacters(String),
	DeleteElementStart { tag: String, attributes: Attributes },
	DeleteElementEnd,
	ReplaceAttributes { old: Attributes, new: Attributes },
	UpdateAttributes(Attributes),
	AnnotationBoundary { keys: Vec<String> },
}

/// Collates the visible text of a document into a single string.
///
/// Character runs are appended verbatim and a `line` element start becomes a
/// newline. Retains, deletions, attribute changes, and annotation boundaries
/// carry no visible text.
pub fn collate_text(op: &DocOp) -> String {
	let mut text = String::new();

	for component in &op.components {
		match component {
			DocComponent::Characters(chars) => text.push_str(chars),
			DocComponent::ElementStart { tag, .. } if tag == LINE_TAG => text.push('\n'),
			_ => {},
		}
	}

	text
}
