//! HTML serialization (tree → HTML export)
//!
//! Pipeline: document tree → RcDom fragment → HTML string

use crate::error::FormatError;
use crate::model::{Document, Element, ElementKind, Node, Text};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Style applied to exported mentions.
const MENTION_STYLE: &str = "color: darkblue";

/// Serialize a whole document: the concatenation of its top-level nodes.
pub fn serialize_document(doc: &Document) -> Result<String, FormatError> {
    let container = create_element("div", vec![]);
    for node in &doc.children {
        append_node(&container, node);
    }
    let html = serialize_children(&container)?;
    tracing::debug!(
        blocks = doc.children.len(),
        bytes = html.len(),
        "serialized document to html"
    );
    Ok(html)
}

/// Serialize a single node (text or element) to an HTML fragment.
pub fn serialize_node(node: &Node) -> Result<String, FormatError> {
    let container = create_element("div", vec![]);
    append_node(&container, node);
    serialize_children(&container)
}

fn append_node(parent: &Handle, node: &Node) {
    match node {
        Node::Text(text) => append_text(parent, text),
        Node::Element(element) => append_element(parent, element),
    }
}

/// Text leaves wrap in application order: bold first, then underline, code
/// and italic, each new wrapper going around the previous one.
fn append_text(parent: &Handle, text: &Text) {
    let wraps = [
        (text.marks.bold, "strong"),
        (text.marks.underline, "u"),
        (text.marks.code, "code"),
        (text.marks.italic, "em"),
    ];

    let mut current = create_text(&text.text);
    for (_, tag) in wraps.iter().filter(|(set, _)| *set) {
        let wrapper = create_element(tag, vec![]);
        wrapper.children.borrow_mut().push(current);
        current = wrapper;
    }
    parent.children.borrow_mut().push(current);
}

fn append_element(parent: &Handle, element: &Element) {
    let tag = match &element.kind {
        ElementKind::Mention { character } => {
            let span = create_element("span", vec![("style", MENTION_STYLE)]);
            span.children.borrow_mut().push(create_text(character));
            parent.children.borrow_mut().push(span);
            return;
        }
        ElementKind::BlockQuote => {
            let quote = create_element("blockquote", vec![]);
            let para = create_element("p", vec![]);
            append_children(&para, &element.children);
            quote.children.borrow_mut().push(para);
            parent.children.borrow_mut().push(quote);
            return;
        }
        ElementKind::Paragraph => "p",
        ElementKind::HeadingOne => "h1",
        ElementKind::HeadingTwo => "h2",
        ElementKind::NumberedList => "ol",
        ElementKind::BulletedList => "ul",
        ElementKind::ListItem => "li",
        ElementKind::Other(_) => {
            append_children(parent, &element.children);
            return;
        }
    };

    let node = create_element(tag, vec![]);
    append_children(&node, &element.children);
    parent.children.borrow_mut().push(node);
}

fn append_children(parent: &Handle, children: &[Node]) {
    for child in children {
        append_node(parent, child);
    }
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(markup5ever_rcdom::Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(markup5ever_rcdom::Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of a container, leaving the container itself out.
fn serialize_children(container: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };

    let serializable = SerializableHandle::from(container.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| FormatError::SerializationError(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
