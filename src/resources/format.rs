//! Plain-text rendering of resource lists.
//!
//! Rendering is deterministic: the same items always produce the same text.

use std::fmt::Write;

use crate::resources::{Activity, Helpline, Quote, ResourceItem, ResourceKind, Restaurant};

/// Returned for kind labels that are not one of the four collections.
pub const UNKNOWN_KIND_MESSAGE: &str =
    "I don't have any information about that kind of resource right now.";

/// Render `items` under the header for the kind named by `kind`
/// (`food`, `activity`, `helpline`, `quote`, or a plural alias).
pub fn format_resource_block(kind: &str, items: &[ResourceItem]) -> String {
    match kind.parse::<ResourceKind>() {
        Ok(kind) => format_block(kind, items),
        Err(_) => UNKNOWN_KIND_MESSAGE.to_string(),
    }
}

/// Render `items` under the header for `kind`. Each item is laid out by its
/// own variant.
pub fn format_block(kind: ResourceKind, items: &[ResourceItem]) -> String {
    if items.is_empty() {
        return format!(
            "Sorry, I couldn't find any {} resources right now.",
            kind.noun()
        );
    }

    let mut out = String::from(header(kind));
    out.push_str("\n\n");
    let rendered: Vec<String> = items.iter().map(render_item).collect();
    out.push_str(&rendered.join("\n"));
    out
}

fn header(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Restaurant => "Here are a few places where you could get something to eat:",
        ResourceKind::Activity => "Here are some activities that might help you feel better:",
        ResourceKind::Helpline => {
            "You don't have to face this alone. These services are ready to listen:"
        }
        ResourceKind::Quote => "Here's something to hold on to:",
    }
}

fn render_item(item: &ResourceItem) -> String {
    match item {
        ResourceItem::Restaurant(r) => render_restaurant(r),
        ResourceItem::Activity(a) => render_activity(a),
        ResourceItem::Helpline(h) => render_helpline(h),
        ResourceItem::Quote(q) => render_quote(q),
    }
}

fn render_restaurant(r: &Restaurant) -> String {
    let mut s = format!("- {}: {}", r.name, r.description);
    if let Some(location) = &r.location {
        let _ = write!(s, "\n  Location: {location}");
    }
    push_link(&mut s, r.link.as_deref());
    s
}

fn render_activity(a: &Activity) -> String {
    let mut s = format!("- {}: {}", a.name, a.description);
    push_link(&mut s, a.link.as_deref());
    s
}

fn render_helpline(h: &Helpline) -> String {
    let mut s = format!("- {}", h.name);
    if let Some(phone) = &h.phone {
        let _ = write!(s, " ({phone})");
    }
    let _ = write!(s, ": {}", h.description);
    push_link(&mut s, h.link.as_deref());
    s
}

fn render_quote(q: &Quote) -> String {
    match &q.author {
        Some(author) => format!("\"{}\"\n  - {}", q.text, author),
        None => format!("\"{}\"", q.text),
    }
}

fn push_link(s: &mut String, link: Option<&str>) {
    if let Some(link) = link {
        let _ = write!(s, "\n  More: {link}");
    }
}
